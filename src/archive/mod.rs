//! Archiving raw response payloads to druid-derived file paths.
//!
//! Archiving is best effort: any failure is logged and degrades to "no path
//! recorded" so the attempt workflow always continues to the attempt record.

pub mod path;

use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use crate::config::OutputPolicy;
use crate::druid::Druid;
use crate::error_handling::ArchiveError;
use crate::fetch::ObjectResponse;

/// Archives a response payload according to `policy`.
///
/// Returns the path written, or `None` when the policy disables output for
/// this outcome kind or when writing failed. With output disabled nothing on
/// the filesystem is touched, not even the base directory.
pub fn archive_response(
    druid: &str,
    response: &ObjectResponse,
    policy: &OutputPolicy,
) -> Option<PathBuf> {
    if !policy.should_output {
        return None;
    }

    match write_response(druid, response, &policy.location) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Failed to archive response for {druid}: {e}");
            None
        }
    }
}

/// Serializes the response envelope and writes it under `base_dir`.
fn write_response(
    druid: &str,
    response: &ObjectResponse,
    base_dir: &Path,
) -> Result<PathBuf, ArchiveError> {
    let parsed = Druid::parse(druid)?;
    let target = path::derive_attempt_path(&parsed, base_dir);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let document = serde_json::to_string(response)?;
    fs::write(&target, document)?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample_response() -> ObjectResponse {
        ObjectResponse {
            status: 200,
            reason_phrase: "OK".to_string(),
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: r#"{"type":"DRO"}"#.to_string(),
        }
    }

    #[test]
    fn test_disabled_policy_writes_nothing() {
        let tmp = TempDir::new().expect("temp dir");
        let base = tmp.path().join("never-created");
        let policy = OutputPolicy {
            should_output: false,
            location: base.clone(),
        };

        let result = archive_response("bb123cc4567", &sample_response(), &policy);

        assert!(result.is_none());
        assert!(!base.exists());
    }

    #[test]
    fn test_archive_writes_decodable_document() {
        let tmp = TempDir::new().expect("temp dir");
        let policy = OutputPolicy {
            should_output: true,
            location: tmp.path().to_path_buf(),
        };
        let response = sample_response();

        let path = archive_response("bb123cc4567", &response, &policy).expect("archived path");

        assert!(path.starts_with(tmp.path().join("bb/123/cc/4567")));
        let written = std::fs::read_to_string(&path).expect("read archive file");
        let decoded: ObjectResponse = serde_json::from_str(&written).expect("decode archive file");
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_invalid_druid_degrades_to_none() {
        let tmp = TempDir::new().expect("temp dir");
        let policy = OutputPolicy {
            should_output: true,
            location: tmp.path().to_path_buf(),
        };

        let result = archive_response("not-a-druid", &sample_response(), &policy);

        assert!(result.is_none());
        // Nothing was written under the base directory either
        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .expect("read temp dir")
            .collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_io_failure_degrades_to_none() {
        let tmp = TempDir::new().expect("temp dir");
        // A plain file where the first druid segment directory must go makes
        // create_dir_all fail
        std::fs::write(tmp.path().join("bb"), "in the way").expect("write blocker");
        let policy = OutputPolicy {
            should_output: true,
            location: tmp.path().to_path_buf(),
        };

        let result = archive_response("bb123cc4567", &sample_response(), &policy);

        assert!(result.is_none());
    }
}
