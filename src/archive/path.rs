//! Attempt archive path derivation.
//!
//! Every archived attempt lands at a path derived from the druid's treeified
//! segments plus a second-precision UTC timestamp, so repeated attempts for
//! the same druid get distinct files (attempts within the same second
//! overwrite, which is accepted).

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::druid::Druid;

/// Current UTC time as an ISO-8601 string with second precision,
/// e.g. `2026-08-25T12:34:56Z`.
fn current_time_str() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Derives the archive file path for one attempt on `druid` under `base_dir`.
///
/// `ab123cd4567` under `/out` maps to
/// `/out/ab/123/cd/4567/<timestamp>.json`. The timestamp is taken at call
/// time; the function performs no filesystem access.
pub fn derive_attempt_path(druid: &Druid, base_dir: &Path) -> PathBuf {
    druid
        .treeified_path(base_dir)
        .join(format!("{}.json", current_time_str()))
}
