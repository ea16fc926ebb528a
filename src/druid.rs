//! Druid identifier parsing and path treeification.
//!
//! A druid is an 11-character repository identifier of the form
//! `bb123cc4567` (two letters, three digits, two letters, four digits),
//! optionally carrying a `druid:` prefix. Storage layouts split the bare
//! identifier into four segments, so `bb123cc4567` becomes the directory
//! chain `bb/123/cc/4567`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::DruidError;

/// Pattern for a druid identifier, with or without the `druid:` prefix.
pub const DRUID_PATTERN: &str = r"^(?:druid:)?([a-z]{2})([0-9]{3})([a-z]{2})([0-9]{4})$";

static DRUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DRUID_PATTERN).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in DRUID_RE: {}. This is a programming error.",
            DRUID_PATTERN, e
        )
    })
});

// Segment boundaries within the bare 11-character identifier: 2-3-2-4.
const SEGMENT_BOUNDS: [(usize, usize); 4] = [(0, 2), (2, 5), (5, 7), (7, 11)];

/// A validated druid identifier, stored without the `druid:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Druid {
    id: String,
}

impl Druid {
    /// Parses and normalizes a druid identifier.
    ///
    /// Accepts both the bare form (`bb123cc4567`) and the prefixed form
    /// (`druid:bb123cc4567`); the stored identifier is always the bare form.
    ///
    /// # Errors
    ///
    /// Returns `DruidError::Malformed` if the input does not match the
    /// druid scheme.
    pub fn parse(input: &str) -> Result<Self, DruidError> {
        if DRUID_RE.is_match(input) {
            Ok(Self {
                id: input.trim_start_matches("druid:").to_string(),
            })
        } else {
            Err(DruidError::Malformed(input.to_string()))
        }
    }

    /// Returns the bare identifier without the `druid:` prefix.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Splits the bare identifier into its four treeified segments.
    ///
    /// `bb123cc4567` yields `["bb", "123", "cc", "4567"]`.
    pub fn treeified_segments(&self) -> [&str; 4] {
        SEGMENT_BOUNDS.map(|(start, end)| &self.id[start..end])
    }

    /// Builds the treeified directory path for this druid under `base`.
    pub fn treeified_path(&self, base: &Path) -> PathBuf {
        self.treeified_segments()
            .iter()
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }
}

impl FromStr for Druid {
    type Err = DruidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Druid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_druid() {
        let druid = Druid::parse("bb123cc4567").expect("valid druid");
        assert_eq!(druid.as_str(), "bb123cc4567");
    }

    #[test]
    fn test_parse_strips_prefix() {
        let druid = Druid::parse("druid:bb123cc4567").expect("valid druid");
        assert_eq!(druid.as_str(), "bb123cc4567");
    }

    #[test]
    fn test_prefixed_and_bare_forms_are_equal() {
        let bare = Druid::parse("bb123cc4567").expect("valid druid");
        let prefixed = Druid::parse("druid:bb123cc4567").expect("valid druid");
        assert_eq!(bare, prefixed);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in [
            "",
            "druid:",
            "bb123cc456",     // digit group too short
            "bb123cc45678",   // digit group too long
            "BB123CC4567",    // uppercase letters
            "bb123cc456z",    // letter where digit expected
            "1b123cc4567",    // digit where letter expected
            "druid:druid:bb123cc4567",
            "druid bb123cc4567",
            " bb123cc4567",
            "bb123cc4567 ",
        ] {
            let result = Druid::parse(input);
            assert_eq!(
                result,
                Err(DruidError::Malformed(input.to_string())),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_treeified_segments() {
        let druid = Druid::parse("ab123cd4567").expect("valid druid");
        assert_eq!(druid.treeified_segments(), ["ab", "123", "cd", "4567"]);
    }

    #[test]
    fn test_treeified_path() {
        let druid = Druid::parse("druid:ab123cd4567").expect("valid druid");
        let path = druid.treeified_path(Path::new("/tmp/cocina"));
        assert_eq!(path, PathBuf::from("/tmp/cocina/ab/123/cd/4567"));
    }

    #[test]
    fn test_from_str() {
        let druid: Druid = "xk899zz1234".parse().expect("valid druid");
        assert_eq!(druid.as_str(), "xk899zz1234");
    }

    #[test]
    fn test_display_shows_bare_form() {
        let druid = Druid::parse("druid:bb123cc4567").expect("valid druid");
        assert_eq!(druid.to_string(), "bb123cc4567");
    }
}
