//! Version checking against declared npm ranges
//!
//! This module provides:
//! - Validation of the `--version` argument
//! - npm range parsing on top of the `semver` crate
//! - The OK / MISMATCH / unspecified judgement for a declared range

mod range;

pub use range::NpmRange;

use crate::domain::VersionJudgement;
use crate::error::VersionError;
use semver::Version;

/// Parse the CLI-supplied version as a concrete semantic version
///
/// Accepts a leading `=` or `v` the way npm does.
pub fn parse_required_version(value: &str) -> Result<Version, VersionError> {
    let trimmed = value.trim();
    let stripped = trimmed.strip_prefix('=').unwrap_or(trimmed);
    let stripped = stripped.strip_prefix('v').unwrap_or(stripped);

    Version::parse(stripped).map_err(|_| VersionError::InvalidVersionFormat {
        value: value.to_string(),
    })
}

/// Judges declared ranges against an optional required version
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMatcher {
    required: Option<Version>,
}

impl VersionMatcher {
    /// Create a matcher for the given required version
    pub fn new(required: Option<Version>) -> Self {
        Self { required }
    }

    /// The version being checked, if any
    pub fn required(&self) -> Option<&Version> {
        self.required.as_ref()
    }

    /// Evaluate a declared range
    ///
    /// Ranges that do not parse never satisfy; they are authored by
    /// repository owners and must not abort a scan.
    pub fn evaluate(&self, range: &str) -> VersionJudgement {
        let Some(required) = &self.required else {
            return VersionJudgement::Unspecified;
        };

        match NpmRange::parse(range) {
            Some(parsed) if parsed.satisfies(required) => VersionJudgement::Ok,
            Some(_) => VersionJudgement::Mismatch,
            None => {
                tracing::debug!("unparseable version range '{}', treating as mismatch", range);
                VersionJudgement::Mismatch
            }
        }
    }
}
