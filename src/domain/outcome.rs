//! Scan outcome types

use serde::Serialize;
use std::fmt;

/// Which package.json section a dependency was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// `dependencies`
    Regular,
    /// `devDependencies`
    Dev,
}

impl DependencyKind {
    /// Both sections, in scan order
    pub const ALL: [DependencyKind; 2] = [DependencyKind::Regular, DependencyKind::Dev];

    /// Returns the package.json key for this section
    pub fn section_key(&self) -> &'static str {
        match self {
            DependencyKind::Regular => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }

    /// Returns the singular label used in absence lines
    pub fn label(&self) -> &'static str {
        match self {
            DependencyKind::Regular => "dependency",
            DependencyKind::Dev => "devDependency",
        }
    }

    /// Returns true for the development section
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyKind::Dev)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section_key())
    }
}

/// Result of checking a required version against a declared range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionJudgement {
    /// No version was requested, nothing compared
    Unspecified,
    /// The required version satisfies the declared range
    Ok,
    /// The required version does not satisfy the declared range
    Mismatch,
}

impl VersionJudgement {
    /// Suffix appended to found lines
    pub fn suffix(&self) -> &'static str {
        match self {
            VersionJudgement::Unspecified => "",
            VersionJudgement::Ok => " OK",
            VersionJudgement::Mismatch => " MISMATCH",
        }
    }
}

/// Whether the target dependency is declared in a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchStatus {
    /// The section exists but does not name the dependency
    Absent,
    /// The section names the dependency with this range
    Present {
        range: String,
        judgement: VersionJudgement,
    },
}

/// Outcome of scanning one manifest section for the target dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    /// Section that was scanned
    pub kind: DependencyKind,
    /// What was found there
    #[serde(flatten)]
    pub status: MatchStatus,
}

impl MatchOutcome {
    /// Creates an Absent outcome
    pub fn absent(kind: DependencyKind) -> Self {
        Self {
            kind,
            status: MatchStatus::Absent,
        }
    }

    /// Creates a Present outcome
    pub fn present(
        kind: DependencyKind,
        range: impl Into<String>,
        judgement: VersionJudgement,
    ) -> Self {
        Self {
            kind,
            status: MatchStatus::Present {
                range: range.into(),
                judgement,
            },
        }
    }

    /// Returns true if the dependency was found
    pub fn is_found(&self) -> bool {
        matches!(self.status, MatchStatus::Present { .. })
    }

    /// Returns true if the outcome comes from devDependencies
    pub fn is_dev(&self) -> bool {
        self.kind.is_dev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(DependencyKind::Regular.section_key(), "dependencies");
        assert_eq!(DependencyKind::Dev.section_key(), "devDependencies");
        assert_eq!(DependencyKind::Regular.label(), "dependency");
        assert_eq!(DependencyKind::Dev.label(), "devDependency");
        assert_eq!(DependencyKind::Dev.to_string(), "devDependencies");
    }

    #[test]
    fn test_judgement_suffix() {
        assert_eq!(VersionJudgement::Unspecified.suffix(), "");
        assert_eq!(VersionJudgement::Ok.suffix(), " OK");
        assert_eq!(VersionJudgement::Mismatch.suffix(), " MISMATCH");
    }

    #[test]
    fn test_outcome_constructors() {
        let absent = MatchOutcome::absent(DependencyKind::Dev);
        assert!(!absent.is_found());
        assert!(absent.is_dev());

        let present = MatchOutcome::present(DependencyKind::Regular, "^1.0.0", VersionJudgement::Ok);
        assert!(present.is_found());
        assert!(!present.is_dev());
    }

    #[test]
    fn test_serialize_present_outcome() {
        let outcome =
            MatchOutcome::present(DependencyKind::Dev, "~2.1.0", VersionJudgement::Mismatch);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "dev");
        assert_eq!(json["status"], "present");
        assert_eq!(json["range"], "~2.1.0");
        assert_eq!(json["judgement"], "mismatch");
    }
}
