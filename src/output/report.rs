//! Report lines for scan outcomes
//!
//! Decides which outcomes are reported under the current negative mode and
//! renders them as plain lines. Colouring and printing live in the
//! formatters.

use crate::domain::{
    DependencyKind, MatchOutcome, MatchStatus, NegativeMode, RepositoryIdentity, ScanQuery,
    VersionJudgement,
};
use serde::Serialize;
use std::fmt;

/// Marker appended to lines about devDependencies
pub const DEV_MARKER: &str = " [DEV DEPENDENCY]";

/// A reportable scan result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportLine {
    /// The repository declares the dependency
    Found {
        repo: RepositoryIdentity,
        dependency: String,
        range: String,
        judgement: VersionJudgement,
        kind: DependencyKind,
    },
    /// The repository's section lacks the dependency
    Absent {
        repo: RepositoryIdentity,
        dependency: String,
        kind: DependencyKind,
    },
}

impl ReportLine {
    /// The repository this line is about
    pub fn repo(&self) -> &RepositoryIdentity {
        match self {
            ReportLine::Found { repo, .. } | ReportLine::Absent { repo, .. } => repo,
        }
    }

    /// The section this line is about
    pub fn kind(&self) -> DependencyKind {
        match self {
            ReportLine::Found { kind, .. } | ReportLine::Absent { kind, .. } => *kind,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Found {
                repo,
                dependency,
                range,
                judgement,
                kind,
            } => {
                write!(
                    f,
                    "{} has {}@{}{}",
                    repo,
                    dependency,
                    range,
                    judgement.suffix()
                )?;
                if kind.is_dev() {
                    write!(f, "{}", DEV_MARKER)?;
                }
                Ok(())
            }
            ReportLine::Absent {
                repo,
                dependency,
                kind,
            } => write!(f, "{} does not have {} as a {}", repo, dependency, kind.label()),
        }
    }
}

/// Turns match outcomes into report lines
#[derive(Debug, Clone)]
pub struct RepoReporter {
    dependency: String,
    negative: Option<NegativeMode>,
}

impl RepoReporter {
    /// Create a reporter for a query
    pub fn new(query: &ScanQuery) -> Self {
        Self {
            dependency: query.dependency.clone(),
            negative: query.negative,
        }
    }

    /// Report one outcome, or `None` when it is suppressed
    pub fn report(
        &self,
        repo: &RepositoryIdentity,
        outcome: &MatchOutcome,
    ) -> Option<ReportLine> {
        if !should_report(self.negative, outcome) {
            return None;
        }

        let line = match &outcome.status {
            MatchStatus::Present { range, judgement } => ReportLine::Found {
                repo: repo.clone(),
                dependency: self.dependency.clone(),
                range: range.clone(),
                judgement: *judgement,
                kind: outcome.kind,
            },
            MatchStatus::Absent => ReportLine::Absent {
                repo: repo.clone(),
                dependency: self.dependency.clone(),
                kind: outcome.kind,
            },
        };
        Some(line)
    }
}

/// Negative mode filter
///
/// Without a negative mode only found outcomes are reported. With any
/// negative mode found outcomes are never reported, and absences are
/// reported for the sections the mode selects.
pub fn should_report(negative: Option<NegativeMode>, outcome: &MatchOutcome) -> bool {
    match (negative, outcome.is_found()) {
        (None, found) => found,
        (Some(_), true) => false,
        (Some(NegativeMode::Any), false) => true,
        (Some(NegativeMode::Full), false) => outcome.kind == DependencyKind::Regular,
        (Some(NegativeMode::Dev), false) => outcome.kind == DependencyKind::Dev,
    }
}
