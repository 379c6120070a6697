//! Dependency lookup within a parsed manifest

use crate::domain::{DependencyKind, DependencyMap, Manifest, MatchOutcome};
use crate::version::VersionMatcher;

/// Looks up one dependency name in manifest sections
#[derive(Debug, Clone)]
pub struct DependencyScanner {
    dependency: String,
    matcher: VersionMatcher,
}

impl DependencyScanner {
    /// Create a scanner for a dependency name
    pub fn new(dependency: impl Into<String>, matcher: VersionMatcher) -> Self {
        Self {
            dependency: dependency.into(),
            matcher,
        }
    }

    /// The dependency name being looked up
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    /// Scan one section
    ///
    /// Returns `None` when the section is missing or empty.
    pub fn scan(
        &self,
        section: Option<&DependencyMap>,
        kind: DependencyKind,
    ) -> Option<MatchOutcome> {
        let section = section.filter(|deps| !deps.is_empty())?;

        let outcome = match section.get(&self.dependency) {
            Some(range) => {
                MatchOutcome::present(kind, range.as_str(), self.matcher.evaluate(range))
            }
            None => MatchOutcome::absent(kind),
        };
        Some(outcome)
    }

    /// Scan both sections of a manifest, regular first
    ///
    /// A manifest without any declared dependency yields nothing. Otherwise
    /// every section yields an outcome, with a missing or empty section
    /// counting as not having the dependency.
    pub fn scan_manifest(&self, manifest: &Manifest) -> Vec<MatchOutcome> {
        if !manifest.declares_dependencies() {
            return Vec::new();
        }

        DependencyKind::ALL
            .iter()
            .map(|kind| {
                self.scan(manifest.section(*kind), *kind)
                    .unwrap_or_else(|| MatchOutcome::absent(*kind))
            })
            .collect()
    }
}
