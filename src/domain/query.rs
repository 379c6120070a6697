//! Scan query and repository addressing

use clap::ValueEnum;
use semver::Version;
use serde::Serialize;
use std::fmt;

/// Absence-reporting mode
///
/// When set, repositories that have the dependency are never reported;
/// only sections lacking it are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NegativeMode {
    /// Report repositories lacking it in `dependencies`
    Full,
    /// Report repositories lacking it in `devDependencies`
    Dev,
    /// Report every section lacking it
    Any,
}

impl fmt::Display for NegativeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NegativeMode::Full => "full",
            NegativeMode::Dev => "dev",
            NegativeMode::Any => "any",
        };
        write!(f, "{}", s)
    }
}

/// Owner and repository name pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentity {
    /// Organization or user login
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepositoryIdentity {
    /// Creates a new repository identity
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What to look for and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanQuery {
    /// Organization or user to search in
    pub owner: String,
    /// Single repository to search, or the whole owner when `None`
    pub repo: Option<String>,
    /// Dependency name, matched case-sensitively
    pub dependency: String,
    /// Concrete version to check declared ranges against
    pub version: Option<Version>,
    /// Absence-reporting mode
    pub negative: Option<NegativeMode>,
}

impl ScanQuery {
    /// Creates a query for a dependency across an owner's repositories
    pub fn new(owner: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: None,
            dependency: dependency.into(),
            version: None,
            negative: None,
        }
    }

    /// Restricts the query to one repository
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Sets the version to check against
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the absence-reporting mode
    pub fn with_negative(mut self, negative: NegativeMode) -> Self {
        self.negative = Some(negative);
        self
    }

    /// Identity of the single repository targeted, if any
    pub fn repository(&self) -> Option<RepositoryIdentity> {
        self.repo
            .as_ref()
            .map(|name| RepositoryIdentity::new(&self.owner, name))
    }

    /// `dep` or `dep@version`
    pub fn target_label(&self) -> String {
        match &self.version {
            Some(v) => format!("{}@{}", self.dependency, v),
            None => self.dependency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_identity_display() {
        let repo = RepositoryIdentity::new("acme", "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn test_query_builder() {
        let query = ScanQuery::new("acme", "lodash")
            .with_repo("widgets")
            .with_version(Version::new(4, 17, 0))
            .with_negative(NegativeMode::Dev);

        assert_eq!(query.owner, "acme");
        assert_eq!(query.repository(), Some(RepositoryIdentity::new("acme", "widgets")));
        assert_eq!(query.version, Some(Version::new(4, 17, 0)));
        assert_eq!(query.negative, Some(NegativeMode::Dev));
    }

    #[test]
    fn test_query_without_repo() {
        let query = ScanQuery::new("acme", "lodash");
        assert!(query.repository().is_none());
    }

    #[test]
    fn test_target_label() {
        let query = ScanQuery::new("acme", "lodash");
        assert_eq!(query.target_label(), "lodash");

        let query = query.with_version(Version::new(4, 17, 0));
        assert_eq!(query.target_label(), "lodash@4.17.0");
    }

    #[test]
    fn test_negative_mode_display() {
        assert_eq!(NegativeMode::Full.to_string(), "full");
        assert_eq!(NegativeMode::Dev.to_string(), "dev");
        assert_eq!(NegativeMode::Any.to_string(), "any");
    }
}
