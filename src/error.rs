//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: missing/unreadable config file, missing access token
//! - VersionError: invalid `--version` argument
//! - GitHubError: issues talking to the GitHub API
//! - ManifestError: package.json content that cannot be decoded or parsed
//!
//! Config, version and authentication errors abort the run before scanning.
//! Everything else is scoped to a single repository.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration and credentials
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file on any of the searched paths
    #[error("couldn't load a config file, looked in: {}", display_paths(searched))]
    Missing { searched: Vec<PathBuf> },

    /// Config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected schema
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// The access token environment variable is unset or empty
    #[error("a GitHub access token is required, set the environment variable {env_var}")]
    MissingToken { env_var: String },
}

/// Errors related to version arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The supplied version is not a concrete semantic version
    #[error("{value} is not a valid version format")]
    InvalidVersionFormat { value: String },
}

/// Errors related to GitHub API communication
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Repository, owner or file does not exist (HTTP 404)
    #[error("{resource} not found on GitHub")]
    NotFound { resource: String },

    /// Token rejected (HTTP 401, or 404 on `GET /user`)
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Request failed or returned an unexpected status
    #[error("request for {resource} failed: {message}")]
    Network { resource: String, message: String },

    /// Request timed out
    #[error("timeout while fetching {resource}")]
    Timeout { resource: String },

    /// Response body could not be understood
    #[error("invalid response for {resource}: {message}")]
    InvalidResponse { resource: String, message: String },
}

/// Errors related to manifest content
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Base64 or UTF-8 decoding of the file content failed
    #[error("failed to decode package.json content: {message}")]
    Decode { message: String },

    /// JSON parsing failed
    #[error("failed to parse package.json: {message}")]
    Parse { message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl GitHubError {
    /// Creates a new NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        GitHubError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a new Network error
    pub fn network(resource: impl Into<String>, message: impl Into<String>) -> Self {
        GitHubError::Network {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(resource: impl Into<String>, message: impl Into<String>) -> Self {
        GitHubError::InvalidResponse {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Returns true for 404 responses, which callers skip silently
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitHubError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_lists_paths() {
        let err = ConfigError::Missing {
            searched: vec![PathBuf::from("hasdep.json"), PathBuf::from("/home/u/.hasdep.json")],
        };
        let msg = err.to_string();
        assert!(msg.contains("couldn't load a config file"));
        assert!(msg.contains("hasdep.json, /home/u/.hasdep.json"));
    }

    #[test]
    fn test_config_parse_error() {
        let err = ConfigError::parse_error("hasdep.json", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("failed to parse config file hasdep.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_missing_token_names_env_var() {
        let err = ConfigError::MissingToken {
            env_var: "GHACCESS_TOKEN".to_string(),
        };
        assert!(err.to_string().contains("GHACCESS_TOKEN"));
    }

    #[test]
    fn test_invalid_version_format_message() {
        let err = VersionError::InvalidVersionFormat {
            value: "1.x".to_string(),
        };
        assert_eq!(err.to_string(), "1.x is not a valid version format");
    }

    #[test]
    fn test_github_error_not_found() {
        let err = GitHubError::not_found("acme/widgets/package.json");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("acme/widgets/package.json"));
    }

    #[test]
    fn test_github_error_network_is_not_not_found() {
        let err = GitHubError::network("acme/widgets", "HTTP 500");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("HTTP 500"));
    }
}
