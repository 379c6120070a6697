//! Configuration file loading
//!
//! The config is a JSON file looked up in order:
//! - the path given with `--config`
//! - `./hasdep.json`
//! - `~/.hasdep.json`
//!
//! It carries GitHub API client options and the name of the environment
//! variable holding the access token.

use crate::error::ConfigError;
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project-local config filename
pub const CONFIG_FILENAME: &str = "hasdep.json";

/// Global config filename in the user's home directory
pub const GLOBAL_CONFIG_FILENAME: &str = ".hasdep.json";

/// Environment variable holding the token unless `tokenEnv` says otherwise
pub const DEFAULT_TOKEN_ENV: &str = "GHACCESS_TOKEN";

/// Default number of repositories scanned at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// GitHub API client options
    pub github_api: GitHubApiConfig,
    /// Environment variable holding the access token
    pub token_env: String,
    /// Maximum number of repositories scanned concurrently
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api: GitHubApiConfig::default(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// GitHub API client options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubApiConfig {
    /// `https` or `http`
    pub protocol: String,
    /// API host, `api.github.com` or a GitHub Enterprise host
    pub host: String,
    /// Explicit port
    pub port: Option<u16>,
    /// Path prefix, `/api/v3` for GitHub Enterprise
    pub path_prefix: String,
    /// Request timeout in milliseconds
    pub timeout: Option<u64>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
    /// Enable debug logging
    pub debug: bool,
}

impl Default for GitHubApiConfig {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            host: "api.github.com".to_string(),
            port: None,
            path_prefix: String::new(),
            timeout: None,
            headers: BTreeMap::new(),
            debug: false,
        }
    }
}

impl GitHubApiConfig {
    /// Base URL for API requests, without a trailing slash
    pub fn base_url(&self) -> String {
        let port = self.port.map(|p| format!(":{}", p)).unwrap_or_default();
        let prefix = self.path_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}://{}{}", self.protocol, self.host, port)
        } else {
            format!("{}://{}{}/{}", self.protocol, self.host, port, prefix)
        }
    }

    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

impl Config {
    /// Load the first config file found on the lookup path
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let candidates = candidate_paths(explicit, dirs::home_dir());

        for path in &candidates {
            if path.is_file() {
                return Ok((Self::from_file(path)?, path.clone()));
            }
        }

        Err(ConfigError::Missing {
            searched: candidates,
        })
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::from_json(&content).map_err(|message| ConfigError::parse_error(path, message))
    }

    /// Parse config JSON
    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Read the access token from the configured environment variable
    pub fn resolve_token(&self) -> Result<SecretString, ConfigError> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Read the access token using a custom variable lookup
    pub fn resolve_token_with<F>(&self, lookup: F) -> Result<SecretString, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(&self.token_env) {
            Some(token) if !token.trim().is_empty() => Ok(SecretString::from(token)),
            _ => Err(ConfigError::MissingToken {
                env_var: self.token_env.clone(),
            }),
        }
    }
}

/// Config file lookup order
fn candidate_paths(explicit: Option<&Path>, home: Option<PathBuf>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths = vec![PathBuf::from(CONFIG_FILENAME)];
    if let Some(home) = home {
        paths.push(home.join(GLOBAL_CONFIG_FILENAME));
    }
    paths
}
