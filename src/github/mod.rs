//! GitHub API collaborator
//!
//! This module provides:
//! - The `GitHubApi` trait the repository walker is written against
//! - `GitHubClient`, a token-authenticated REST client built on reqwest

mod client;

pub use client::GitHubClient;

use crate::domain::RepositoryIdentity;
use crate::error::GitHubError;
use async_trait::async_trait;

/// Maximum page size accepted by the repository listing endpoint
pub const REPOSITORY_PAGE_SIZE: u8 = 100;

/// Operations the scan needs from GitHub
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Fetch the base64 content of a file
    ///
    /// `Ok(None)` means the path exists but carries no file content (a
    /// directory, or a file too large for the contents API).
    async fn fetch_file_content(
        &self,
        repo: &RepositoryIdentity,
        path: &str,
    ) -> Result<Option<String>, GitHubError>;

    /// List repository names owned by an organization or user
    ///
    /// Only the first page is requested.
    async fn list_repositories(
        &self,
        owner: &str,
        page_size: u8,
    ) -> Result<Vec<String>, GitHubError>;
}
