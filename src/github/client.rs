//! GitHub REST client
//!
//! - Token authentication verified once up front
//! - Configurable base URL, timeout and extra headers
//! - Single request per call, no retries

use crate::config::GitHubApiConfig;
use crate::domain::RepositoryIdentity;
use crate::error::GitHubError;
use crate::github::GitHubApi;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

/// Default User-Agent header, GitHub rejects requests without one
const DEFAULT_USER_AGENT: &str = concat!("hasdep/", env!("CARGO_PKG_VERSION"));

/// Media type for the v3 REST API
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Authenticated GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

/// Entry of the repository listing response
#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    name: String,
}

impl GitHubClient {
    /// Build a client carrying the token and verify it against `GET /user`
    pub async fn authenticate(
        config: &GitHubApiConfig,
        token: SecretString,
    ) -> Result<Self, GitHubError> {
        let client = Self::build(config, &token)?;

        match client.get("/user", "authenticated user").await {
            Ok(_) => {
                tracing::debug!("authenticated against {}", client.base_url);
                Ok(client)
            }
            Err(GitHubError::NotFound { .. }) | Err(GitHubError::Authentication { .. }) => {
                Err(GitHubError::Authentication {
                    message: "the access token was rejected".to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn build(config: &GitHubApiConfig, token: &SecretString) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let mut auth = HeaderValue::from_str(&format!("token {}", token.expose_secret()))
            .map_err(|_| GitHubError::Authentication {
                message: "the access token contains invalid characters".to_string(),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                GitHubError::network("HTTP client", format!("invalid header '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                GitHubError::network("HTTP client", format!("invalid header value: {}", e))
            })?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            GitHubError::network("HTTP client", format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a GET request, mapping error statuses
    async fn get(&self, path: &str, resource: &str) -> Result<reqwest::Response, GitHubError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GitHubError::Timeout {
                    resource: resource.to_string(),
                }
            } else {
                GitHubError::network(resource, e.to_string())
            }
        })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(GitHubError::not_found(resource)),
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication {
                message: format!("HTTP 401 for {}", resource),
            }),
            status => Err(GitHubError::network(resource, format!("HTTP {}", status))),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T, GitHubError> {
        self.get(path, resource)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GitHubError::invalid_response(resource, e.to_string()))
    }
}

/// Pull the base64 content out of a contents API response
///
/// Directories come back as arrays and oversized files with an empty
/// `content`; both carry nothing to decode.
fn extract_content(body: &Value) -> Option<String> {
    let content = body.as_object()?.get("content")?.as_str()?;
    if content.trim().is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn fetch_file_content(
        &self,
        repo: &RepositoryIdentity,
        path: &str,
    ) -> Result<Option<String>, GitHubError> {
        let resource = format!("{}/{}", repo, path);
        let url_path = format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path);
        let body: Value = self.get_json(&url_path, &resource).await?;
        Ok(extract_content(&body))
    }

    async fn list_repositories(
        &self,
        owner: &str,
        page_size: u8,
    ) -> Result<Vec<String>, GitHubError> {
        let url_path = format!("/users/{}/repos?per_page={}", owner, page_size);
        let entries: Vec<RepositoryEntry> = self
            .get_json(&url_path, &format!("repositories of {}", owner))
            .await?;
        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("hasdep/"));
    }

    #[test]
    fn test_extract_content_from_file() {
        let body = json!({ "type": "file", "encoding": "base64", "content": "e30=\n" });
        assert_eq!(extract_content(&body), Some("e30=\n".to_string()));
    }

    #[test]
    fn test_extract_content_from_directory_listing() {
        let body = json!([{ "type": "file", "name": "index.js" }]);
        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn test_extract_content_from_oversized_file() {
        let body = json!({ "type": "file", "encoding": "none", "content": "" });
        assert_eq!(extract_content(&body), None);
    }

    #[test]
    fn test_build_rejects_invalid_header() {
        let config = GitHubApiConfig {
            headers: [("bad header".to_string(), "x".to_string())].into(),
            ..GitHubApiConfig::default()
        };
        let result = GitHubClient::build(&config, &SecretString::from("t".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_uses_configured_base_url() {
        let config = GitHubApiConfig {
            host: "github.example.com".to_string(),
            path_prefix: "api/v3".to_string(),
            ..GitHubApiConfig::default()
        };
        let client = GitHubClient::build(&config, &SecretString::from("t".to_string())).unwrap();
        assert_eq!(client.base_url(), "https://github.example.com/api/v3");
    }
}
