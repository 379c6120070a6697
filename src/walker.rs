//! Repository walker coordinating a scan
//!
//! This module provides:
//! - Workflow coordination: list → fetch → parse → scan → report
//! - Concurrent per-repository scans bounded by a semaphore
//! - Per-repository error isolation

use crate::domain::{Manifest, RepositoryIdentity, ScanQuery, MANIFEST_PATH};
use crate::error::GitHubError;
use crate::github::{GitHubApi, REPOSITORY_PAGE_SIZE};
use crate::output::{RepoReporter, ReportLine};
use crate::progress::Progress;
use crate::scanner::DependencyScanner;
use crate::version::VersionMatcher;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Everything a scan needs, built once at startup
#[derive(Clone)]
pub struct RunContext {
    /// Authenticated API client
    pub client: Arc<dyn GitHubApi>,
    /// What to look for
    pub query: Arc<ScanQuery>,
    /// Maximum number of repositories scanned at once
    pub concurrency: usize,
}

impl RunContext {
    /// Create a context with the default concurrency
    pub fn new(client: Arc<dyn GitHubApi>, query: ScanQuery) -> Self {
        Self {
            client,
            query: Arc::new(query),
            concurrency: crate::config::DEFAULT_CONCURRENCY,
        }
    }

    /// Set the concurrency limit (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Non-fatal problem with a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoNotice {
    /// The manifest could not be fetched for a reason other than 404
    FetchFailed { message: String },
    /// The manifest path exists but has no file content
    NoManifestContent,
    /// The manifest could not be decoded or parsed
    ParseFailed { message: String },
}

impl RepoNotice {
    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            RepoNotice::FetchFailed { .. } => "fetch_failed",
            RepoNotice::NoManifestContent => "no_manifest",
            RepoNotice::ParseFailed { .. } => "parse_failed",
        }
    }

    /// Human-readable message naming the repository
    pub fn message(&self, repo: &RepositoryIdentity) -> String {
        match self {
            RepoNotice::FetchFailed { message } => {
                format!("Error fetching {} for {}: {}", MANIFEST_PATH, repo, message)
            }
            RepoNotice::NoManifestContent => {
                format!("No {} in {} - SKIPPED", MANIFEST_PATH, repo)
            }
            RepoNotice::ParseFailed { message } => {
                format!("Error parsing {} for {}: {}", MANIFEST_PATH, repo, message)
            }
        }
    }
}

/// Result of scanning one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoScan {
    /// Repository scanned
    pub repo: RepositoryIdentity,
    /// Lines to report
    pub lines: Vec<ReportLine>,
    /// Problem encountered, if any
    pub notice: Option<RepoNotice>,
}

impl RepoScan {
    fn with_lines(repo: RepositoryIdentity, lines: Vec<ReportLine>) -> Self {
        Self {
            repo,
            lines,
            notice: None,
        }
    }

    fn notice(repo: RepositoryIdentity, notice: RepoNotice) -> Self {
        Self {
            repo,
            lines: Vec::new(),
            notice: Some(notice),
        }
    }

    fn skipped(repo: RepositoryIdentity) -> Self {
        Self::with_lines(repo, Vec::new())
    }
}

/// Result of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Per-repository results in listing order
    pub repos: Vec<RepoScan>,
}

impl ScanReport {
    /// All report lines in repository order
    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.repos.iter().flat_map(|scan| scan.lines.iter())
    }

    /// All notices with their repository
    pub fn notices(&self) -> impl Iterator<Item = (&RepositoryIdentity, &RepoNotice)> {
        self.repos
            .iter()
            .filter_map(|scan| scan.notice.as_ref().map(|notice| (&scan.repo, notice)))
    }

    /// Number of repositories scanned
    pub fn repository_count(&self) -> usize {
        self.repos.len()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Whether a listing filled the single page, so repositories may be missing
fn page_is_full(listed: usize) -> bool {
    listed >= REPOSITORY_PAGE_SIZE as usize
}

/// Walks one repository or all repositories of an owner
#[derive(Clone)]
pub struct RepositoryWalker {
    ctx: RunContext,
    scanner: Arc<DependencyScanner>,
    reporter: Arc<RepoReporter>,
}

impl RepositoryWalker {
    /// Create a walker for a run
    pub fn new(ctx: RunContext) -> Self {
        let query = &ctx.query;
        let scanner = DependencyScanner::new(
            query.dependency.clone(),
            VersionMatcher::new(query.version.clone()),
        );
        let reporter = RepoReporter::new(query);

        Self {
            scanner: Arc::new(scanner),
            reporter: Arc::new(reporter),
            ctx,
        }
    }

    /// Scan the repository named in the query, or every repository of the
    /// owner when none is named
    pub async fn run(&self, progress: &mut Progress) -> Result<ScanReport, GitHubError> {
        match self.ctx.query.repository() {
            Some(repo) => Ok(ScanReport {
                repos: vec![self.scan_one_repository(repo).await],
            }),
            None => self.scan_organization(progress).await,
        }
    }

    /// Fetch, parse, scan and report a single repository
    ///
    /// Never fails: a missing manifest is skipped silently and other
    /// problems become a notice on the result.
    pub async fn scan_one_repository(&self, repo: RepositoryIdentity) -> RepoScan {
        let content = match self.ctx.client.fetch_file_content(&repo, MANIFEST_PATH).await {
            Ok(Some(content)) => content,
            Ok(None) => return RepoScan::notice(repo, RepoNotice::NoManifestContent),
            Err(e) if e.is_not_found() => {
                tracing::debug!("no {} in {}, skipping", MANIFEST_PATH, repo);
                return RepoScan::skipped(repo);
            }
            Err(e) => {
                tracing::debug!("fetching {} for {} failed: {}", MANIFEST_PATH, repo, e);
                return RepoScan::notice(
                    repo,
                    RepoNotice::FetchFailed {
                        message: e.to_string(),
                    },
                );
            }
        };

        let manifest = match Manifest::from_base64(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                return RepoScan::notice(
                    repo,
                    RepoNotice::ParseFailed {
                        message: e.to_string(),
                    },
                )
            }
        };

        let lines: Vec<ReportLine> = self
            .scanner
            .scan_manifest(&manifest)
            .iter()
            .filter_map(|outcome| self.reporter.report(&repo, outcome))
            .collect();

        tracing::debug!("{}: {} line(s) reported", repo, lines.len());
        RepoScan::with_lines(repo, lines)
    }

    /// List the owner's repositories and scan each of them
    ///
    /// Only the first page of repositories is listed, so owners with more
    /// than [`REPOSITORY_PAGE_SIZE`] repositories are scanned partially.
    pub async fn scan_organization(
        &self,
        progress: &mut Progress,
    ) -> Result<ScanReport, GitHubError> {
        let owner = self.ctx.query.owner.clone();

        progress.listing(&owner);
        let listed = self
            .ctx
            .client
            .list_repositories(&owner, REPOSITORY_PAGE_SIZE)
            .await;
        progress.clear();
        let names = listed?;

        if page_is_full(names.len()) {
            tracing::warn!(
                "{} has at least {} repositories, only the first {} are scanned",
                owner,
                REPOSITORY_PAGE_SIZE,
                REPOSITORY_PAGE_SIZE
            );
        }

        progress.scanning(names.len());

        let semaphore = Arc::new(Semaphore::new(self.ctx.concurrency));
        let mut tasks = JoinSet::new();

        for (index, name) in names.into_iter().enumerate() {
            let walker = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let repo = RepositoryIdentity::new(owner.clone(), name);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, walker.scan_one_repository(repo).await)
            });
        }

        let mut scans = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, scan)) => {
                    progress.repository_done(&scan.repo.to_string());
                    scans.push((index, scan));
                }
                Err(e) => tracing::error!("repository scan task failed: {}", e),
            }
        }
        progress.clear();

        scans.sort_by_key(|(index, _)| *index);
        Ok(ScanReport {
            repos: scans.into_iter().map(|(_, scan)| scan).collect(),
        })
    }
}
