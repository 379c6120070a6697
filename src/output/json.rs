//! JSON output formatter for machine processing

use crate::domain::{NegativeMode, ScanQuery};
use crate::output::{OutputFormatter, ReportLine};
use crate::walker::ScanReport;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    owner: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<&'a str>,
    dependency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative: Option<NegativeMode>,
    /// Number of repositories scanned
    scanned: usize,
    results: Vec<&'a ReportLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notices: Vec<JsonNotice>,
}

/// JSON representation of a per-repository notice
#[derive(Serialize)]
struct JsonNotice {
    repo: String,
    kind: &'static str,
    message: String,
}

impl OutputFormatter for JsonFormatter {
    fn format_banner(&self, _query: &ScanQuery, _writer: &mut dyn Write) -> std::io::Result<()> {
        Ok(())
    }

    fn format(
        &self,
        query: &ScanQuery,
        report: &ScanReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = JsonOutput {
            owner: &query.owner,
            repository: query.repo.as_deref(),
            dependency: &query.dependency,
            version: query.version.as_ref().map(|v| v.to_string()),
            negative: query.negative,
            scanned: report.repository_count(),
            results: report.lines().collect(),
            notices: report
                .notices()
                .map(|(repo, notice)| JsonNotice {
                    repo: repo.to_string(),
                    kind: notice.kind(),
                    message: notice.message(repo),
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
