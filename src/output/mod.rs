//! Output formatting for scan results
//!
//! This module provides:
//! - Report line decisions under negative mode
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod report;
mod text;

pub use json::JsonFormatter;
pub use report::{should_report, RepoReporter, ReportLine, DEV_MARKER};
pub use text::TextFormatter;

use crate::domain::ScanQuery;
use crate::walker::ScanReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Suppress the banner
    pub quiet: bool,
    /// Whether to use colors
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, quiet: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            quiet,
            color: !no_color,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write the line announcing what is searched, before scanning
    fn format_banner(&self, query: &ScanQuery, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Write the scan results
    fn format(
        &self,
        query: &ScanQuery,
        report: &ScanReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.quiet, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
