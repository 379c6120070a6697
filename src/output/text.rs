//! Text output formatter for human-readable display
//!
//! Found lines are coloured by judgement (green OK, red MISMATCH, yellow
//! when no version was checked); absence lines and notices are red.

use crate::domain::{ScanQuery, VersionJudgement};
use crate::output::{OutputFormatter, ReportLine, DEV_MARKER};
use crate::walker::{RepoNotice, ScanReport};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Suppress the banner
    quiet: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(quiet: bool) -> Self {
        Self { quiet, color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(quiet: bool, color: bool) -> Self {
        Self { quiet, color }
    }

    /// Format a single report line
    fn format_line(&self, line: &ReportLine, writer: &mut dyn Write) -> std::io::Result<()> {
        if !self.color {
            return writeln!(writer, "{}", line);
        }

        match line {
            ReportLine::Found {
                repo,
                dependency,
                range,
                judgement,
                kind,
            } => {
                let version = format!("{}{}", range, judgement.suffix());
                let version = match judgement {
                    VersionJudgement::Unspecified => version.yellow(),
                    VersionJudgement::Ok => version.green(),
                    VersionJudgement::Mismatch => version.red(),
                };
                let dev = if kind.is_dev() {
                    DEV_MARKER.dimmed().to_string()
                } else {
                    String::new()
                };
                writeln!(
                    writer,
                    "{}{}{}{}",
                    format!("{} has ", repo).cyan(),
                    format!("{}@", dependency).white(),
                    version,
                    dev
                )
            }
            ReportLine::Absent { .. } => writeln!(writer, "{}", line.to_string().red()),
        }
    }

    /// Format a per-repository notice
    fn format_notice(
        &self,
        message: &str,
        notice: &RepoNotice,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !self.color {
            return writeln!(writer, "{}", message);
        }

        match notice {
            RepoNotice::NoManifestContent => writeln!(writer, "{}", message.on_red()),
            RepoNotice::FetchFailed { .. } | RepoNotice::ParseFailed { .. } => {
                writeln!(writer, "{}", message.red())
            }
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_banner(&self, query: &ScanQuery, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let banner = match &query.repo {
            Some(repo) => format!(
                "Searching {}/{} for {}",
                query.owner,
                repo,
                query.target_label()
            ),
            None => format!(
                "Searching all repos in {} for {}",
                query.owner,
                query.target_label()
            ),
        };

        if self.color {
            writeln!(writer, "{}", banner.green())
        } else {
            writeln!(writer, "{}", banner)
        }
    }

    fn format(
        &self,
        _query: &ScanQuery,
        report: &ScanReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for scan in &report.repos {
            for line in &scan.lines {
                self.format_line(line, writer)?;
            }
            if let Some(notice) = &scan.notice {
                self.format_notice(&notice.message(&scan.repo), notice, writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyKind, RepositoryIdentity};
    use crate::walker::RepoScan;
    use semver::Version;

    fn render_banner(formatter: &TextFormatter, query: &ScanQuery) -> String {
        let mut out = Vec::new();
        formatter.format_banner(query, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn render(formatter: &TextFormatter, report: &ScanReport) -> String {
        let mut out = Vec::new();
        formatter
            .format(&ScanQuery::new("acme", "lodash"), report, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_report() -> ScanReport {
        let repo = RepositoryIdentity::new("acme", "widgets");
        ScanReport {
            repos: vec![
                RepoScan {
                    repo: repo.clone(),
                    lines: vec![ReportLine::Found {
                        repo: repo.clone(),
                        dependency: "lodash".to_string(),
                        range: "^4.0.0".to_string(),
                        judgement: VersionJudgement::Ok,
                        kind: DependencyKind::Dev,
                    }],
                    notice: None,
                },
                RepoScan {
                    repo: RepositoryIdentity::new("acme", "docs"),
                    lines: Vec::new(),
                    notice: Some(RepoNotice::NoManifestContent),
                },
            ],
        }
    }

    #[test]
    fn test_banner_single_repo() {
        let query = ScanQuery::new("acme", "lodash")
            .with_repo("widgets")
            .with_version(Version::new(4, 17, 0));
        let banner = render_banner(&TextFormatter::with_color(false, false), &query);
        assert_eq!(banner, "Searching acme/widgets for lodash@4.17.0\n");
    }

    #[test]
    fn test_banner_whole_owner() {
        let query = ScanQuery::new("acme", "lodash");
        let banner = render_banner(&TextFormatter::with_color(false, false), &query);
        assert_eq!(banner, "Searching all repos in acme for lodash\n");
    }

    #[test]
    fn test_banner_quiet() {
        let query = ScanQuery::new("acme", "lodash");
        assert!(render_banner(&TextFormatter::with_color(true, false), &query).is_empty());
    }

    #[test]
    fn test_plain_output() {
        let output = render(&TextFormatter::with_color(false, false), &sample_report());
        assert_eq!(
            output,
            "acme/widgets has lodash@^4.0.0 OK [DEV DEPENDENCY]\n\
             No package.json in acme/docs - SKIPPED\n"
        );
    }

    #[test]
    fn test_colored_output_keeps_text() {
        colored::control::set_override(true);
        let output = render(&TextFormatter::new(false), &sample_report());
        colored::control::unset_override();

        assert!(output.contains("lodash@"));
        assert!(output.contains("^4.0.0 OK"));
        assert!(output.contains("[DEV DEPENDENCY]"));
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_empty_report_prints_nothing() {
        let output = render(&TextFormatter::with_color(false, false), &ScanReport::default());
        assert!(output.is_empty());
    }
}
