//! CLI argument parsing module for hasdep

use crate::domain::{NegativeMode, ScanQuery};
use crate::version::parse_required_version;
use clap::Parser;
use semver::Version;
use std::path::PathBuf;

/// Validate `--version` before anything touches the network
fn parse_version(s: &str) -> Result<Version, String> {
    parse_required_version(s).map_err(|e| e.to_string())
}

/// Find repositories depending on an npm package
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hasdep",
    about = "Find which repositories of a GitHub organization depend on an npm package",
    override_usage = "hasdep -o <org> -d <dependency> [OPTIONS]"
)]
pub struct CliArgs {
    /// Organization (or user) to search in
    #[arg(short = 'o', long = "org")]
    pub org: String,

    /// Repository to search in (default: every repository of the organization)
    #[arg(short = 'r', long = "repo")]
    pub repo: Option<String>,

    /// Dependency to look for (matched against package.json keys)
    #[arg(short = 'd', long = "dep")]
    pub dep: String,

    /// Version of the dependency to check declared ranges against
    #[arg(short = 'v', long = "version", value_parser = parse_version)]
    pub version: Option<Version>,

    /// Report repositories lacking the dependency instead
    #[arg(short = 'n', long = "negative", value_enum)]
    pub negative: Option<NegativeMode>,

    /// Config file (default: ./hasdep.json, then ~/.hasdep.json)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - no banner or progress
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Build the scan query
    pub fn to_query(&self) -> ScanQuery {
        ScanQuery {
            owner: self.org.clone(),
            repo: self.repo.clone(),
            dependency: self.dep.clone(),
            version: self.version.clone(),
            negative: self.negative,
        }
    }

    /// Whether to draw progress on stderr
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json && self.repo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_required_args() {
        let args = CliArgs::parse_from(["hasdep", "-o", "acme", "-d", "lodash"]);
        assert_eq!(args.org, "acme");
        assert_eq!(args.dep, "lodash");
        assert!(args.repo.is_none());
        assert!(args.version.is_none());
        assert!(args.negative.is_none());
        assert!(args.config.is_none());
        assert!(!args.json);
        assert!(!args.quiet);
        assert!(!args.no_color);
        assert!(!args.debug);
    }

    #[test]
    fn test_long_flags() {
        let args = CliArgs::parse_from([
            "hasdep",
            "--org",
            "acme",
            "--repo",
            "widgets",
            "--dep",
            "lodash",
            "--version",
            "4.17.0",
            "--negative",
            "dev",
        ]);
        assert_eq!(args.repo.as_deref(), Some("widgets"));
        assert_eq!(args.version, Some(Version::new(4, 17, 0)));
        assert_eq!(args.negative, Some(NegativeMode::Dev));
    }

    #[test]
    fn test_missing_org() {
        let err = CliArgs::try_parse_from(["hasdep", "-d", "lodash"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_missing_dep() {
        let err = CliArgs::try_parse_from(["hasdep", "-o", "acme"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_version() {
        let err = CliArgs::try_parse_from(["hasdep", "-o", "acme", "-d", "lodash", "-v", "4.x"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("4.x is not a valid version format"));
    }

    #[test]
    fn test_invalid_negative_mode() {
        let err = CliArgs::try_parse_from(["hasdep", "-o", "acme", "-d", "lodash", "-n", "all"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_to_query() {
        let args = CliArgs::parse_from([
            "hasdep", "-o", "acme", "-r", "widgets", "-d", "lodash", "-v", "v3.0.0", "-n", "full",
        ]);
        let query = args.to_query();
        assert_eq!(
            query,
            ScanQuery::new("acme", "lodash")
                .with_repo("widgets")
                .with_version(Version::new(3, 0, 0))
                .with_negative(NegativeMode::Full)
        );
    }

    #[test]
    fn test_show_progress() {
        let args = CliArgs::parse_from(["hasdep", "-o", "acme", "-d", "lodash"]);
        assert!(args.show_progress());

        let args = CliArgs::parse_from(["hasdep", "-o", "acme", "-d", "lodash", "-r", "widgets"]);
        assert!(!args.show_progress());

        let args = CliArgs::parse_from(["hasdep", "-o", "acme", "-d", "lodash", "--json"]);
        assert!(!args.show_progress());

        let args = CliArgs::parse_from(["hasdep", "-o", "acme", "-d", "lodash", "-q"]);
        assert!(!args.show_progress());
    }
}
