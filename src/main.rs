//! hasdep - find which repositories of a GitHub organization depend on an
//! npm package, optionally checking a version against declared ranges.

use clap::Parser;
use colored::Colorize;
use hasdep::cli::CliArgs;
use hasdep::config::Config;
use hasdep::github::GitHubClient;
use hasdep::output::{create_formatter, OutputConfig};
use hasdep::progress::Progress;
use hasdep::walker::{RepositoryWalker, RunContext};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag or `githubApi.debug` in the config sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hasdep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hasdep=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Respect --no-color for the error line too
    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let (config, config_path) = Config::load(args.config.as_deref())?;
    init_tracing(args.debug || config.github_api.debug);
    tracing::debug!("using config {}", config_path.display());

    // Fail on a missing token before any request is made
    let token = config.resolve_token()?;
    let query = args.to_query();

    // Announce the search
    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.quiet, args.no_color));
    {
        let mut stdout = io::stdout().lock();
        formatter.format_banner(&query, &mut stdout)?;
        stdout.flush()?;
    }

    let client = GitHubClient::authenticate(&config.github_api, token).await?;
    let ctx = RunContext::new(Arc::new(client), query.clone()).with_concurrency(config.concurrency);

    // Scan, then print every line in listing order
    let mut progress = Progress::new(args.show_progress());
    let report = RepositoryWalker::new(ctx).run(&mut progress).await?;
    drop(progress);

    let mut stdout = io::stdout().lock();
    formatter.format(&query, &report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
