//! clean-plus CLI tool.
//!
//! Usage:
//! ```bash
//! clean-plus [--rules clean-plus.rules.yaml] [--profile KEY] [--verbose] [--format text|json|compact]
//! ```
//!
//! Exit status: `0` clean (or module root absent), `2` violations found,
//! `3` configuration error or invalid invocation.

use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use clean_plus_core::rulebook::DEFAULT_RULEBOOK;
use clean_plus_core::ConfigError;

mod commands;

/// Exit status when violations were found.
const EXIT_VIOLATIONS: u8 = 2;
/// Exit status for configuration errors and invalid invocations.
const EXIT_CONFIG: u8 = 3;

/// Module boundary guard for PHP and JS/TS source trees
#[derive(Parser, Debug)]
#[command(name = "clean-plus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the rulebook
    #[arg(long, default_value = DEFAULT_RULEBOOK)]
    rules: PathBuf,

    /// Profile key; auto-detected from existing module roots if omitted
    #[arg(long)]
    profile: Option<String>,

    /// Enable verbose output
    #[arg(short, long, env = "CLEAN_PLUS_VERBOSE", value_parser = FalseyValueParser::new())]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Output format for run results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout, usage errors to stderr.
            if let Err(io) = err.print() {
                eprintln!("Error: failed to print usage: {io}");
            }
            return parse_error_exit(err.kind());
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match commands::check::run(&cli.rules, cli.profile.as_deref(), cli.format) {
        Ok(commands::check::Status::Clean | commands::check::Status::Skipped) => ExitCode::SUCCESS,
        Ok(commands::check::Status::Violations) => ExitCode::from(EXIT_VIOLATIONS),
        Err(err) => {
            match err.downcast::<ConfigError>() {
                Ok(config_err) => eprintln!("{:?}", miette::Report::new(config_err)),
                Err(other) => eprintln!("Error: {other:#}"),
            }
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn parse_error_exit(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_CONFIG),
    }
}
