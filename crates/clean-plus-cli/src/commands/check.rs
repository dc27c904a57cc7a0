//! Check command implementation.

use anyhow::{Context, Result};
use clean_plus_core::{profile, rulebook, Guard, GuardOutcome};
use std::path::Path;

use crate::OutputFormat;

/// How a check run ended, before mapping to an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No violations.
    Clean,
    /// The module root was absent; nothing was scanned.
    Skipped,
    /// At least one violation was reported.
    Violations,
}

/// Runs the check command against the current directory.
pub fn run(rules: &Path, explicit_profile: Option<&str>, format: OutputFormat) -> Result<Status> {
    run_in(Path::new("."), rules, explicit_profile, format)
}

/// Runs the check command with rulebook paths resolved against `base`.
pub fn run_in(
    base: &Path,
    rules: &Path,
    explicit_profile: Option<&str>,
    format: OutputFormat,
) -> Result<Status> {
    let (key, outcome) = analyze(base, rules, explicit_profile)?;

    match outcome {
        GuardOutcome::Skipped { module_root } => {
            let shown = module_root.strip_prefix(base).unwrap_or(&module_root);
            super::output::print_skipped(&key, shown, format)?;
            Ok(Status::Skipped)
        }
        GuardOutcome::Checked(result) => {
            super::output::print(&key, &result, format)?;
            Ok(if result.has_violations() {
                Status::Violations
            } else {
                Status::Clean
            })
        }
    }
}

/// Loads the rulebook, resolves the profile and runs the guard.
fn analyze(
    base: &Path,
    rules: &Path,
    explicit_profile: Option<&str>,
) -> Result<(String, GuardOutcome)> {
    let book = rulebook::load_file(rules)?;
    tracing::debug!(
        "Loaded rulebook {} with profiles: {}",
        rules.display(),
        book.profile_keys().join(", ")
    );

    let active = profile::resolve(&book, explicit_profile, base)?;
    tracing::info!("Using profile `{}`", active.key());

    let guard = Guard::builder()
        .base(base)
        .profile(active.clone())
        .routing(book.routing_for(active.key()))
        .build()
        .context("Failed to build guard")?;

    Ok((guard.profile().key().to_string(), guard.run()))
}
