//! Output formatting for run results.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use clean_plus_core::LintResult;
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct JsonReport<'a> {
    profile: &'a str,
    status: &'static str,
    #[serde(flatten)]
    result: &'a LintResult,
}

#[derive(Serialize)]
struct JsonSkipped<'a> {
    profile: &'a str,
    status: &'static str,
    module_root: &'a Path,
}

/// Prints run results in the specified format.
pub fn print(profile: &str, result: &LintResult, format: OutputFormat) -> Result<()> {
    print!("{}", render(profile, result, format)?);
    Ok(())
}

/// Prints the notice for a run that found no module root.
pub fn print_skipped(profile: &str, module_root: &Path, format: OutputFormat) -> Result<()> {
    print!("{}", render_skipped(profile, module_root, format)?);
    Ok(())
}

/// Renders run results in the specified format.
pub fn render(profile: &str, result: &LintResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(profile, result),
        OutputFormat::Json => render_json(profile, result)?,
        OutputFormat::Compact => render_compact(result),
    })
}

/// Renders the skip notice in the specified format.
pub fn render_skipped(profile: &str, module_root: &Path, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => {
            let report = JsonSkipped {
                profile,
                status: "skipped",
                module_root,
            };
            format!("{}\n", serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text | OutputFormat::Compact => format!(
            "clean-plus: module root {} not found; skipping (profile {profile})\n",
            module_root.display()
        ),
    })
}

fn render_text(profile: &str, result: &LintResult) -> String {
    let mut out = String::new();

    if !result.has_violations() {
        let _ = writeln!(
            out,
            "clean-plus: OK (profile {profile}, {} file(s) checked)",
            result.files_checked
        );
        return out;
    }

    let _ = writeln!(
        out,
        "clean-plus: {} violation(s) found (profile {profile})",
        result.violations.len()
    );
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
        let _ = writeln!(out, "    {}", violation.target);
    }
    out
}

fn render_json(profile: &str, result: &LintResult) -> Result<String> {
    let report = JsonReport {
        profile,
        status: if result.has_violations() {
            "violations"
        } else {
            "clean"
        },
        result,
    };
    Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(
            out,
            "{}:{}: [{}] {}",
            violation.location.file.display(),
            violation.location.line,
            violation.code,
            violation.message,
        );
    }
    out
}
