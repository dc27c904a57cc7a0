//! Rulebook loading: YAML text to a validated [`Rulebook`].
//!
//! ```text
//! YAML text
//!   ↓ serde_yaml (DTO layer)
//! dto types
//!   ↓ validate + convert
//! Rulebook (pure model)
//! ```

use std::path::{Path, PathBuf};

use miette::Diagnostic;

pub mod dto;
pub mod loader;
pub mod model;

pub use model::{Profile, Rulebook, RoutingConfig};

/// Default rulebook file name, looked up relative to the working directory.
pub const DEFAULT_RULEBOOK: &str = "clean-plus.rules.yaml";

/// Fatal configuration problems. Any of these aborts the run before scanning.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// The rulebook file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(clean_plus::config::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The rulebook is not valid YAML or has the wrong shape.
    #[error("invalid rulebook: {message}")]
    #[diagnostic(code(clean_plus::config::parse))]
    Parse {
        /// Parser error detail.
        message: String,
    },

    /// Required keys are missing or invalid.
    #[error("rulebook validation errors:\n{}", format_errors(.0))]
    #[diagnostic(code(clean_plus::config::invalid))]
    Invalid(Vec<String>),

    /// `--profile` named a key that is not in the rulebook.
    #[error("unknown profile `{key}` (available: {})", .available.join(", "))]
    #[diagnostic(
        code(clean_plus::profile::unknown),
        help("pass one of the configured profile keys with --profile")
    )]
    UnknownProfile {
        /// The requested key.
        key: String,
        /// Keys present in the rulebook.
        available: Vec<String>,
    },

    /// Auto-detection found no profile whose module root exists.
    #[error("no profile detected: none of the configured module roots exist")]
    #[diagnostic(
        code(clean_plus::profile::undetected),
        help("run from the project root or pass --profile <key>")
    )]
    NoProfileDetected,

    /// Auto-detection found more than one profile whose module root exists.
    #[error("ambiguous profile; pass --profile explicitly (candidates: {})", .candidates.join(", "))]
    #[diagnostic(code(clean_plus::profile::ambiguous))]
    AmbiguousProfile {
        /// Profiles whose module root exists.
        candidates: Vec<String>,
    },
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loads and validates a rulebook file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid YAML, or is
/// missing required keys.
pub fn load_file(path: &Path) -> Result<Rulebook, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

/// Parses and validates rulebook YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or required keys are missing.
pub fn parse(content: &str) -> Result<Rulebook, ConfigError> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| parse_error(&e))?;

    // An empty document is valid YAML; report it as missing keys.
    let dto: dto::RulebookDto = if value.is_null() {
        dto::RulebookDto::default()
    } else {
        serde_yaml::from_value(value).map_err(|e| parse_error(&e))?
    };

    loader::load(dto)
}

fn parse_error(e: &serde_yaml::Error) -> ConfigError {
    ConfigError::Parse {
        message: e.to_string(),
    }
}
