//! # clean-plus-core
//!
//! Module boundary guard for PHP and JS/TS source trees.
//!
//! Given a rulebook that names where modules and shared contracts live,
//! this crate finds imports that cross module boundaries in forbidden ways,
//! plus two anti-patterns in routing registration files. It includes:
//!
//! - [`rulebook`] for loading and validating the YAML rulebook
//! - [`profile::resolve`] for picking the active profile
//! - [`FileScanner`] for source discovery
//! - [`LanguageExtractor`] with [`PhpExtractor`] and [`JsExtractor`]
//! - [`ReferenceClassifier`] for mapping import targets to modules
//! - [`ViolationEngine`] for the boundary decision table
//! - [`RouteGuard`] for routing checks
//! - [`Guard`] for orchestrating a run
//!
//! ## Example
//!
//! ```ignore
//! use clean_plus_core::{profile, rulebook, Guard, GuardOutcome};
//!
//! let book = rulebook::load_file("clean-plus.rules.yaml".as_ref())?;
//! let active = profile::resolve(&book, None, ".".as_ref())?;
//! let guard = Guard::builder()
//!     .profile(active.clone())
//!     .routing(book.routing_for(active.key()))
//!     .build()
//!     .unwrap();
//!
//! if let GuardOutcome::Checked(result) = guard.run() {
//!     for v in &result.violations {
//!         println!("{v}");
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod engine;
pub mod extractor;
pub mod guard;
pub mod js;
pub mod php;
pub mod profile;
pub mod routes;
pub mod rulebook;
pub mod scanner;
mod types;

pub use classifier::{ClassifiedReference, ReferenceClassifier, ReferenceKind, Via};
pub use engine::{SourceIdentity, ViolationEngine};
pub use extractor::{Extractors, LanguageExtractor, RawImport};
pub use guard::{Guard, GuardBuilder, GuardOutcome};
pub use js::JsExtractor;
pub use php::PhpExtractor;
pub use routes::RouteGuard;
pub use rulebook::{ConfigError, Profile, RoutingConfig, Rulebook};
pub use scanner::{FileScanner, FileSource};
pub use types::{LintResult, Location, Violation};
