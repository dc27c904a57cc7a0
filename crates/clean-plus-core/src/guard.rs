//! Run orchestration: scan, extract, classify, decide, then route checks.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::classifier::ReferenceClassifier;
use crate::engine::{SourceIdentity, ViolationEngine};
use crate::extractor::Extractors;
use crate::routes::RouteGuard;
use crate::rulebook::{Profile, RoutingConfig};
use crate::scanner::{read_source, FileScanner, FileSource};
use crate::types::LintResult;

/// How a run ended.
#[derive(Debug)]
pub enum GuardOutcome {
    /// The module root does not exist; nothing was scanned.
    Skipped {
        /// The missing module root, resolved against the base.
        module_root: PathBuf,
    },
    /// The tree was scanned.
    Checked(LintResult),
}

/// Builder for configuring a [`Guard`].
#[derive(Default)]
pub struct GuardBuilder {
    base: Option<PathBuf>,
    profile: Option<Profile>,
    routing: RoutingConfig,
    file_source: Option<Box<dyn FileSource>>,
}

impl GuardBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory that rulebook paths are relative to (default: `.`).
    #[must_use]
    pub fn base(mut self, path: impl Into<PathBuf>) -> Self {
        self.base = Some(path.into());
        self
    }

    /// Sets the active profile.
    #[must_use]
    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Sets the routing checks for the active profile.
    #[must_use]
    pub fn routing(mut self, routing: RoutingConfig) -> Self {
        self.routing = routing;
        self
    }

    /// Replaces the default [`FileScanner`].
    #[must_use]
    pub fn file_source(mut self, source: Box<dyn FileSource>) -> Self {
        self.file_source = Some(source);
        self
    }

    /// Builds the guard.
    ///
    /// Returns `None` if no profile was set.
    #[must_use]
    pub fn build(self) -> Option<Guard> {
        let profile = self.profile?;
        Some(Guard {
            base: self.base.unwrap_or_else(|| PathBuf::from(".")),
            profile,
            routing: self.routing,
            file_source: self
                .file_source
                .unwrap_or_else(|| Box::new(FileScanner::new())),
            extractors: Extractors::new(),
        })
    }
}

/// Runs every check for one profile.
///
/// Use [`Guard::builder()`] to construct an instance.
pub struct Guard {
    base: PathBuf,
    profile: Profile,
    routing: RoutingConfig,
    file_source: Box<dyn FileSource>,
    extractors: Extractors,
}

impl Guard {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }

    /// Returns the active profile.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Runs the analysis.
    ///
    /// Unreadable files are logged and skipped; a run never fails halfway.
    #[must_use]
    pub fn run(&self) -> GuardOutcome {
        let module_root = self.base.join(self.profile.module_root());
        if !module_root.is_dir() {
            info!(
                "Module root {} not found; skipping analysis",
                module_root.display()
            );
            return GuardOutcome::Skipped { module_root };
        }

        let shared_root = self
            .profile
            .shared_contracts_root()
            .map(|root| self.base.join(root));

        let engine = ViolationEngine::new(
            &module_root,
            shared_root.clone(),
            ReferenceClassifier::new(self.profile.shared_contracts_root()),
        );

        info!("Checking profile `{}`", self.profile.key());
        let mut result = LintResult::new();

        match &shared_root {
            Some(root) if root.is_dir() => self.scan_root(root, &engine, true, &mut result),
            Some(root) => debug!("Shared contracts root {} not found", root.display()),
            None => debug!("No shared contracts root configured"),
        }
        self.scan_root(&module_root, &engine, false, &mut result);

        if self.routing.is_empty() {
            debug!("No routing checks configured for `{}`", self.profile.key());
        } else {
            result
                .violations
                .extend(RouteGuard::new(&self.base, self.routing.clone()).check());
        }

        result.sort();

        info!(
            "Analysis complete: {} violation(s) in {} file(s)",
            result.violations.len(),
            result.files_checked
        );

        GuardOutcome::Checked(result)
    }

    /// Scans one root. The module pass skips shared contracts nested inside
    /// the module root, since the shared pass already covered them.
    fn scan_root(
        &self,
        root: &Path,
        engine: &ViolationEngine,
        shared_pass: bool,
        result: &mut LintResult,
    ) {
        for path in self.file_source.files(root) {
            let Some(identity) = engine.identify(&path) else {
                debug!("Skipping {}: no module identity", path.display());
                continue;
            };
            if !shared_pass && identity == SourceIdentity::SharedContracts {
                continue;
            }
            let Some(extractor) = self.extractors.for_path(&path) else {
                continue;
            };

            let source = match read_source(&path) {
                Ok(source) => source,
                Err(e) => {
                    warn!("Failed to read {}: {e}", path.display());
                    continue;
                }
            };

            debug!("Analyzing: {}", path.display());
            let reported = path.strip_prefix(&self.base).unwrap_or(&path);
            let violations = engine.check(reported, &identity, extractor.extract(&source));

            result.violations.extend(violations);
            result.files_checked += 1;
        }
    }
}
