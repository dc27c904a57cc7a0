//! Routing registration guards.
//!
//! Two textual checks that run independently of module classification:
//! inline route definitions in forbidden locations, and filesystem-based
//! auto-discovery of route files in the registration file.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::rulebook::RoutingConfig;
use crate::scanner::read_source;
use crate::types::{Location, Violation};

/// Rule code for inline route definitions.
pub const INLINE_ROUTE_CODE: &str = "CP101";
/// Rule code for route file auto-discovery.
pub const AUTO_DISCOVERY_CODE: &str = "CP102";

const INLINE_ROUTE_RULE: &str = "inline-route-definition";
const AUTO_DISCOVERY_RULE: &str = "route-auto-discovery";

const INLINE_ROUTE_MESSAGE: &str = "Route definitions are not allowed here; move them into a module routes file and mount it explicitly from the composition root.";
const AUTO_DISCOVERY_MESSAGE: &str = "Route files must not be auto-discovered; register an explicit, enumerated list of module route files.";

#[allow(clippy::expect_used)]
static INLINE_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\bRoute::|\$router->)(?:get|post|put|patch|delete|options|any|match|resource|apiResource|resources|apiResources|view|redirect)\s*\(",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)]
static AUTO_DISCOVERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bglob\s*\(|\bscandir\s*\(|RecursiveDirectoryIterator|RecursiveIteratorIterator|Symfony\\Component\\Finder|\bFinder::create\s*\(|\bFile::(?:allFiles|files|glob)\s*\(",
    )
    .expect("valid regex")
});

/// Runs the routing checks configured for one profile.
pub struct RouteGuard {
    base: PathBuf,
    config: RoutingConfig,
}

impl RouteGuard {
    /// Creates a guard. Globs and the registration location are resolved
    /// against `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>, config: RoutingConfig) -> Self {
        Self {
            base: base.into(),
            config,
        }
    }

    /// Runs both checks.
    #[must_use]
    pub fn check(&self) -> Vec<Violation> {
        let mut violations = self.check_route_definitions();
        violations.extend(self.check_auto_discovery());
        violations
    }

    /// Flags route declarations in files matched by the forbidden globs.
    #[must_use]
    pub fn check_route_definitions(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        for pattern in &self.config.forbidden_route_definition_glob {
            let full = self.base.join(pattern);
            let entries = match glob::glob(&full.to_string_lossy()) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring invalid route glob `{pattern}`: {e}");
                    continue;
                }
            };

            for entry in entries {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        warn!("Skipping unreadable route glob match: {e}");
                        continue;
                    }
                };
                if !path.is_file() || !is_php(&path) {
                    continue;
                }
                debug!("Checking route definitions in {}", path.display());
                violations.extend(self.scan(
                    &path,
                    &INLINE_ROUTE,
                    INLINE_ROUTE_CODE,
                    INLINE_ROUTE_RULE,
                    INLINE_ROUTE_MESSAGE,
                ));
            }
        }

        violations
    }

    /// Flags filesystem discovery calls in the registration file.
    #[must_use]
    pub fn check_auto_discovery(&self) -> Vec<Violation> {
        let Some(location) = &self.config.registration_location else {
            return Vec::new();
        };
        if !is_php(location) {
            warn!(
                "Route registration location {} is not a .php file; skipping",
                location.display()
            );
            return Vec::new();
        }

        let path = self.base.join(location);
        if !path.is_file() {
            debug!("Route registration file {} not found", path.display());
            return Vec::new();
        }

        self.scan(
            &path,
            &AUTO_DISCOVERY,
            AUTO_DISCOVERY_CODE,
            AUTO_DISCOVERY_RULE,
            AUTO_DISCOVERY_MESSAGE,
        )
    }

    fn scan(
        &self,
        path: &Path,
        pattern: &Regex,
        code: &str,
        rule: &str,
        message: &str,
    ) -> Vec<Violation> {
        let content = match read_source(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                return Vec::new();
            }
        };

        let reported = path.strip_prefix(&self.base).unwrap_or(path);

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| pattern.is_match(line))
            .map(|(i, line)| {
                Violation::new(
                    code,
                    rule,
                    Location::new(reported, i + 1),
                    line.trim(),
                    message,
                )
            })
            .collect()
    }
}

fn is_php(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("php"))
}
