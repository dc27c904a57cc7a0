//! Reference classification: import target string to module reference.
//!
//! Classification is a pure function of the target string and the
//! configured roots. It never looks at file contents or the filesystem.
//! Strategies are tried in order until one recognises the target, so new
//! layouts can be supported by adding a strategy rather than touching the
//! violation engine.

use std::path::Path;

use regex::Regex;
use tracing::{trace, warn};

/// Whether a reference points at a module's published API or its internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Something under the module's `contracts` layer.
    ModuleContracts,
    /// Anything else inside the module.
    ModuleInternals,
}

/// Which syntax the reference was recognised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    /// A `/`-separated module path.
    Path,
    /// A `\`-separated PHP namespace.
    Namespace,
}

/// An import target recognised as pointing into a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedReference {
    /// Target module name, as written in the import.
    pub module: String,
    /// Contracts or internals.
    pub kind: ReferenceKind,
    /// How the module was recognised.
    pub via: Via,
}

/// Outcome of one strategy on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The strategy does not recognise this syntax; try the next one.
    NoMatch,
    /// The strategy recognised the syntax but it is not a module reference.
    /// Classification stops here.
    Rejected,
    /// A module reference.
    Classified(ClassifiedReference),
}

/// One way of recognising module references in import targets.
pub trait ClassificationStrategy: Send + Sync {
    /// Strategy name, for logs.
    fn name(&self) -> &'static str;

    /// Tries to classify a target.
    fn attempt(&self, target: &str) -> Attempt;
}

/// `shared` (any case) is never a module.
fn is_shared(name: &str) -> bool {
    name.eq_ignore_ascii_case("shared")
}

// ────────────────────────────────────────────
// Path strategy
// ────────────────────────────────────────────

/// Recognises `…/<marker>/<module>/…` paths.
///
/// Markers are checked in priority order; the first marker present anywhere
/// in the path wins. Only targets containing a `/` are considered, so that
/// pure PHP namespaces fall through to [`NamespaceStrategy`]; backslashes in
/// such targets are normalised to `/` before splitting.
pub struct PathMarkerStrategy {
    markers: Vec<String>,
}

impl PathMarkerStrategy {
    /// Creates a strategy with the given marker segments, highest priority first.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PathMarkerStrategy {
    fn default() -> Self {
        Self::new(["modules", "Domains", "domains"])
    }
}

impl ClassificationStrategy for PathMarkerStrategy {
    fn name(&self) -> &'static str {
        "path"
    }

    fn attempt(&self, target: &str) -> Attempt {
        if !target.contains('/') {
            return Attempt::NoMatch;
        }

        let normalized = target.replace('\\', "/");
        let segments: Vec<&str> = normalized.split('/').collect();

        let Some(marker_idx) = self
            .markers
            .iter()
            .find_map(|m| segments.iter().position(|s| *s == m.as_str()))
        else {
            return Attempt::NoMatch;
        };

        match segments.get(marker_idx + 1) {
            Some(module) if !module.is_empty() && !is_shared(module) => {
                let kind = if normalized.contains("/contracts/") {
                    ReferenceKind::ModuleContracts
                } else {
                    ReferenceKind::ModuleInternals
                };
                Attempt::Classified(ClassifiedReference {
                    module: (*module).to_string(),
                    kind,
                    via: Via::Path,
                })
            }
            _ => Attempt::Rejected,
        }
    }
}

// ────────────────────────────────────────────
// Namespace strategy
// ────────────────────────────────────────────

/// Recognises `Domains\<Module>\<Rest>` PHP namespaces.
pub struct NamespaceStrategy {
    patterns: Vec<Regex>,
}

impl NamespaceStrategy {
    /// Creates a strategy from patterns tried in order. Each pattern must
    /// capture the module name in group 1 and the remainder in group 2.
    #[must_use]
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }
}

impl Default for NamespaceStrategy {
    fn default() -> Self {
        let patterns = [
            r"^\\?(?:App\\)?Domains\\([^\\]*)\\(.*)$",
            r"Domains\\([^\\]*)\\(.*)$",
        ]
        .into_iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Dropping invalid namespace pattern {p}: {e}");
                None
            }
        })
        .collect();
        Self::new(patterns)
    }
}

impl ClassificationStrategy for NamespaceStrategy {
    fn name(&self) -> &'static str {
        "namespace"
    }

    fn attempt(&self, target: &str) -> Attempt {
        let Some(caps) = self.patterns.iter().find_map(|re| re.captures(target)) else {
            return Attempt::NoMatch;
        };

        let module = caps.get(1).map_or("", |m| m.as_str());
        if module.is_empty() || is_shared(module) {
            return Attempt::Rejected;
        }

        let rest = caps.get(2).map_or("", |m| m.as_str());
        let kind = if format!("\\{rest}").contains("\\Contracts\\") {
            ReferenceKind::ModuleContracts
        } else {
            ReferenceKind::ModuleInternals
        };

        Attempt::Classified(ClassifiedReference {
            module: module.to_string(),
            kind,
            via: Via::Namespace,
        })
    }
}

// ────────────────────────────────────────────
// Classifier
// ────────────────────────────────────────────

/// Fixed shared-contracts markers, in addition to the configured root.
const SHARED_MARKERS: &[&str] = &["/shared/contracts/", "\\Shared\\Contracts\\"];

/// Maps raw import targets to module references.
pub struct ReferenceClassifier {
    shared_markers: Vec<String>,
    strategies: Vec<Box<dyn ClassificationStrategy>>,
}

impl ReferenceClassifier {
    /// Creates a classifier with the default path and namespace strategies.
    #[must_use]
    pub fn new(shared_contracts_root: Option<&Path>) -> Self {
        Self::with_strategies(
            shared_contracts_root,
            vec![
                Box::new(PathMarkerStrategy::default()),
                Box::new(NamespaceStrategy::default()),
            ],
        )
    }

    /// Creates a classifier with custom strategies, tried in order.
    #[must_use]
    pub fn with_strategies(
        shared_contracts_root: Option<&Path>,
        strategies: Vec<Box<dyn ClassificationStrategy>>,
    ) -> Self {
        let mut shared_markers: Vec<String> =
            SHARED_MARKERS.iter().map(ToString::to_string).collect();
        if let Some(root) = shared_contracts_root {
            let root = root.to_string_lossy();
            if !root.is_empty() {
                shared_markers.insert(0, root.into_owned());
            }
        }
        Self {
            shared_markers,
            strategies,
        }
    }

    /// Classifies a target. `None` means "not a cross-module reference":
    /// empty, shared contracts, a `shared` pseudo-module, or unrecognised.
    #[must_use]
    pub fn classify(&self, target: &str) -> Option<ClassifiedReference> {
        if target.is_empty() {
            return None;
        }
        if self.shared_markers.iter().any(|m| target.contains(m.as_str())) {
            return None;
        }

        for strategy in &self.strategies {
            match strategy.attempt(target) {
                Attempt::NoMatch => {}
                Attempt::Rejected => return None,
                Attempt::Classified(reference) => {
                    trace!("{} strategy classified `{target}` as {:?}", strategy.name(), reference);
                    return Some(reference);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ReferenceClassifier {
        ReferenceClassifier::new(Some(Path::new("src/shared/contracts")))
    }

    fn reference(module: &str, kind: ReferenceKind, via: Via) -> Option<ClassifiedReference> {
        Some(ClassifiedReference {
            module: module.to_string(),
            kind,
            via,
        })
    }

    // ── guards ──

    #[test]
    fn empty_target_is_unclassified() {
        assert_eq!(classifier().classify(""), None);
    }

    #[test]
    fn shared_contracts_are_always_allowed() {
        let c = classifier();
        assert_eq!(c.classify("../../src/shared/contracts/money"), None);
        assert_eq!(c.classify("@/shared/contracts/modules/x"), None);
        assert_eq!(c.classify("App\\Shared\\Contracts\\Money"), None);
    }

    #[test]
    fn third_party_imports_are_unclassified() {
        let c = classifier();
        assert_eq!(c.classify("react"), None);
        assert_eq!(c.classify("@nestjs/common"), None);
        assert_eq!(c.classify("Illuminate\\Support\\Facades\\Route"), None);
    }

    // ── path style ──

    #[test]
    fn path_internals() {
        assert_eq!(
            classifier().classify("../../modules/billing/domain/invoice"),
            reference("billing", ReferenceKind::ModuleInternals, Via::Path)
        );
    }

    #[test]
    fn path_contracts() {
        assert_eq!(
            classifier().classify("@/modules/billing/contracts/invoice"),
            reference("billing", ReferenceKind::ModuleContracts, Via::Path)
        );
    }

    #[test]
    fn path_marker_priority_prefers_modules() {
        assert_eq!(
            classifier().classify("src/domains/legacy/modules/user/service"),
            reference("user", ReferenceKind::ModuleInternals, Via::Path)
        );
    }

    #[test]
    fn path_with_backslashes_is_normalised() {
        assert_eq!(
            classifier().classify("./modules\\user\\contracts\\dto"),
            reference("user", ReferenceKind::ModuleContracts, Via::Path)
        );
    }

    #[test]
    fn path_shared_module_is_rejected() {
        let c = classifier();
        assert_eq!(c.classify("../modules/shared/utils"), None);
        assert_eq!(c.classify("../modules/SHARED/utils"), None);
    }

    #[test]
    fn path_marker_without_module_is_rejected() {
        let c = classifier();
        assert_eq!(c.classify("src/modules"), None);
        assert_eq!(c.classify("src/modules//x"), None);
    }

    // ── namespace style ──

    #[test]
    fn namespace_internals() {
        assert_eq!(
            classifier().classify("Domains\\User\\Application\\Service"),
            reference("User", ReferenceKind::ModuleInternals, Via::Namespace)
        );
    }

    #[test]
    fn namespace_with_app_prefix_and_leading_backslash() {
        assert_eq!(
            classifier().classify("\\App\\Domains\\Billing\\Domain\\Invoice"),
            reference("Billing", ReferenceKind::ModuleInternals, Via::Namespace)
        );
    }

    #[test]
    fn namespace_contracts() {
        assert_eq!(
            classifier().classify("App\\Domains\\User\\Contracts\\UserDto"),
            reference("User", ReferenceKind::ModuleContracts, Via::Namespace)
        );
    }

    #[test]
    fn namespace_nested_under_other_root() {
        assert_eq!(
            classifier().classify("Acme\\Domains\\Orders\\Infra\\Repo"),
            reference("Orders", ReferenceKind::ModuleInternals, Via::Namespace)
        );
    }

    #[test]
    fn namespace_shared_module_is_rejected() {
        let c = classifier();
        assert_eq!(c.classify("Domains\\Shared\\Money"), None);
        assert_eq!(c.classify("App\\Domains\\shared\\Money"), None);
    }

    #[test]
    fn namespace_without_rest_is_unclassified() {
        assert_eq!(classifier().classify("Domains\\User"), None);
    }

    // ── strategies as data ──

    struct Fixed;

    impl ClassificationStrategy for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn attempt(&self, target: &str) -> Attempt {
            if target.starts_with("pkg:") {
                Attempt::Classified(ClassifiedReference {
                    module: target.trim_start_matches("pkg:").to_string(),
                    kind: ReferenceKind::ModuleInternals,
                    via: Via::Path,
                })
            } else {
                Attempt::NoMatch
            }
        }
    }

    #[test]
    fn custom_strategy_list_is_honoured() {
        let c = ReferenceClassifier::with_strategies(None, vec![Box::new(Fixed)]);
        assert_eq!(
            c.classify("pkg:orders"),
            reference("orders", ReferenceKind::ModuleInternals, Via::Path)
        );
        assert_eq!(c.classify("../modules/orders/x"), None);
    }
}
