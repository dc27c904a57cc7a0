//! Module boundary rule engine.
//!
//! Determines the identity of each scanned file and evaluates the boundary
//! decision table against its classified imports, producing [`Violation`]s.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::classifier::{ClassifiedReference, ReferenceClassifier, ReferenceKind};
use crate::extractor::RawImport;
use crate::types::{Location, Violation};

/// Rule code for a shared contract importing a module.
pub const SHARED_CONTRACTS_CODE: &str = "CP001";
/// Rule code for a module contract importing another module.
pub const MODULE_CONTRACTS_CODE: &str = "CP002";
/// Rule code for a forbidden cross-module import.
pub const CROSS_MODULE_CODE: &str = "CP003";

const SHARED_CONTRACTS_RULE: &str = "shared-contracts-import";
const MODULE_CONTRACTS_RULE: &str = "module-contracts-import";
const CROSS_MODULE_RULE: &str = "cross-module-import";

/// Where a scanned file sits in the module layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIdentity {
    /// Under the shared contracts root. Always strict.
    SharedContracts,
    /// Under `<module_root>/<name>/`.
    Module {
        /// First path segment beneath the module root.
        name: String,
        /// True if the file lives in `<module_root>/<name>/contracts/`.
        strict_contracts: bool,
    },
}

impl SourceIdentity {
    /// Returns true for files that may depend on nothing but shared
    /// contracts and their own module.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        match self {
            Self::SharedContracts => true,
            Self::Module {
                strict_contracts, ..
            } => *strict_contracts,
        }
    }

    /// Returns the module name, if the file belongs to a module.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::SharedContracts => None,
            Self::Module { name, .. } => Some(name),
        }
    }
}

/// A boundary decision: rule code, rule name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breach {
    /// Rule code.
    pub code: &'static str,
    /// Rule name.
    pub rule: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Applies the boundary decision table to one classified reference.
///
/// The first matching row decides:
///
/// 1. same module → allowed
/// 2. source is shared contracts → breach
/// 3. source is a module's contracts layer → breach
/// 4. target is another module's contracts → allowed
/// 5. otherwise → breach
///
/// The source's strictness is checked before the target's kind, so a
/// contracts file may not import even another module's contracts.
#[must_use]
pub fn decide(identity: &SourceIdentity, reference: &ClassifiedReference) -> Option<Breach> {
    let target = reference.module.as_str();

    if identity.module() == Some(target) {
        return None;
    }

    match identity {
        SourceIdentity::SharedContracts => Some(Breach {
            code: SHARED_CONTRACTS_CODE,
            rule: SHARED_CONTRACTS_RULE,
            message: format!("Shared contracts must not import modules (found {target})."),
        }),
        SourceIdentity::Module { .. } if identity.is_strict() => Some(Breach {
            code: MODULE_CONTRACTS_CODE,
            rule: MODULE_CONTRACTS_RULE,
            message: format!("Module contracts must not import other modules (found {target})."),
        }),
        SourceIdentity::Module { name, .. } => match reference.kind {
            ReferenceKind::ModuleContracts => None,
            ReferenceKind::ModuleInternals => Some(Breach {
                code: CROSS_MODULE_CODE,
                rule: CROSS_MODULE_RULE,
                message: format!(
                    "Forbidden cross-module import: {name} -> {target} (allowed: other module contracts only)."
                ),
            }),
        },
    }
}

/// Evaluates boundary rules for files under one profile's roots.
pub struct ViolationEngine {
    module_root: PathBuf,
    shared_contracts_root: Option<PathBuf>,
    classifier: ReferenceClassifier,
}

impl ViolationEngine {
    /// Creates an engine. Roots must be comparable with the paths later
    /// passed to [`identify`](Self::identify), i.e. joined onto the same base.
    #[must_use]
    pub fn new(
        module_root: impl Into<PathBuf>,
        shared_contracts_root: Option<PathBuf>,
        classifier: ReferenceClassifier,
    ) -> Self {
        Self {
            module_root: module_root.into(),
            shared_contracts_root,
            classifier,
        }
    }

    /// Works out which module (if any) a file belongs to.
    ///
    /// Returns `None` for files outside both roots and for files whose
    /// first segment under the module root is missing or `shared`; such
    /// files are never checked. A file directly in the module root takes
    /// its own file name as the module name.
    #[must_use]
    pub fn identify(&self, path: &Path) -> Option<SourceIdentity> {
        if let Some(shared) = &self.shared_contracts_root {
            if path.starts_with(shared) {
                return Some(SourceIdentity::SharedContracts);
            }
        }

        let rel = path.strip_prefix(&self.module_root).ok()?;
        let mut segments = rel.components().filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        });

        let name = segments.next()?;
        if name.eq_ignore_ascii_case("shared") {
            return None;
        }
        let strict_contracts = segments.next() == Some("contracts") && segments.next().is_some();

        Some(SourceIdentity::Module {
            name: name.to_string(),
            strict_contracts,
        })
    }

    /// Checks every import of one file. `file` is the path used in reports.
    pub fn check<I>(&self, file: &Path, identity: &SourceIdentity, imports: I) -> Vec<Violation>
    where
        I: IntoIterator<Item = RawImport>,
    {
        let mut violations = Vec::new();

        for import in imports {
            let Some(reference) = self.classifier.classify(&import.target) else {
                continue;
            };

            if let Some(breach) = decide(identity, &reference) {
                debug!(
                    "{}:{}: {} ({})",
                    file.display(),
                    import.line,
                    breach.rule,
                    import.target
                );
                violations.push(Violation::new(
                    breach.code,
                    breach.rule,
                    Location::new(file, import.line),
                    import.target,
                    breach.message,
                ));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Via;

    fn engine() -> ViolationEngine {
        ViolationEngine::new(
            "src/modules",
            Some(PathBuf::from("src/shared/contracts")),
            ReferenceClassifier::new(Some(Path::new("src/shared/contracts"))),
        )
    }

    fn module(name: &str, strict: bool) -> SourceIdentity {
        SourceIdentity::Module {
            name: name.into(),
            strict_contracts: strict,
        }
    }

    fn reference(module: &str, kind: ReferenceKind) -> ClassifiedReference {
        ClassifiedReference {
            module: module.into(),
            kind,
            via: Via::Path,
        }
    }

    fn imports(targets: &[&str]) -> Vec<RawImport> {
        targets
            .iter()
            .enumerate()
            .map(|(i, t)| RawImport::new(*t, i + 1))
            .collect()
    }

    // ── identify ──

    #[test]
    fn identifies_module_file() {
        assert_eq!(
            engine().identify(Path::new("src/modules/billing/application/actions/Foo.php")),
            Some(module("billing", false))
        );
    }

    #[test]
    fn identifies_module_contracts_file() {
        assert_eq!(
            engine().identify(Path::new("src/modules/billing/contracts/InvoiceDto.php")),
            Some(module("billing", true))
        );
        assert_eq!(
            engine().identify(Path::new("src/modules/billing/contracts/events/Paid.ts")),
            Some(module("billing", true))
        );
    }

    #[test]
    fn contracts_deeper_in_module_is_not_strict() {
        assert_eq!(
            engine().identify(Path::new("src/modules/billing/domain/contracts/Repo.php")),
            Some(module("billing", false))
        );
    }

    #[test]
    fn identifies_shared_contracts_file() {
        assert_eq!(
            engine().identify(Path::new("src/shared/contracts/Money.php")),
            Some(SourceIdentity::SharedContracts)
        );
        assert!(SourceIdentity::SharedContracts.is_strict());
    }

    #[test]
    fn shared_module_and_outside_files_are_skipped() {
        let e = engine();
        assert_eq!(e.identify(Path::new("src/modules/shared/util.ts")), None);
        assert_eq!(e.identify(Path::new("src/modules/Shared/util.ts")), None);
        assert_eq!(e.identify(Path::new("src/app/main.ts")), None);
        assert_eq!(e.identify(Path::new("src/modules")), None);
    }

    #[test]
    fn file_directly_in_module_root_is_its_own_module() {
        let e = engine();
        assert_eq!(
            e.identify(Path::new("src/modules/index.ts")),
            Some(module("index.ts", false))
        );
        assert_eq!(
            e.identify(Path::new("src/modules/contracts")),
            Some(module("contracts", false))
        );
    }

    #[test]
    fn module_root_barrel_reexporting_internals_violates() {
        let e = engine();
        let file = Path::new("src/modules/index.ts");
        let identity = e.identify(file).unwrap();
        let violations = e.check(file, &identity, imports(&["@/modules/billing/domain/x"]));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CROSS_MODULE_CODE);
        assert!(violations[0]
            .message
            .contains("Forbidden cross-module import: index.ts -> billing"));
    }

    // ── decision table ──

    #[test]
    fn self_reference_never_violates() {
        for kind in [ReferenceKind::ModuleContracts, ReferenceKind::ModuleInternals] {
            for strict in [false, true] {
                assert_eq!(decide(&module("billing", strict), &reference("billing", kind)), None);
            }
        }
    }

    #[test]
    fn shared_contracts_importing_module_violates() {
        let breach = decide(
            &SourceIdentity::SharedContracts,
            &reference("user", ReferenceKind::ModuleContracts),
        )
        .unwrap();
        assert_eq!(breach.code, SHARED_CONTRACTS_CODE);
        assert_eq!(
            breach.message,
            "Shared contracts must not import modules (found user)."
        );
    }

    #[test]
    fn strict_contracts_override_contracts_exception() {
        let breach = decide(
            &module("billing", true),
            &reference("user", ReferenceKind::ModuleContracts),
        )
        .unwrap();
        assert_eq!(breach.code, MODULE_CONTRACTS_CODE);
        assert_eq!(
            breach.message,
            "Module contracts must not import other modules (found user)."
        );
    }

    #[test]
    fn other_module_contracts_are_allowed() {
        assert_eq!(
            decide(
                &module("billing", false),
                &reference("user", ReferenceKind::ModuleContracts)
            ),
            None
        );
    }

    #[test]
    fn other_module_internals_violate() {
        let breach = decide(
            &module("billing", false),
            &reference("User", ReferenceKind::ModuleInternals),
        )
        .unwrap();
        assert_eq!(breach.code, CROSS_MODULE_CODE);
        assert_eq!(
            breach.message,
            "Forbidden cross-module import: billing -> User (allowed: other module contracts only)."
        );
    }

    // ── check ──

    #[test]
    fn check_reports_only_breaches() {
        let e = engine();
        let file = Path::new("src/modules/billing/application/actions/Foo.php");
        let identity = e.identify(file).unwrap();

        let violations = e.check(
            file,
            &identity,
            imports(&[
                "Illuminate\\Support\\Str",
                "Domains\\User\\Application\\Service",
                "Domains\\User\\Contracts\\UserDto",
                "Domains\\billing\\Domain\\Invoice",
                "../../../shared/contracts/Money",
            ]),
        );

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.location.line, 2);
        assert_eq!(v.location.file, file);
        assert_eq!(v.target, "Domains\\User\\Application\\Service");
        assert!(v
            .message
            .contains("Forbidden cross-module import: billing -> User"));
    }

    #[test]
    fn own_module_imports_never_violate() {
        let e = engine();
        let file = Path::new("src/modules/billing/contracts/InvoiceDto.ts");
        let identity = e.identify(file).unwrap();
        let violations = e.check(
            file,
            &identity,
            imports(&[
                "../../billing/domain/invoice",
                "@/modules/billing/contracts/money",
                "Domains\\billing\\Domain\\X",
            ]),
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn shared_contracts_violate_for_path_and_namespace() {
        let e = engine();
        let file = Path::new("src/shared/contracts/Money.php");
        let violations = e.check(
            file,
            &SourceIdentity::SharedContracts,
            imports(&["Domains\\User\\Contracts\\UserId", "../../modules/user/contracts/id"]),
        );
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.code == SHARED_CONTRACTS_CODE));
        assert!(violations[0].message.contains("User"));
        assert!(violations[1].message.contains("user"));
    }
}
