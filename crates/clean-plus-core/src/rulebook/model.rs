//! Validated rulebook model.
//!
//! No serde, no I/O. Values here are only produced by the loader, after
//! every required key has been checked.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A named pair of roots that describe one project layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    key: String,
    module_root: PathBuf,
    shared_contracts_root: Option<PathBuf>,
}

impl Profile {
    /// Creates a new profile.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        module_root: impl Into<PathBuf>,
        shared_contracts_root: Option<PathBuf>,
    ) -> Self {
        Self {
            key: key.into(),
            module_root: module_root.into(),
            shared_contracts_root,
        }
    }

    /// Returns the profile key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the module root, as written in the rulebook.
    #[must_use]
    pub fn module_root(&self) -> &Path {
        &self.module_root
    }

    /// Returns the shared contracts root, if configured.
    #[must_use]
    pub fn shared_contracts_root(&self) -> Option<&Path> {
        self.shared_contracts_root.as_deref()
    }
}

/// Per-profile routing checks. Empty means "nothing to check".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    /// Globs (relative to the run base) where inline route definitions are forbidden.
    pub forbidden_route_definition_glob: Vec<String>,
    /// The composition-root file that must list route files explicitly.
    pub registration_location: Option<PathBuf>,
}

impl RoutingConfig {
    /// Returns true if neither check is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forbidden_route_definition_glob.is_empty() && self.registration_location.is_none()
    }
}

/// The whole validated rulebook.
#[derive(Debug, Clone, Default)]
pub struct Rulebook {
    profiles: BTreeMap<String, Profile>,
    routing: BTreeMap<String, RoutingConfig>,
}

impl Rulebook {
    /// Creates a rulebook from already-validated parts.
    #[must_use]
    pub fn new(profiles: Vec<Profile>, routing: BTreeMap<String, RoutingConfig>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|p| (p.key.clone(), p))
                .collect(),
            routing,
        }
    }

    /// Looks up a profile by key.
    #[must_use]
    pub fn profile(&self, key: &str) -> Option<&Profile> {
        self.profiles.get(key)
    }

    /// Iterates profiles in key order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Returns all profile keys in order.
    #[must_use]
    pub fn profile_keys(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// Returns the routing checks for a profile, empty if none are configured.
    #[must_use]
    pub fn routing_for(&self, key: &str) -> RoutingConfig {
        self.routing.get(key).cloned().unwrap_or_default()
    }
}
