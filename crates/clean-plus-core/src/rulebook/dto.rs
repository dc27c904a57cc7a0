//! YAML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization. Every field is
//! optional so that the loader can report all missing keys at once
//! instead of stopping at the first serde error.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw YAML representation of a rulebook file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulebookDto {
    /// The `clean_plus:` top-level section.
    #[serde(default)]
    pub clean_plus: Option<CleanPlusDto>,
}

/// The `clean_plus:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanPlusDto {
    /// Profiles keyed by profile name. A `null` profile body is kept so it
    /// can be reported as missing `roots`.
    #[serde(default)]
    pub profiles: Option<BTreeMap<String, Option<ProfileDto>>>,

    /// Routing section, kept untyped: a malformed routing section
    /// degrades to "no routing rules" rather than failing the load.
    #[serde(default)]
    pub routing: Option<serde_yaml::Value>,
}

/// A single profile body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDto {
    /// Root directories for this profile.
    #[serde(default)]
    pub roots: Option<RootsDto>,
}

/// The `roots:` mapping of a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootsDto {
    /// Directory whose first-level children are modules.
    #[serde(default)]
    pub module_root: Option<String>,
    /// Directory holding the shared, module-agnostic contracts.
    #[serde(default)]
    pub shared_contracts_root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_rulebook() {
        let yaml = r"
clean_plus:
  profiles:
    laravel:
      roots:
        module_root: src/modules
        shared_contracts_root: src/shared/contracts
  routing:
    locations:
      laravel:
        forbidden_route_definition_glob: ['routes/*.php']
        registration_location: bootstrap/routes.php
";
        let dto: RulebookDto = serde_yaml::from_str(yaml).unwrap();
        let section = dto.clean_plus.unwrap();
        let profiles = section.profiles.unwrap();
        let roots = profiles["laravel"].clone().unwrap().roots.unwrap();
        assert_eq!(roots.module_root.as_deref(), Some("src/modules"));
        assert_eq!(
            roots.shared_contracts_root.as_deref(),
            Some("src/shared/contracts")
        );
        assert!(section.routing.is_some());
    }

    #[test]
    fn deserialize_null_profile_body() {
        let yaml = "clean_plus:\n  profiles:\n    empty:\n";
        let dto: RulebookDto = serde_yaml::from_str(yaml).unwrap();
        let profiles = dto.clean_plus.unwrap().profiles.unwrap();
        assert!(profiles["empty"].is_none());
    }

    #[test]
    fn deserialize_missing_section() {
        let dto: RulebookDto = serde_yaml::from_str("other: 1\n").unwrap();
        assert!(dto.clean_plus.is_none());
    }
}
