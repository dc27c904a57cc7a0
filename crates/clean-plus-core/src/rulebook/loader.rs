//! DTO → model conversion with validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_yaml::Value;
use tracing::debug;

use super::dto::{ProfileDto, RulebookDto};
use super::model::{Profile, Rulebook, RoutingConfig};
use super::ConfigError;

/// Converts a [`RulebookDto`] into a validated [`Rulebook`].
///
/// All structural problems are collected before returning, so a broken
/// rulebook is reported in one pass.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] listing every missing or invalid key.
pub fn load(dto: RulebookDto) -> Result<Rulebook, ConfigError> {
    let Some(section) = dto.clean_plus else {
        return Err(ConfigError::Invalid(vec![
            "clean_plus: missing required key".to_string(),
        ]));
    };

    let Some(profile_dtos) = section.profiles else {
        return Err(ConfigError::Invalid(vec![
            "clean_plus.profiles: missing required key".to_string(),
        ]));
    };

    let mut errors = Vec::new();
    let mut profiles = Vec::new();

    for (key, body) in profile_dtos {
        match convert_profile(&key, body) {
            Ok(profile) => profiles.push(profile),
            Err(mut e) => errors.append(&mut e),
        }
    }

    if !errors.is_empty() {
        return Err(ConfigError::Invalid(errors));
    }

    let routing = section
        .routing
        .as_ref()
        .map(convert_routing)
        .unwrap_or_default();

    Ok(Rulebook::new(profiles, routing))
}

fn convert_profile(key: &str, body: Option<ProfileDto>) -> Result<Profile, Vec<String>> {
    let ctx = format!("clean_plus.profiles.{key}");

    let Some(roots) = body.and_then(|b| b.roots) else {
        return Err(vec![format!("{ctx}.roots: missing required key")]);
    };

    let mut errors = Vec::new();

    let module_root = match roots.module_root.as_deref().map(str::trim) {
        None => {
            errors.push(format!("{ctx}.roots.module_root: missing required key"));
            None
        }
        Some("") => {
            errors.push(format!("{ctx}.roots.module_root: must not be empty"));
            None
        }
        Some(root) => Some(PathBuf::from(root)),
    };

    let shared_contracts_root = match roots.shared_contracts_root.as_deref().map(str::trim) {
        Some("") => {
            errors.push(format!(
                "{ctx}.roots.shared_contracts_root: must not be empty"
            ));
            None
        }
        other => other.map(PathBuf::from),
    };

    match module_root {
        Some(module_root) if errors.is_empty() => {
            Ok(Profile::new(key, module_root, shared_contracts_root))
        }
        _ => Err(errors),
    }
}

/// Reads `routing.locations.<profile>` leniently. Anything of the wrong
/// shape is dropped with a debug log.
fn convert_routing(routing: &Value) -> BTreeMap<String, RoutingConfig> {
    let Some(locations) = routing.get("locations").and_then(Value::as_mapping) else {
        debug!("routing.locations absent or not a mapping; no routing checks");
        return BTreeMap::new();
    };

    let mut result = BTreeMap::new();
    for (key, entry) in locations {
        let Some(key) = key.as_str() else {
            debug!("ignoring non-string routing location key");
            continue;
        };

        let forbidden_route_definition_glob = match entry.get("forbidden_route_definition_glob") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect(),
            Some(_) => {
                debug!("routing.locations.{key}.forbidden_route_definition_glob is not a list");
                Vec::new()
            }
            None => Vec::new(),
        };

        let registration_location = match entry.get("registration_location") {
            Some(Value::String(path)) if !path.trim().is_empty() => {
                Some(PathBuf::from(path.trim()))
            }
            Some(_) => {
                debug!("routing.locations.{key}.registration_location is not a path");
                None
            }
            None => None,
        };

        result.insert(
            key.to_string(),
            RoutingConfig {
                forbidden_route_definition_glob,
                registration_location,
            },
        );
    }
    result
}
