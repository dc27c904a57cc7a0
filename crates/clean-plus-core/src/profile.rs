//! Profile selection: explicit key or auto-detection by module root.

use std::path::Path;

use tracing::debug;

use crate::rulebook::{ConfigError, Profile, Rulebook};

/// Picks the active profile.
///
/// With an explicit key the rulebook lookup is authoritative. Without one,
/// every profile whose `base/module_root` exists is a candidate and exactly
/// one candidate must remain. The existence probe is the only disk access.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownProfile`], [`ConfigError::NoProfileDetected`]
/// or [`ConfigError::AmbiguousProfile`].
pub fn resolve<'a>(
    rulebook: &'a Rulebook,
    explicit: Option<&str>,
    base: &Path,
) -> Result<&'a Profile, ConfigError> {
    if let Some(key) = explicit {
        return rulebook
            .profile(key)
            .ok_or_else(|| ConfigError::UnknownProfile {
                key: key.to_string(),
                available: rulebook.profile_keys(),
            });
    }

    let candidates: Vec<&Profile> = rulebook
        .profiles()
        .filter(|p| {
            let exists = base.join(p.module_root()).is_dir();
            debug!(
                "profile `{}`: module root {} {}",
                p.key(),
                p.module_root().display(),
                if exists { "found" } else { "absent" }
            );
            exists
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(ConfigError::NoProfileDetected),
        [only] => Ok(*only),
        many => Err(ConfigError::AmbiguousProfile {
            candidates: many.iter().map(|p| p.key().to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn rulebook() -> Rulebook {
        Rulebook::new(
            vec![
                Profile::new("laravel", "app/Domains", None),
                Profile::new("node", "src/modules", None),
            ],
            BTreeMap::new(),
        )
    }

    #[test]
    fn explicit_key_wins_without_touching_disk() {
        let book = rulebook();
        let profile = resolve(&book, Some("node"), Path::new("/nonexistent")).unwrap();
        assert_eq!(profile.key(), "node");
    }

    #[test]
    fn explicit_unknown_key_lists_available() {
        let book = rulebook();
        let err = resolve(&book, Some("rails"), Path::new(".")).unwrap_err();
        match err {
            ConfigError::UnknownProfile { key, available } => {
                assert_eq!(key, "rails");
                assert_eq!(available, vec!["laravel", "node"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn detects_single_existing_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/modules")).unwrap();

        let book = rulebook();
        let profile = resolve(&book, None, tmp.path()).unwrap();
        assert_eq!(profile.key(), "node");
    }

    #[test]
    fn no_existing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let book = rulebook();
        assert!(matches!(
            resolve(&book, None, tmp.path()),
            Err(ConfigError::NoProfileDetected)
        ));
    }

    #[test]
    fn several_existing_roots_are_ambiguous() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/modules")).unwrap();
        fs::create_dir_all(tmp.path().join("app/Domains")).unwrap();

        let book = rulebook();
        match resolve(&book, None, tmp.path()) {
            Err(ConfigError::AmbiguousProfile { candidates }) => {
                assert_eq!(candidates, vec!["laravel", "node"]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn detection_is_repeatable() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("app/Domains")).unwrap();

        let book = rulebook();
        let first = resolve(&book, None, tmp.path()).unwrap().key().to_string();
        let second = resolve(&book, None, tmp.path()).unwrap().key().to_string();
        assert_eq!(first, second);
    }
}
