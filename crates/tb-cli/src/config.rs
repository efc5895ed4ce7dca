//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tb_core::{PreferenceError, PreferenceStore};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Host-style preferences, keyed by preference name
    /// (e.g. `timeblockTextMustContainString`).
    #[serde(default)]
    pub preferences: BTreeMap<String, Value>,

    /// Skip completed and cancelled lines in `tb now` unless overridden.
    #[serde(default)]
    pub default_exclude_closed: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TB_*)
        figment = figment.merge(Env::prefixed("TB_"));

        figment.extract()
    }
}

impl PreferenceStore for Config {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match self.preferences.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(_) => Err(PreferenceError::NotAString {
                key: key.to_string(),
            }),
        }
    }
}

/// Returns the platform-specific config directory for tb.
///
/// On Linux: `~/.config/tb`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use tb_core::{MUST_CONTAIN_PREF_KEY, resolve_must_contain};

    #[test]
    fn test_dirs_config_path_ends_with_tb() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "tb");
    }

    #[test]
    fn test_default_config_has_no_preferences() {
        let config = Config::default();
        assert!(config.preferences.is_empty());
        assert!(!config.default_exclude_closed);
        assert_eq!(PreferenceStore::get(&config, MUST_CONTAIN_PREF_KEY), Ok(None));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tb.toml");
        std::fs::write(
            &path,
            "default_exclude_closed = true\n\n[preferences]\ntimeblockTextMustContainString = \"at\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert!(config.default_exclude_closed);
        assert_eq!(
            PreferenceStore::get(&config, MUST_CONTAIN_PREF_KEY),
            Ok(Some("at".to_string()))
        );
    }

    #[test]
    fn test_non_string_preference_is_an_error_and_means_no_filter() {
        let mut config = Config::default();
        config
            .preferences
            .insert(MUST_CONTAIN_PREF_KEY.to_string(), Value::from(42));

        assert_eq!(
            PreferenceStore::get(&config, MUST_CONTAIN_PREF_KEY),
            Err(PreferenceError::NotAString {
                key: MUST_CONTAIN_PREF_KEY.to_string()
            })
        );
        assert_eq!(resolve_must_contain(None, &config), None);
    }
}
