//! Preference lookup for the must-contain gate.
//!
//! The engine itself only takes an explicit `Option<&str>`. This module is the
//! adapter that fills it from a preference store when the caller gave none.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// Preference holding the text a line must contain to count as a time block.
pub const MUST_CONTAIN_PREF_KEY: &str = "timeblockTextMustContainString";

/// Errors reading a preference.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    /// The store could not be read.
    #[error("preference store unavailable: {0}")]
    Unavailable(String),

    /// The stored value is not a string.
    #[error("preference {key} is not a string")]
    NotAString { key: String },
}

/// A read-only key/value preference store.
pub trait PreferenceStore {
    /// Returns the preference value, or `None` when unset.
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
}

impl PreferenceStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(Self::get(self, key).cloned())
    }
}

impl PreferenceStore for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(Self::get(self, key).cloned())
    }
}

/// The must-contain preference, or `None` if it is unset, empty or unreadable.
///
/// A read failure means no filter; it is logged and not returned.
pub fn must_contain_from_store(store: &dyn PreferenceStore) -> Option<String> {
    match store.get(MUST_CONTAIN_PREF_KEY) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(err) => {
            tracing::warn!(key = MUST_CONTAIN_PREF_KEY, %err, "ignoring unreadable preference");
            None
        }
    }
}

/// The must-contain text to use: `explicit` if non-empty, else the stored preference.
pub fn resolve_must_contain(explicit: Option<&str>, store: &dyn PreferenceStore) -> Option<String> {
    match explicit {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => must_contain_from_store(store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::Unavailable("disk on fire".to_string()))
        }
    }

    fn store(value: &str) -> HashMap<String, String> {
        HashMap::from([(MUST_CONTAIN_PREF_KEY.to_string(), value.to_string())])
    }

    #[test]
    fn explicit_value_wins() {
        assert_eq!(
            resolve_must_contain(Some("at"), &store("from")),
            Some("at".to_string())
        );
    }

    #[test]
    fn falls_back_to_store() {
        assert_eq!(resolve_must_contain(None, &store("from")), Some("from".to_string()));
        assert_eq!(resolve_must_contain(Some(""), &store("from")), Some("from".to_string()));
    }

    #[test]
    fn empty_or_missing_preference_means_no_filter() {
        assert_eq!(resolve_must_contain(None, &store("")), None);
        assert_eq!(resolve_must_contain(None, &HashMap::<String, String>::new()), None);
        assert_eq!(resolve_must_contain(None, &BTreeMap::<String, String>::new()), None);
    }

    #[test]
    fn unreadable_store_means_no_filter() {
        assert_eq!(resolve_must_contain(None, &BrokenStore), None);
        assert_eq!(resolve_must_contain(Some("at"), &BrokenStore), Some("at".to_string()));
    }
}
