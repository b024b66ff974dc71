//! Key-value preference store.
//!
//! The host injects the store at construction so the engine never owns
//! a global; values are plain strings with no cross-restart guarantee.

use std::collections::HashMap;

pub const SETTING_SEARCH_TERM: &str = "find.search_term";
pub const SETTING_ACCENT_FOLD: &str = "find.accent_fold";
pub const SETTING_CASE_SENSITIVE: &str = "find.case_sensitive";

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Process-lifetime in-memory store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

pub fn get_bool(store: &dyn SettingsStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        Some(v) => v == "true",
        None => default,
    }
}

pub fn set_bool(store: &mut dyn SettingsStore, key: &str, value: bool) {
    store.set(key, if value { "true" } else { "false" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemorySettings::new();
        assert_eq!(store.get(SETTING_SEARCH_TERM), None);

        store.set(SETTING_SEARCH_TERM, "viññāṇaṁ");
        assert_eq!(store.get(SETTING_SEARCH_TERM).as_deref(), Some("viññāṇaṁ"));

        store.set(SETTING_SEARCH_TERM, "sati");
        assert_eq!(store.get(SETTING_SEARCH_TERM).as_deref(), Some("sati"));
    }

    #[test]
    fn test_bool_helpers() {
        let mut store = MemorySettings::new();
        assert!(get_bool(&store, SETTING_ACCENT_FOLD, true));
        assert!(!get_bool(&store, SETTING_CASE_SENSITIVE, false));

        set_bool(&mut store, SETTING_ACCENT_FOLD, false);
        assert!(!get_bool(&store, SETTING_ACCENT_FOLD, true));

        // Unexpected stored values read as false, not as an error.
        store.set(SETTING_CASE_SENSITIVE, "yes");
        assert!(!get_bool(&store, SETTING_CASE_SENSITIVE, false));
    }
}
