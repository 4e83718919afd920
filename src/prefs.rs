//! Visitor preferences
//!
//! Two values survive a reload: the display mode and the theme name. Both
//! live in LocalStorage on the web; native builds and tests use an in-memory
//! map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Content display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Polished copy
    #[default]
    Sanitized,
    /// Unfiltered copy ("no-BS" mode)
    Raw,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Sanitized => "sanitized",
            DisplayMode::Raw => "raw",
        }
    }

    /// Stored form: `"true"` for raw, `"false"` for sanitized
    pub fn stored(&self) -> &'static str {
        match self {
            DisplayMode::Sanitized => "false",
            DisplayMode::Raw => "true",
        }
    }

    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "true" => Some(DisplayMode::Raw),
            "false" => Some(DisplayMode::Sanitized),
            _ => None,
        }
    }

    /// Whether the raw-mode body class should be present
    pub fn is_raw(&self) -> bool {
        *self == DisplayMode::Raw
    }
}

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns false if the write was refused (quota, private mode)
    fn set(&mut self, key: &str, value: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// None when storage is unavailable (disabled cookies, sandboxed frame)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.storage.set_item(key, value).is_ok()
    }
}

/// Remembered choices; `None` means the page default applies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub display_mode: Option<DisplayMode>,
    pub theme: Option<String>,
}

impl Preferences {
    const DISPLAY_MODE_KEY: &'static str = "nobs-mode";
    const THEME_KEY: &'static str = "theme";

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let display_mode = store
            .get(Self::DISPLAY_MODE_KEY)
            .and_then(|v| DisplayMode::from_stored(&v));
        let theme = store.get(Self::THEME_KEY).filter(|t| !t.is_empty());
        Self {
            display_mode,
            theme,
        }
    }

    pub fn set_display_mode(&mut self, store: &mut dyn KeyValueStore, mode: DisplayMode) {
        self.display_mode = Some(mode);
        if !store.set(Self::DISPLAY_MODE_KEY, mode.stored()) {
            log::warn!("Could not persist display mode");
        }
    }

    pub fn set_theme(&mut self, store: &mut dyn KeyValueStore, theme: &str) {
        self.theme = Some(theme.to_string());
        if !store.set(Self::THEME_KEY, theme) {
            log::warn!("Could not persist theme");
        }
    }

    /// Display mode with the default filled in
    pub fn effective_display_mode(&self) -> DisplayMode {
        self.display_mode.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_unset() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.effective_display_mode(), DisplayMode::Sanitized);
    }

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.set_display_mode(&mut store, DisplayMode::Raw);
        prefs.set_theme(&mut store, "amber");

        assert_eq!(store.get("nobs-mode").as_deref(), Some("true"));
        let loaded = Preferences::load(&store);
        assert_eq!(loaded.display_mode, Some(DisplayMode::Raw));
        assert_eq!(loaded.theme.as_deref(), Some("amber"));
    }

    #[test]
    fn test_unknown_mode_is_unset() {
        let mut store = MemoryStore::new();
        store.set("nobs-mode", "yes");
        store.set("theme", "");
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.display_mode, None);
        assert_eq!(prefs.theme, None);
    }
}
