//! Settings persistence coordination.
//!
//! Stores map preferences (base layer, minimap) as JSON strings in eframe's
//! persistent storage. Points are session data and never go through here.

use serde::{Deserialize, Serialize};
use crate::state::MapPreferences;

const MAP_PREFERENCES_KEY: &str = "map_preferences";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads a setting from persistent storage with a custom default.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `key` - The storage key for this setting
    /// * `default` - The value used when the key is missing or unreadable
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|storage| storage.get_string(key)) else {
            return default;
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("ignoring stored setting {key}: {e}");
                default
            }
        }
    }

    /// Saves a setting to persistent storage.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface (mutable)
    /// * `key` - The storage key for this setting
    /// * `value` - The value to serialize and save
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => log::warn!("could not store setting {key}: {e}"),
        }
    }

    pub fn load_map_preferences(storage: Option<&dyn eframe::Storage>) -> MapPreferences {
        Self::load_setting_or(storage, MAP_PREFERENCES_KEY, MapPreferences::default())
    }

    pub fn save_map_preferences(storage: &mut dyn eframe::Storage, preferences: &MapPreferences) {
        Self::save_setting(storage, MAP_PREFERENCES_KEY, preferences);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BaseLayer;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_map_preferences_round_trip() {
        let mut storage = MockStorage::new();
        let prefs = MapPreferences {
            base_layer: BaseLayer::Satellite,
            minimap_visible: false,
        };

        SettingsCoordinator::save_map_preferences(&mut storage, &prefs);

        assert_eq!(SettingsCoordinator::load_map_preferences(Some(&storage)), prefs);
    }

    #[test]
    fn test_missing_preferences_use_defaults() {
        let storage = MockStorage::new();
        assert_eq!(
            SettingsCoordinator::load_map_preferences(Some(&storage)),
            MapPreferences::default()
        );
        assert_eq!(
            SettingsCoordinator::load_map_preferences(None),
            MapPreferences::default()
        );
    }

    #[test]
    fn test_corrupt_setting_uses_default() {
        let mut storage = MockStorage::new();
        eframe::Storage::set_string(&mut storage, "zoom", "not json".to_string());
        let zoom: f64 = SettingsCoordinator::load_setting_or(Some(&storage), "zoom", 6.0);
        assert_eq!(zoom, 6.0);
    }
}
