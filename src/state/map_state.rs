//! Map widget state management.
//!
//! Everything the map panel remembers between frames apart from the view
//! itself (center and zoom live in the session): layer choices, the last
//! clicked location, the open popup and the geocoder search box.

use std::collections::HashSet;

use declimag::{GeoPoint, GeocodeHit};
use serde::{Deserialize, Serialize};

/// Base tile layer shown under the markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaseLayer {
    #[default]
    Street,
    Satellite,
}

/// Map preferences kept across launches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPreferences {
    pub base_layer: BaseLayer,
    pub minimap_visible: bool,
}

impl Default for MapPreferences {
    fn default() -> Self {
        Self {
            base_layer: BaseLayer::Street,
            minimap_visible: true,
        }
    }
}

/// State of the interactive map.
///
/// Responsibilities:
/// - Tracking the active base layer and hidden point layers
/// - Remembering the last clicked location and the open marker popup
/// - Holding the geocoder query and its results
#[derive(Debug, Clone, Default)]
pub struct MapState {
    preferences: MapPreferences,
    /// Point layers unchecked in the layer control, by point name
    hidden_layers: HashSet<String>,
    last_clicked: Option<GeoPoint>,
    /// Index of the record whose popup is open
    open_popup: Option<usize>,
    is_dragging: bool,
    fullscreen: bool,
    search_query: String,
    search_results: Vec<GeocodeHit>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: MapPreferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    // ===== Queries =====

    pub fn preferences(&self) -> MapPreferences {
        self.preferences
    }

    pub fn base_layer(&self) -> BaseLayer {
        self.preferences.base_layer
    }

    pub fn minimap_visible(&self) -> bool {
        self.preferences.minimap_visible
    }

    pub fn is_layer_visible(&self, name: &str) -> bool {
        !self.hidden_layers.contains(name)
    }

    pub fn last_clicked(&self) -> Option<GeoPoint> {
        self.last_clicked
    }

    pub fn open_popup(&self) -> Option<usize> {
        self.open_popup
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn search_results(&self) -> &[GeocodeHit] {
        &self.search_results
    }

    // ===== Mutations =====

    pub fn set_base_layer(&mut self, layer: BaseLayer) {
        self.preferences.base_layer = layer;
    }

    pub fn toggle_minimap(&mut self) {
        self.preferences.minimap_visible = !self.preferences.minimap_visible;
    }

    pub fn set_layer_visible(&mut self, name: &str, visible: bool) {
        if visible {
            self.hidden_layers.remove(name);
        } else {
            self.hidden_layers.insert(name.to_string());
        }
    }

    /// Drops visibility flags and the popup for points that no longer exist.
    ///
    /// # Arguments
    /// * `names` - Names still stored in the session
    /// * `point_count` - Number of stored records
    pub fn retain_layers(&mut self, names: &[&str], point_count: usize) {
        self.hidden_layers.retain(|hidden| names.contains(&hidden.as_str()));
        if self.open_popup.is_some_and(|index| index >= point_count) {
            self.open_popup = None;
        }
    }

    /// Records a click on empty map; closes any marker popup.
    pub fn set_last_clicked(&mut self, point: GeoPoint) {
        self.last_clicked = Some(point);
        self.open_popup = None;
    }

    /// Opens a marker popup, or closes it when the same marker is clicked again.
    pub fn toggle_popup(&mut self, index: usize) {
        self.open_popup = if self.open_popup == Some(index) { None } else { Some(index) };
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn search_query_mut(&mut self) -> &mut String {
        &mut self.search_query
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_results(&mut self, results: Vec<GeocodeHit>) {
        self.search_results = results;
    }

    pub fn clear_search_results(&mut self) {
        self.search_results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let map = MapState::new();
        assert_eq!(map.base_layer(), BaseLayer::Street);
        assert!(map.minimap_visible());
        assert!(map.is_layer_visible("pc1"));
        assert_eq!(map.last_clicked(), None);
    }

    #[test]
    fn test_layer_visibility() {
        let mut map = MapState::new();
        map.set_layer_visible("pc1", false);
        assert!(!map.is_layer_visible("pc1"));
        assert!(map.is_layer_visible("pc2"));
        map.set_layer_visible("pc1", true);
        assert!(map.is_layer_visible("pc1"));
    }

    #[test]
    fn test_retain_layers_forgets_deleted_points() {
        let mut map = MapState::new();
        map.set_layer_visible("pc1", false);
        map.toggle_popup(1);
        map.retain_layers(&["pc2"], 1);
        map.set_layer_visible("pc2", true);
        assert!(map.is_layer_visible("pc1"));
        assert_eq!(map.open_popup(), None);
    }

    #[test]
    fn test_popup_toggle_and_click() {
        let mut map = MapState::new();
        map.toggle_popup(0);
        assert_eq!(map.open_popup(), Some(0));
        map.toggle_popup(0);
        assert_eq!(map.open_popup(), None);

        map.toggle_popup(2);
        map.set_last_clicked(GeoPoint::new(-12.0, -75.0));
        assert_eq!(map.open_popup(), None);
        assert_eq!(map.last_clicked(), Some(GeoPoint::new(-12.0, -75.0)));
    }

    #[test]
    fn test_preferences_serialize() {
        let prefs = MapPreferences {
            base_layer: BaseLayer::Satellite,
            minimap_visible: false,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: MapPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
