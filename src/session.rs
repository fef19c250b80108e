//! Per-session state: the point list and the map view.
//!
//! A `SessionState` lives exactly as long as the application window. It is
//! created from the configured defaults on launch and never written to disk.

use crate::config::AppConfig;
use crate::point::PointRecord;
use crate::tiles::{MAX_ZOOM, MIN_ZOOM};
use crate::utm::GeoPoint;

/// Session context owning every point record and the map view settings.
///
/// Responsibilities:
/// - Appending and removing point records
/// - Tracking the map center and zoom level
/// - Listing point names for the delete selector
#[derive(Debug, Clone)]
pub struct SessionState {
    points: Vec<PointRecord>,
    center: GeoPoint,
    zoom: f64,
    default_center: GeoPoint,
    default_zoom: f64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl SessionState {
    /// Creates an empty session centered on the configured start location.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            points: Vec::new(),
            center: config.start_center,
            zoom: config.start_zoom,
            default_center: config.start_center,
            default_zoom: config.start_zoom,
        }
    }

    // ===== Point Queries =====

    pub fn points(&self) -> &[PointRecord] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the distinct point names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if !names.contains(&point.name.as_str()) {
                names.push(&point.name);
            }
        }
        names
    }

    // ===== Point Mutations =====

    pub fn add_point(&mut self, record: PointRecord) {
        self.points.push(record);
    }

    /// Removes every record whose name equals `name` exactly.
    ///
    /// Returns the number of records removed.
    pub fn remove_by_name(&mut self, name: &str) -> usize {
        let before = self.points.len();
        self.points.retain(|p| p.name != name);
        before - self.points.len()
    }

    // ===== View =====

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Moves the view. Latitude is clamped to the Web Mercator limits and
    /// longitude wrapped into [-180, 180).
    pub fn set_center(&mut self, center: GeoPoint) {
        self.center = GeoPoint::new(
            center.lat.clamp(-85.05, 85.05),
            (center.lon + 180.0).rem_euclid(360.0) - 180.0,
        );
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Restores the start center and zoom.
    pub fn reset_view(&mut self) {
        self.center = self.default_center;
        self.zoom = self.default_zoom;
    }
}
