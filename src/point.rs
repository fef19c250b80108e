//! The point record stored for each user-placed marker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utm::GeoPoint;

/// A named geographic point with the date used for its declination.
///
/// Names are display keys, not identifiers: duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Text shown in the marker popup; defaults to the name
    pub popup: String,
    pub date: NaiveDate,
}

impl PointRecord {
    pub fn new(name: impl Into<String>, position: GeoPoint, date: NaiveDate) -> Self {
        let name = name.into();
        Self {
            popup: name.clone(),
            name,
            lat: position.lat,
            lon: position.lon,
            date,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}
