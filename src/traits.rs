//! Narrow interfaces over the external libraries the application leans on.
//!
//! The UI only talks to these traits, so the reprojection library, the
//! geomagnetic model and the HTTP client can be swapped for fakes in tests.

use chrono::NaiveDate;

use crate::declination::DeclinationError;
use crate::fetch::{FetchError, GeocodeHit};
use crate::utm::{ConversionError, GeoPoint, UtmCoordinate};

/// Converts between UTM and WGS84 geographic coordinates.
pub trait CoordinateConverter {
    /// Converts a user-entered UTM coordinate to latitude/longitude.
    fn utm_to_geographic(&self, utm: &UtmCoordinate) -> Result<GeoPoint, ConversionError>;

    /// Converts a geographic position back to UTM, picking the zone and band
    /// from the position itself.
    fn geographic_to_utm(&self, point: GeoPoint) -> Result<UtmCoordinate, ConversionError>;
}

/// Evaluates a geomagnetic field model.
pub trait MagneticModel {
    /// Returns the magnetic declination in degrees (positive east).
    fn declination(
        &self,
        point: GeoPoint,
        altitude_m: f64,
        date: NaiveDate,
    ) -> Result<f64, DeclinationError>;
}

/// Fetches JSON documents over HTTP.
///
/// Implementations must be `Send` so requests can run on worker threads.
pub trait JsonFetcher: Send {
    /// Returns `Ok(None)` when the server answers with a non-200 status.
    fn fetch_json(&self, url: &str) -> Result<Option<serde_json::Value>, FetchError>;
}

/// Resolves free-text addresses to positions.
pub trait Geocoder: Send {
    fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, FetchError>;
}
