//! UTM <-> geographic conversion backed by `proj4rs`.
//!
//! Points are entered as UTM coordinates (zone, latitude band, easting,
//! northing) and stored as WGS84 longitude/latitude. The reverse direction is
//! only used for the coordinate readout under the map.
//!
//! All projection math is delegated to `proj4rs`; this module only selects
//! the reference system and validates inputs and outputs.

use once_cell::unsync::OnceCell;
use proj4rs::proj::Proj;
use serde::{Deserialize, Serialize};

use crate::traits::CoordinateConverter;

/// Zones offered by the add-point form.
pub const SUPPORTED_ZONES: [u8; 3] = [17, 18, 19];

/// Latitude bands offered by the add-point form.
pub const SUPPORTED_BANDS: [char; 3] = ['M', 'L', 'K'];

/// Zone used when the requested zone has no dedicated reference system.
pub const FALLBACK_ZONE: u8 = 19;

/// Latitude band letters from 80°S northwards, 8° each (X spans 12°).
const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

const GEOGRAPHIC_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Errors raised while converting between UTM and geographic coordinates.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("banda UTM inválida: '{0}'")]
    InvalidBand(char),
    #[error("coordenadas no finitas (E={easting}, N={northing})")]
    NonFiniteInput { easting: f64, northing: f64 },
    #[error("latitud {0:.6} fuera del rango UTM (-80° a 84°)")]
    LatitudeOutsideUtm(f64),
    #[error("resultado fuera de rango (lat={lat}, lon={lon})")]
    OutOfRange { lat: f64, lon: f64 },
    #[error("error de proyección: {0}")]
    Projection(#[from] proj4rs::errors::Error),
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Resolves the hemisphere from a latitude band letter.
    ///
    /// Bands `C` through `M` lie south of the equator, `N` through `X` north.
    pub fn from_band(band: char) -> Result<Self, ConversionError> {
        let upper = band.to_ascii_uppercase();
        if !upper.is_ascii() || !BAND_LETTERS.contains(&(upper as u8)) {
            return Err(ConversionError::InvalidBand(band));
        }
        Ok(if upper < 'N' { Hemisphere::South } else { Hemisphere::North })
    }

    pub fn from_latitude(lat: f64) -> Self {
        if lat < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }
}

/// A UTM coordinate as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
}

impl UtmCoordinate {
    pub fn new(zone: u8, band: char, easting: f64, northing: f64) -> Self {
        Self { zone, band, easting, northing }
    }
}

/// The projected CRS a UTM coordinate is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSystem {
    pub zone: u8,
    pub hemisphere: Hemisphere,
}

impl ReferenceSystem {
    /// Picks the reference system for user input.
    ///
    /// Zones 17 and 18 map to their own system; every other zone falls back
    /// to zone 19. The band letter selects the hemisphere.
    pub fn for_input(zone: u8, band: char) -> Result<Self, ConversionError> {
        let zone = match zone {
            17 | 18 => zone,
            _ => FALLBACK_ZONE,
        };
        Ok(Self {
            zone,
            hemisphere: Hemisphere::from_band(band)?,
        })
    }

    pub fn epsg_code(&self) -> u16 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + u16::from(self.zone)
    }

    pub fn proj_string(&self) -> String {
        let south = match self.hemisphere {
            Hemisphere::North => "",
            Hemisphere::South => " +south",
        };
        format!("+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs", self.zone, south)
    }

    fn to_proj(self) -> Result<Proj, ConversionError> {
        Ok(Proj::from_proj_string(&self.proj_string())?)
    }
}

/// Returns the latitude band letter for `lat`, or `None` outside 80°S..84°N.
pub fn band_for_latitude(lat: f64) -> Option<char> {
    if !(-80.0..=84.0).contains(&lat) {
        return None;
    }
    let index = (((lat + 80.0) / 8.0).floor() as usize).min(BAND_LETTERS.len() - 1);
    Some(BAND_LETTERS[index] as char)
}

/// Returns the UTM zone number for a position, honoring the Norway and
/// Svalbard exceptions.
pub fn zone_for(point: GeoPoint) -> u8 {
    let lon = normalize_longitude(point.lon);
    let lat = point.lat;

    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }
    if (72.0..=84.0).contains(&lat) && lon >= 0.0 {
        if lon < 9.0 {
            return 31;
        } else if lon < 21.0 {
            return 33;
        } else if lon < 33.0 {
            return 35;
        } else if lon < 42.0 {
            return 37;
        }
    }

    (((lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60) as u8
}

fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == 180.0 { -180.0 } else { wrapped }
}

/// `CoordinateConverter` implemented with `proj4rs`.
#[derive(Default)]
pub struct Proj4Converter {
    geographic: OnceCell<Proj>,
}

impl Proj4Converter {
    pub fn new() -> Self {
        Self::default()
    }

    fn geographic(&self) -> Result<&Proj, ConversionError> {
        self.geographic
            .get_or_try_init(|| Proj::from_proj_string(GEOGRAPHIC_PROJ))
            .map_err(ConversionError::from)
    }
}

impl CoordinateConverter for Proj4Converter {
    fn utm_to_geographic(&self, utm: &UtmCoordinate) -> Result<GeoPoint, ConversionError> {
        if !utm.easting.is_finite() || !utm.northing.is_finite() {
            return Err(ConversionError::NonFiniteInput {
                easting: utm.easting,
                northing: utm.northing,
            });
        }

        let source = ReferenceSystem::for_input(utm.zone, utm.band)?.to_proj()?;
        let mut point = (utm.easting, utm.northing, 0.0);
        proj4rs::transform::transform(&source, self.geographic()?, &mut point)?;

        let lon = point.0.to_degrees();
        let lat = point.1.to_degrees();
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ConversionError::OutOfRange { lat, lon });
        }

        log::debug!(
            "UTM {}{} E={} N={} -> lat={:.6} lon={:.6}",
            utm.zone, utm.band, utm.easting, utm.northing, lat, lon
        );
        Ok(GeoPoint::new(lat, lon))
    }

    fn geographic_to_utm(&self, point: GeoPoint) -> Result<UtmCoordinate, ConversionError> {
        let band = band_for_latitude(point.lat)
            .ok_or(ConversionError::LatitudeOutsideUtm(point.lat))?;
        let zone = zone_for(point);
        let target = ReferenceSystem {
            zone,
            hemisphere: Hemisphere::from_latitude(point.lat),
        }
        .to_proj()?;

        let mut xyz = (
            normalize_longitude(point.lon).to_radians(),
            point.lat.to_radians(),
            0.0,
        );
        proj4rs::transform::transform(self.geographic()?, &target, &mut xyz)?;

        Ok(UtmCoordinate::new(zone, band, xyz.0, xyz.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_table_falls_back_to_19() {
        assert_eq!(ReferenceSystem::for_input(17, 'M').unwrap().epsg_code(), 32717);
        assert_eq!(ReferenceSystem::for_input(18, 'L').unwrap().epsg_code(), 32718);
        assert_eq!(ReferenceSystem::for_input(19, 'K').unwrap().epsg_code(), 32719);
        assert_eq!(ReferenceSystem::for_input(5, 'K').unwrap().epsg_code(), 32719);
    }

    #[test]
    fn test_band_selects_hemisphere() {
        assert_eq!(Hemisphere::from_band('M').unwrap(), Hemisphere::South);
        assert_eq!(Hemisphere::from_band('c').unwrap(), Hemisphere::South);
        assert_eq!(Hemisphere::from_band('N').unwrap(), Hemisphere::North);
        assert_eq!(ReferenceSystem::for_input(18, 'N').unwrap().epsg_code(), 32618);
        assert!(matches!(Hemisphere::from_band('I'), Err(ConversionError::InvalidBand('I'))));
        assert!(matches!(Hemisphere::from_band('Z'), Err(ConversionError::InvalidBand('Z'))));
    }

    #[test]
    fn test_proj_string() {
        let rs = ReferenceSystem::for_input(18, 'M').unwrap();
        assert_eq!(rs.proj_string(), "+proj=utm +zone=18 +south +datum=WGS84 +units=m +no_defs");
    }

    #[test]
    fn test_band_for_latitude() {
        assert_eq!(band_for_latitude(-12.6), Some('L'));
        assert_eq!(band_for_latitude(-5.0), Some('M'));
        assert_eq!(band_for_latitude(-20.0), Some('K'));
        assert_eq!(band_for_latitude(0.0), Some('N'));
        assert_eq!(band_for_latitude(83.0), Some('X'));
        assert_eq!(band_for_latitude(-81.0), None);
        assert_eq!(band_for_latitude(85.0), None);
    }

    #[test]
    fn test_zone_for_longitude() {
        assert_eq!(zone_for(GeoPoint::new(-12.0, -75.0)), 18);
        assert_eq!(zone_for(GeoPoint::new(-12.0, -80.5)), 17);
        assert_eq!(zone_for(GeoPoint::new(-12.0, -69.0)), 19);
        assert_eq!(zone_for(GeoPoint::new(0.0, 180.0)), 1);
        assert_eq!(zone_for(GeoPoint::new(60.0, 5.0)), 32);
        assert_eq!(zone_for(GeoPoint::new(78.0, 15.0)), 33);
    }

    #[test]
    fn test_central_meridian_conversion() {
        let converter = Proj4Converter::new();
        let point = converter
            .utm_to_geographic(&UtmCoordinate::new(18, 'M', 500_000.0, 8_600_000.0))
            .unwrap();
        assert!((point.lon - -75.0).abs() < 1e-6, "lon = {}", point.lon);
        assert!(point.lat < -12.6 && point.lat > -12.7, "lat = {}", point.lat);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let converter = Proj4Converter::new();
        let result = converter.utm_to_geographic(&UtmCoordinate::new(18, 'M', f64::NAN, 8_600_000.0));
        assert!(matches!(result, Err(ConversionError::NonFiniteInput { .. })));
    }

    #[test]
    fn test_inverse_outside_utm() {
        let converter = Proj4Converter::new();
        let result = converter.geographic_to_utm(GeoPoint::new(-85.0, 0.0));
        assert!(matches!(result, Err(ConversionError::LatitudeOutsideUtm(_))));
    }
}
