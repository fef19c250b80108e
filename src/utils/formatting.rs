//! Text formatting utilities for the declination map.

use declimag::{GeoPoint, UtmCoordinate};

/// Formats the UTM readout shown under the map.
///
/// # Examples
/// ```ignore
/// let utm = UtmCoordinate::new(18, 'L', 500000.0, 8600000.0);
/// assert_eq!(
///     format_utm_readout(&utm),
///     "Rastreo de coordenadas: 500000.00 mE | 8600000.00 mN | 18L"
/// );
/// ```
pub fn format_utm_readout(utm: &UtmCoordinate) -> String {
    format!(
        "Rastreo de coordenadas: {:.2} mE | {:.2} mN | {}{}",
        utm.easting, utm.northing, utm.zone, utm.band
    )
}

/// Formats the popup shown where the map was last clicked.
pub fn format_latlng_popup(point: GeoPoint) -> String {
    format!("Latitud: {:.4}\nLongitud: {:.4}", point.lat, point.lon)
}

/// Formats a position for tooltips, e.g. `12.6832° S, 74.8169° W`.
pub fn format_position(point: GeoPoint) -> String {
    let ns = if point.lat < 0.0 { 'S' } else { 'N' };
    let ew = if point.lon < 0.0 { 'W' } else { 'E' };
    format!("{:.4}° {}, {:.4}° {}", point.lat.abs(), ns, point.lon.abs(), ew)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_readout_rounds_to_centimeters() {
        let utm = UtmCoordinate::new(18, 'L', 500000.004, 8599999.996);
        assert_eq!(
            format_utm_readout(&utm),
            "Rastreo de coordenadas: 500000.00 mE | 8600000.00 mN | 18L"
        );
    }

    #[test]
    fn test_latlng_popup() {
        assert_eq!(
            format_latlng_popup(GeoPoint::new(-12.68321, -74.81694)),
            "Latitud: -12.6832\nLongitud: -74.8169"
        );
    }

    #[test]
    fn test_format_position() {
        assert_eq!(
            format_position(GeoPoint::new(-12.6832, -74.8169)),
            "12.6832° S, 74.8169° W"
        );
    }
}
