//! Magnetic declination lookup through the World Magnetic Model.
//!
//! Each stored point is evaluated at sea level for the date attached to it.
//! Results are never cached: the list is small and the model is cheap.

use chrono::{Datelike, NaiveDate};
use world_magnetic_model::time::{error::ComponentRange, util::days_in_year, Date};
use world_magnetic_model::uom::si::angle::degree;
use world_magnetic_model::uom::si::f32::{Angle, Length};
use world_magnetic_model::uom::si::length::meter;
use world_magnetic_model::GeomagneticField;

use crate::point::PointRecord;
use crate::traits::MagneticModel;
use crate::utm::GeoPoint;

/// First fractional year covered by WMM2025.
pub const WMM_VALID_FROM: f64 = 2025.0;

/// Last fractional year covered by WMM2025.
pub const WMM_VALID_UNTIL: f64 = 2030.0;

/// Points are evaluated at sea level.
pub const DEFAULT_ALTITUDE_M: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeclinationError {
    #[error("fecha fuera del rango del modelo WMM ({year:.3})")]
    OutsideModelRange { year: f64 },
    #[error("coordenadas inválidas (lat={lat}, lon={lon})")]
    InvalidPosition { lat: f64, lon: f64 },
    #[error("fecha inválida: {0}")]
    InvalidDate(String),
    #[error("error del modelo geomagnético: {0}")]
    Model(String),
}

/// Converts a calendar date to the fractional year used by the model:
/// `year + day_of_year / 365`.
pub fn decimal_year(date: NaiveDate) -> f64 {
    f64::from(date.year()) + f64::from(date.ordinal()) / 365.0
}

/// Formats a declination line for display.
pub fn format_declination(name: &str, degrees: f64) -> String {
    format!("{} → Declinación magnética: {:.4} grados", name, degrees)
}

/// World Magnetic Model evaluated through the `world_magnetic_model` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmmModel;

impl WmmModel {
    pub fn new() -> Self {
        Self
    }
}

impl MagneticModel for WmmModel {
    fn declination(
        &self,
        point: GeoPoint,
        altitude_m: f64,
        date: NaiveDate,
    ) -> Result<f64, DeclinationError> {
        if !(-90.0..=90.0).contains(&point.lat) || !point.lon.is_finite() {
            return Err(DeclinationError::InvalidPosition { lat: point.lat, lon: point.lon });
        }

        let year = decimal_year(date);
        if !(WMM_VALID_FROM..=WMM_VALID_UNTIL).contains(&year) {
            return Err(DeclinationError::OutsideModelRange { year });
        }

        let (lower, upper, weight) = model_samples(year)?;
        let first = field_declination(point, altitude_m, lower)?;
        let second = field_declination(point, altitude_m, upper)?;
        let declination = first + wrap_degrees(second - first) * weight;

        log::debug!(
            "declination at ({:.5}, {:.5}) for {:.4}: {:.4}°",
            point.lat, point.lon, year, declination
        );
        Ok(declination)
    }
}

/// Last model day that still has a following day inside WMM2025.
const LAST_SAMPLE_YEAR: i32 = 2029;
const LAST_SAMPLE_ORDINAL: u16 = 364;

/// Fractional year the model crate evaluates a `Date` at.
fn model_time(date: Date) -> f64 {
    f64::from(date.year())
        + f64::from(date.ordinal() - 1) / f64::from(days_in_year(date.year()))
}

/// Two consecutive model days around `year_fraction`, and the weight of the second.
///
/// The model crate only takes whole days, so the declination at `year_fraction` is
/// interpolated between them (extrapolated on the last day of the model).
fn model_samples(year_fraction: f64) -> Result<(Date, Date, f64), DeclinationError> {
    let year = year_fraction.floor() as i32;
    let days = f64::from(days_in_year(year));
    let index = ((year_fraction - f64::from(year)) * days).floor().clamp(0.0, days - 1.0) as u16;

    let invalid = |e: ComponentRange| DeclinationError::InvalidDate(e.to_string());
    let last = Date::from_ordinal_date(LAST_SAMPLE_YEAR, LAST_SAMPLE_ORDINAL).map_err(invalid)?;
    let lower = Date::from_ordinal_date(year, index + 1).map_err(invalid)?.min(last);
    let upper = lower
        .next_day()
        .ok_or_else(|| DeclinationError::InvalidDate(format!("{} has no following day", lower)))?;

    let weight = (year_fraction - model_time(lower)) / (model_time(upper) - model_time(lower));
    Ok((lower, upper, weight))
}

fn field_declination(point: GeoPoint, altitude_m: f64, date: Date) -> Result<f64, DeclinationError> {
    let field = GeomagneticField::new(
        Length::new::<meter>(altitude_m as f32),
        Angle::new::<degree>(point.lat as f32),
        Angle::new::<degree>(point.lon as f32),
        date,
    )
    .map_err(|e| DeclinationError::Model(format!("{:?}", e)))?;
    Ok(f64::from(field.declination().get::<degree>()))
}

/// Brings an angle difference into `[-180, 180)`.
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// One row of the declination panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclinationLine {
    pub name: String,
    pub result: Result<f64, DeclinationError>,
}

impl DeclinationLine {
    /// Text shown for this row, either the formatted value or the failure.
    pub fn text(&self) -> String {
        match &self.result {
            Ok(degrees) => format_declination(&self.name, *degrees),
            Err(e) => format!("{} → {}", self.name, e),
        }
    }
}

/// Evaluates the model once per record, in storage order.
pub fn declination_lines<M>(records: &[PointRecord], model: &M) -> Vec<DeclinationLine>
where
    M: MagneticModel + ?Sized,
{
    records
        .iter()
        .map(|record| DeclinationLine {
            name: record.name.clone(),
            result: model.declination(record.position(), DEFAULT_ALTITUDE_M, record.date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantModel(f64);

    impl MagneticModel for ConstantModel {
        fn declination(&self, _: GeoPoint, _: f64, _: NaiveDate) -> Result<f64, DeclinationError> {
            Ok(self.0)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_decimal_year() {
        assert!((decimal_year(date(2025, 1, 1)) - (2025.0 + 1.0 / 365.0)).abs() < 1e-12);
        assert!((decimal_year(date(2025, 12, 31)) - 2026.0).abs() < 1e-12);
        // Leap years overshoot slightly, matching the plain 365-day divisor
        assert!(decimal_year(date(2028, 12, 31)) > 2029.0);
    }

    #[test]
    fn test_format_declination() {
        assert_eq!(
            format_declination("pc1", -3.14159),
            "pc1 → Declinación magnética: -3.1416 grados"
        );
    }

    #[test]
    fn test_lines_follow_record_order() {
        let records = vec![
            PointRecord::new("a", GeoPoint::new(-12.0, -75.0), date(2025, 3, 1)),
            PointRecord::new("b", GeoPoint::new(-13.0, -76.0), date(2025, 3, 1)),
        ];
        let lines = declination_lines(&records, &ConstantModel(-2.5));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "a");
        assert_eq!(lines[1].text(), "b → Declinación magnética: -2.5000 grados");
    }

    #[test]
    fn test_wmm_rejects_dates_outside_model() {
        let result = WmmModel::new().declination(GeoPoint::new(-12.0, -75.0), 0.0, date(2019, 6, 1));
        assert!(matches!(result, Err(DeclinationError::OutsideModelRange { .. })));
    }

    #[test]
    fn test_wmm_rejects_invalid_latitude() {
        let result = WmmModel::new().declination(GeoPoint::new(95.0, -75.0), 0.0, date(2025, 6, 1));
        assert!(matches!(result, Err(DeclinationError::InvalidPosition { .. })));
    }

    #[test]
    fn test_wmm_is_deterministic() {
        let model = WmmModel::new();
        let point = GeoPoint::new(-12.65, -75.0);
        let first = model.declination(point, 0.0, date(2025, 1, 1)).unwrap();
        let second = model.declination(point, 0.0, date(2025, 1, 1)).unwrap();
        assert_eq!(first, second);
        assert!(first.is_finite() && first.abs() < 15.0, "declination = {}", first);
    }

    #[test]
    fn test_samples_land_on_model_day_at_year_end() {
        // 2025-12-31 is 2026.0, exactly the first day of 2026 for the model crate
        let (lower, _, weight) = model_samples(decimal_year(date(2025, 12, 31))).unwrap();
        assert_eq!(lower, Date::from_ordinal_date(2026, 1).unwrap());
        assert!(weight.abs() < 1e-9);
    }

    #[test]
    fn test_samples_reproduce_decimal_year() {
        for day in [date(2025, 1, 1), date(2026, 3, 15), date(2028, 2, 29), date(2028, 12, 31), date(2029, 12, 31)] {
            let time = decimal_year(day);
            let (lower, upper, weight) = model_samples(time).unwrap();
            assert_eq!(upper, lower.next_day().unwrap());
            let sampled = model_time(lower) + weight * (model_time(upper) - model_time(lower));
            assert!((sampled - time).abs() < 1e-9, "{}: {} vs {}", day, sampled, time);
        }
    }

    #[test]
    fn test_last_model_day_stays_in_wmm2025() {
        let (lower, upper, weight) = model_samples(WMM_VALID_UNTIL).unwrap();
        assert_eq!(upper, Date::from_ordinal_date(2029, 365).unwrap());
        assert_eq!(lower.year(), 2029);
        assert!(weight > 1.0);
        assert!(WmmModel::new().declination(GeoPoint::new(-12.65, -75.0), 0.0, date(2029, 12, 31)).is_ok());
    }

    #[test]
    fn test_wmm_evaluates_at_decimal_year() {
        let point = GeoPoint::new(-12.65, -75.0);
        let ours = WmmModel::new().declination(point, 0.0, date(2025, 12, 31)).unwrap();
        let at_2026 = field_declination(point, 0.0, Date::from_ordinal_date(2026, 1).unwrap()).unwrap();
        assert_eq!(format!("{:.4}", ours), format!("{:.4}", at_2026));
        assert!((ours - at_2026).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(10.0), 10.0);
        assert_eq!(wrap_degrees(350.0), -10.0);
        assert_eq!(wrap_degrees(-350.0), 10.0);
    }
}
