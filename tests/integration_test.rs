use declimag::{
    declination_lines, AppConfig, CoordinateConverter, DeclinationError, GeoPoint, MagneticModel,
    PointRecord, Proj4Converter, SessionState, UtmCoordinate, WmmModel,
};
use anyhow::Result;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_utm_round_trip_for_supported_zones() -> Result<()> {
    let converter = Proj4Converter::new();
    // One northing inside each band
    let bands = [('K', 7_800_000.0), ('L', 8_700_000.0), ('M', 9_500_000.0), ('N', 500_000.0)];

    for zone in [17u8, 18, 19] {
        for (band, northing) in bands {
            for easting in [300_000.0, 412_345.67, 500_000.0, 700_000.0] {
                let input = UtmCoordinate::new(zone, band, easting, northing);
                let point = converter.utm_to_geographic(&input)?;
                let back = converter.geographic_to_utm(point)?;

                let case = format!("{}{} E={} N={}", zone, band, easting, northing);
                assert_eq!(back.zone, zone, "{}", case);
                assert_eq!(back.band, band, "{}", case);
                assert!((back.easting - easting).abs() < 0.01, "{}: E={}", case, back.easting);
                assert!((back.northing - northing).abs() < 0.01, "{}: N={}", case, back.northing);
            }
        }

        // Easting 500000 sits on the central meridian of the zone
        let point = converter.utm_to_geographic(&UtmCoordinate::new(zone, 'M', 500_000.0, 9_500_000.0))?;
        let central_meridian = -183.0 + 6.0 * f64::from(zone);
        assert!((point.lon - central_meridian).abs() < 1e-6, "zone {}: lon {}", zone, point.lon);
    }

    Ok(())
}

#[test]
fn test_band_letter_selects_hemisphere() -> Result<()> {
    let converter = Proj4Converter::new();

    let south = converter.utm_to_geographic(&UtmCoordinate::new(18, 'M', 500_000.0, 8_600_000.0))?;
    let north = converter.utm_to_geographic(&UtmCoordinate::new(18, 'N', 500_000.0, 1_400_000.0))?;

    assert!((south.lat + north.lat).abs() < 1e-6);
    assert!(south.lat < -12.5 && south.lat > -12.8);

    Ok(())
}

#[test]
fn test_non_finite_input_is_rejected() {
    let converter = Proj4Converter::new();
    let input = UtmCoordinate::new(17, 'M', f64::NAN, 8_600_000.0);
    assert!(converter.utm_to_geographic(&input).is_err());
}

#[test]
fn test_add_point_then_declination() -> Result<()> {
    let converter = Proj4Converter::new();
    let model = WmmModel::new();
    let mut session = SessionState::new(&AppConfig::default());

    let position = converter.utm_to_geographic(&UtmCoordinate::new(18, 'M', 500_000.0, 8_600_000.0))?;
    session.add_point(PointRecord::new("pc1", position, date(2025, 1, 1)));

    assert_eq!(session.len(), 1);
    assert_eq!(session.points()[0].popup, "pc1");

    let lines = declination_lines(session.points(), &model);
    assert_eq!(lines.len(), 1);
    let degrees = lines[0].result.clone()?;
    assert!(degrees.is_finite());
    assert!(degrees.abs() < 30.0);
    assert!(lines[0].text().starts_with("pc1 → Declinación magnética: "));

    Ok(())
}

#[test]
fn test_delete_removes_every_duplicate() {
    let mut session = SessionState::new(&AppConfig::default());
    let day = date(2025, 6, 1);
    session.add_point(PointRecord::new("pc1", GeoPoint::new(-12.0, -77.0), day));
    session.add_point(PointRecord::new("pc2", GeoPoint::new(-12.1, -77.1), day));
    session.add_point(PointRecord::new("pc1", GeoPoint::new(-12.2, -77.2), day));

    assert_eq!(session.names(), vec!["pc1", "pc2"]);
    assert_eq!(session.remove_by_name("pc1"), 2);
    assert_eq!(session.len(), 1);
    assert_eq!(session.points()[0].name, "pc2");

    assert_eq!(session.remove_by_name("missing"), 0);
    assert_eq!(session.len(), 1);
}

#[test]
fn test_declination_is_deterministic_and_smooth_between_nearby_points() -> Result<()> {
    let model = WmmModel::new();
    let day = date(2026, 3, 15);
    let here = GeoPoint::new(-12.05, -77.04);
    let nearby = GeoPoint::new(-12.06, -77.05);

    let first = model.declination(here, 0.0, day)?;
    let second = model.declination(here, 0.0, day)?;
    let neighbour = model.declination(nearby, 0.0, day)?;

    assert_eq!(first, second);
    assert!((first - neighbour).abs() < 0.5);

    Ok(())
}

#[test]
fn test_declination_changes_smoothly_day_by_day() -> Result<()> {
    let model = WmmModel::new();
    let here = GeoPoint::new(-12.65, -75.0);

    let mut day = date(2025, 1, 1);
    let mut previous = model.declination(here, 0.0, day)?;
    let mut steps = Vec::new();
    while day < date(2029, 12, 31) {
        day = day.succ_opt().unwrap();
        let current = model.declination(here, 0.0, day)?;
        steps.push(current - previous);
        previous = current;
    }

    // Secular variation is a fraction of a degree per year
    let largest = steps.iter().fold(0.0_f64, |max, step| max.max(step.abs()));
    assert!(largest < 0.005, "largest daily step {}", largest);

    // Crossing into a new year is an ordinary one-day step
    let year_end = model.declination(here, 0.0, date(2025, 12, 31))?;
    let new_year = model.declination(here, 0.0, date(2026, 1, 1))?;
    let mid_year = model.declination(here, 0.0, date(2025, 7, 1))? - model.declination(here, 0.0, date(2025, 6, 30))?;
    assert!(((new_year - year_end) - mid_year).abs() < 1e-3);

    Ok(())
}

#[test]
fn test_dates_outside_model_are_reported_per_point() {
    let model = WmmModel::new();
    let records = vec![
        PointRecord::new("ok", GeoPoint::new(-12.0, -77.0), date(2027, 1, 1)),
        PointRecord::new("late", GeoPoint::new(-12.0, -77.0), date(2035, 1, 1)),
    ];

    let lines = declination_lines(&records, &model);
    assert!(lines[0].result.is_ok());
    assert!(matches!(lines[1].result, Err(DeclinationError::OutsideModelRange { .. })));
    assert!(lines[1].text().starts_with("late → "));
}
