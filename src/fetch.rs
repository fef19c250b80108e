//! Blocking HTTP access for the sidebar animation and the geocoder.
//!
//! Requests are synchronous; the GUI runs them on worker threads (see the
//! binary's `io` module) so the window never blocks on the network.

use serde::Deserialize;

use crate::traits::{Geocoder, JsonFetcher};
use crate::utm::GeoPoint;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("respuesta inesperada: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("el servidor respondió {0}")]
    Status(u16),
}

/// A geocoder match.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub display_name: String,
    pub position: GeoPoint,
}

/// One entry of a Nominatim `format=json` response. Coordinates come back as
/// strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Parses a Nominatim search response, skipping entries whose coordinates
/// do not parse.
pub fn parse_nominatim(value: serde_json::Value) -> Result<Vec<GeocodeHit>, FetchError> {
    let places: Vec<NominatimPlace> = serde_json::from_value(value)?;
    Ok(places
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.parse::<f64>().ok()?;
            let lon = place.lon.parse::<f64>().ok()?;
            Some(GeocodeHit {
                display_name: place.display_name,
                position: GeoPoint::new(lat, lon),
            })
        })
        .collect())
}

/// `reqwest`-backed implementation of [`JsonFetcher`] and [`Geocoder`].
pub struct HttpClient {
    client: reqwest::blocking::Client,
    geocoder_url: String,
}

impl HttpClient {
    pub fn new(user_agent: &str, geocoder_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            geocoder_url: geocoder_url.into(),
        })
    }
}

impl JsonFetcher for HttpClient {
    fn fetch_json(&self, url: &str) -> Result<Option<serde_json::Value>, FetchError> {
        let response = self.client.get(url).send()?;
        if response.status() != reqwest::StatusCode::OK {
            log::warn!("GET {} answered {}", url, response.status());
            return Ok(None);
        }
        Ok(Some(response.json()?))
    }
}

impl Geocoder for HttpClient {
    fn search(&self, query: &str) -> Result<Vec<GeocodeHit>, FetchError> {
        let response = self
            .client
            .get(&self.geocoder_url)
            .query(&[("q", query), ("format", "json"), ("limit", "5")])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        parse_nominatim(response.json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim() {
        let body = serde_json::json!([
            {"display_name": "Huancayo, Junín, Perú", "lat": "-12.0651", "lon": "-75.2049", "place_id": 1},
            {"display_name": "broken", "lat": "n/a", "lon": "-75.0"}
        ]);
        let hits = parse_nominatim(body).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "Huancayo, Junín, Perú");
        assert!((hits[0].position.lat - -12.0651).abs() < 1e-9);
        assert!((hits[0].position.lon - -75.2049).abs() < 1e-9);
    }

    #[test]
    fn test_parse_nominatim_empty() {
        assert!(parse_nominatim(serde_json::json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_nominatim_rejects_non_array() {
        assert!(matches!(
            parse_nominatim(serde_json::json!({"error": "bad"})),
            Err(FetchError::Parse(_))
        ));
    }
}
