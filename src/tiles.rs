//! Slippy-map tile math on the Web Mercator projection.
//!
//! This module knows nothing about drawing. It maps geographic positions to
//! screen offsets inside a map viewport, works out which tiles cover that
//! viewport, and builds tile URLs for a provider.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::utm::GeoPoint;

pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Equatorial ground resolution at zoom 0, in meters per pixel.
const METERS_PER_PIXEL_Z0: f64 = 156_543.033_92;

/// A raster tile source described by a `{z}/{x}/{y}` URL template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileProvider {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileProvider {
    pub fn openstreetmap() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }

    pub fn google_satellite() -> Self {
        Self {
            name: "Google Satélite".to_string(),
            url_template: "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}".to_string(),
            attribution: "© Google Maps".to_string(),
            max_zoom: 20,
        }
    }

    pub fn tile_url(&self, tile: TileId) -> String {
        self.url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

/// A tile and where its top-left corner lands inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub id: TileId,
    pub offset: (f64, f64),
    /// Edge length on screen; differs from `TILE_SIZE` at fractional zoom
    pub size: f64,
}

/// Width of the Web Mercator world in pixels at a (possibly fractional) zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects a position to world pixel coordinates.
pub fn project(point: GeoPoint, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: f64) -> GeoPoint {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
    GeoPoint::new(lat, lon)
}

/// Ground distance covered by one screen pixel at `lat`.
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    METERS_PER_PIXEL_Z0 * lat.to_radians().cos() / 2f64.powf(zoom)
}

/// A viewport onto the map: center, zoom and pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl MapView {
    pub fn new(center: GeoPoint, zoom: f64, width: f64, height: f64) -> Self {
        Self { center, zoom, width, height }
    }

    /// Screen offset of `point` from the viewport's top-left corner.
    ///
    /// Longitudes are wrapped so the point is drawn on the copy of the world
    /// nearest to the center.
    pub fn to_screen(&self, point: GeoPoint) -> (f64, f64) {
        let size = world_size(self.zoom);
        let (cx, cy) = project(self.center, self.zoom);
        let (px, py) = project(point, self.zoom);
        let mut dx = px - cx;
        if dx > size / 2.0 {
            dx -= size;
        } else if dx < -size / 2.0 {
            dx += size;
        }
        (dx + self.width / 2.0, py - cy + self.height / 2.0)
    }

    /// Geographic position under a screen offset.
    pub fn to_geo(&self, offset: (f64, f64)) -> GeoPoint {
        let (cx, cy) = project(self.center, self.zoom);
        let x = cx + offset.0 - self.width / 2.0;
        let y = cy + offset.1 - self.height / 2.0;
        let point = unproject(x, y, self.zoom);
        GeoPoint::new(point.lat, wrap_longitude(point.lon))
    }

    /// Center after dragging the map by `delta` pixels.
    pub fn panned(&self, delta: (f64, f64)) -> GeoPoint {
        self.to_geo((self.width / 2.0 - delta.0, self.height / 2.0 - delta.1))
    }

    /// Center that keeps the position under `anchor` fixed when the zoom
    /// changes to `new_zoom`.
    pub fn zoomed_around(&self, anchor: (f64, f64), new_zoom: f64) -> GeoPoint {
        let fixed = self.to_geo(anchor);
        let (fx, fy) = project(fixed, new_zoom);
        let cx = fx - (anchor.0 - self.width / 2.0);
        let cy = fy - (anchor.1 - self.height / 2.0);
        let center = unproject(cx, cy, new_zoom);
        GeoPoint::new(center.lat, wrap_longitude(center.lon))
    }

    /// Tiles covering the viewport, fetched at the integer zoom nearest to
    /// the view zoom and scaled to fit.
    pub fn visible_tiles(&self, max_zoom: u8) -> Vec<PlacedTile> {
        let tile_zoom = self.zoom.round().clamp(0.0, f64::from(max_zoom)) as u8;
        let scale = 2f64.powf(self.zoom - f64::from(tile_zoom));
        let tile_px = TILE_SIZE * scale;
        let tiles_per_side = 1i64 << tile_zoom;

        let (cx, cy) = project(self.center, f64::from(tile_zoom));
        let left = cx - self.width / 2.0 / scale;
        let top = cy - self.height / 2.0 / scale;
        let right = cx + self.width / 2.0 / scale;
        let bottom = cy + self.height / 2.0 / scale;

        let x0 = (left / TILE_SIZE).floor() as i64;
        let x1 = (right / TILE_SIZE).floor() as i64;
        let y0 = ((top / TILE_SIZE).floor() as i64).max(0);
        let y1 = ((bottom / TILE_SIZE).floor() as i64).min(tiles_per_side - 1);

        let mut tiles = Vec::new();
        for ty in y0..=y1 {
            for tx in x0..=x1 {
                let id = TileId {
                    x: tx.rem_euclid(tiles_per_side) as u32,
                    y: ty as u32,
                    zoom: tile_zoom,
                };
                let offset = (
                    (tx as f64 * TILE_SIZE - left) * scale,
                    (ty as f64 * TILE_SIZE - top) * scale,
                );
                tiles.push(PlacedTile { id, offset, size: tile_px });
            }
        }
        tiles
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// A scale bar sized to a round ground distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBar {
    pub meters: f64,
    pub pixels: f64,
}

impl ScaleBar {
    /// Longest round distance (1, 2 or 5 times a power of ten) that fits in
    /// `max_pixels` at the given latitude and zoom.
    pub fn fit(lat: f64, zoom: f64, max_pixels: f64) -> Self {
        let mpp = meters_per_pixel(lat, zoom);
        let max_meters = mpp * max_pixels;
        let magnitude = 10f64.powf(max_meters.log10().floor());
        let meters = [5.0, 2.0, 1.0]
            .iter()
            .map(|step| step * magnitude)
            .find(|candidate| *candidate <= max_meters)
            .unwrap_or(magnitude);
        Self { meters, pixels: meters / mpp }
    }

    pub fn label(&self) -> String {
        if self.meters >= 1000.0 {
            format!("{} km", self.meters / 1000.0)
        } else {
            format!("{} m", self.meters)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_origin() {
        let (x, y) = project(GeoPoint::new(0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_unproject() {
        let point = GeoPoint::new(-12.6832, -74.8169);
        let (x, y) = project(point, 6.0);
        let back = unproject(x, y, 6.0);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lon - point.lon).abs() < 1e-9);
    }

    #[test]
    fn test_tile_url() {
        let tile = TileId { x: 19, y: 33, zoom: 6 };
        assert_eq!(
            TileProvider::openstreetmap().tile_url(tile),
            "https://tile.openstreetmap.org/6/19/33.png"
        );
        assert_eq!(
            TileProvider::google_satellite().tile_url(tile),
            "https://mt1.google.com/vt/lyrs=y&x=19&y=33&z=6"
        );
    }

    #[test]
    fn test_center_maps_to_viewport_middle() {
        let view = MapView::new(GeoPoint::new(-12.0, -75.0), 6.0, 800.0, 560.0);
        let (x, y) = view.to_screen(view.center);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 280.0).abs() < 1e-9);

        let back = view.to_geo((x, y));
        assert!((back.lat - -12.0).abs() < 1e-9);
        assert!((back.lon - -75.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_center_opposite_to_drag() {
        let view = MapView::new(GeoPoint::new(0.0, 0.0), 4.0, 400.0, 400.0);
        let center = view.panned((100.0, 0.0));
        assert!(center.lon < 0.0);
        assert!(center.lat.abs() < 1e-9);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let view = MapView::new(GeoPoint::new(-12.0, -75.0), 6.0, 800.0, 600.0);
        let anchor = (600.0, 150.0);
        let under_cursor = view.to_geo(anchor);

        let zoomed = MapView::new(view.zoomed_around(anchor, 7.5), 7.5, 800.0, 600.0);
        let (x, y) = zoomed.to_screen(under_cursor);
        assert!((x - anchor.0).abs() < 1e-6);
        assert!((y - anchor.1).abs() < 1e-6);
    }

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let view = MapView::new(GeoPoint::new(-12.0, -75.0), 6.0, 800.0, 600.0);
        let tiles = view.visible_tiles(19);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.id.zoom == 6 && (t.size - TILE_SIZE).abs() < 1e-9));

        let min_x = tiles.iter().map(|t| t.offset.0).fold(f64::MAX, f64::min);
        let max_x = tiles.iter().map(|t| t.offset.0 + t.size).fold(f64::MIN, f64::max);
        let min_y = tiles.iter().map(|t| t.offset.1).fold(f64::MAX, f64::min);
        let max_y = tiles.iter().map(|t| t.offset.1 + t.size).fold(f64::MIN, f64::max);
        assert!(min_x <= 0.0 && max_x >= 800.0);
        assert!(min_y <= 0.0 && max_y >= 600.0);
    }

    #[test]
    fn test_visible_tiles_wrap_and_clip() {
        // Whole world at zoom 1 in a huge viewport: rows clipped, columns wrapped
        let view = MapView::new(GeoPoint::new(0.0, 179.0), 1.0, 2000.0, 2000.0);
        let tiles = view.visible_tiles(19);
        assert!(tiles.iter().all(|t| t.id.y < 2 && t.id.x < 2));
    }

    #[test]
    fn test_fractional_zoom_scales_tiles() {
        let view = MapView::new(GeoPoint::new(0.0, 0.0), 5.3, 512.0, 512.0);
        let tiles = view.visible_tiles(19);
        let expected = TILE_SIZE * 2f64.powf(0.3);
        assert!(tiles.iter().all(|t| t.id.zoom == 5 && (t.size - expected).abs() < 1e-9));
    }

    #[test]
    fn test_provider_max_zoom_limits_tile_zoom() {
        let view = MapView::new(GeoPoint::new(0.0, 0.0), 19.0, 256.0, 256.0);
        let tiles = view.visible_tiles(17);
        assert!(tiles.iter().all(|t| t.id.zoom == 17 && (t.size - 1024.0).abs() < 1e-9));
    }

    #[test]
    fn test_scale_bar_round_values() {
        let bar = ScaleBar::fit(0.0, 6.0, 120.0);
        let mantissa = bar.meters / 10f64.powf(bar.meters.log10().floor());
        assert!([1.0, 2.0, 5.0].iter().any(|m| (m - mantissa).abs() < 1e-9));
        assert!(bar.pixels <= 120.0 + 1e-9);
        assert!(bar.label().ends_with("km"));

        let close = ScaleBar::fit(0.0, 18.0, 120.0);
        assert!(close.label().ends_with(" m"));
    }
}
