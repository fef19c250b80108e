//! Fixed application configuration.
//!
//! The tool takes no flags; every tunable lives here with its default.

use std::path::PathBuf;

use crate::tiles::TileProvider;
use crate::utm::GeoPoint;

pub const APP_TITLE: &str = "Oceans & Rivers - Ingeniería de Recursos Hídricos";
pub const APP_VERSION_LABEL: &str = "OR-declimag v0.0.1";
pub const COPYRIGHT: &str = "Powered by: Copyright © 2025 Oceans & Rivers IT";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Map center on launch
    pub start_center: GeoPoint,
    /// Map zoom on launch
    pub start_zoom: f64,
    /// Default base layer
    pub street_tiles: TileProvider,
    /// Satellite layer, hidden until picked in the layer control
    pub satellite_tiles: TileProvider,
    /// Optional custom marker icon
    pub marker_icon_path: PathBuf,
    /// Animation description shown in the sidebar
    pub animation_url: String,
    /// Playback speed multiplier for the sidebar animation
    pub animation_speed: f64,
    /// Brand image floated over the map
    pub logo_url: String,
    /// Nominatim-compatible search endpoint
    pub geocoder_url: String,
    /// User agent sent with geocoder and animation requests
    pub user_agent: String,
    /// Seconds a notification stays on screen
    pub notification_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_center: GeoPoint::new(-12.6832, -74.8169),
            start_zoom: 6.0,
            street_tiles: TileProvider::openstreetmap(),
            satellite_tiles: TileProvider::google_satellite(),
            marker_icon_path: PathBuf::from("./img/iconoUbicacion.png"),
            animation_url: "https://lottie.host/e89a2a34-6145-4e84-a420-306f5e3e1c82/uweHazdwLH.json"
                .to_string(),
            animation_speed: 8.0,
            logo_url: "https://www.oceansandrivers.pe/wp-content/uploads/2024/09/O_R_gota-removebg-preview.png"
                .to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: concat!("declimag/", env!("CARGO_PKG_VERSION")).to_string(),
            notification_secs: 4.0,
        }
    }
}
