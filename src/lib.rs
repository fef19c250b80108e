pub mod traits;
pub mod config;
pub mod utm;
pub mod declination;
pub mod point;
pub mod session;
pub mod tiles;
pub mod fetch;
pub mod animation;
pub mod theme;

// Export external-library seams
pub use traits::{CoordinateConverter, MagneticModel, JsonFetcher, Geocoder};

// Export coordinate conversion
pub use utm::{
    ConversionError, GeoPoint, Hemisphere, Proj4Converter, ReferenceSystem, UtmCoordinate,
    SUPPORTED_BANDS, SUPPORTED_ZONES,
};

// Export declination lookup
pub use declination::{
    decimal_year, declination_lines, format_declination,
    DeclinationError, DeclinationLine, WmmModel,
};

// Export session model
pub use point::PointRecord;
pub use session::SessionState;
pub use config::AppConfig;

// Export map math
pub use tiles::{MapView, PlacedTile, ScaleBar, TileId, TileProvider};

// Export network helpers
pub use fetch::{FetchError, GeocodeHit, HttpClient};
pub use animation::{AnimationError, AnimationInfo};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, adjust_brightness, with_alpha};
