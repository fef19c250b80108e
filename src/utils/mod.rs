//! Utility modules for the declination map.

pub mod formatting;
pub mod geometry;

// Re-export commonly used functions
pub use formatting::{format_latlng_popup, format_position, format_utm_readout};
pub use geometry::{offset_to_pos, pos_to_offset};
