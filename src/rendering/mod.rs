//! Rendering subsystem for drawing the map and sidebar graphics
//!
//! This module contains all low-level painting:
//! - Map canvas (tiles, markers, popups, scale bar, logo)
//! - Minimap inset
//! - Animated compass

pub mod map_renderer;
pub mod minimap;
pub mod compass;
