//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the declination map:
//! - Header panel (add/delete toggles, point count, theme selector, notifications)
//! - Point forms (add-point and delete-point popover windows)
//! - Sidebar (version label, compass, explanatory text)
//! - Map panel (tiles, markers, popups and the floating map controls)
//! - Declination panel (per-point declination list)
//! - Status bar (UTM readout and footer)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (map pan, zoom and clicks)

pub mod header;
pub mod point_forms;
pub mod sidebar;
pub mod map_panel;
pub mod declination_panel;
pub mod status_bar;
pub mod panel_manager;
pub mod input;
