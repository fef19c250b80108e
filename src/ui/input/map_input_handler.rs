//! Map input handling for panning, zooming and clicks.
//!
//! This module handles all mouse and touch input on the map canvas:
//! - Drag panning (primary mouse + drag)
//! - Scroll wheel zoom anchored at the pointer
//! - Pinch zoom
//! - Clicks on markers and on empty map

use eframe::egui;
use declimag::tiles::{MAX_ZOOM, MIN_ZOOM};
use declimag::{GeoPoint, MapView};

use crate::rendering::map_renderer::MarkerHit;
use crate::utils::pos_to_offset;

/// Zoom levels per pixel of scroll
const SCROLL_ZOOM_RATE: f64 = 1.0 / 240.0;

/// Result of map input handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapInputResult {
    /// No interaction occurred
    None,
    /// Center or zoom changed
    ViewUpdated,
    /// Empty map was clicked at this position
    MapClicked(GeoPoint),
    /// The marker of this record was clicked
    MarkerClicked(usize),
}

/// Handles all map input events and updates the view.
///
/// # Arguments
/// * `ctx` - The egui context for input access
/// * `map_rect` - The map rectangle for coordinate calculations
/// * `response` - The map canvas interaction response
/// * `view` - The view the canvas was laid out with
/// * `markers` - Visible markers, in paint order
/// * `center` - Map center (mutable)
/// * `zoom` - Map zoom (mutable)
/// * `is_dragging` - Drag state flag (mutable)
///
/// # Returns
/// The result of input handling
#[allow(clippy::too_many_arguments)]
pub fn handle_map_input(
    ctx: &egui::Context,
    map_rect: egui::Rect,
    response: &egui::Response,
    view: &MapView,
    markers: &[MarkerHit],
    center: &mut GeoPoint,
    zoom: &mut f64,
    is_dragging: &mut bool,
) -> MapInputResult {
    let mut result = MapInputResult::None;

    if response.dragged_by(egui::PointerButton::Primary) {
        *is_dragging = true;
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            *center = view.panned((f64::from(delta.x), f64::from(delta.y)));
            result = MapInputResult::ViewUpdated;
        }
    } else {
        *is_dragging = false;
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            // Last painted marker is on top
            result = match markers.iter().rev().find(|hit| hit.rect.contains(pos)) {
                Some(hit) => MapInputResult::MarkerClicked(hit.index),
                None => MapInputResult::MapClicked(view.to_geo(pos_to_offset(map_rect, pos))),
            };
        }
    }

    let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) else {
        return result;
    };
    if !map_rect.contains(hover_pos) || !response.hovered() {
        return result;
    }

    let (scroll_y, pinch) = ctx.input(|i| {
        // Try both raw and smooth deltas for compatibility
        let scroll_y = if i.raw_scroll_delta.y != 0.0 {
            i.raw_scroll_delta.y
        } else {
            i.smooth_scroll_delta.y
        };
        (scroll_y, i.zoom_delta())
    });

    let zoom_change = zoom_change(scroll_y, pinch);
    if zoom_change != 0.0 {
        let new_zoom = (*zoom + zoom_change).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom != *zoom {
            let anchored = MapView::new(*center, *zoom, view.width, view.height);
            *center = anchored.zoomed_around(pos_to_offset(map_rect, hover_pos), new_zoom);
            *zoom = new_zoom;
            if result == MapInputResult::None {
                result = MapInputResult::ViewUpdated;
            }
        }
    }

    result
}

/// Zoom levels to add for one frame of scroll and pinch input.
///
/// Pinch (and ctrl+scroll, which egui reports as pinch) wins over plain
/// scrolling so one gesture is not applied twice.
fn zoom_change(scroll_y: f32, pinch: f32) -> f64 {
    if pinch != 1.0 && pinch > 0.0 {
        f64::from(pinch).log2()
    } else {
        f64::from(scroll_y) * SCROLL_ZOOM_RATE
    }
}
