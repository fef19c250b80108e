//! Overview inset in the bottom-right corner of the map.
//!
//! Shows the active base layer a few zoom levels out, with the outline of
//! the main view drawn on top.

use eframe::egui;
use egui::{Pos2, Rect, Stroke};
use declimag::tiles::MIN_ZOOM;
use declimag::{GeoPoint, MapView, ThemeColors, TileProvider};

use crate::rendering::map_renderer;
use crate::utils::{offset_to_pos, pos_to_offset};

pub const MINIMAP_SIZE: f32 = 150.0;
/// Zoom levels between the main map and the inset
const ZOOM_OFFSET: f64 = 5.0;
/// Gap from the map edge; leaves room for the attribution line
const MARGIN: egui::Vec2 = egui::vec2(10.0, 24.0);

/// Screen rectangle of the inset inside the map rectangle.
pub fn minimap_rect(map_rect: Rect) -> Rect {
    Rect::from_min_size(
        map_rect.right_bottom() - MARGIN - egui::vec2(MINIMAP_SIZE, MINIMAP_SIZE),
        egui::vec2(MINIMAP_SIZE, MINIMAP_SIZE),
    )
}

/// Screen rectangle of the show/hide button, attached to the inset corner.
pub fn toggle_rect(map_rect: Rect, visible: bool) -> Rect {
    let corner = if visible {
        minimap_rect(map_rect).right_bottom()
    } else {
        map_rect.right_bottom() - MARGIN
    };
    Rect::from_min_size(corner - egui::vec2(20.0, 20.0), egui::vec2(20.0, 20.0))
}

/// View shown by the inset for a given main view.
pub fn minimap_view(main: &MapView) -> MapView {
    MapView::new(
        main.center,
        (main.zoom - ZOOM_OFFSET).max(MIN_ZOOM - 1.0),
        f64::from(MINIMAP_SIZE),
        f64::from(MINIMAP_SIZE),
    )
}

/// Outline of the main view inside the inset, as offsets from the inset corner.
pub fn view_outline(main: &MapView, mini: &MapView) -> ((f64, f64), (f64, f64)) {
    let scale = 2f64.powf(mini.zoom - main.zoom);
    let half_w = main.width / 2.0 * scale;
    let half_h = main.height / 2.0 * scale;
    let (cx, cy) = mini.to_screen(main.center);
    ((cx - half_w, cy - half_h), (cx + half_w, cy + half_h))
}

/// Position under a click inside the inset.
pub fn position_at(mini: &MapView, inset: Rect, pos: Pos2) -> GeoPoint {
    mini.to_geo(pos_to_offset(inset, pos))
}

/// Paints the inset.
///
/// # Arguments
/// * `ui` - The map ui
/// * `map_rect` - Screen rectangle of the main map
/// * `main` - Current main view
/// * `provider` - Tile source of the active base layer
/// * `colors` - Color palette for the current theme
pub fn paint_minimap(
    ui: &mut egui::Ui,
    map_rect: Rect,
    main: &MapView,
    provider: &TileProvider,
    colors: &ThemeColors,
) {
    let inset = minimap_rect(map_rect);
    let mini = minimap_view(main);

    let mut inset_ui = ui.new_child(egui::UiBuilder::new().max_rect(inset));
    inset_ui.set_clip_rect(inset.intersect(ui.clip_rect()));

    inset_ui.painter().rect_filled(inset, 0.0, colors.extreme_background);
    map_renderer::paint_tiles(&inset_ui, inset, &mini, provider);

    let (min, max) = view_outline(main, &mini);
    let outline = Rect::from_min_max(offset_to_pos(inset, min), offset_to_pos(inset, max));
    inset_ui
        .painter()
        .rect_filled(outline, 0.0, declimag::with_alpha(colors.accent, 50));
    inset_ui
        .painter()
        .rect_stroke(outline, 0.0, Stroke::new(1.5, colors.accent), egui::StrokeKind::Inside);

    ui.painter()
        .rect_stroke(inset, 0.0, Stroke::new(2.0, colors.border), egui::StrokeKind::Outside);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimap_zooms_out() {
        let main = MapView::new(GeoPoint::new(-12.0, -75.0), 10.0, 800.0, 600.0);
        let mini = minimap_view(&main);
        assert_eq!(mini.zoom, 5.0);
        assert_eq!(mini.center, main.center);
    }

    #[test]
    fn test_outline_is_centered_and_scaled() {
        let main = MapView::new(GeoPoint::new(-12.0, -75.0), 10.0, 800.0, 600.0);
        let mini = minimap_view(&main);
        let ((x0, y0), (x1, y1)) = view_outline(&main, &mini);

        // 800 px at zoom 10 is 25 px at zoom 5
        assert!(((x1 - x0) - 25.0).abs() < 1e-6);
        assert!(((y1 - y0) - 18.75).abs() < 1e-6);
        assert!(((x0 + x1) / 2.0 - 75.0).abs() < 1e-6);
        assert!(((y0 + y1) / 2.0 - 75.0).abs() < 1e-6);
    }

    #[test]
    fn test_inset_sits_inside_map() {
        let map = Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0));
        let inset = minimap_rect(map);
        assert!(map.contains_rect(inset));
        assert!(inset.contains_rect(toggle_rect(map, true)));
    }

    #[test]
    fn test_click_at_inset_center_is_view_center() {
        let main = MapView::new(GeoPoint::new(-12.0, -75.0), 10.0, 800.0, 600.0);
        let mini = minimap_view(&main);
        let inset = Rect::from_min_size(Pos2::new(100.0, 100.0), egui::vec2(150.0, 150.0));
        let point = position_at(&mini, inset, inset.center());
        assert!((point.lat - -12.0).abs() < 1e-6);
        assert!((point.lon - -75.0).abs() < 1e-6);
    }
}
