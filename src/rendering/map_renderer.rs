//! Map canvas rendering
//!
//! Paints the base tile layer, point markers, popups, the scale bar, the
//! attribution line and the floating logo. Tiles and images are loaded by
//! the egui_extras loaders installed at startup; everything else is drawn
//! with the painter.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use declimag::{MapView, PointRecord, ScaleBar, ThemeColors, TileProvider};

use crate::utils::offset_to_pos;

/// Custom marker icon size in pixels.
pub const ICON_SIZE: Vec2 = egui::vec2(25.0, 41.0);
/// Point of the icon that sits on the marker position.
pub const ICON_ANCHOR: Vec2 = egui::vec2(12.5, 41.0);
/// Popup tip position relative to the icon anchor.
pub const POPUP_ANCHOR: Vec2 = egui::vec2(0.0, -30.0);

/// Floating logo placement, measured from the bottom-left of the map.
const LOGO_BOTTOM: f32 = 40.0;
const LOGO_LEFT: f32 = 90.0;
const LOGO_WIDTH: f32 = 100.0;

const SCALE_BAR_MAX_WIDTH: f64 = 100.0;

/// A visible marker and the screen area it covers.
#[derive(Debug, Clone, Copy)]
pub struct MarkerHit {
    /// Index of the record in the session
    pub index: usize,
    /// Screen position of the point itself
    pub anchor: Pos2,
    /// Clickable icon area
    pub rect: Rect,
}

/// Paints the tiles that cover `rect`.
///
/// # Arguments
/// * `ui` - A ui clipped to the map rectangle
/// * `rect` - Screen rectangle of the map
/// * `view` - Current map view sized to `rect`
/// * `provider` - Tile source of the active base layer
pub fn paint_tiles(ui: &egui::Ui, rect: Rect, view: &MapView, provider: &TileProvider) {
    for tile in view.visible_tiles(provider.max_zoom) {
        let min = offset_to_pos(rect, tile.offset);
        let size = tile.size as f32;
        // Half a pixel of overlap hides seams at fractional zoom
        let tile_rect = Rect::from_min_size(min, egui::vec2(size, size)).expand(0.5);
        egui::Image::new(provider.tile_url(tile.id))
            .show_loading_spinner(false)
            .paint_at(ui, tile_rect);
    }
}

/// Computes the screen area of each visible marker.
///
/// # Arguments
/// * `rect` - Screen rectangle of the map
/// * `view` - Current map view sized to `rect`
/// * `points` - Session records in storage order
/// * `is_visible` - Layer-control filter by point name
pub fn marker_hits(
    rect: Rect,
    view: &MapView,
    points: &[PointRecord],
    is_visible: impl Fn(&str) -> bool,
) -> Vec<MarkerHit> {
    points
        .iter()
        .enumerate()
        .filter(|(_, record)| is_visible(&record.name))
        .map(|(index, record)| {
            let anchor = offset_to_pos(rect, view.to_screen(record.position()));
            MarkerHit {
                index,
                anchor,
                rect: Rect::from_min_size(anchor - ICON_ANCHOR, ICON_SIZE),
            }
        })
        .filter(|hit| rect.intersects(hit.rect))
        .collect()
}

/// Paints markers with the custom icon, or the drawn fallback pin.
pub fn paint_markers(ui: &egui::Ui, hits: &[MarkerHit], icon: Option<&str>, colors: &ThemeColors) {
    for hit in hits {
        match icon {
            Some(uri) => {
                egui::Image::new(uri).paint_at(ui, hit.rect);
            }
            None => paint_fallback_marker(ui.painter(), hit.anchor, colors),
        }
    }
}

/// Generic "info" pin drawn when no icon file is available.
fn paint_fallback_marker(painter: &egui::Painter, anchor: Pos2, colors: &ThemeColors) {
    let head = anchor - egui::vec2(0.0, 28.0);
    let radius = 11.0;

    painter.add(egui::Shape::convex_polygon(
        vec![
            anchor,
            head + egui::vec2(-radius * 0.8, radius * 0.55),
            head + egui::vec2(radius * 0.8, radius * 0.55),
        ],
        colors.marker,
        Stroke::new(1.0, colors.marker_outline),
    ));
    painter.circle(head, radius, colors.marker, Stroke::new(1.0, colors.marker_outline));
    painter.text(
        head,
        Align2::CENTER_CENTER,
        "i",
        FontId::proportional(14.0),
        Color32::WHITE,
    );
}

/// Paints a popup box whose tip points at `tip`.
///
/// Returns the box rectangle so callers can keep clicks inside it.
pub fn paint_popup(painter: &egui::Painter, tip: Pos2, text: &str, colors: &ThemeColors) -> Rect {
    let font_id = FontId::proportional(13.0);
    let galley = painter.layout_no_wrap(text.to_string(), font_id, colors.popup_text);

    let padding = egui::vec2(10.0, 8.0);
    let tip_height = 8.0;
    let size = galley.size() + padding * 2.0;
    let box_rect = Rect::from_min_size(
        egui::pos2(tip.x - size.x / 2.0, tip.y - tip_height - size.y),
        size,
    );

    let shadow = box_rect.translate(egui::vec2(0.0, 2.0));
    painter.rect_filled(shadow, 6.0, Color32::from_black_alpha(40));
    painter.rect_filled(box_rect, 6.0, colors.popup_background);
    painter.rect_stroke(box_rect, 6.0, Stroke::new(1.0, colors.border), egui::StrokeKind::Outside);
    painter.add(egui::Shape::convex_polygon(
        vec![
            egui::pos2(tip.x - tip_height, box_rect.bottom()),
            egui::pos2(tip.x + tip_height, box_rect.bottom()),
            tip,
        ],
        colors.popup_background,
        Stroke::NONE,
    ));
    painter.galley(box_rect.min + padding, galley, colors.popup_text);

    box_rect
}

/// Popup tip for a marker anchored at `anchor`.
pub fn marker_popup_tip(anchor: Pos2) -> Pos2 {
    anchor + POPUP_ANCHOR
}

/// Paints the metric scale bar in the bottom-left corner.
pub fn paint_scale_bar(painter: &egui::Painter, rect: Rect, view: &MapView, colors: &ThemeColors) {
    let bar = ScaleBar::fit(view.center.lat, view.zoom, SCALE_BAR_MAX_WIDTH);
    if !bar.pixels.is_finite() || bar.pixels <= 0.0 {
        return;
    }

    let width = bar.pixels as f32;
    let left = rect.left() + 10.0;
    let bottom = rect.bottom() - 10.0;
    let background = Rect::from_min_max(
        egui::pos2(left - 2.0, bottom - 18.0),
        egui::pos2(left + width + 2.0, bottom + 2.0),
    );
    painter.rect_filled(background, 0.0, colors.overlay_background);

    let stroke = Stroke::new(2.0, colors.text);
    painter.line_segment([egui::pos2(left, bottom), egui::pos2(left + width, bottom)], stroke);
    painter.line_segment([egui::pos2(left, bottom), egui::pos2(left, bottom - 6.0)], stroke);
    painter.line_segment(
        [egui::pos2(left + width, bottom), egui::pos2(left + width, bottom - 6.0)],
        stroke,
    );
    painter.text(
        egui::pos2(left + 4.0, bottom - 3.0),
        Align2::LEFT_BOTTOM,
        bar.label(),
        FontId::proportional(11.0),
        colors.text,
    );
}

/// Paints the tile provider attribution in the bottom-right corner.
pub fn paint_attribution(painter: &egui::Painter, rect: Rect, provider: &TileProvider, colors: &ThemeColors) {
    let galley = painter.layout_no_wrap(
        provider.attribution.clone(),
        FontId::proportional(10.0),
        colors.text_dim,
    );
    let padding = egui::vec2(4.0, 1.0);
    let min = rect.right_bottom() - galley.size() - padding * 2.0;
    let background = Rect::from_min_max(min, rect.right_bottom());
    painter.rect_filled(background, 0.0, colors.overlay_background);
    painter.galley(min + padding, galley, colors.text_dim);
}

/// Places the brand image at a fixed offset from the bottom-left corner.
pub fn show_logo(ui: &mut egui::Ui, rect: Rect, url: &str) {
    let logo_rect = Rect::from_min_size(
        egui::pos2(rect.left() + LOGO_LEFT, rect.bottom() - LOGO_BOTTOM - LOGO_WIDTH),
        egui::vec2(LOGO_WIDTH, LOGO_WIDTH),
    );
    ui.put(
        logo_rect,
        egui::Image::new(url)
            .max_width(LOGO_WIDTH)
            .show_loading_spinner(false),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use declimag::GeoPoint;

    fn record(name: &str, lat: f64, lon: f64) -> PointRecord {
        PointRecord::new(
            name,
            GeoPoint::new(lat, lon),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    fn map_rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_marker_at_center_is_anchored() {
        let view = MapView::new(GeoPoint::new(-12.0, -75.0), 6.0, 800.0, 600.0);
        let hits = marker_hits(map_rect(), &view, &[record("pc1", -12.0, -75.0)], |_| true);

        assert_eq!(hits.len(), 1);
        assert!((hits[0].anchor.x - 400.0).abs() < 1e-3);
        assert!((hits[0].anchor.y - 300.0).abs() < 1e-3);
        assert!((hits[0].rect.width() - ICON_SIZE.x).abs() < 1e-3);
        assert!((hits[0].rect.bottom() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_hidden_and_offscreen_markers_are_skipped() {
        let view = MapView::new(GeoPoint::new(-12.0, -75.0), 6.0, 800.0, 600.0);
        let points = [
            record("pc1", -12.0, -75.0),
            record("pc2", -12.1, -75.1),
            record("far", 45.0, 10.0),
        ];
        let hits = marker_hits(map_rect(), &view, &points, |name| name != "pc1");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
    }

    #[test]
    fn test_popup_tip_above_marker() {
        let tip = marker_popup_tip(egui::pos2(100.0, 100.0));
        assert_eq!(tip, egui::pos2(100.0, 70.0));
    }
}
