//! Conversions between map viewport offsets and egui screen positions.

use egui::{Pos2, Rect};

/// Screen position of a viewport offset measured from the top-left of `rect`.
pub fn offset_to_pos(rect: Rect, offset: (f64, f64)) -> Pos2 {
    Pos2::new(rect.min.x + offset.0 as f32, rect.min.y + offset.1 as f32)
}

/// Viewport offset of a screen position inside `rect`.
pub fn pos_to_offset(rect: Rect, pos: Pos2) -> (f64, f64) {
    (f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y))
}
