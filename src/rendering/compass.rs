//! Animated compass drawn in the sidebar.
//!
//! The needle swings around magnetic north once per animation loop, with the
//! loop timing taken from the fetched animation description.

use std::f32::consts::{PI, TAU};

use eframe::egui;
use egui::{Align2, FontId, Pos2, Stroke};
use declimag::{AnimationInfo, ThemeColors};

/// Peak needle swing in degrees.
const SWING_DEGREES: f32 = 25.0;

/// Needle angle in radians for a loop phase in `[0, 1)`.
pub fn needle_angle(phase: f64) -> f32 {
    (phase as f32 * TAU).sin() * SWING_DEGREES.to_radians()
}

/// Draws the compass and keeps repainting while it animates.
///
/// # Arguments
/// * `ui` - The sidebar ui
/// * `animation` - Loop timing
/// * `speed` - Playback speed multiplier
/// * `colors` - Color palette for the current theme
pub fn show_compass(ui: &mut egui::Ui, animation: &AnimationInfo, speed: f64, colors: &ThemeColors) {
    let width = ui.available_width().min(220.0);
    let height = (width as f64 / animation.aspect_ratio().max(0.5)).min(220.0) as f32;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());

    let time = ui.input(|i| i.time);
    let angle = needle_angle(animation.phase_at(time, speed));

    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.42;

    painter.circle(center, radius, colors.extreme_background, Stroke::new(2.0, colors.accent));
    for (label, quarter) in [("N", 0.0), ("E", 0.25), ("S", 0.5), ("O", 0.75)] {
        let direction = quarter * TAU;
        let pos = center + egui::vec2(direction.sin(), -direction.cos()) * (radius - 12.0);
        painter.text(pos, Align2::CENTER_CENTER, label, FontId::proportional(12.0), colors.text);
    }

    let tip = rotate(center, radius * 0.7, angle);
    let tail = rotate(center, radius * 0.7, angle + PI);
    let side = rotate(center, radius * 0.1, angle + PI / 2.0);
    let other_side = rotate(center, radius * 0.1, angle - PI / 2.0);

    painter.add(egui::Shape::convex_polygon(
        vec![tip, side, other_side],
        colors.error,
        Stroke::NONE,
    ));
    painter.add(egui::Shape::convex_polygon(
        vec![tail, other_side, side],
        colors.text_dim,
        Stroke::NONE,
    ));
    painter.circle_filled(center, 3.0, colors.text);

    ui.ctx().request_repaint();
}

fn rotate(center: Pos2, length: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.sin(), -angle.cos()) * length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_rests_on_north_at_loop_start() {
        assert!(needle_angle(0.0).abs() < 1e-6);
        assert!(needle_angle(0.5).abs() < 1e-5);
    }

    #[test]
    fn test_needle_peak_swing() {
        let peak = needle_angle(0.25);
        assert!((peak - SWING_DEGREES.to_radians()).abs() < 1e-5);
        assert!((needle_angle(0.75) + peak).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_north_is_up() {
        let p = rotate(Pos2::new(10.0, 10.0), 5.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-6);
        assert!((p.y - 5.0).abs() < 1e-6);
    }
}
