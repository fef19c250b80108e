//! Declination panel UI rendering
//!
//! Lists the magnetic declination of every stored point, recomputed each
//! frame from the current session.

use eframe::egui;
use egui::RichText;
use declimag::{declination_lines, MagneticModel};
use crate::app::AppState;

/// Renders the collapsible declination list
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `model` - Field model evaluated for each point
pub fn render_declination_panel(ui: &mut egui::Ui, state: &AppState, model: &dyn MagneticModel) {
    let colors = state.theme.colors();

    egui::CollapsingHeader::new("🧭 Vea la declinación")
        .default_open(true)
        .show(ui, |ui| {
            let lines = declination_lines(state.session.points(), model);
            if lines.is_empty() {
                ui.label(RichText::new("Agregue un punto para calcular su declinación.").color(colors.text_dim));
                return;
            }

            egui::ScrollArea::vertical()
                .max_height(160.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for line in &lines {
                        let text = RichText::new(line.text()).monospace();
                        match line.result {
                            Ok(_) => ui.label(text),
                            Err(_) => ui.label(text.color(colors.warning)),
                        };
                    }
                });
        });
}
