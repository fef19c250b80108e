//! Status bar UI rendering
//!
//! Handles the bottom status bar with the copyright footer and the UTM
//! readout of the last clicked location.

use eframe::egui;
use egui::RichText;
use declimag::config::COPYRIGHT;
use crate::app::AppState;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let colors = state.theme.colors();

    ui.horizontal(|ui| {
        ui.label(RichText::new(COPYRIGHT).small().color(colors.text_dim));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match &state.readout {
                Some(readout) => {
                    ui.label(RichText::new(readout).strong().color(colors.accent));
                }
                None => {
                    ui.label(RichText::new("Haga clic en el mapa para ver sus coordenadas UTM").color(colors.text_dim));
                }
            }
        });
    });
}
