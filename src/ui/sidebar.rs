//! Sidebar UI rendering
//!
//! Shows the version label, the animated compass and the explanatory text
//! about magnetic declination.

use eframe::egui;
use egui::RichText;
use declimag::config::{APP_TITLE, APP_VERSION_LABEL};
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::compass;

const DEFINITION: &str = "La declinación magnética es el ángulo entre el norte magnético \
    y el norte geográfico (verdadero). Es positiva cuando el norte magnético está al \
    este del norte geográfico y negativa cuando está al oeste.";

const MODEL_TEXT: &str = "WMM2025: World Magnetic Model, publicado por la NOAA y el \
    British Geological Survey. Válido hasta finales de 2029.";

const USES: [&str; 3] = [
    "Navegación en cuerpos de agua",
    "Aviación",
    "Cartografía",
];

/// Renders the sidebar contents
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
/// * `loader` - Used to show a spinner while the animation downloads
pub fn render_sidebar(ui: &mut egui::Ui, state: &AppState, loader: &AsyncLoader) {
    let colors = state.theme.colors();

    ui.heading(RichText::new(APP_VERSION_LABEL).strong());
    ui.label(RichText::new(APP_TITLE).color(colors.text_dim));
    ui.separator();

    ui.vertical_centered(|ui| match &state.animation {
        Some(animation) => {
            compass::show_compass(ui, animation, state.config.animation_speed, &colors);
        }
        None if loader.is_loading_animation() => {
            ui.spinner();
        }
        None => {}
    });

    ui.separator();
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(RichText::new("Cálculo de la Declinación Magnética").heading().color(colors.accent));
        ui.label(DEFINITION);
        ui.add_space(8.0);

        ui.label(RichText::new("Modelos Utilizados").strong());
        ui.label(MODEL_TEXT);
        ui.add_space(8.0);

        ui.label(RichText::new("Usos y Aplicaciones").strong());
        for item in USES {
            ui.label(format!("• {}", item));
        }
    });
}
