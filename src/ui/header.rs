//! Header panel UI rendering
//!
//! Handles the top bar with the add/delete point buttons, the theme selector
//! and the current notification.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;
use crate::state::NotificationLevel;

/// Renders the application header
///
/// The add and delete buttons only toggle their popover windows; the
/// windows themselves are drawn by `point_forms`.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let add_button = ui
            .selectable_label(*state.forms.add_open_mut(), "📍 Agregar punto")
            .on_hover_text("Agregar un punto a partir de coordenadas UTM");
        if add_button.clicked() {
            state.forms.toggle_add();
        }

        let delete_button = ui
            .selectable_label(*state.forms.delete_open_mut(), "🗑 Borrar punto")
            .on_hover_text("Borrar puntos por nombre");
        if delete_button.clicked() {
            state.forms.toggle_delete();
        }

        ui.separator();
        ui.label(format!("Puntos: {}", state.session.len()));

        // Push theme selector to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(
                            &mut current_theme,
                            theme_name.to_string(),
                            theme_name
                        );
                    }
                });

            if old_theme != current_theme {
                log::debug!("theme changed to {}", current_theme);
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }

            ui.label("Tema:");
        });
    });

    render_notification(ui, state);
}

fn render_notification(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = state.theme.colors();
    let Some(notification) = state.notifications.current() else {
        return;
    };

    let (icon, color) = match notification.level {
        NotificationLevel::Success => ("✔", colors.success),
        NotificationLevel::Info => ("ℹ", colors.info),
        NotificationLevel::Warning => ("⚠", colors.warning),
        NotificationLevel::Error => ("✖", colors.error),
    };
    let message = format!("{} {}", icon, notification.message);

    let mut dismissed = false;
    egui::Frame::new()
        .fill(declimag::with_alpha(color, 40))
        .stroke(egui::Stroke::new(1.0, color))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(message).color(color).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    dismissed = ui.small_button("✕").clicked();
                });
            });
        });

    if dismissed {
        state.notifications.dismiss();
    }
}
