//! Add-point and delete-point popover windows
//!
//! The windows only edit form buffers. Submitting returns an interaction so
//! that the coordinator performs the actual session change.

use eframe::egui;
use declimag::{SUPPORTED_BANDS, SUPPORTED_ZONES};
use crate::app::AppState;

/// Placeholder shown by the delete dropdown when the session is empty.
pub const NO_POINTS_LABEL: &str = "(sin puntos)";

/// Result of user interaction with the point windows
pub enum PointFormInteraction {
    /// "Agregar punto" was pressed
    AddRequested,
    /// "Borrar punto" was pressed for this name
    DeleteRequested(String),
}

/// Renders whichever popover is open.
///
/// # Arguments
/// * `ctx` - The egui context the windows float in
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<PointFormInteraction>` - Submitted form, if any
pub fn render_point_forms(ctx: &egui::Context, state: &mut AppState) -> Option<PointFormInteraction> {
    let mut interaction = None;

    let mut add_open = *state.forms.add_open_mut();
    egui::Window::new("Agregar punto")
        .open(&mut add_open)
        .resizable(false)
        .collapsible(false)
        .default_pos(egui::pos2(300.0, 90.0))
        .show(ctx, |ui| {
            if render_add_form(ui, state) {
                interaction = Some(PointFormInteraction::AddRequested);
            }
        });
    *state.forms.add_open_mut() = add_open;

    let mut delete_open = *state.forms.delete_open_mut();
    egui::Window::new("Borrar punto")
        .open(&mut delete_open)
        .resizable(false)
        .collapsible(false)
        .default_pos(egui::pos2(300.0, 90.0))
        .show(ctx, |ui| {
            if let Some(name) = render_delete_form(ui, state) {
                interaction = Some(PointFormInteraction::DeleteRequested(name));
            }
        });
    *state.forms.delete_open_mut() = delete_open;

    interaction
}

/// Returns true when the add button was pressed.
fn render_add_form(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let form = state.forms.add_form_mut();

    egui::Grid::new("add_point_grid")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Nombre del punto");
            ui.add(
                egui::TextEdit::singleline(form.name_mut())
                    .hint_text("pc1, pc2, ...")
                    .desired_width(160.0),
            );
            ui.end_row();

            ui.label("Elija la zona:");
            let zone = form.zone_mut();
            egui::ComboBox::from_id_salt("zone_selector")
                .selected_text(zone.to_string())
                .show_ui(ui, |ui| {
                    for candidate in SUPPORTED_ZONES {
                        ui.selectable_value(zone, candidate, candidate.to_string());
                    }
                });
            ui.end_row();

            ui.label("Elija la banda:");
            let band = form.band_mut();
            egui::ComboBox::from_id_salt("band_selector")
                .selected_text(band.to_string())
                .show_ui(ui, |ui| {
                    for candidate in SUPPORTED_BANDS {
                        ui.selectable_value(band, candidate, candidate.to_string());
                    }
                });
            ui.end_row();

            ui.label("Este (mE)");
            ui.add(egui::DragValue::new(form.easting_mut()).speed(1.0).fixed_decimals(2));
            ui.end_row();

            ui.label("Norte (mN)");
            ui.add(egui::DragValue::new(form.northing_mut()).speed(1.0).fixed_decimals(2));
            ui.end_row();

            ui.label("Fecha");
            ui.add(egui_extras::DatePickerButton::new(form.date_mut()).id_salt("point_date"));
            ui.end_row();
        });

    ui.add_space(6.0);
    let button = egui::Button::new(egui::RichText::new("Agregar punto").strong());
    ui.add_sized([ui.available_width(), 24.0], button).clicked()
}

/// Returns the name to delete when the delete button was pressed.
fn render_delete_form(ui: &mut egui::Ui, state: &mut AppState) -> Option<String> {
    let names = state.session.names();
    let target = state.forms.delete_target(&names);

    ui.label("Seleccione punto para borrar");
    let mut picked = None;
    egui::ComboBox::from_id_salt("delete_selector")
        .selected_text(target.unwrap_or(NO_POINTS_LABEL))
        .width(180.0)
        .show_ui(ui, |ui| {
            if names.is_empty() {
                ui.add_enabled(false, egui::Label::new(NO_POINTS_LABEL));
            }
            for name in &names {
                if ui.selectable_label(target == Some(*name), *name).clicked() {
                    picked = Some(name.to_string());
                }
            }
        });

    ui.add_space(6.0);
    let clicked = ui
        .add_enabled_ui(target.is_some(), |ui| {
            ui.add_sized([ui.available_width(), 24.0], egui::Button::new("Borrar punto"))
                .clicked()
        })
        .inner;
    let requested = if clicked { target.map(str::to_string) } else { None };

    if let Some(name) = picked {
        state.forms.select_for_delete(name);
    }
    requested
}
