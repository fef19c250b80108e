//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, sidebar, map, declination list, status)
//! and the floating point forms.

use declimag::{GeoPoint, MagneticModel};
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{declination_panel, header, map_panel, point_forms, sidebar, status_bar};

/// Result of panel interactions that need to be handled by the application coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelInteraction {
    /// The add form was submitted
    AddPointRequested,
    /// The delete form was submitted for this name
    DeletePointRequested(String),
    /// Empty map was clicked
    MapClicked(GeoPoint),
    /// A marker was clicked
    MarkerClicked(usize),
    /// A geocoder search was requested
    SearchRequested,
    /// A geocoder hit was picked
    SearchHitSelected(usize),
    /// Fullscreen was requested on or off
    FullscreenToggled(bool),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// This is the main entry point for rendering the entire UI, called from
    /// the eframe::App::update() implementation.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
        model: &dyn MagneticModel,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header::render_header(ui, state);
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        // Declination list above status panel
        egui::TopBottomPanel::bottom("declination_panel")
            .resizable(true)
            .show(ctx, |ui| {
                egui::Frame::default().inner_margin(4.0).show(ui, |ui| {
                    declination_panel::render_declination_panel(ui, state, model);
                });
            });

        // Left panel: explanation and compass
        let sidebar_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::SidePanel::left("sidebar")
            .default_width(280.0)
            .resizable(true)
            .frame(sidebar_frame)
            .show(ctx, |ui| {
                sidebar::render_sidebar(ui, state, loader);
            });

        // Remaining space: the map
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(map_interaction) = map_panel::render_map_panel(ui, state, loader) {
                    interaction = Some(match map_interaction {
                        map_panel::MapPanelInteraction::MapClicked(point) => {
                            PanelInteraction::MapClicked(point)
                        }
                        map_panel::MapPanelInteraction::MarkerClicked(index) => {
                            PanelInteraction::MarkerClicked(index)
                        }
                        map_panel::MapPanelInteraction::SearchRequested => {
                            PanelInteraction::SearchRequested
                        }
                        map_panel::MapPanelInteraction::SearchHitSelected(index) => {
                            PanelInteraction::SearchHitSelected(index)
                        }
                        map_panel::MapPanelInteraction::FullscreenToggled(on) => {
                            PanelInteraction::FullscreenToggled(on)
                        }
                    });
                }
            });

        // Popover windows float above everything else
        if let Some(form_interaction) = point_forms::render_point_forms(ctx, state) {
            interaction = Some(match form_interaction {
                point_forms::PointFormInteraction::AddRequested => {
                    PanelInteraction::AddPointRequested
                }
                point_forms::PointFormInteraction::DeleteRequested(name) => {
                    PanelInteraction::DeletePointRequested(name)
                }
            });
        }

        interaction
    }
}
