//! Declination Map GUI Application
//!
//! Places named points on an interactive map from UTM coordinates and shows
//! the magnetic declination of each one using the egui framework.
//! The application features:
//! - Street and satellite base layers with per-point layer toggles
//! - Add/delete point popovers with UTM zone, band and date inputs

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! - Per-point declination from the World Magnetic Model
//! - UTM readout of the last clicked map location
//! - Address search, minimap and fullscreen toggle
//! - Multiple theme support with persistent preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Background network requests (animation, geocoding)
//! - `utils/` - Utility functions for formatting and geometry
//! - `ui/` - UI panel rendering, interaction, and input handling
//! - `rendering/` - Low-level painting of tiles, markers, minimap and compass
//! - `state/` - State management for forms, map, notifications and theme

use eframe::egui;
use declimag::config::APP_TITLE;
use declimag::{AppConfig, Proj4Converter, WmmModel};

mod utils;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, ThemeCoordinator, SettingsCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the declination map GUI.
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DeclimagApp::new(cc)))
        }),
    )
}

/// The main declination map application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles point add/delete, clicks and background requests
/// - `ThemeCoordinator` handles theme persistence and application
/// - `PanelManager` handles UI panel layout and rendering
struct DeclimagApp {
    /// Centralized application state
    state: AppState,
    /// Background request runner
    loader: AsyncLoader,
    /// Geographic <-> UTM conversion
    converter: Proj4Converter,
    /// Magnetic field model
    model: WmmModel,
}

impl DeclimagApp {
    /// Creates the application with theme and map preferences loaded from persistent storage.
    fn new(cc: &eframe::CreationContext) -> Self {
        let theme_name = ThemeCoordinator::load_theme_from_storage(cc.storage);
        let map_preferences = SettingsCoordinator::load_map_preferences(cc.storage);
        let today = chrono::Local::now().date_naive();

        let mut state = AppState::with_preferences(AppConfig::default(), today, theme_name, map_preferences);
        ApplicationCoordinator::probe_marker_icon(&mut state);

        let mut loader = AsyncLoader::new();
        ApplicationCoordinator::start_animation_fetch(&state, &mut loader, &cc.egui_ctx);

        log::info!("{} started", declimag::config::APP_VERSION_LABEL);
        Self {
            state,
            loader,
            converter: Proj4Converter::new(),
            model: WmmModel::new(),
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::AddPointRequested => {
                ApplicationCoordinator::add_point(&mut self.state, &self.converter);
            }
            PanelInteraction::DeletePointRequested(name) => {
                ApplicationCoordinator::delete_point(&mut self.state, &name);
            }
            PanelInteraction::MapClicked(point) => {
                ApplicationCoordinator::handle_map_click(&mut self.state, point);
            }
            PanelInteraction::MarkerClicked(index) => {
                ApplicationCoordinator::handle_marker_click(&mut self.state, index);
            }
            PanelInteraction::SearchRequested => {
                ApplicationCoordinator::request_search(&mut self.state, &mut self.loader, ctx);
            }
            PanelInteraction::SearchHitSelected(index) => {
                ApplicationCoordinator::select_search_hit(&mut self.state, index);
            }
            PanelInteraction::FullscreenToggled(on) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
                self.state.map.set_fullscreen(on);
            }
        }
    }
}

impl eframe::App for DeclimagApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_map_preferences(storage, &self.state.map.preferences());
    }

    /// Main update loop:
    /// 1. Apply finished background requests
    /// 2. Apply theme and expire notifications
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    /// 5. Refresh the UTM readout
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader) {
            ctx.request_repaint();
        }

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        self.state.notifications.expire(std::time::Instant::now());
        if self.state.notifications.current().is_some() {
            ctx.request_repaint_after(self.state.notifications.lifetime());
        }

        // The window manager may leave fullscreen on its own (Esc, F11)
        if let Some(fullscreen) = ctx.input(|i| i.viewport().fullscreen) {
            self.state.map.set_fullscreen(fullscreen);
        }

        if let Some(interaction) =
            PanelManager::render_all_panels(ctx, &mut self.state, &self.loader, &self.model)
        {
            self.handle_panel_interaction(interaction, ctx);
        }

        ApplicationCoordinator::refresh_readout(&mut self.state, &self.converter);
    }
}
