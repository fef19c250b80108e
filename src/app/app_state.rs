//! Centralized application state for the declination map.
//!
//! Composes focused state components that each manage one aspect of the
//! window, so that panels can borrow them independently.

use chrono::NaiveDate;
use declimag::{AnimationInfo, AppConfig, SessionState};
use crate::state::{FormState, MapPreferences, MapState, NotificationState, ThemeState};

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Stored points and the map view
    pub session: SessionState,

    /// Add/delete popover buffers
    pub forms: FormState,

    /// Layers, popups, last click and search box
    pub map: MapState,

    /// Transient success/warning/error/info messages
    pub notifications: NotificationState,

    /// Theme and styling state
    pub theme: ThemeState,

    // ===== Top-Level State =====
    /// Fixed defaults
    pub config: AppConfig,

    /// Timing of the sidebar animation, once fetched
    pub animation: Option<AnimationInfo>,

    /// Image URI of the custom marker icon; `None` draws the fallback marker
    pub marker_icon: Option<String>,

    /// UTM readout of the last clicked location
    pub readout: Option<String>,
}

impl AppState {
    /// Creates a new application state from the configured defaults.
    ///
    /// # Arguments
    /// * `config` - Fixed application defaults
    /// * `today` - Initial date of the add-point form
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        Self {
            session: SessionState::new(&config),
            forms: FormState::new(today),
            map: MapState::new(),
            notifications: NotificationState::new(config.notification_secs),
            theme: ThemeState::new(),
            config,
            animation: None,
            marker_icon: None,
            readout: None,
        }
    }

    /// Creates a new AppState with preferences loaded from storage.
    pub fn with_preferences(
        config: AppConfig,
        today: NaiveDate,
        theme_name: String,
        map_preferences: MapPreferences,
    ) -> Self {
        let mut state = Self::new(config, today);
        state.theme = ThemeState::with_theme(theme_name);
        state.map = MapState::with_preferences(map_preferences);
        state
    }
}
