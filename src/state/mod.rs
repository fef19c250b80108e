//! State management modules for the declination map.
//!
//! This module contains state-only logic (no UI concerns):
//! - Form state (add/delete popover buffers)
//! - Map state (layers, popups, last click, geocoder search)
//! - Notification state (transient messages)
//! - Theme state (theme manager, current theme)

mod form_state;
mod map_state;
mod notification;
mod theme_state;

pub use form_state::FormState;
pub use map_state::{BaseLayer, MapPreferences, MapState};
pub use notification::{NotificationLevel, NotificationState};
pub use theme_state::{ThemeState, DEFAULT_THEME};
