//! Theme support for the declimag GUI
//!
//! Provides the color palettes for panels, map overlays, markers and
//! notifications, plus a manager that applies a palette to egui visuals.
//!
//! # Examples
//!
//! ```
//! use declimag::theme::ThemeManager;
//!
//! let manager = ThemeManager::new();
//! let dark = manager.get_theme("Dark").unwrap();
//! assert_eq!(dark.name, "Dark");
//! ```

use egui::Color32;
use std::collections::HashMap;

/// Complete color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Background colors
    pub panel_background: Color32,
    pub extreme_background: Color32,

    // Foreground colors
    pub text: Color32,
    pub text_dim: Color32,

    // Interactive colors
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,

    // Map overlays
    pub marker: Color32,
    pub marker_outline: Color32,
    pub popup_background: Color32,
    pub popup_text: Color32,
    pub overlay_background: Color32,

    // Semantic colors (notifications, readouts)
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
}

/// A theme definition with metadata and color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub colors: ThemeColors,
}

/// Centralized theme manager providing access to all available themes
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
}

impl ThemeManager {
    /// Creates a new ThemeManager initialized with the built-in themes
    pub fn new() -> Self {
        let mut themes = HashMap::new();

        themes.insert("Light".to_string(), light_theme());
        themes.insert("Dark".to_string(), dark_theme());

        Self { themes }
    }

    /// Retrieves a theme by name
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Returns a list of all available theme names
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Palette for `name`, falling back to the light palette for unknown names
    pub fn colors(&self, name: &str) -> ThemeColors {
        self.get_theme(name)
            .map(|theme| theme.colors.clone())
            .unwrap_or_else(|| light_theme().colors)
    }

    /// Applies a theme's colors to egui visuals
    pub fn apply_theme(&self, theme: &Theme, visuals: &mut egui::Visuals) {
        let colors = &theme.colors;

        visuals.panel_fill = colors.panel_background;
        visuals.extreme_bg_color = colors.extreme_background;
        visuals.faint_bg_color = colors.hover;

        visuals.override_text_color = Some(colors.text);

        visuals.selection.bg_fill = colors.selection;
        visuals.selection.stroke.color = colors.accent;

        visuals.widgets.noninteractive.bg_fill = colors.panel_background;
        visuals.widgets.inactive.bg_fill = colors.hover;
        visuals.widgets.hovered.bg_fill = colors.hover;
        visuals.widgets.active.bg_fill = colors.selection;

        visuals.hyperlink_color = colors.info;

        visuals.error_fg_color = colors.error;
        visuals.warn_fg_color = colors.warning;
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Light theme, the default for the map view
fn light_theme() -> Theme {
    Theme {
        name: "Light".to_string(),
        description: "Light panels with blue accents".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(248, 248, 248),
            extreme_background: Color32::from_rgb(255, 255, 255),

            text: hex_to_color32("#0f172a"),
            text_dim: Color32::from_rgb(120, 120, 120),

            selection: Color32::from_rgb(180, 200, 255),
            hover: Color32::from_rgb(220, 220, 220),
            border: Color32::from_rgb(160, 160, 160),

            marker: hex_to_color32("#2a81cb"),
            marker_outline: hex_to_color32("#1e3a8a"),
            popup_background: Color32::WHITE,
            popup_text: Color32::from_rgb(20, 20, 20),
            overlay_background: with_alpha(Color32::WHITE, 220),

            accent: hex_to_color32("#1e3a8a"),
            success: Color32::from_rgb(40, 160, 40),
            warning: Color32::from_rgb(230, 120, 20),
            error: Color32::from_rgb(200, 40, 40),
            info: Color32::from_rgb(40, 100, 200),
        },
    }
}

/// Dark theme
fn dark_theme() -> Theme {
    Theme {
        name: "Dark".to_string(),
        description: "Dark panels with muted map overlays".to_string(),
        colors: ThemeColors {
            panel_background: Color32::from_rgb(39, 39, 39),
            extreme_background: Color32::from_rgb(16, 16, 16),

            text: Color32::from_rgb(255, 255, 255),
            text_dim: Color32::from_rgb(160, 160, 160),

            selection: Color32::from_rgb(50, 80, 120),
            hover: Color32::from_rgb(70, 70, 70),
            border: Color32::from_rgb(100, 100, 100),

            marker: hex_to_color32("#3498db"),
            marker_outline: Color32::WHITE,
            popup_background: Color32::from_rgb(45, 45, 45),
            popup_text: Color32::from_rgb(240, 240, 240),
            overlay_background: with_alpha(Color32::from_rgb(30, 30, 30), 220),

            accent: hex_to_color32("#60a5fa"),
            success: Color32::from_rgb(46, 204, 113),
            warning: Color32::from_rgb(243, 156, 18),
            error: Color32::from_rgb(231, 76, 60),
            info: Color32::from_rgb(52, 152, 219),
        },
    }
}

/// Converts a hex color string (like "#1e3a8a") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}

/// Adjusts the brightness of a color by a factor (1.0 = no change, >1.0 = brighter, <1.0 = darker)
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Sets the alpha channel of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
