//! Theme management and ANSI escape sequence generation.
//!
//! The panel ships two palettes, `dark` and `light`, matching the two
//! [`ThemeChoice`] values an admin can persist. A custom palette can be
//! loaded from a TOML file and then wins over both.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e2e8f0"
//! selection_fg = "#0f172a"
//! selection_bg = "#6366f1"
//! text_normal = "#e2e8f0"
//! text_dim = "#64748b"
//! border = "#334155"
//! search_bar_border = "#6366f1"
//! match_highlight_fg = "#0f172a"
//! match_highlight_bg = "#facc15"
//! empty_state_fg = "#818cf8"
//! accent_red = "#ef4444"
//! accent_yellow = "#eab308"
//! accent_neutral = "#94a3b8"
//! log_info = "#e2e8f0"
//! log_warn = "#facc15"
//! log_error = "#f87171"
//! log_system = "#818cf8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use modpanel::domain::ThemeChoice;
//! use modpanel::ui::Theme;
//!
//! let theme = Theme::for_choice(ThemeChoice::Light);
//! assert_eq!(theme.name, "light");
//! print!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{ModPanelError, Result};
use crate::domain::{Accent, LogKind, ThemeChoice};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g. `"#e2e8f0"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Focused field and selected tile foreground.
    pub selection_fg: String,
    /// Focused field and selected tile background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, labels and timestamps.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Tile accents.
    pub accent_red: String,
    pub accent_yellow: String,
    pub accent_neutral: String,

    /// Log line colours by record kind.
    pub log_info: String,
    pub log_warn: String,
    pub log_error: String,
    pub log_system: String,
}

impl ThemeColors {
    #[must_use]
    pub fn accent(&self, accent: Accent) -> &str {
        match accent {
            Accent::Red => &self.accent_red,
            Accent::Yellow => &self.accent_yellow,
            Accent::Neutral => &self.accent_neutral,
        }
    }

    #[must_use]
    pub fn log_kind(&self, kind: LogKind) -> &str {
        match kind {
            LogKind::Info => &self.log_info,
            LogKind::Warn => &self.log_warn,
            LogKind::Error => &self.log_error,
            LogKind::System => &self.log_system,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name (`dark` or `light`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "dark" => include_str!("../../themes/dark.toml"),
            "light" => include_str!("../../themes/light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// The built-in palette for a persisted theme choice.
    #[must_use]
    pub fn for_choice(choice: ThemeChoice) -> Self {
        Self::from_name(choice.as_str()).unwrap_or_default()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ModPanelError::Theme`] if the file cannot be read or its
    /// content does not parse into a complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ModPanelError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ModPanelError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple; white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the `dark` palette.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in palette fails to parse.
    fn default() -> Self {
        Self::from_name("dark").expect("Built-in dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn built_in_palettes_parse() {
        assert_eq!(Theme::for_choice(ThemeChoice::Dark).name, "dark");
        assert_eq!(Theme::for_choice(ThemeChoice::Light).name, "light");
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn custom_file_must_be_complete() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"\n[colors]\nheader_fg = \"#ffffff\"").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ModPanelError::Theme(_)));
    }

    #[test]
    fn hex_colors_become_escape_sequences() {
        assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#ééé"), "\u{1b}[38;2;255;255;255m");
    }
}
