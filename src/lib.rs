//! ModPanel: a Zellij plugin moderation panel for game-server admins.
//!
//! ModPanel lets an admin:
//! - Log in with a display name bound to an identity from the identity provider
//! - Pick a moderation action (ban, kick, warn, mute, unban) and target a player
//! - Follow a live, shared log of every action taken by any admin
//! - Watch dashboard counters (users, bans, reports, next event)
//! - Switch between a dark and a light palette that follows the admin around

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event loop
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Moderation    │   │ UI Layer      │   │ Worker Layer  │
//! │ (moderation/) │   │ (ui/)         │   │ (worker/)     │
//! │ - Selector    │   │ - Rendering   │   │ - Store I/O   │
//! │ - Executor    │   │ - Theming     │   │ - Identity    │
//! │ - Projectors  │   │ - Components  │   │ - IPC bridge  │
//! │ - Session     │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Document store (storage/)                        │
//! │  - Identity, preferences, paths (infrastructure/)   │
//! │  - Records, profiles, errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The plugin thread never touches the filesystem. Every store read and
//! write, identity request and subscription lives on the worker thread and
//! travels as JSON over plugin IPC.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/modpanel.wasm" {
//!         app_id "my-server"
//!         auth_token "secret-admin-token"
//!         store_file "~/shared/modpanel-store.json"
//!         theme_file "/path/to/theme.toml"
//!         trace_level "info"
//!         poll_interval "2.0"
//!         feed_limit "50"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, start tracing,
//!    build `AppState`, request permissions.
//! 2. **Permissions Granted**: post `Init` and `SignIn` to the worker and arm
//!    the poll timer.
//! 3. **Identity Changed**: load the admin profile and subscribe to the log
//!    and the stats document.
//! 4. **Deliveries**: `LogsChanged` and `StatsChanged` feed the projectors;
//!    every render recomputes the view model.
//!
//! # Example
//!
//! ```rust
//! use modpanel::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     app_id: "my-server".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut state = initialize(&config);
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), modpanel::ModPanelError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod moderation;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Page, RuntimeSettings};
pub use domain::{ModPanelError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Store namespace used when no `app_id` is configured.
pub const DEFAULT_APP_ID: &str = "default-app-id";

const DEFAULT_POLL_INTERVAL: f64 = 2.0;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional. See the crate docs for a KDL example.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace for every store path. Default: `default-app-id`
    pub app_id: String,

    /// Custom sign-in token. Anonymous sign-in when unset.
    pub auth_token: Option<String>,

    /// Shared store file; defaults to `store.json` in the data directory.
    pub store_file: Option<String>,

    /// Path to a custom TOML palette.
    ///
    /// Overrides both built-in themes. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Seconds between worker polls. Default: `2.0`
    pub poll_interval: f64,

    /// Number of newest records in the live feed. Default: `50`
    pub feed_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            auth_token: None,
            store_file: None,
            theme_file: None,
            trace_level: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            feed_limit: moderation::DEFAULT_FEED_LIMIT,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `app_id`: blank falls back to `default-app-id`
    /// - `auth_token`, `store_file`, `theme_file`, `trace_level`: blank means unset
    /// - `poll_interval`: positive float, else `2.0`
    /// - `feed_limit`: integer >= 1, else `50`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use modpanel::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("app_id".to_string(), "my-server".to_string());
    /// map.insert("feed_limit".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.app_id, "my-server");
    /// assert_eq!(config.feed_limit, 50);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let poll_interval = config
            .get("poll_interval")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let feed_limit = config
            .get("feed_limit")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(moderation::DEFAULT_FEED_LIMIT);

        Self {
            app_id: text("app_id").unwrap_or_else(|| DEFAULT_APP_ID.to_string()),
            auth_token: text("auth_token"),
            store_file: text("store_file"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            poll_interval,
            feed_limit,
        }
    }

    /// Settings the event handler needs at runtime.
    #[must_use]
    pub fn runtime_settings(&self) -> RuntimeSettings {
        RuntimeSettings {
            app_id: self.app_id.clone(),
            auth_token: self.auth_token.clone(),
            store_file: self.store_file.clone(),
            poll_interval: self.poll_interval,
            feed_limit: self.feed_limit,
        }
    }
}

/// Builds the initial, logged-out application state.
///
/// A configured `theme_file` is loaded here and pinned for the whole
/// session; if it fails to load the built-in palettes are used instead.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(app_id = %config.app_id, "initializing modpanel plugin");

    let custom_theme = config.theme_file.as_ref().and_then(|theme_file| {
        let path = infrastructure::expand_tilde(theme_file);
        match Theme::from_file(&path) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using built-in");
                None
            }
        }
    });

    let mut state = AppState::new(config.runtime_settings(), Theme::default());
    state.custom_theme = custom_theme;
    state.refresh_theme();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_map_yields_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let map = BTreeMap::from([
            ("poll_interval".to_string(), "-1".to_string()),
            ("feed_limit".to_string(), "lots".to_string()),
            ("auth_token".to_string(), "  ".to_string()),
        ]);
        let config = Config::from_zellij(&map);
        assert!((config.poll_interval - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.feed_limit, 50);
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn custom_theme_file_wins() {
        let dark = include_str!("../themes/dark.toml").replacen("name = \"dark\"", "name = \"mine\"", 1);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(dark.as_bytes()).unwrap();

        let config = Config {
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "mine");
    }

    #[test]
    fn missing_theme_file_falls_back_to_dark() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            feed_limit: 10,
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "dark");
        assert_eq!(state.feed.limit(), 10);
    }
}
