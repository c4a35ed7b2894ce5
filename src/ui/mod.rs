//! User interface rendering layer with component-based architecture.
//!
//! Transforms application state into ANSI-styled terminal output through
//! composable components. Provides the dark and light palettes plus
//! custom TOML themes, and fuzzy match highlighting for the feed filter.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    ActionPanel, ActionTile, EmptyState, FeedLine, FooterInfo, FormFieldView, HeaderInfo,
    LoginPrompt, SearchBarInfo, StatCard, UIViewModel,
};
