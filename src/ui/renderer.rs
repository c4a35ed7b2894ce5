//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: the layout prints each section as ANSI text
//!
//! # Example
//!
//! ```rust
//! use modpanel::app::{AppState, RuntimeSettings};
//! use modpanel::ui::{render, Theme};
//!
//! let state = AppState::new(RuntimeSettings::default(), Theme::default());
//! render(&state, 24, 80); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; every row up to the footer is overwritten.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
