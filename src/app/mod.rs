//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (main.rs) and the moderation, worker and UI
//! layers. Nothing in here talks to Zellij directly, so the whole panel can
//! be driven from tests.
//!
//! ```text
//! Keys / Timer → Events → Event Handler → State Mutations → Actions → Worker
//!                              ↑                                        ↓
//!                              └──────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode, form field and page types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use modpanel::app::{handle_event, AppState, Event, Page, RuntimeSettings};
//! use modpanel::ui::Theme;
//!
//! let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
//! let (render, _actions) = handle_event(&mut state, &Event::ShowPage(Page::Actions))?;
//! assert!(render);
//! # Ok::<(), modpanel::ModPanelError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FormField, InputMode, Page};
pub use state::{ActionForm, AppState, RuntimeSettings};
