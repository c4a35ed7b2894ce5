//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never calls Zellij or the worker itself. It returns a
//! `Vec<Action>` after each event and the plugin shim executes them in order.
//!
//! # Example
//!
//! ```rust
//! use modpanel::app::Action;
//! use modpanel::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::poll()),
//!     Action::SetTimeout(2.0),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Every store read or write, identity request and subscription change
    /// goes through here.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot timer; the plugin receives a timer event after the
    /// given number of seconds.
    SetTimeout(f64),
}

impl Action {
    /// The worker message carried by this action, if any.
    #[must_use]
    pub const fn worker_message(&self) -> Option<&WorkerMessage> {
        match self {
            Self::PostToWorker(message) => Some(message),
            _ => None,
        }
    }
}
