//! Error types for the moderation panel.
//!
//! Two families live here. [`ValidationError`] covers the expected,
//! user-correctable failures of an action submission; these never escalate and
//! only ever end up as a log entry or a notice. [`ModPanelError`] covers
//! everything that goes wrong talking to the outside world (store, identity
//! provider, worker thread, configuration) and is what fallible functions in
//! this crate return through [`Result`].

use thiserror::Error;

/// Reasons an action submission is rejected before anything is written.
///
/// Checked in declaration order; the executor stops at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No admin display name is set for the current session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The target player field is empty after trimming.
    #[error("target player missing")]
    MissingTarget,

    /// The selected action requires a reason and none was given.
    #[error("reason is required")]
    MissingReason,

    /// The selected action requires a duration and none was given.
    #[error("duration is required")]
    MissingDuration,
}

impl ValidationError {
    /// Builds the feed message reported for this failure.
    ///
    /// ```
    /// use modpanel::domain::ValidationError;
    ///
    /// assert_eq!(
    ///     ValidationError::MissingTarget.feed_message("ban"),
    ///     "Action BAN failed: target player missing."
    /// );
    /// ```
    #[must_use]
    pub fn feed_message(&self, action: &str) -> String {
        format!("Action {} failed: {self}.", action.to_uppercase())
    }
}

/// The main error type for moderation panel operations.
#[derive(Debug, Error)]
pub enum ModPanelError {
    /// The document store could not be opened, read, or written.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A live subscription failed to deliver an update.
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// The identity provider failed to initialise or sign in.
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// An action submission was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for moderation panel operations.
pub type Result<T> = std::result::Result<T, ModPanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_action() {
        assert_eq!(
            ValidationError::MissingReason.feed_message("warn"),
            "Action WARN failed: reason is required."
        );
        assert_eq!(
            ValidationError::MissingDuration.feed_message("mute"),
            "Action MUTE failed: duration is required."
        );
    }

    #[test]
    fn validation_converts_into_panel_error() {
        let err: ModPanelError = ValidationError::NotAuthenticated.into();
        assert!(matches!(
            err,
            ModPanelError::Validation(ValidationError::NotAuthenticated)
        ));
        assert_eq!(err.to_string(), "Validation error: not logged in");
    }
}
