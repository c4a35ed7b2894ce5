//! Input and page mode state types for the application.
//!
//! These enums decide which keybindings are active, where typed characters
//! go, and which page the panel shows.
//!
//! # State Machine
//!
//! The panel is always in exactly one [`InputMode`]:
//! - **Normal**: single-key commands (select action, navigate, toggle theme)
//! - **Editing**: typing into one field of the action form
//! - **Search**: typing a fuzzy filter over the log feed
//! - **Login**: typing the admin name
//!
//! # Example
//!
//! ```rust
//! use modpanel::app::modes::{FormField, InputMode, Page};
//!
//! let mode = InputMode::Editing(FormField::Target);
//! assert_eq!(Page::default(), Page::Dashboard);
//! assert_ne!(mode, InputMode::Normal);
//! ```

use crate::domain::ActionPolicy;
use std::fmt;

/// A field of the action form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Player the action applies to.
    Target,
    Reason,
    /// Only reachable for actions that accept a duration.
    Duration,
}

impl FormField {
    /// The field focused after this one, cycling.
    ///
    /// Skips the duration field when `policy` does not show it.
    #[must_use]
    pub const fn next(self, policy: ActionPolicy) -> Self {
        match self {
            Self::Target => Self::Reason,
            Self::Reason if policy.accepts_duration => Self::Duration,
            Self::Reason | Self::Duration => Self::Target,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Target => "Target player:",
            Self::Reason => "Reason:",
            Self::Duration => "Duration (e.g. 1h, 7d, permanent):",
        }
    }
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how typed characters are
/// interpreted. Determines the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    ///
    /// `1`-`5` select an action, `i` edits the form, `Enter` executes,
    /// `d`/`a` switch pages, `/` searches, `t` toggles the theme, `L` logs
    /// out, `q` closes the panel.
    Normal,

    /// Typing into a form field. `Tab` moves on, `Enter` executes, `Esc`
    /// returns to normal mode.
    Editing(FormField),

    /// Typing a fuzzy filter over the visible log window.
    Search,

    /// Typing the admin name. `Enter` submits.
    Login,
}

impl InputMode {
    /// Whether printable keys should be treated as text.
    #[must_use]
    pub const fn is_typing(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Page shown in the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Stats cards above the live log.
    #[default]
    Dashboard,
    /// Action tiles and form above the live log.
    Actions,
}

impl Page {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Actions => "actions",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActionKind;

    #[test]
    fn duration_field_only_cycles_for_actions_that_accept_it() {
        let kick = ActionKind::Kick.policy();
        assert_eq!(FormField::Reason.next(kick), FormField::Target);

        let ban = ActionKind::Ban.policy();
        assert_eq!(FormField::Reason.next(ban), FormField::Duration);
        assert_eq!(FormField::Duration.next(ban), FormField::Target);
    }
}
