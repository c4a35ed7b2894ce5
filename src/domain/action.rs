//! Moderation action kinds and their fixed form policies.
//!
//! Every [`ActionKind`] maps to exactly one [`ActionPolicy`] through
//! [`ActionKind::policy`]. Nothing else in the crate decides whether a reason
//! or duration is required; call sites ask the policy.

use super::record::LogKind;
use std::fmt;

/// Accent colour attached to an action tile.
///
/// Besides styling, the accent decides the severity of the record written when
/// the action executes (see [`Accent::log_kind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Red,
    Yellow,
    Neutral,
}

impl Accent {
    /// Severity of the action record written for an action with this accent.
    ///
    /// ```
    /// use modpanel::domain::{Accent, LogKind};
    ///
    /// assert_eq!(Accent::Red.log_kind(), LogKind::Error);
    /// assert_eq!(Accent::Yellow.log_kind(), LogKind::Warn);
    /// assert_eq!(Accent::Neutral.log_kind(), LogKind::Info);
    /// ```
    #[must_use]
    pub const fn log_kind(self) -> LogKind {
        match self {
            Self::Red => LogKind::Error,
            Self::Yellow => LogKind::Warn,
            Self::Neutral => LogKind::Info,
        }
    }
}

/// Form rules and presentation for one action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPolicy {
    /// Submission is rejected without a non-blank reason.
    pub requires_reason: bool,
    /// Submission is rejected without a non-blank duration.
    pub requires_duration: bool,
    /// Whether the duration field is shown at all.
    ///
    /// Always true when `requires_duration` is.
    pub accepts_duration: bool,
    /// Label shown above the reason field.
    pub reason_prompt: &'static str,
    /// Tile accent, also used to pick the record severity.
    pub accent: Accent,
}

impl ActionPolicy {
    /// Policy used for any action name outside the built-in set.
    pub const FALLBACK: Self = Self {
        requires_reason: true,
        requires_duration: false,
        accepts_duration: false,
        reason_prompt: "Reason:",
        accent: Accent::Neutral,
    };
}

/// A moderation action an admin can apply to a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Ban,
    Kick,
    Warn,
    Mute,
    Unban,
    /// Any other action name, carried verbatim (lowercased).
    Other(String),
}

impl ActionKind {
    /// The built-in actions in tile order.
    pub const BUILT_IN: [Self; 5] = [Self::Ban, Self::Kick, Self::Warn, Self::Mute, Self::Unban];

    /// Resolves an action name, case-insensitively.
    ///
    /// Never fails: names outside the built-in set become [`ActionKind::Other`]
    /// and receive [`ActionPolicy::FALLBACK`].
    ///
    /// ```
    /// use modpanel::domain::ActionKind;
    ///
    /// assert_eq!(ActionKind::parse("BAN"), ActionKind::Ban);
    /// assert_eq!(ActionKind::parse(" Jail "), ActionKind::Other("jail".to_string()));
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "ban" => Self::Ban,
            "kick" => Self::Kick,
            "warn" => Self::Warn,
            "mute" => Self::Mute,
            "unban" => Self::Unban,
            other => Self::Other(other.to_string()),
        }
    }

    /// Lowercase action name as it appears in records.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ban => "ban",
            Self::Kick => "kick",
            Self::Warn => "warn",
            Self::Mute => "mute",
            Self::Unban => "unban",
            Self::Other(name) => name,
        }
    }

    /// The fixed form policy for this action.
    ///
    /// Only a mute needs a duration; a ban without one is permanent.
    #[must_use]
    pub const fn policy(&self) -> ActionPolicy {
        match self {
            Self::Ban => ActionPolicy {
                requires_reason: true,
                requires_duration: false,
                accepts_duration: true,
                reason_prompt: "Reason (e.g. cheating, trolling):",
                accent: Accent::Red,
            },
            Self::Kick => ActionPolicy {
                requires_reason: false,
                requires_duration: false,
                accepts_duration: false,
                reason_prompt: "Reason (optional):",
                accent: Accent::Yellow,
            },
            Self::Warn => ActionPolicy {
                requires_reason: true,
                requires_duration: false,
                accepts_duration: true,
                reason_prompt: "Reason (required):",
                accent: Accent::Yellow,
            },
            Self::Mute => ActionPolicy {
                requires_reason: false,
                requires_duration: true,
                accepts_duration: true,
                reason_prompt: "Reason:",
                accent: Accent::Yellow,
            },
            Self::Unban => ActionPolicy {
                requires_reason: false,
                requires_duration: false,
                accepts_duration: false,
                reason_prompt: "Reason for unban:",
                accent: Accent::Neutral,
            },
            Self::Other(_) => ActionPolicy::FALLBACK,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
