//! Transient action submission built from the form at execution time.

use super::action::ActionKind;

/// What the admin asked for when pressing execute.
///
/// Empty optional fields are normalised to `None` so "present" always means
/// "non-blank after trimming".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub kind: ActionKind,
    pub target_user: String,
    pub reason: Option<String>,
    pub duration: Option<String>,
}

impl PendingSubmission {
    /// Builds a submission from raw form input, trimming every field.
    ///
    /// ```
    /// use modpanel::domain::{ActionKind, PendingSubmission};
    ///
    /// let sub = PendingSubmission::from_form(ActionKind::Kick, " Alex ", "  ", "");
    /// assert_eq!(sub.target_user, "Alex");
    /// assert_eq!(sub.reason, None);
    /// assert_eq!(sub.duration, None);
    /// ```
    #[must_use]
    pub fn from_form(kind: ActionKind, target: &str, reason: &str, duration: &str) -> Self {
        Self {
            kind,
            target_user: target.trim().to_string(),
            reason: non_blank(reason),
            duration: non_blank(duration),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
