//! Action Selector: the currently chosen moderation action.

use super::session::SessionState;
use crate::domain::{ActionKind, ActionPolicy, LogKind, LogRecord};

/// Holds the selected action kind.
///
/// Starts on [`ActionKind::Ban`], the first tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSelector {
    selected: ActionKind,
}

impl Default for ActionSelector {
    fn default() -> Self {
        Self {
            selected: ActionKind::Ban,
        }
    }
}

impl ActionSelector {
    #[must_use]
    pub const fn selected(&self) -> &ActionKind {
        &self.selected
    }

    /// Policy of the selected action, used to drive the form.
    #[must_use]
    pub const fn policy(&self) -> ActionPolicy {
        self.selected.policy()
    }

    /// Makes `kind` the selected action.
    ///
    /// Returns the policy view for the form together with the informational
    /// record announcing the selection, which the caller appends to the log.
    /// Never fails; unknown kinds carry the fallback policy.
    pub fn select(&mut self, kind: ActionKind, session: &SessionState) -> (ActionPolicy, LogRecord) {
        tracing::debug!(action = %kind, "action selected");

        let record = session.record(format!("Action selected: {kind}"), LogKind::Info);
        let policy = kind.policy();
        self.selected = kind;

        (policy, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Accent, Identity};

    #[test]
    fn select_returns_policy_and_info_record() {
        let mut session = SessionState::default();
        session.on_identity(Some(Identity::new("uid-1")));

        let mut selector = ActionSelector::default();
        let (policy, record) = selector.select(ActionKind::Mute, &session);

        assert_eq!(selector.selected(), &ActionKind::Mute);
        assert!(policy.requires_duration);
        assert_eq!(policy.accent, Accent::Yellow);
        assert_eq!(record.action, "Action selected: mute");
        assert_eq!(record.kind, LogKind::Info);
        assert_eq!(record.admin_identity, "uid-1");
    }

    #[test]
    fn unknown_kind_selects_fallback_policy() {
        let session = SessionState::default();
        let mut selector = ActionSelector::default();
        let (policy, _) = selector.select(ActionKind::parse("jail"), &session);
        assert_eq!(policy, ActionPolicy::FALLBACK);
        assert_eq!(selector.policy(), ActionPolicy::FALLBACK);
    }
}
