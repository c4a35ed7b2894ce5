//! Action Executor: validation and the dual-write of an executed action.

use super::session::SessionState;
use crate::domain::{LogKind, LogRecord, PendingSubmission, ValidationError};

/// The two records produced by a successful execution.
///
/// They are appended independently; subscribers may observe either first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// The action itself, with severity taken from the action's accent.
    pub record: LogRecord,
    /// `info` acknowledgment authored by the panel.
    pub confirmation: LogRecord,
}

/// Validates `submission` and builds the records to append.
///
/// Checks run in a fixed order and stop at the first failure: admin name,
/// target, reason, duration. Nothing is written on failure; the caller
/// decides how to report the error (see [`failure_record`]).
///
/// # Errors
///
/// Returns the first [`ValidationError`] the submission trips.
pub fn execute(
    submission: &PendingSubmission,
    session: &SessionState,
) -> Result<Execution, ValidationError> {
    let _span = tracing::debug_span!("execute_action", action = %submission.kind).entered();

    let policy = submission.kind.policy();

    if session.display_name().trim().is_empty() {
        return Err(ValidationError::NotAuthenticated);
    }
    if submission.target_user.trim().is_empty() {
        return Err(ValidationError::MissingTarget);
    }
    if policy.requires_reason && submission.reason.is_none() {
        return Err(ValidationError::MissingReason);
    }
    if policy.requires_duration && submission.duration.is_none() {
        return Err(ValidationError::MissingDuration);
    }

    let summary = summarize(submission);
    tracing::info!(summary = %summary, "action executed");

    let record = session
        .record(summary.clone(), policy.accent.log_kind())
        .with_target(submission.target_user.trim());
    let confirmation = session.system_record(
        format!("Command sent successfully: {summary}"),
        LogKind::Info,
    );

    Ok(Execution {
        record,
        confirmation,
    })
}

/// Human-readable summary, e.g. `BAN against Alex | Reason: x | Duration: 1d`.
///
/// The duration only appears for actions that accept one.
#[must_use]
pub fn summarize(submission: &PendingSubmission) -> String {
    let mut summary = format!(
        "{} against {}",
        submission.kind.name().to_uppercase(),
        submission.target_user.trim()
    );

    if let Some(reason) = &submission.reason {
        summary.push_str(" | Reason: ");
        summary.push_str(reason);
    }
    if let Some(duration) = submission
        .duration
        .as_ref()
        .filter(|_| submission.kind.policy().accepts_duration)
    {
        summary.push_str(" | Duration: ");
        summary.push_str(duration);
    }

    summary
}

/// The `error` record reporting a failed validation.
///
/// `NotAuthenticated` yields `None`: with no admin there is nobody to
/// attribute the record to, so it is reported locally instead.
#[must_use]
pub fn failure_record(
    error: ValidationError,
    submission: &PendingSubmission,
    session: &SessionState,
) -> Option<LogRecord> {
    match error {
        ValidationError::NotAuthenticated => None,
        _ => Some(session.record(error.feed_message(submission.kind.name()), LogKind::Error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionKind, Identity, SYSTEM_AUTHOR};

    fn admin() -> SessionState {
        let mut session = SessionState::default();
        session.on_identity(Some(Identity::new("uid-1")));
        session.login("Steve");
        session
    }

    #[test]
    fn requires_login_first() {
        let session = SessionState::default();
        let sub = PendingSubmission::from_form(ActionKind::Ban, "", "", "");
        let err = execute(&sub, &session).unwrap_err();
        assert_eq!(err, ValidationError::NotAuthenticated);
        assert!(failure_record(err, &sub, &session).is_none());
    }

    #[test]
    fn validation_order_is_target_reason_duration() {
        let session = admin();

        let sub = PendingSubmission::from_form(ActionKind::Ban, " ", "", "");
        assert_eq!(execute(&sub, &session), Err(ValidationError::MissingTarget));

        let sub = PendingSubmission::from_form(ActionKind::Ban, "Alex", "", "7d");
        assert_eq!(execute(&sub, &session), Err(ValidationError::MissingReason));

        let sub = PendingSubmission::from_form(ActionKind::Mute, " ", "", "");
        assert_eq!(execute(&sub, &session), Err(ValidationError::MissingTarget));

        let sub = PendingSubmission::from_form(ActionKind::Mute, "Alex", "spam", " ");
        assert_eq!(execute(&sub, &session), Err(ValidationError::MissingDuration));
    }

    #[test]
    fn ban_without_duration_and_unban_without_reason_succeed() {
        let session = admin();

        let ban = PendingSubmission::from_form(ActionKind::Ban, "Alex", "cheating", "");
        let done = execute(&ban, &session).unwrap();
        assert_eq!(done.record.action, "BAN against Alex | Reason: cheating");

        let unban = PendingSubmission::from_form(ActionKind::Unban, "Alex", "", "");
        let done = execute(&unban, &session).unwrap();
        assert_eq!(done.record.action, "UNBAN against Alex");
        assert_eq!(done.record.kind, LogKind::Info);
    }

    #[test]
    fn failure_record_names_the_action() {
        let session = admin();
        let sub = PendingSubmission::from_form(ActionKind::Warn, "Alex", "", "");
        let err = execute(&sub, &session).unwrap_err();
        let record = failure_record(err, &sub, &session).unwrap();
        assert_eq!(record.kind, LogKind::Error);
        assert_eq!(record.action, "Action WARN failed: reason is required.");
        assert_eq!(record.author(), "Steve");
    }

    #[test]
    fn kick_needs_neither_reason_nor_duration() {
        let session = admin();
        let sub = PendingSubmission::from_form(ActionKind::Kick, "Alex", "", "");
        let done = execute(&sub, &session).unwrap();

        assert_eq!(done.record.action, "KICK against Alex");
        assert_eq!(done.record.kind, LogKind::Warn);
        assert_eq!(done.record.target(), Some("Alex"));
        assert_eq!(done.confirmation.kind, LogKind::Info);
        assert_eq!(done.confirmation.author(), SYSTEM_AUTHOR);
        assert_eq!(
            done.confirmation.action,
            "Command sent successfully: KICK against Alex"
        );
    }

    #[test]
    fn ban_record_is_error_with_full_summary() {
        let session = admin();
        let sub = PendingSubmission::from_form(ActionKind::Ban, "Alex", "cheating", "7d");
        let done = execute(&sub, &session).unwrap();
        assert_eq!(done.record.kind, LogKind::Error);
        assert_eq!(
            done.record.action,
            "BAN against Alex | Reason: cheating | Duration: 7d"
        );
    }

    #[test]
    fn duration_is_dropped_for_actions_without_one() {
        let sub = PendingSubmission::from_form(ActionKind::Unban, "Alex", "appeal", "7d");
        assert_eq!(summarize(&sub), "UNBAN against Alex | Reason: appeal");
    }
}
