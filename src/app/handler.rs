//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place the plugin thread changes state. It
//! takes user input, timer ticks and worker responses, runs them through the
//! moderation components, and returns the [`Action`]s the plugin shim must
//! execute. Store writes, identity requests and subscription changes all
//! leave as [`WorkerMessage`]s.
//!
//! # Event Types
//!
//! - **Input**: `SelectAction`, `EditForm`, `NextField`, `Submit`, `Char`,
//!   `Backspace`, `Escape`
//! - **Navigation**: `ShowPage`, `SearchMode`, `LoginPrompt`, `CloseFocus`
//! - **Session**: `ToggleTheme`, `Logout`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `Timer`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use modpanel::app::{handle_event, AppState, Event, RuntimeSettings};
//! use modpanel::ui::Theme;
//!
//! let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(actions.len(), 3); // init, sign-in, poll timer
//! # Ok::<(), modpanel::ModPanelError>(())
//! ```

use super::modes::{FormField, InputMode, Page};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{ActionKind, LogKind, LogRecord, PendingSubmission};
use crate::moderation::{self, SessionEffect, SessionPhase};
use crate::worker::{Operation, Topic, WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Zellij granted the requested permissions; start the worker.
    PermissionsGranted,
    /// Zellij denied the requested permissions.
    PermissionsDenied,
    /// The poll timer fired.
    Timer,

    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Selects an action tile (actions page only).
    SelectAction(ActionKind),
    /// Starts typing into the form's target field.
    EditForm,
    /// Moves form focus to the next visible field.
    NextField,
    /// Enter: executes the form, submits the login name, or keeps the
    /// search filter, depending on the input mode.
    Submit,

    /// Switches page, logging the navigation.
    ShowPage(Page),
    /// Starts typing a feed filter.
    SearchMode,
    /// Focuses the login prompt.
    LoginPrompt,
    /// Flips between the dark and light theme.
    ToggleTheme,
    Logout,

    /// Appends a character to whatever is being typed.
    Char(char),
    /// Removes the last typed character.
    Backspace,
    /// Leaves a typing mode, or clears filter and notice in normal mode.
    Escape,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI should re-render.
///
/// # Errors
///
/// Reserved for failures that must abort event processing; moderation
/// failures are reported through the feed and the notice line instead.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::PermissionsGranted => {
            tracing::info!(app_id = %state.settings.app_id, "permissions granted, starting worker");
            Ok((
                false,
                vec![
                    Action::PostToWorker(WorkerMessage::init(
                        state.settings.app_id.clone(),
                        state.settings.store_file.clone(),
                    )),
                    Action::PostToWorker(WorkerMessage::sign_in(state.settings.auth_token.clone())),
                    Action::SetTimeout(state.settings.poll_interval),
                ],
            ))
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied - store unavailable");
            state.notice = Some("Permissions denied: the shared log is unavailable".to_string());
            Ok((true, vec![]))
        }
        Event::Timer => {
            let mut actions = resubscribe_stopped_feeds(state);
            actions.push(Action::PostToWorker(WorkerMessage::poll()));
            actions.push(Action::SetTimeout(state.settings.poll_interval));
            Ok((false, actions))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SelectAction(kind) => {
            if state.page != Page::Actions {
                return Ok((false, vec![]));
            }

            let (policy, record) = state.selector.select(kind.clone(), &state.session);
            if state.input_mode == InputMode::Editing(FormField::Duration) && !policy.accepts_duration {
                state.input_mode = InputMode::Editing(FormField::Reason);
            }
            Ok((true, vec![append(record)]))
        }
        Event::EditForm => {
            if state.page != Page::Actions {
                return Ok((false, vec![]));
            }
            if state.is_logged_in() {
                state.input_mode = InputMode::Editing(FormField::Target);
            } else {
                state.input_mode = InputMode::Login;
            }
            Ok((true, vec![]))
        }
        Event::NextField => match state.input_mode {
            InputMode::Editing(field) => {
                state.input_mode = InputMode::Editing(field.next(state.selector.policy()));
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Submit => match state.input_mode {
            InputMode::Login => Ok((true, submit_login(state))),
            InputMode::Search => {
                state.input_mode = InputMode::Normal;
                Ok((true, vec![]))
            }
            InputMode::Normal | InputMode::Editing(_) => {
                if state.page != Page::Actions {
                    return Ok((false, vec![]));
                }
                Ok((true, execute_form(state)))
            }
        },
        Event::ShowPage(page) => {
            state.input_mode = match state.input_mode {
                InputMode::Editing(_) => InputMode::Normal,
                mode => mode,
            };
            if state.page == *page {
                return Ok((true, vec![]));
            }

            state.page = *page;
            let record = state.session.record(format!("Navigated to: {page}"), LogKind::Info);
            Ok((true, vec![append(record)]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.search_query = String::new();
            Ok((true, vec![]))
        }
        Event::LoginPrompt => {
            if state.is_logged_in() {
                state.notice = Some(format!("Already logged in as {}", state.session.display_name()));
            } else {
                state.input_mode = InputMode::Login;
            }
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            let effects = state.session.change_theme(state.session.theme().toggled());
            state.refresh_theme();
            Ok((true, apply_effects(state, effects)))
        }
        Event::Logout => {
            if state.session.phase() == SessionPhase::LoggedOut {
                return Ok((false, vec![]));
            }
            let effects = state.session.logout();
            state.form.clear();
            state.login_input.clear();
            state.input_mode = InputMode::Login;
            Ok((true, apply_effects(state, effects)))
        }
        Event::Char(c) => {
            let target = match state.input_mode {
                InputMode::Editing(field) => state.form.field_mut(field),
                InputMode::Search => &mut state.search_query,
                InputMode::Login => &mut state.login_input,
                InputMode::Normal => return Ok((false, vec![])),
            };
            target.push(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            let target = match state.input_mode {
                InputMode::Editing(field) => state.form.field_mut(field),
                InputMode::Search => &mut state.search_query,
                InputMode::Login => &mut state.login_input,
                InputMode::Normal => return Ok((false, vec![])),
            };
            Ok((target.pop().is_some(), vec![]))
        }
        Event::Escape => {
            match state.input_mode {
                InputMode::Normal => {
                    let changed = !state.search_query.is_empty() || state.notice.is_some();
                    state.search_query.clear();
                    state.notice = None;
                    return Ok((changed, vec![]));
                }
                InputMode::Search => state.search_query.clear(),
                InputMode::Login | InputMode::Editing(_) => {}
            }
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn append(record: LogRecord) -> Action {
    Action::PostToWorker(WorkerMessage::append_log(record))
}

/// Reopens live views that stopped after a subscription failure.
///
/// Runs on every poll tick, so a broken store is retried at the poll
/// interval. Nothing is reopened without an identity or while one is being
/// renewed; the next identity subscribes on its own.
fn resubscribe_stopped_feeds(state: &mut AppState) -> Vec<Action> {
    if state.session.identity().is_none() || state.renewing_identity {
        return vec![];
    }
    if state.feed.is_active() && state.stats.is_active() {
        return vec![];
    }

    tracing::debug!(
        logs = state.feed.is_active(),
        stats = state.stats.is_active(),
        "retrying stopped subscriptions"
    );
    apply_effects(state, vec![SessionEffect::SubscribeFeeds])
}

/// Validates the form and emits the records to append.
///
/// Success clears the form. A failure other than `NotAuthenticated` becomes
/// an `error` record in the feed; `NotAuthenticated` writes nothing and
/// opens the login prompt instead.
fn execute_form(state: &mut AppState) -> Vec<Action> {
    let submission = PendingSubmission::from_form(
        state.selector.selected().clone(),
        &state.form.target,
        &state.form.reason,
        &state.form.duration,
    );

    match moderation::execute(&submission, &state.session) {
        Ok(execution) => {
            state.form.clear();
            state.input_mode = InputMode::Normal;
            state.notice = None;
            vec![append(execution.record), append(execution.confirmation)]
        }
        Err(error) => {
            tracing::debug!(%error, "submission rejected");
            match moderation::failure_record(error, &submission, &state.session) {
                Some(record) => vec![append(record)],
                None => {
                    state.notice = Some("Please log in first".to_string());
                    state.input_mode = InputMode::Login;
                    vec![]
                }
            }
        }
    }
}

fn submit_login(state: &mut AppState) -> Vec<Action> {
    let name = std::mem::take(&mut state.login_input);
    let effects = state.session.login(&name);

    if state.is_logged_in() {
        state.input_mode = InputMode::Normal;
        state.notice = None;
    } else {
        state.login_input = name;
    }
    apply_effects(state, effects)
}

/// Turns session effects into worker messages, updating local bookkeeping
/// on the way.
fn apply_effects(state: &mut AppState, effects: Vec<SessionEffect>) -> Vec<Action> {
    let mut actions = Vec::with_capacity(effects.len());

    for effect in effects {
        match effect {
            SessionEffect::Append(record) => actions.push(append(record)),
            SessionEffect::SaveProfile { identity, profile } => {
                actions.push(Action::PostToWorker(WorkerMessage::save_profile(identity, profile)));
            }
            SessionEffect::LoadProfile(identity) => {
                actions.push(Action::PostToWorker(WorkerMessage::load_profile(identity)));
            }
            SessionEffect::SubscribeFeeds => {
                if state.feed.subscribe() {
                    actions.push(Action::PostToWorker(WorkerMessage::subscribe_logs(state.feed.limit())));
                }
                if state.stats.subscribe() {
                    actions.push(Action::PostToWorker(WorkerMessage::subscribe_stats()));
                }
            }
            SessionEffect::UnsubscribeFeeds => {
                state.feed.unsubscribe();
                state.stats.unsubscribe();
                actions.push(Action::PostToWorker(WorkerMessage::unsubscribe(Topic::Logs)));
                actions.push(Action::PostToWorker(WorkerMessage::unsubscribe(Topic::Stats)));
            }
            SessionEffect::RenewIdentity => {
                state.renewing_identity = true;
                actions.push(Action::PostToWorker(WorkerMessage::sign_out()));
            }
            SessionEffect::Notice(text) => state.notice = Some(text),
        }
    }

    actions
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::Initialized { theme } => {
            state.worker_ready = true;
            if let Some(theme) = theme {
                if state.session.identity().is_none() {
                    state.apply_preferred_theme(*theme);
                }
            }
            Ok((true, vec![]))
        }
        WorkerResponse::IdentityChanged { identity } => {
            let mut actions = vec![];
            if identity.is_none() && state.renewing_identity {
                state.renewing_identity = false;
                actions.push(Action::PostToWorker(WorkerMessage::sign_in(
                    state.settings.auth_token.clone(),
                )));
            }
            let effects = state.session.on_identity(identity.clone());
            actions.extend(apply_effects(state, effects));
            Ok((true, actions))
        }
        WorkerResponse::IdentityFailed { message } => {
            state.renewing_identity = false;
            let effects = state.session.on_identity_failed(message);
            Ok((true, apply_effects(state, effects)))
        }
        WorkerResponse::ProfileLoaded { identity, profile } => {
            if !state.session.on_profile_loaded(identity, profile.clone()) {
                return Ok((false, vec![]));
            }
            state.refresh_theme();
            if !state.is_logged_in() && state.input_mode == InputMode::Normal {
                state.input_mode = InputMode::Login;
            }
            Ok((true, vec![]))
        }
        WorkerResponse::ProfileSaved | WorkerResponse::LogAppended | WorkerResponse::StatsSeeded => {
            Ok((false, vec![]))
        }
        WorkerResponse::LogsChanged { documents } => Ok((state.feed.apply(documents), vec![])),
        WorkerResponse::StatsChanged { document } => {
            let actions: Vec<Action> = state
                .stats
                .apply(document.as_ref())
                .map(|seed| Action::PostToWorker(WorkerMessage::seed_stats(seed)))
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        WorkerResponse::SubscriptionFailed { topic, message } => {
            tracing::warn!(%topic, error = %message, "live subscription failed");
            match topic {
                Topic::Logs => state.feed.unsubscribe(),
                Topic::Stats => state.stats.unsubscribe(),
            }
            state.notice = Some(format!("Live {topic} stopped updating: {message}"));
            let record = state
                .session
                .system_record(format!("Subscription error ({topic}): {message}"), LogKind::System);
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::unsubscribe(*topic)),
                    append(record),
                ],
            ))
        }
        WorkerResponse::Error { operation, message } => {
            tracing::warn!(%operation, error = %message, "worker error");
            state.notice = Some(message.clone());

            // A failed append is only shown locally; logging it would append again.
            if *operation == Operation::AppendLog {
                return Ok((true, vec![]));
            }
            let record = state
                .session
                .system_record(format!("Store error: {message}"), LogKind::System);
            Ok((true, vec![append(record)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RuntimeSettings;
    use crate::domain::{AdminProfile, Identity, ThemeChoice, ValidationError};
    use crate::moderation::ANON_AUTHOR;
    use crate::ui::Theme;

    fn messages(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions.iter().filter_map(Action::worker_message).collect()
    }

    fn appended(actions: &[Action]) -> Vec<&LogRecord> {
        messages(actions)
            .into_iter()
            .filter_map(|m| match m {
                WorkerMessage::AppendLog { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    fn signed_in() -> AppState {
        let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
        let identity = Some(Identity::new("uid-1"));
        handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::IdentityChanged { identity })).unwrap();
        state
    }

    fn logged_in() -> AppState {
        let mut state = signed_in();
        handle_event(&mut state, &Event::LoginPrompt).unwrap();
        for c in "Steve".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Submit).unwrap();
        assert!(state.is_logged_in());
        state.page = Page::Actions;
        state
    }

    fn type_into(state: &mut AppState, field: FormField, text: &str) {
        state.input_mode = InputMode::Editing(field);
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn identity_loads_profile_and_subscribes_once() {
        let mut state = AppState::new(RuntimeSettings::default(), Theme::default());
        let identity = Some(Identity::new("uid-1"));
        let (_, actions) =
            handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::IdentityChanged { identity })).unwrap();

        let msgs = messages(&actions);
        assert!(matches!(msgs[0], WorkerMessage::LoadProfile { .. }));
        assert!(matches!(msgs[1], WorkerMessage::SubscribeLogs { limit: 50, .. }));
        assert!(matches!(msgs[2], WorkerMessage::SubscribeStats { .. }));

        state.input_mode = InputMode::Login;
        state.login_input = "Steve".to_string();
        let (_, login) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!messages(&login)
            .iter()
            .any(|m| matches!(m, WorkerMessage::SubscribeLogs { .. } | WorkerMessage::SubscribeStats { .. })));
    }

    #[test]
    fn kick_without_reason_appends_record_and_confirmation() {
        let mut state = logged_in();
        handle_event(&mut state, &Event::SelectAction(ActionKind::Kick)).unwrap();
        type_into(&mut state, FormField::Target, "Alex");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let records = appended(&actions);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action, "KICK against Alex");
        assert_eq!(records[0].kind, LogKind::Warn);
        assert_eq!(records[1].kind, LogKind::Info);
        assert!(state.form.target.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn ban_without_reason_reports_missing_reason() {
        let mut state = logged_in();
        type_into(&mut state, FormField::Target, "Alex");
        type_into(&mut state, FormField::Duration, "7d");

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let records = appended(&actions);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, LogKind::Error);
        assert_eq!(records[0].action, ValidationError::MissingReason.feed_message("ban"));
        assert_eq!(state.form.target, "Alex");
    }

    #[test]
    fn selection_applies_while_logged_out() {
        let mut state = signed_in();
        state.page = Page::Actions;

        let (_, actions) = handle_event(&mut state, &Event::SelectAction(ActionKind::Mute)).unwrap();

        assert_eq!(state.selector.selected(), &ActionKind::Mute);
        let records = appended(&actions);
        assert_eq!(records[0].action, "Action selected: mute");
        assert_eq!(records[0].admin_name, ANON_AUTHOR);
    }

    #[test]
    fn late_profile_does_not_undo_login() {
        let mut state = logged_in();
        let late = WorkerResponse::ProfileLoaded {
            identity: Identity::new("uid-1"),
            profile: AdminProfile::default(),
        };

        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(late)).unwrap();

        assert!(!render);
        assert!(state.is_logged_in());
        assert_eq!(state.session.display_name(), "Steve");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn store_error_is_logged_as_system_record() {
        let mut state = logged_in();
        let failed = WorkerResponse::Error {
            operation: Operation::SaveProfile,
            message: "save profile: Store unavailable: disk".to_string(),
        };

        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failed)).unwrap();

        let records = appended(&actions);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, LogKind::System);
        assert!(records[0].action.contains("Store unavailable: disk"));
        assert_eq!(state.notice.as_deref(), Some("save profile: Store unavailable: disk"));
    }

    #[test]
    fn failed_append_is_not_logged_again() {
        let mut state = logged_in();
        let failed = WorkerResponse::Error {
            operation: Operation::AppendLog,
            message: "append log: Store unavailable: disk".to_string(),
        };

        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failed)).unwrap();

        assert!(actions.is_empty());
        assert!(state.notice.is_some());
    }

    #[test]
    fn execute_while_logged_out_writes_nothing() {
        let mut state = signed_in();
        state.page = Page::Actions;
        state.form.target = "Alex".to_string();

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Login);
        assert!(state.notice.is_some());
    }

    #[test]
    fn navigation_is_logged_once_per_change() {
        let mut state = signed_in();
        let (_, actions) = handle_event(&mut state, &Event::ShowPage(Page::Actions)).unwrap();
        let records = appended(&actions);
        assert_eq!(records[0].action, "Navigated to: actions");
        assert_eq!(records[0].admin_name, ANON_AUTHOR);

        let (_, again) = handle_event(&mut state, &Event::ShowPage(Page::Actions)).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn logout_renews_identity_after_sign_out() {
        let mut state = logged_in();
        let (_, actions) = handle_event(&mut state, &Event::Logout).unwrap();
        let msgs = messages(&actions);

        assert!(matches!(msgs.last(), Some(WorkerMessage::SignOut { .. })));
        assert!(!state.feed.is_active());
        assert_eq!(state.input_mode, InputMode::Login);

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::IdentityChanged { identity: None }),
        )
        .unwrap();
        assert!(matches!(
            messages(&actions).as_slice(),
            [WorkerMessage::SignIn { token: None, .. }]
        ));
        assert!(!state.renewing_identity);
    }

    #[test]
    fn theme_toggle_persists_profile_and_switches_palette() {
        let mut state = logged_in();
        let (_, actions) = handle_event(&mut state, &Event::ToggleTheme).unwrap();

        assert_eq!(state.theme.name, "light");
        assert!(messages(&actions).iter().any(|m| matches!(
            m,
            WorkerMessage::SaveProfile { profile, .. } if profile.theme == ThemeChoice::Light
        )));
        assert_eq!(appended(&actions)[0].action, "Theme changed to: Light");
    }

    #[test]
    fn stale_profile_is_ignored() {
        let mut state = signed_in();
        let profile = AdminProfile {
            display_name: "Mallory".to_string(),
            theme: ThemeChoice::Light,
        };
        let response = WorkerResponse::ProfileLoaded {
            identity: Identity::new("someone-else"),
            profile,
        };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
        assert!(!render);
        assert!(!state.is_logged_in());
    }

    #[test]
    fn missing_stats_document_is_seeded_once() {
        let mut state = signed_in();
        let absent = Event::WorkerResponse(WorkerResponse::StatsChanged { document: None });

        let (_, first) = handle_event(&mut state, &absent).unwrap();
        assert!(matches!(messages(&first).as_slice(), [WorkerMessage::SeedStats { .. }]));

        let (_, second) = handle_event(&mut state, &absent).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn subscription_failure_stops_feed_and_reports() {
        let mut state = signed_in();
        let failed = WorkerResponse::SubscriptionFailed {
            topic: Topic::Logs,
            message: "disk gone".to_string(),
        };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failed)).unwrap();

        assert!(!state.feed.is_active());
        assert!(matches!(
            messages(&actions)[0],
            WorkerMessage::Unsubscribe { topic: Topic::Logs, .. }
        ));
        assert_eq!(appended(&actions)[0].kind, LogKind::System);
        assert!(state.notice.as_deref().unwrap_or_default().contains("disk gone"));

        let (_, tick) = handle_event(&mut state, &Event::Timer).unwrap();
        let msgs = messages(&tick);
        assert!(matches!(msgs[0], WorkerMessage::SubscribeLogs { limit: 50, .. }));
        assert!(matches!(msgs[1], WorkerMessage::Poll { .. }));
        assert!(state.feed.is_active());
    }

    #[test]
    fn timer_does_not_resubscribe_while_identity_is_renewed() {
        let mut state = logged_in();
        handle_event(&mut state, &Event::Logout).unwrap();

        let (_, tick) = handle_event(&mut state, &Event::Timer).unwrap();
        assert!(matches!(messages(&tick).as_slice(), [WorkerMessage::Poll { .. }]));
    }
}
