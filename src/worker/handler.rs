//! Worker implementation: owns every piece of I/O the panel performs.
//!
//! The plugin thread never touches the store, the identity provider or the
//! preference files. It posts [`WorkerMessage`]s, and [`PanelWorker`] answers
//! with [`WorkerResponse`]s. The Zellij worker shim in the plugin binary only
//! (de)serializes around [`PanelWorker::handle_message`], so everything here
//! runs natively in tests.

use crate::domain::error::{ModPanelError, Result};
use crate::domain::{AdminProfile, Document, Identity, LogRecord, ThemeChoice};
use crate::infrastructure::identity::{IdentityProvider, LocalIdentityProvider};
use crate::infrastructure::paths;
use crate::infrastructure::preferences::{JsonPreferences, PreferenceStore, THEME_KEY};
use crate::storage::{Change, JsonDocumentStore, Store, StorePaths, SubscriptionId};
use crate::worker::messages::{Operation, Topic};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything the worker opens on `Init`.
struct Backends {
    store: Box<dyn Store>,
    identity: Box<dyn IdentityProvider>,
    preferences: Box<dyn PreferenceStore>,
    paths: StorePaths,
}

/// Worker-side state.
///
/// Backends are opened by the `Init` message; any other message before that
/// is answered with an error.
pub struct PanelWorker {
    data_dir: PathBuf,
    backends: Option<Backends>,
    topics: BTreeMap<Topic, SubscriptionId>,
}

impl Default for PanelWorker {
    fn default() -> Self {
        Self::new(paths::get_data_dir())
    }
}

impl PanelWorker {
    /// Creates a worker whose files default to `data_dir`.
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            backends: None,
            topics: BTreeMap::new(),
        }
    }

    fn backends(&mut self) -> Result<&mut Backends> {
        self.backends
            .as_mut()
            .ok_or_else(|| ModPanelError::Worker("worker not initialized".to_string()))
    }

    /// Helper for handling store results with consistent logging.
    fn handle_db_result<T, F>(operation: Operation, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(%operation, "store operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(%operation, error = %e, "store operation failed");
                WorkerResponse::Error {
                    operation,
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn open_backends(&self, app_id: &str, store_file: Option<&str>) -> Result<Backends> {
        let store_path = paths::resolve_file(store_file, &self.data_dir, "store.json");
        let store = JsonDocumentStore::new(store_path)
            .map_err(|e| ModPanelError::StoreUnavailable(e.to_string()))?;

        let preferences = JsonPreferences::open(self.data_dir.join("preferences.json"))?;
        let identity_file = JsonPreferences::open(self.data_dir.join("identity.json"))?;

        Ok(Backends {
            store: Box::new(store),
            identity: Box::new(LocalIdentityProvider::new(identity_file)),
            preferences: Box::new(preferences),
            paths: StorePaths::new(app_id),
        })
    }

    /// Handles the `Init` message.
    ///
    /// Re-initialising drops every open subscription.
    fn handle_init(&mut self, app_id: &str, store_file: Option<&str>) -> WorkerResponse {
        self.topics.clear();
        self.backends = None;

        Self::handle_db_result(Operation::OpenStore, self.open_backends(app_id, store_file), |backends| {
            let theme = backends
                .preferences
                .get(THEME_KEY)
                .as_deref()
                .and_then(ThemeChoice::parse);
            tracing::info!(app_id = backends.paths.app_id(), theme = ?theme, "worker initialized");
            self.backends = Some(backends);
            WorkerResponse::Initialized { theme }
        })
    }

    fn handle_sign_in(&mut self, token: Option<&str>) -> Vec<WorkerResponse> {
        let backends = match self.backends() {
            Ok(b) => b,
            Err(e) => return vec![WorkerResponse::IdentityFailed { message: e.to_string() }],
        };

        match backends.identity.sign_in(token) {
            Ok(identity) => {
                tracing::debug!(identity = %identity, "signed in");
                Self::identity_changes(backends)
            }
            Err(e) => vec![WorkerResponse::IdentityFailed { message: e.to_string() }],
        }
    }

    fn handle_sign_out(&mut self) -> Vec<WorkerResponse> {
        let backends = match self.backends() {
            Ok(b) => b,
            Err(e) => return vec![WorkerResponse::IdentityFailed { message: e.to_string() }],
        };

        match backends.identity.sign_out() {
            Ok(()) => Self::identity_changes(backends),
            Err(e) => vec![WorkerResponse::IdentityFailed { message: e.to_string() }],
        }
    }

    fn identity_changes(backends: &mut Backends) -> Vec<WorkerResponse> {
        backends
            .identity
            .drain_changes()
            .into_iter()
            .map(|identity| WorkerResponse::IdentityChanged { identity })
            .collect()
    }

    /// Handles the `LoadProfile` message.
    ///
    /// A missing settings document is a fresh, logged-out profile. The theme
    /// falls back to the locally remembered one.
    fn handle_load_profile(&mut self, identity: Identity) -> WorkerResponse {
        let result = self.backends().and_then(|b| {
            let fallback = b
                .preferences
                .get(THEME_KEY)
                .as_deref()
                .and_then(ThemeChoice::parse)
                .unwrap_or_default();
            let doc = b.store.get_document(&b.paths.settings(&identity))?;
            Ok(doc.map_or_else(
                || AdminProfile {
                    theme: fallback,
                    ..AdminProfile::default()
                },
                |doc| AdminProfile::from_document(&doc, fallback),
            ))
        });

        Self::handle_db_result(Operation::LoadProfile, result, |profile| {
            WorkerResponse::ProfileLoaded { identity, profile }
        })
    }

    /// Handles the `SaveProfile` message. Also remembers the theme locally.
    fn handle_save_profile(&mut self, identity: &Identity, profile: &AdminProfile) -> WorkerResponse {
        let result = self.backends().and_then(|b| {
            b.store
                .upsert_merge(&b.paths.settings(identity), profile.to_document())?;
            if let Err(e) = b.preferences.set(THEME_KEY, profile.theme.as_str()) {
                tracing::warn!(error = %e, "failed to remember theme locally");
            }
            Ok(())
        });

        Self::handle_db_result(Operation::SaveProfile, result, |()| WorkerResponse::ProfileSaved)
    }

    fn handle_append_log(&mut self, record: &LogRecord) -> WorkerResponse {
        let result = self
            .backends()
            .and_then(|b| b.store.append(&b.paths.logs(), record.to_document()));

        Self::handle_db_result(Operation::AppendLog, result, |id| {
            tracing::debug!(document_id = %id, kind = %record.kind, "log record appended");
            WorkerResponse::LogAppended
        })
    }

    fn handle_seed_stats(&mut self, fields: Document) -> WorkerResponse {
        let result = self
            .backends()
            .and_then(|b| b.store.upsert_merge(&b.paths.stats(), fields));

        Self::handle_db_result(Operation::SeedStats, result, |()| WorkerResponse::StatsSeeded)
    }

    /// Opens the subscription for `topic`, replacing any existing one.
    fn handle_subscribe(&mut self, topic: Topic, limit: usize) -> Option<WorkerResponse> {
        let result = self.backends().and_then(|b| {
            let opened = match topic {
                Topic::Logs => b.store.subscribe_collection(&b.paths.logs(), limit),
                Topic::Stats => b.store.subscribe_document(&b.paths.stats()),
            };
            opened.map_err(|e| ModPanelError::Subscription(e.to_string()))
        });

        match result {
            Ok(id) => {
                if let Some(previous) = self.topics.insert(topic, id) {
                    if let Ok(b) = self.backends() {
                        b.store.unsubscribe(previous);
                    }
                }
                tracing::debug!(%topic, subscription = id, "subscribed");
                None
            }
            Err(e) => {
                tracing::warn!(%topic, error = %e, "subscribe failed");
                Some(WorkerResponse::SubscriptionFailed {
                    topic,
                    message: e.to_string(),
                })
            }
        }
    }

    fn handle_unsubscribe(&mut self, topic: Topic) {
        if let Some(id) = self.topics.remove(&topic) {
            if let Ok(b) = self.backends() {
                b.store.unsubscribe(id);
            }
            tracing::debug!(%topic, "unsubscribed");
        }
    }

    fn handle_poll(&mut self) {
        if let Ok(b) = self.backends() {
            match b.store.refresh() {
                Ok(true) => tracing::debug!("store changed since last poll"),
                Ok(false) => {}
                Err(e) => tracing::debug!(error = %e, "poll could not read store"),
            }
        }
    }

    /// Converts queued store notifications into responses.
    fn drain_deliveries(&mut self) -> Vec<WorkerResponse> {
        let Some(backends) = self.backends.as_mut() else {
            return vec![];
        };

        backends
            .store
            .drain_notifications()
            .into_iter()
            .filter_map(|note| {
                let topic = self
                    .topics
                    .iter()
                    .find_map(|(topic, id)| (*id == note.subscription).then_some(*topic))?;

                Some(match (topic, note.change) {
                    (_, Change::Failed(message)) => WorkerResponse::SubscriptionFailed { topic, message },
                    (Topic::Logs, Change::Collection(documents)) => {
                        WorkerResponse::LogsChanged { documents }
                    }
                    (Topic::Stats, Change::Document(document)) => {
                        WorkerResponse::StatsChanged { document }
                    }
                    (topic, change) => {
                        tracing::debug!(%topic, ?change, "delivery does not match topic");
                        return None;
                    }
                })
            })
            .collect()
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns every response it produced.
    ///
    /// The operation's own result comes first, followed by subscription
    /// deliveries the operation caused.
    pub fn handle_message(&mut self, message: WorkerMessage) -> Vec<WorkerResponse> {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        let mut responses = match message {
            WorkerMessage::Init { app_id, store_file, .. } => {
                vec![self.handle_init(&app_id, store_file.as_deref())]
            }
            WorkerMessage::SignIn { token, .. } => self.handle_sign_in(token.as_deref()),
            WorkerMessage::SignOut { .. } => self.handle_sign_out(),
            WorkerMessage::LoadProfile { identity, .. } => vec![self.handle_load_profile(identity)],
            WorkerMessage::SaveProfile { identity, profile, .. } => {
                vec![self.handle_save_profile(&identity, &profile)]
            }
            WorkerMessage::AppendLog { record, .. } => vec![self.handle_append_log(&record)],
            WorkerMessage::SeedStats { fields, .. } => vec![self.handle_seed_stats(fields)],
            WorkerMessage::SubscribeLogs { limit, .. } => {
                self.handle_subscribe(Topic::Logs, limit).into_iter().collect()
            }
            WorkerMessage::SubscribeStats { .. } => {
                self.handle_subscribe(Topic::Stats, 1).into_iter().collect()
            }
            WorkerMessage::Unsubscribe { topic, .. } => {
                self.handle_unsubscribe(topic);
                vec![]
            }
            WorkerMessage::Poll { .. } => {
                self.handle_poll();
                vec![]
            }
        };

        responses.extend(self.drain_deliveries());
        responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LogKind;
    use tempfile::TempDir;

    fn ready(dir: &TempDir) -> PanelWorker {
        let mut worker = PanelWorker::new(dir.path().to_path_buf());
        let responses = worker.handle_message(WorkerMessage::init("test".into(), None));
        assert_eq!(responses, vec![WorkerResponse::Initialized { theme: None }]);
        worker
    }

    #[test]
    fn messages_before_init_fail() {
        let dir = TempDir::new().unwrap();
        let mut worker = PanelWorker::new(dir.path().to_path_buf());
        let responses = worker.handle_message(WorkerMessage::poll());
        assert!(responses.is_empty());

        let record = LogRecord::new("uid", "Steve", "hello", LogKind::Info);
        let responses = worker.handle_message(WorkerMessage::append_log(record));
        assert!(matches!(
            responses.as_slice(),
            [WorkerResponse::Error { operation: Operation::AppendLog, .. }]
        ));
    }

    #[test]
    fn subscribe_delivers_initial_state() {
        let dir = TempDir::new().unwrap();
        let mut worker = ready(&dir);

        let responses = worker.handle_message(WorkerMessage::subscribe_stats());
        assert_eq!(responses, vec![WorkerResponse::StatsChanged { document: None }]);

        let responses = worker.handle_message(WorkerMessage::subscribe_logs(50));
        assert_eq!(responses, vec![WorkerResponse::LogsChanged { documents: vec![] }]);
    }

    #[test]
    fn append_is_followed_by_log_delivery() {
        let dir = TempDir::new().unwrap();
        let mut worker = ready(&dir);
        worker.handle_message(WorkerMessage::subscribe_logs(50));

        let record = LogRecord::new("uid", "Steve", "hello", LogKind::Info);
        let responses = worker.handle_message(WorkerMessage::append_log(record));

        assert_eq!(responses[0], WorkerResponse::LogAppended);
        let WorkerResponse::LogsChanged { documents } = &responses[1] else {
            panic!("expected delivery, got {responses:?}");
        };
        let stored = LogRecord::from_document(&documents[0]);
        assert_eq!(stored.action, "hello");
        assert!(stored.timestamp.is_some());
    }

    #[test]
    fn unsubscribed_topic_stops_delivering() {
        let dir = TempDir::new().unwrap();
        let mut worker = ready(&dir);
        worker.handle_message(WorkerMessage::subscribe_logs(50));
        worker.handle_message(WorkerMessage::unsubscribe(Topic::Logs));

        let record = LogRecord::new("uid", "Steve", "hello", LogKind::Info);
        let responses = worker.handle_message(WorkerMessage::append_log(record));
        assert_eq!(responses, vec![WorkerResponse::LogAppended]);
    }

    #[test]
    fn profile_round_trips_through_store_and_preferences() {
        let dir = TempDir::new().unwrap();
        let mut worker = ready(&dir);

        let responses = worker.handle_message(WorkerMessage::sign_in(None));
        let [WorkerResponse::IdentityChanged { identity: Some(identity) }] = responses.as_slice() else {
            panic!("expected identity, got {responses:?}");
        };

        let profile = AdminProfile {
            display_name: "Steve".into(),
            theme: ThemeChoice::Light,
        };
        worker.handle_message(WorkerMessage::save_profile(identity.clone(), profile.clone()));

        let responses = worker.handle_message(WorkerMessage::load_profile(identity.clone()));
        assert_eq!(
            responses,
            vec![WorkerResponse::ProfileLoaded {
                identity: identity.clone(),
                profile,
            }]
        );

        let mut restarted = PanelWorker::new(dir.path().to_path_buf());
        let responses = restarted.handle_message(WorkerMessage::init("test".into(), None));
        assert_eq!(
            responses,
            vec![WorkerResponse::Initialized {
                theme: Some(ThemeChoice::Light)
            }]
        );
    }

    #[test]
    fn empty_token_reports_identity_failure() {
        let dir = TempDir::new().unwrap();
        let mut worker = ready(&dir);
        let responses = worker.handle_message(WorkerMessage::sign_in(Some("  ".into())));
        assert!(matches!(
            responses.as_slice(),
            [WorkerResponse::IdentityFailed { .. }]
        ));
    }
}
