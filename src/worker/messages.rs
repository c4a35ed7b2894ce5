//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker thread that owns the store, the identity
//! provider and the local preferences. It also implements distributed tracing
//! context propagation across thread boundaries.

use crate::domain::{AdminProfile, Document, Identity, LogRecord, ThemeChoice};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when tracing has not been initialised.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }
}

/// Live subscriptions the plugin can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Topic {
    /// The moderation log collection.
    Logs,
    /// The shared stats document.
    Stats,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logs => "logs",
            Self::Stats => "stats",
        })
    }
}

/// Store operations that report failures through [`WorkerResponse::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    OpenStore,
    LoadProfile,
    SaveProfile,
    AppendLog,
    SeedStats,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenStore => "open store",
            Self::LoadProfile => "load profile",
            Self::SaveProfile => "save profile",
            Self::AppendLog => "append log",
            Self::SeedStats => "seed stats",
        })
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    init(Init { app_id: String, store_file: Option<String> }),
    sign_in(SignIn { token: Option<String> }),
    sign_out(SignOut {}),
    load_profile(LoadProfile { identity: Identity }),
    save_profile(SaveProfile { identity: Identity, profile: AdminProfile }),
    append_log(AppendLog { record: LogRecord }),
    seed_stats(SeedStats { fields: Document }),
    subscribe_logs(SubscribeLogs { limit: usize }),
    subscribe_stats(SubscribeStats {}),
    unsubscribe(Unsubscribe { topic: Topic }),
    poll(Poll {}),
}

/// Messages sent from the main thread to the worker thread.
///
/// All variants include an optional trace context for distributed tracing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Open the store, preferences and identity provider.
    Init {
        /// Namespace for all store paths.
        app_id: String,

        /// Store file override; defaults to `store.json` in the data dir.
        store_file: Option<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Sign in with a custom token, or anonymously.
    SignIn {
        token: Option<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Sign out of the identity provider.
    SignOut {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read the settings document of an identity.
    LoadProfile {
        identity: Identity,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Merge a profile into the identity's settings document.
    SaveProfile {
        identity: Identity,
        profile: AdminProfile,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Append a record to the moderation log.
    AppendLog {
        record: LogRecord,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Merge default fields into the stats document.
    SeedStats {
        fields: Document,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Subscribe to the newest `limit` log records.
    SubscribeLogs {
        limit: usize,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Subscribe to the stats document.
    SubscribeStats {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Drop a live subscription.
    Unsubscribe {
        topic: Topic,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Pick up writes from other plugin instances.
    Poll {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context carried by any variant.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Init { trace_context, .. }
            | Self::SignIn { trace_context, .. }
            | Self::SignOut { trace_context }
            | Self::LoadProfile { trace_context, .. }
            | Self::SaveProfile { trace_context, .. }
            | Self::AppendLog { trace_context, .. }
            | Self::SeedStats { trace_context, .. }
            | Self::SubscribeLogs { trace_context, .. }
            | Self::SubscribeStats { trace_context }
            | Self::Unsubscribe { trace_context, .. }
            | Self::Poll { trace_context } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
///
/// One message may produce several responses: the result of the operation
/// followed by any subscription deliveries it caused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The worker is ready. Carries the locally remembered theme, if any.
    Initialized { theme: Option<ThemeChoice> },

    /// The identity provider reported a change; `None` means signed out.
    IdentityChanged { identity: Option<Identity> },

    /// Sign-in failed.
    IdentityFailed { message: String },

    /// The settings document of `identity`, decoded with defaults.
    ProfileLoaded {
        identity: Identity,
        profile: AdminProfile,
    },

    /// A profile was merged into its settings document.
    ProfileSaved,

    /// A record was appended to the log.
    LogAppended,

    /// The stats seed was merged.
    StatsSeeded,

    /// New window of the log subscription, in store order.
    LogsChanged { documents: Vec<Document> },

    /// New state of the stats subscription; `None` while absent.
    StatsChanged { document: Option<Document> },

    /// A subscription could not be opened or stopped delivering.
    SubscriptionFailed { topic: Topic, message: String },

    /// A store operation failed.
    Error {
        /// The operation that failed.
        operation: Operation,
        /// Human-readable error message.
        message: String,
    },
}
