//! Background worker for store, identity and preference I/O.
//!
//! All I/O runs on Zellij's worker thread so the plugin's render loop never
//! blocks on the filesystem. Messages cross the thread boundary as JSON and
//! carry trace context so worker spans link to the plugin span that caused
//! them.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::PanelWorker;
pub use messages::{Operation, TraceContext, Topic, WorkerMessage, WorkerResponse};

/// Name the worker is registered under, and the message name used for
/// plugin ↔ worker traffic.
pub const WORKER_NAME: &str = "modpanel";
