//! OpenTelemetry tracing exported to a local file.
//!
//! The plugin sandbox has no network, so spans are written as OTLP JSON
//! lines to `~/.local/share/zellij/modpanel/modpanel-otlp.json` instead of
//! being shipped to a collector:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → FileSpanExporter → rotating file
//! ```
//!
//! The plugin thread and the worker thread both install the subscriber and
//! write to the same file. Worker spans join the plugin's trace through the
//! [`TraceContext`](crate::worker::TraceContext) carried by every worker
//! message. The file rotates at 10 MiB and keeps three backups.
//!
//! - `init`: subscriber setup
//! - `tracer`: provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, init_tracing_in};

/// `service.name` resource attribute and tracer name.
pub const SERVICE_NAME: &str = "ModPanel";

/// Trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "modpanel-otlp.json";
