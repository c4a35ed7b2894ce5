//! Subscriber setup: `tracing` → OpenTelemetry → trace file.

use super::tracer;
use super::{SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber writing to `<data>/modpanel-otlp.json`.
///
/// The filter comes from `config.trace_level` (default `info`). Tracing is
/// best effort: if the data directory cannot be created, or a subscriber
/// is already installed, this does nothing.
///
/// ```rust
/// use modpanel::observability::init_tracing;
/// use modpanel::Config;
///
/// init_tracing(&Config::default());
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    init_tracing_in(&crate::infrastructure::paths::get_data_dir(), level);
}

/// Same as [`init_tracing`] with an explicit directory and filter directive.
pub fn init_tracing_in(data_dir: &Path, level: &str) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
