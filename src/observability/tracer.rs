//! Tracer provider that exports finished spans to the trace file.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes each exported batch as one OTLP JSON line.
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: bool,
}

impl FileSpanExporter {
    const fn new(writer: FileWriter, resource: Resource) -> Self {
        Self {
            writer,
            formatter: SpanFormatter::new(resource),
            is_shutdown: false,
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown {
            return Err(TraceError::from("trace file exporter is shut down"));
        }
        if batch.is_empty() {
            return Ok(());
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(format!("writing trace file: {e}")))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter = SpanFormatter::new(resource.clone());
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Provider that exports every span synchronously as it ends.
///
/// The plugin has no async runtime, so the simple (non-batching) processor
/// is the only one that works inside the sandbox.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(FileWriter::new(file_path), resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span, Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;
    use tempfile::TempDir;

    #[test]
    fn ended_spans_land_in_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("modpanel-otlp.json");
        let provider = create_tracer_provider(
            path.clone(),
            Resource::new(vec![KeyValue::new("service.name", "ModPanel")]),
        );

        let mut span = provider.tracer("test").start("append_log");
        span.set_attribute(KeyValue::new("kind", "warn"));
        span.end();

        let contents = std::fs::read_to_string(path).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let exported = &line["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(exported["name"], "append_log");
        assert_eq!(exported["attributes"][0]["key"], "kind");
    }

    #[test]
    fn shut_down_exporter_rejects_batches() {
        let dir = TempDir::new().unwrap();
        let mut exporter = FileSpanExporter::new(
            FileWriter::new(dir.path().join("trace.json")),
            Resource::empty(),
        );
        exporter.shutdown();
        assert!(exporter.write_batch(&[]).is_err());
    }
}
