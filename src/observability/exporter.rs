//! OpenTelemetry span exporter writing compact JSON lines.

use super::sink::SharedSink;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use serde_json::{json, Map, Value as JsonValue};
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each finished span to a [`LineSink`](super::LineSink) as one JSON
/// object.
///
/// ```json
/// {"service":"blogfront","name":"load_records","traceId":"…","spanId":"…",
///  "parentSpanId":"","durationMs":12.5,"attributes":{"url":"/api/blogs"},
///  "status":"unset"}
/// ```
pub struct JsonLineExporter {
    sink: SharedSink,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLineExporter {
    pub fn new(sink: SharedSink, resource: &Resource) -> Self {
        Self {
            sink,
            service: service_name(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn format_span(&self, span: &SpanData) -> JsonValue {
        let duration_ms = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0);

        let parent = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        let mut out = json!({
            "service": self.service,
            "name": span.name,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "durationMs": duration_ms,
            "attributes": format_attributes(&span.attributes),
            "status": status_label(&span.status),
        });
        if let Status::Error { description } = &span.status {
            out["error"] = JsonValue::from(description.to_string());
        }
        out
    }
}

fn service_name(resource: &Resource) -> String {
    resource
        .iter()
        .find(|(key, _)| key.as_str() == "service.name")
        .map_or_else(|| "blogfront".to_string(), |(_, value)| value.to_string())
}

fn format_attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), format_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn format_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::from(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::from(s.as_str()),
        Value::Array(_) => JsonValue::from(value.to_string()),
    }
}

const fn status_label(status: &Status) -> &'static str {
    match status {
        Status::Unset => "unset",
        Status::Ok => "ok",
        Status::Error { .. } => "error",
    }
}

impl SpanExporter for JsonLineExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        for span in &batch {
            self.sink.write_line(&self.format_span(span).to_string());
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.service = service_name(resource);
    }
}

impl std::fmt::Debug for JsonLineExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLineExporter")
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Tracer provider exporting every span as soon as it ends.
pub fn create_tracer_provider(sink: SharedSink, resource: Resource) -> TracerProvider {
    let exporter = JsonLineExporter::new(sink, &resource);

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
