//! Subscriber setup.

use super::exporter::create_tracer_provider;
use super::sink::{SharedSink, SinkWriter};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::{Arc, OnceLock};
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "blogfront";

static PROVIDER: OnceLock<TracerProvider> = OnceLock::new();

/// Builds the full pipeline without installing it.
///
/// Log events go through a plain-text `fmt` layer and spans through the JSON
/// exporter; both write to `sink`. The provider must outlive the subscriber.
pub fn build_subscriber(
    level: &str,
    sink: SharedSink,
) -> (impl Subscriber + Send + Sync + 'static, TracerProvider) {
    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = create_tracer_provider(Arc::clone(&sink), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_writer(SinkWriter::new(sink));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(fmt_layer)
        .with(otel_layer);

    (subscriber, provider)
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// The level comes from `config.trace_level`, defaulting to `"info"`, and uses
/// `EnvFilter` directive syntax (`"debug"`, `"blogfront::fetch=trace"`).
///
/// ```rust
/// use blogfront::observability::{init_tracing, StderrSink};
/// use blogfront::Config;
/// use std::sync::Arc;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config, Arc::new(StderrSink));
/// init_tracing(&config, Arc::new(StderrSink));
/// ```
pub fn init_tracing(config: &Config, sink: SharedSink) {
    if PROVIDER.get().is_some() {
        return;
    }
    let level = config.trace_level.as_deref().unwrap_or("info");

    let (subscriber, provider) = build_subscriber(level, sink);
    if subscriber.try_init().is_ok() {
        let _ = PROVIDER.set(provider);
    }
}
