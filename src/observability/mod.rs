//! Logging and tracing.
//!
//! ```text
//! tracing macros ─┬─ fmt layer ───────────────┐
//!                 └─ tracing-opentelemetry ── JsonLineExporter ─┴─ LineSink
//! ```
//!
//! In the browser the sink is the developer console; natively it is stderr.
//! The level comes from [`Config::trace_level`](crate::Config::trace_level),
//! default `"info"`.
//!
//! - [`init`]: subscriber construction and installation
//! - [`exporter`]: span export as JSON lines
//! - [`sink`]: output destinations

pub mod exporter;
pub mod init;
pub mod sink;

pub use init::{build_subscriber, init_tracing};
#[cfg(target_arch = "wasm32")]
pub use sink::ConsoleSink;
pub use sink::{LineSink, MemorySink, SharedSink, StderrSink};
