//! Network side of the list controller.
//!
//! Replaces ambient `fetch`/`setTimeout` with two ports, [`DataSource`] and
//! [`Sleeper`], and builds the cache-first retrying loader on top of them.
//!
//! - `source`: [`DataSource`] port and response validation
//! - `retry`: [`fetch_with_retry`], [`load_records`] and the [`RetryPolicy`]

pub mod retry;
pub mod source;

pub use retry::{fetch_with_retry, load_records, LoadOutcome, LoadRequest, NoDelay, Origin, RetryPolicy, Sleeper};
pub use source::{DataSource, HttpResponse};
