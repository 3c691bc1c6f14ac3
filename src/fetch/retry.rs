//! Cache-first loading with a fixed-delay retry loop.
//!
//! [`load_records`] is the whole data path of the list controller: cache read,
//! network fetch with retries, cache write. It holds no controller state, so in
//! the browser it can be awaited without keeping the controller borrowed.

use crate::domain::error::Result;
use crate::domain::Record;
use crate::fetch::source::DataSource;
use crate::storage::{KeyValueStore, RecordCache};
use futures_util::future::LocalBoxFuture;
use tracing::Instrument;

/// Port for waiting between attempts.
pub trait Sleeper {
    /// Resolves after roughly `ms` milliseconds.
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        (**self).sleep(ms)
    }
}

/// A [`Sleeper`] that resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Sleeper for NoDelay {
    fn sleep(&self, _ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(std::future::ready(()))
    }
}

/// Retry budget and spacing for the network fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `2` means three attempts in total.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_ms: 500,
        }
    }
}

/// Where a successful load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

/// Result of a successful [`load_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub origin: Origin,
    /// Number of network attempts made (0 on a cache hit).
    pub attempts: u32,
}

/// Everything needed to run one load, detached from the controller that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub url: String,
    pub cache_key: String,
    pub policy: RetryPolicy,
}

impl LoadRequest {
    /// Runs [`load_records`] against `store` under this request's cache key.
    ///
    /// # Errors
    ///
    /// Returns the final fetch error when every attempt failed.
    pub async fn run<S, D, T>(&self, store: S, source: &D, sleeper: &T) -> Result<LoadOutcome>
    where
        S: KeyValueStore,
        D: DataSource + ?Sized,
        T: Sleeper + ?Sized,
    {
        let cache = RecordCache::new(store, self.cache_key.as_str());
        load_records(&cache, source, sleeper, &self.url, self.policy)
            .instrument(tracing::info_span!("load_records", url = %self.url))
            .await
    }
}

/// Fetches `url` until it yields records or the retry budget runs out.
///
/// Each attempt must produce a 2xx response whose body is a JSON array of records.
/// Between failed attempts the loop sleeps for `policy.delay_ms`. There is no
/// cancellation: once started, the loop runs to completion.
///
/// # Errors
///
/// Returns the error of the final attempt once `policy.max_retries + 1` attempts
/// have failed.
pub async fn fetch_with_retry<D, T>(
    source: &D,
    sleeper: &T,
    url: &str,
    policy: RetryPolicy,
) -> Result<(Vec<Record>, u32)>
where
    D: DataSource + ?Sized,
    T: Sleeper + ?Sized,
{
    let total = policy.max_retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let span = tracing::debug_span!("fetch_attempt", attempt, total);

        match fetch_once(source, url).instrument(span).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), attempt, "records fetched");
                return Ok((records, attempt));
            }
            Err(e) if attempt >= total => {
                tracing::error!(error = %e, attempts = attempt, "giving up on fetch");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(error = %e, attempt, delay_ms = policy.delay_ms, "fetch attempt failed, retrying");
                sleeper.sleep(policy.delay_ms).await;
            }
        }
    }
}

async fn fetch_once<D>(source: &D, url: &str) -> Result<Vec<Record>>
where
    D: DataSource + ?Sized,
{
    let response = source.fetch(url).await?;
    tracing::debug!(status = response.status, bytes = response.body.len(), "response received");
    response.into_records()
}

/// Loads the record collection, cache first.
///
/// 1. A cache entry that decodes to an array of records is returned as-is and the
///    network is not touched.
/// 2. Otherwise the endpoint is fetched with [`fetch_with_retry`].
/// 3. A fetched collection overwrites the cache. A rejected cache write is logged
///    and does not fail the load.
///
/// # Errors
///
/// Returns the final fetch error when every attempt failed.
pub async fn load_records<S, D, T>(
    cache: &RecordCache<S>,
    source: &D,
    sleeper: &T,
    url: &str,
    policy: RetryPolicy,
) -> Result<LoadOutcome>
where
    S: KeyValueStore,
    D: DataSource + ?Sized,
    T: Sleeper + ?Sized,
{
    if let Some(records) = cache.read() {
        return Ok(LoadOutcome {
            records,
            origin: Origin::Cache,
            attempts: 0,
        });
    }

    tracing::debug!(url = %url, "cache miss, fetching");
    let (records, attempts) = fetch_with_retry(source, sleeper, url, policy).await?;

    if let Err(e) = cache.write(&records) {
        tracing::warn!(error = %e, "failed to cache fetched records");
    }

    Ok(LoadOutcome {
        records,
        origin: Origin::Network,
        attempts,
    })
}
