use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bds_common::{ApiKind, IdRange, Query};
use bds_extractors::{error::ExtractorError, extractor::PostCountApi};
use tokio::time::Instant;

/// How many requests a deep search sent and how long they took altogether.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub requests: u64,
    pub elapsed: Duration,
}

impl RequestStats {
    /// Mean time per request, zero when nothing was sent.
    pub fn average(&self) -> Duration {
        if self.requests == 0 {
            return Duration::ZERO;
        }
        self.elapsed.div_f64(self.requests as f64)
    }
}

/// Wraps an adapter and times every request going through it.
pub(crate) struct RecordingApi<'a, A> {
    api: &'a A,
    requests: AtomicU64,
    elapsed_nanos: AtomicU64,
}

impl<'a, A> RecordingApi<'a, A> {
    pub(crate) const fn new(api: &'a A) -> Self {
        Self {
            api,
            requests: AtomicU64::new(0),
            elapsed_nanos: AtomicU64::new(0),
        }
    }

    pub(crate) fn stats(&self) -> RequestStats {
        RequestStats {
            requests: self.requests.load(Ordering::Relaxed),
            elapsed: Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed)),
        }
    }

    fn record(&self, start: Instant) {
        let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        self.elapsed_nanos.fetch_add(nanos, Ordering::Relaxed);
        log::debug!("Request #{request} completed in {:.3}s", nanos as f64 / 1e9);
    }
}

impl<A> PostCountApi for RecordingApi<'_, A>
where
    A: PostCountApi + Sync,
{
    async fn count(&self, query: &Query, range: IdRange) -> Result<u64, ExtractorError> {
        let start = Instant::now();
        let result = self.api.count(query, range).await;
        self.record(start);
        result
    }

    async fn max_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        let start = Instant::now();
        let result = self.api.max_matching_id(query).await;
        self.record(start);
        result
    }

    async fn min_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        let start = Instant::now();
        let result = self.api.min_matching_id(query).await;
        self.record(start);
        result
    }

    fn check_query(&self, query: &Query) -> Result<(), ExtractorError> {
        self.api.check_query(query)
    }

    fn kind(&self) -> ApiKind {
        self.api.kind()
    }
}
