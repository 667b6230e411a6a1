//! In-memory booru for exercising the partitioner without a network.
use std::sync::atomic::{AtomicUsize, Ordering};

use bds_common::{ApiKind, IdRange, Query};
use bds_extractors::{error::ExtractorError, extractor::PostCountApi};

/// Holds the ids of every post matching any query. Tags are ignored.
#[derive(Debug, Default)]
pub(crate) struct MemoryBooru {
    ids: Vec<u64>,
    count_calls: AtomicUsize,
    fail_on_count: Option<usize>,
}

impl MemoryBooru {
    pub(crate) fn new<I: IntoIterator<Item = u64>>(ids: I) -> Self {
        let mut ids: Vec<u64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        Self {
            ids,
            ..Default::default()
        }
    }

    /// Makes the `nth` count request (starting at 1) fail.
    pub(crate) fn fail_on_count(mut self, nth: usize) -> Self {
        self.fail_on_count = Some(nth);
        self
    }

    pub(crate) fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    /// Posts with an id inside `[low, high]`, straight from the stored ids.
    pub(crate) fn posts_between(&self, low: u64, high: u64) -> u64 {
        self.count_in(IdRange::new(low, high))
    }

    fn count_in(&self, range: IdRange) -> u64 {
        let start = range
            .low
            .map_or(0, |low| self.ids.partition_point(|id| *id < low));
        let end = range
            .high
            .map_or(self.ids.len(), |high| self.ids.partition_point(|id| *id <= high));
        end.saturating_sub(start) as u64
    }
}

impl PostCountApi for MemoryBooru {
    async fn count(&self, _query: &Query, range: IdRange) -> Result<u64, ExtractorError> {
        let call = self.count_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_count == Some(call) {
            return Err(ExtractorError::ServerRejected {
                reason: String::from("connection reset by peer"),
            });
        }
        Ok(self.count_in(range))
    }

    async fn max_matching_id(&self, _query: &Query) -> Result<Option<u64>, ExtractorError> {
        Ok(self.ids.last().copied())
    }

    async fn min_matching_id(&self, _query: &Query) -> Result<Option<u64>, ExtractorError> {
        Ok(self.ids.first().copied())
    }

    fn kind(&self) -> ApiKind {
        ApiKind::Gelbooru
    }
}
