//! Binary search for the end of one id range.
//!
//! Both `start_id` and the returned end are inclusive: the range `[start_id, end]` is what the
//! next search step will cover.
use bds_common::{IdRange, Query};
use bds_extractors::extractor::PostCountApi;
use log::debug;

use crate::error::DeepSearchError;

/// End of a range together with the amount of posts it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeEnd {
    pub end_id: u64,
    pub count: u64,
}

/// Finds the largest `end_id` in `[start_id, max_id]` such that at most `limit` posts matching
/// `query` have an id in `[start_id, end_id]`.
///
/// Returns `max_id` when the whole range fits. Takes `O(log(max_id - start_id))` count requests.
pub async fn find_range_end<A>(
    api: &A,
    query: &Query,
    start_id: u64,
    max_id: u64,
    limit: u64,
) -> Result<u64, DeepSearchError>
where
    A: PostCountApi + ?Sized,
{
    find_range_end_counted(api, query, start_id, max_id, limit)
        .await
        .map(|end| end.end_id)
}

pub(crate) async fn find_range_end_counted<A>(
    api: &A,
    query: &Query,
    start_id: u64,
    max_id: u64,
    limit: u64,
) -> Result<RangeEnd, DeepSearchError>
where
    A: PostCountApi + ?Sized,
{
    if limit == 0 {
        return Err(DeepSearchError::InvalidOptions {
            reason: String::from("limit should be greater than 0"),
        });
    }

    if start_id > max_id {
        return Err(DeepSearchError::InvalidOptions {
            reason: format!("range start {start_id} is above its end {max_id}"),
        });
    }

    let mut low = start_id;
    let mut high = max_id;
    let mut best: Option<RangeEnd> = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        let count = api.count(query, IdRange::new(start_id, mid)).await?;
        debug!("Binary search iteration: low = {low}, high = {high}, mid = {mid}, count = {count}");

        if count <= limit {
            best = Some(RangeEnd { end_id: mid, count });
            match mid.checked_add(1) {
                Some(next) => low = next,
                None => break,
            }
        } else {
            match mid.checked_sub(1) {
                Some(prev) => high = prev,
                None => break,
            }
        }
    }

    best.ok_or(DeepSearchError::InconsistentCount { start_id, limit })
}
