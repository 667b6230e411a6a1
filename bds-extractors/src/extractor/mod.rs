//! The interface every booru adapter exposes to the id range partitioner.
//!
//! An adapter only has to answer a few questions about a search: how many posts match it inside
//! an id range, and which are the lowest and highest matching post ids. Everything else (paging,
//! post mapping, downloading) is out of its scope.
#![deny(clippy::nursery)]
use bds_common::{ApiKind, IdRange, Query};
use std::future::Future;

use crate::error::ExtractorError;

/// Count oracle over a booru's search API.
pub trait PostCountApi {
    /// Counts the posts matching `query` whose id falls inside `range` (inclusive on both ends).
    fn count(
        &self,
        query: &Query,
        range: IdRange,
    ) -> impl Future<Output = Result<u64, ExtractorError>> + Send;

    /// Returns the highest post id matching `query`, or `None` if nothing matches.
    fn max_matching_id(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Option<u64>, ExtractorError>> + Send;

    /// Returns the lowest post id matching `query`, or `None` if nothing matches.
    fn min_matching_id(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<Option<u64>, ExtractorError>> + Send;

    /// Rejects searches using tags the adapter reserves for its own requests.
    fn check_query(&self, _query: &Query) -> Result<(), ExtractorError> {
        Ok(())
    }

    /// The API family, used to write id bounds in its syntax.
    fn kind(&self) -> ApiKind;
}
