use std::fmt::Debug;
use std::sync::Arc;

use bds_common::SearchStep;

/// Trait for reporting how much of the search the generated steps already cover.
/// All methods should be thread-safe.
pub trait SearchProgress: Send + Sync + Debug {
    /// Sets the total number of posts matching the search.
    fn set_total(&self, total: u64);
    /// Signals that a new step was found, holding `posts` posts.
    fn step_found(&self, step: SearchStep, posts: u64);
    /// Signals that the search is over.
    fn done(&self, steps: usize);
}

/// A no-operation implementation of `SearchProgress`.
/// Used as a default when no actual progress reporting is needed by the library consumer.
#[derive(Debug, Clone)]
pub struct NoOpSearchProgress;

impl SearchProgress for NoOpSearchProgress {
    fn set_total(&self, _total: u64) {}
    fn step_found(&self, _step: SearchStep, _posts: u64) {}
    fn done(&self, _steps: usize) {}
}

/// Convenience type alias for a shared, thread-safe progress listener.
pub type SharedSearchProgress = Arc<dyn SearchProgress>;

/// Returns a shared instance of a `NoOpSearchProgress`.
pub fn no_op_search_progress() -> SharedSearchProgress {
    Arc::new(NoOpSearchProgress)
}
