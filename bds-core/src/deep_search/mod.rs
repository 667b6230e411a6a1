//! Splits a search into consecutive id ranges holding at most `limit` posts each.
//!
//! The search runs as a loop over a cursor: count what is left between the cursor and the
//! highest matching id, stop if it fits under the limit, otherwise binary search the end of the
//! next full range and move the cursor past it.
use bds_common::{IdRange, Query, SearchStep};
use bds_extractors::extractor::PostCountApi;
use log::{debug, info, warn};

use crate::error::DeepSearchError;
use crate::progress::{no_op_search_progress, SharedSearchProgress};

pub use self::range_finder::find_range_end;
pub use self::stats::RequestStats;
use self::range_finder::find_range_end_counted;
use self::stats::RecordingApi;

mod range_finder;
mod stats;
#[cfg(test)]
mod testing;

/// Default amount of posts a single search can page through on Gelbooru.
pub const DEFAULT_LIMIT: u64 = 20_000;

/// Highest post id considered by default.
pub const DEFAULT_MAX_ID: u64 = i32::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeepSearchOptions {
    /// Maximum amount of posts a single step may hold.
    pub limit: u64,
    /// Lowest post id a step may start at.
    pub min_id: u64,
    /// Highest post id a step may end at.
    pub max_id: u64,
}

impl Default for DeepSearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_id: 0,
            max_id: DEFAULT_MAX_ID,
        }
    }
}

impl DeepSearchOptions {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), DeepSearchError> {
        if self.limit == 0 {
            return Err(DeepSearchError::InvalidOptions {
                reason: String::from("limit should be greater than 0"),
            });
        }

        if self.min_id > self.max_id {
            return Err(DeepSearchError::InvalidOptions {
                reason: format!(
                    "min id ({}) is greater than max id ({})",
                    self.min_id, self.max_id
                ),
            });
        }

        Ok(())
    }
}

/// What a finished deep search found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepSearchReport {
    /// Consecutive, non-overlapping ranges in ascending id order.
    pub steps: Vec<SearchStep>,
    /// Posts matching the search between the first and last step bounds.
    pub total: u64,
    pub stats: RequestStats,
}

impl DeepSearchReport {
    fn empty(stats: RequestStats) -> Self {
        Self {
            steps: Vec::new(),
            total: 0,
            stats,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Drives one adapter through the whole id space of a search.
#[derive(Debug)]
pub struct DeepSearch<A> {
    api: A,
    options: DeepSearchOptions,
    progress: SharedSearchProgress,
}

impl<A> DeepSearch<A>
where
    A: PostCountApi + Sync,
{
    pub fn new(api: A, options: DeepSearchOptions) -> Self {
        Self {
            api,
            options,
            progress: no_op_search_progress(),
        }
    }

    /// Reports the total and every emitted step to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: SharedSearchProgress) -> Self {
        self.progress = progress;
        self
    }

    #[inline]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[inline]
    pub const fn options(&self) -> &DeepSearchOptions {
        &self.options
    }

    /// Runs the search. Any failed request aborts it and discards the steps found so far.
    ///
    /// The progress listener is closed whether the search succeeds or not.
    pub async fn run(&self, query: &Query) -> Result<DeepSearchReport, DeepSearchError> {
        let result = self.search(query).await;
        self.progress
            .done(result.as_ref().map_or(0, |report| report.steps.len()));
        result
    }

    async fn search(&self, query: &Query) -> Result<DeepSearchReport, DeepSearchError> {
        self.options.validate()?;
        self.api.check_query(query)?;

        let recorder = RecordingApi::new(&self.api);
        let result = self.partition(&recorder, query).await;
        let stats = recorder.stats();

        let report = match result? {
            Some((steps, total)) => DeepSearchReport {
                steps,
                total,
                stats,
            },
            None => DeepSearchReport::empty(stats),
        };

        info!(
            "Found {} steps for {} posts in {} requests",
            report.steps.len(),
            report.total,
            stats.requests
        );

        Ok(report)
    }

    async fn partition(
        &self,
        api: &RecordingApi<'_, A>,
        query: &Query,
    ) -> Result<Option<(Vec<SearchStep>, u64)>, DeepSearchError> {
        let DeepSearchOptions {
            limit,
            min_id,
            max_id,
        } = self.options;

        let Some(highest) = api.max_matching_id(query).await? else {
            debug!("No posts match {query}");
            return Ok(None);
        };

        let Some(lowest) = api.min_matching_id(query).await? else {
            debug!("No posts match {query}");
            return Ok(None);
        };

        if highest > max_id {
            warn!("Highest matching post id {highest} is above the max id {max_id}, newer posts will be left out");
        }

        let mut cursor = min_id.max(lowest);
        let ceiling = max_id.min(highest);
        debug!("Searching ids {cursor}..={ceiling}");

        if cursor > ceiling {
            return Ok(None);
        }

        let mut steps = Vec::new();
        let mut total = None;

        loop {
            let remaining = api.count(query, IdRange::new(cursor, ceiling)).await?;
            debug!("{remaining} posts left between {cursor} and {ceiling}");

            if total.is_none() {
                total = Some(remaining);
                self.progress.set_total(remaining);
            }

            if remaining == 0 {
                break;
            }

            if remaining <= limit {
                let step = SearchStep::new(cursor, ceiling);
                self.progress.step_found(step, remaining);
                steps.push(step);
                break;
            }

            let end = find_range_end_counted(api, query, cursor, ceiling, limit).await?;
            let step = SearchStep::new(cursor, end.end_id);
            debug!("Step {} covers {step} with {} posts", steps.len() + 1, end.count);
            self.progress.step_found(step, end.count);
            steps.push(step);

            match end.end_id.checked_add(1) {
                Some(next) if next <= ceiling => cursor = next,
                _ => break,
            }
        }

        Ok(Some((steps, total.unwrap_or_default())))
    }
}

/// Runs a deep search with `options` over `api` without progress reporting.
pub async fn deep_search<A>(
    api: A,
    query: &Query,
    options: DeepSearchOptions,
) -> Result<DeepSearchReport, DeepSearchError>
where
    A: PostCountApi + Sync,
{
    DeepSearch::new(api, options).run(query).await
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::testing::MemoryBooru;
    use super::*;
    use crate::progress::SearchProgress;

    fn assert_partition(booru: &MemoryBooru, report: &DeepSearchReport, limit: u64) {
        for pair in report.steps.windows(2) {
            assert!(pair[1].follows(&pair[0]), "{} then {}", pair[0], pair[1]);
        }

        let mut covered = 0;
        for step in &report.steps {
            assert!(step.low <= step.high, "{step}");
            let posts = booru.posts_between(step.low, step.high);
            assert!(posts <= limit, "{step} holds {posts} posts");
            covered += posts;
        }

        assert_eq!(covered, report.total);
    }

    #[tokio::test]
    async fn splits_at_exact_boundary() {
        let ids = (9_363_565..=9_383_564)
            .chain((9_383_565..10_999_773).step_by(100))
            .chain([10_999_773]);
        let booru = MemoryBooru::new(ids);
        let options = DeepSearchOptions::with_limit(20_000);

        let search = DeepSearch::new(booru, options);
        let report = search.run(&Query::from("1girl solo")).await.unwrap();

        assert_eq!(
            report.steps,
            vec![
                SearchStep::new(9_363_565, 9_383_564),
                SearchStep::new(9_383_565, 10_999_773),
            ]
        );
        assert_partition(search.api(), &report, 20_000);
    }

    #[tokio::test]
    async fn single_step_under_limit() {
        let booru = MemoryBooru::new([10, 20, 30, 40, 50]);
        let search = DeepSearch::new(booru, DeepSearchOptions::default());

        let report = search.run(&Query::from("1girl")).await.unwrap();

        assert_eq!(report.steps, vec![SearchStep::new(10, 50)]);
        assert_eq!(report.total, 5);
        assert_eq!(search.api().count_calls(), 1);
        // max id, min id and the single count
        assert_eq!(report.stats.requests, 3);
    }

    #[tokio::test]
    async fn one_post_per_step() {
        let booru = MemoryBooru::new([1, 2, 3]);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(1));

        let report = search.run(&Query::from("1girl")).await.unwrap();

        assert_eq!(
            report.steps,
            vec![
                SearchStep::new(1, 1),
                SearchStep::new(2, 2),
                SearchStep::new(3, 3),
            ]
        );
        assert_eq!(report.total, 3);
    }

    #[tokio::test]
    async fn no_matches() {
        let booru = MemoryBooru::new(std::iter::empty());
        let search = DeepSearch::new(booru, DeepSearchOptions::default());

        let report = search.run(&Query::from("nonexistent_tag")).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(report.total, 0);
        assert_eq!(search.api().count_calls(), 0);
    }

    #[tokio::test]
    async fn matches_outside_window() {
        let booru = MemoryBooru::new([1, 2, 3]);
        let options = DeepSearchOptions {
            limit: 10,
            min_id: 100,
            max_id: 200,
        };
        let search = DeepSearch::new(booru, options);

        let report = search.run(&Query::from("1girl")).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn clamps_to_id_window() {
        let booru = MemoryBooru::new(1..=100);
        let options = DeepSearchOptions {
            limit: 10,
            min_id: 25,
            max_id: 60,
        };
        let search = DeepSearch::new(booru, options);

        let report = search.run(&Query::from("1girl")).await.unwrap();

        assert_eq!(report.steps.first().unwrap().low, 25);
        assert_eq!(report.steps.last().unwrap().high, 60);
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.total, 36);
        assert_partition(search.api(), &report, 10);
    }

    #[tokio::test]
    async fn rejects_zero_limit() {
        let booru = MemoryBooru::new([1, 2, 3]);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(0));

        let result = search.run(&Query::from("1girl")).await;

        assert!(matches!(result, Err(DeepSearchError::InvalidOptions { .. })));
        assert_eq!(search.api().count_calls(), 0);
    }

    #[tokio::test]
    async fn rejects_reversed_window() {
        let booru = MemoryBooru::new([1, 2, 3]);
        let options = DeepSearchOptions {
            limit: 10,
            min_id: 50,
            max_id: 10,
        };
        let search = DeepSearch::new(booru, options);

        let result = search.run(&Query::from("1girl")).await;

        assert!(matches!(result, Err(DeepSearchError::InvalidOptions { .. })));
        assert_eq!(search.api().count_calls(), 0);
    }

    #[tokio::test]
    async fn failure_discards_steps() {
        let booru = MemoryBooru::new(1..=1000).fail_on_count(2);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(100));

        let result = search.run(&Query::from("1girl")).await;

        assert!(matches!(result, Err(DeepSearchError::Extractor { .. })));
    }

    #[tokio::test]
    async fn same_steps_every_run() {
        let booru = MemoryBooru::new((1..=5_000).map(|i| i * 7));
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(333));
        let query = Query::from("1girl");

        let first = search.run(&query).await.unwrap();
        let second = search.run(&query).await.unwrap();

        assert_eq!(first.steps, second.steps);
        assert_eq!(first.total, second.total);
    }

    #[tokio::test]
    async fn random_datasets() {
        let mut rng = StdRng::seed_from_u64(0x0b00_0000);

        for _ in 0..50 {
            let len = rng.gen_range(0..2_000);
            let ids: Vec<u64> = (0..len).map(|_| rng.gen_range(0..1_000_000)).collect();
            let limit = rng.gen_range(1..500);

            let booru = MemoryBooru::new(ids);
            let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(limit));
            let report = search.run(&Query::from("1girl")).await.unwrap();

            let total = search.api().posts_between(0, u64::MAX);
            assert_eq!(report.total, total);
            assert_partition(search.api(), &report, limit);

            if total > 0 {
                assert!(report.steps.len() as u64 >= total.div_ceil(limit));
                // Every step but the last is as long as possible.
                for step in &report.steps[..report.steps.len() - 1] {
                    assert!(search.api().posts_between(step.low, step.high + 1) > limit);
                }
            }
        }
    }

    #[derive(Debug, Default)]
    struct RecordedProgress {
        total: Mutex<Option<u64>>,
        steps: Mutex<Vec<(SearchStep, u64)>>,
        done: Mutex<Option<usize>>,
    }

    impl SearchProgress for RecordedProgress {
        fn set_total(&self, total: u64) {
            *self.total.lock().unwrap() = Some(total);
        }

        fn step_found(&self, step: SearchStep, posts: u64) {
            self.steps.lock().unwrap().push((step, posts));
        }

        fn done(&self, steps: usize) {
            *self.done.lock().unwrap() = Some(steps);
        }
    }

    #[tokio::test]
    async fn closes_progress_on_failure() {
        let progress = std::sync::Arc::new(RecordedProgress::default());
        let booru = MemoryBooru::new(1..=1000).fail_on_count(2);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(100))
            .with_progress(progress.clone());

        assert!(search.run(&Query::from("1girl")).await.is_err());

        assert_eq!(*progress.total.lock().unwrap(), Some(1000));
        assert!(progress.steps.lock().unwrap().is_empty());
        assert_eq!(*progress.done.lock().unwrap(), Some(0));
    }

    #[tokio::test]
    async fn closes_progress_on_invalid_options() {
        let progress = std::sync::Arc::new(RecordedProgress::default());
        let booru = MemoryBooru::new([1, 2, 3]);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(0))
            .with_progress(progress.clone());

        assert!(search.run(&Query::from("1girl")).await.is_err());
        assert_eq!(*progress.done.lock().unwrap(), Some(0));
    }

    #[tokio::test]
    async fn reports_progress() {
        let progress = std::sync::Arc::new(RecordedProgress::default());
        let booru = MemoryBooru::new(1..=25);
        let search = DeepSearch::new(booru, DeepSearchOptions::with_limit(10))
            .with_progress(progress.clone());

        search.run(&Query::from("1girl")).await.unwrap();

        assert_eq!(*progress.total.lock().unwrap(), Some(25));
        assert_eq!(
            *progress.steps.lock().unwrap(),
            vec![
                (SearchStep::new(1, 10), 10),
                (SearchStep::new(11, 20), 10),
                (SearchStep::new(21, 25), 5),
            ]
        );
        assert_eq!(*progress.done.lock().unwrap(), Some(3));
    }
}
