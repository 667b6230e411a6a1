//! Turns search steps back into search strings that can be pasted into the imageboard.
use bds_common::{ApiKind, Query, SearchStep};

/// Writes `step` as the user's query followed by its id bounds.
///
/// Both bounds are inclusive for every step, so consecutive lines never share a post.
pub fn format_step(query: &Query, step: &SearchStep, kind: ApiKind) -> String {
    query.with_tags(kind.range_tags(step.range())).join(" ")
}

/// One search string per step, in step order.
pub fn format_steps<'a>(
    query: &'a Query,
    steps: &'a [SearchStep],
    kind: ApiKind,
) -> impl Iterator<Item = String> + 'a {
    steps.iter().map(move |step| format_step(query, step, kind))
}
