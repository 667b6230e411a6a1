use bds_common::{ApiKind, SearchStep};
use bds_core::progress::SearchProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use owo_colors::OwoColorize;
use std::{fmt::Write, time::Duration};

use crate::error::CliError;

const PROGRESS_CHARS: &str = "━━";

/// Returns special-themed progress bar templates for each API family
#[inline]
const fn bar_template(kind: ApiKind) -> &'static str {
    match kind {
        ApiKind::Gelbooru => "{spinner:.red.bold} {elapsed_precise:.bold} {wide_bar:.red/white.dim} {percent:.bold}  {pos:.bold} {msg}",
        ApiKind::Danbooru => "{spinner:.green.bold} {elapsed_precise:.bold} {wide_bar:.green/white.dim} {percent:.bold}  {pos:.green} {msg}",
    }
}

/// Shows how many of the matching posts the steps found so far already cover.
#[derive(Debug)]
pub struct IndicatifSearchProgress {
    bar: ProgressBar,
}

impl IndicatifSearchProgress {
    pub fn new(kind: ApiKind) -> Result<Self, CliError> {
        let bar = ProgressBar::new(0).with_style(search_progress_style(kind)?);
        bar.set_draw_target(ProgressDrawTarget::stderr());
        bar.enable_steady_tick(Duration::from_millis(100));

        Ok(Self { bar })
    }
}

impl SearchProgress for IndicatifSearchProgress {
    fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    fn step_found(&self, step: SearchStep, posts: u64) {
        self.bar.inc(posts);
        self.bar
            .set_message(format!("{} {}", "last step:".bold(), step.blue()));
    }

    fn done(&self, steps: usize) {
        self.bar.finish_and_clear();
        log::debug!("Progress bar closed after {steps} steps");
    }
}

fn search_progress_style(kind: ApiKind) -> Result<ProgressStyle, CliError> {
    Ok(ProgressStyle::default_bar()
        .template(bar_template(kind))?
        .with_key("pos", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{}/{}", state.pos(), state.len().unwrap_or_default());
        })
        .with_key("percent", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:>3.0}%", state.fraction() * 100_f32);
        })
        .progress_chars(PROGRESS_CHARS))
}
