use std::sync::Arc;

use bds_common::{ApiKind, Query};
use bds_core::{
    format::format_steps,
    progress::{no_op_search_progress, SharedSearchProgress},
    DeepSearch, DeepSearchOptions, DeepSearchReport,
};
use bds_extractors::{auth::Credentials, extractor::PostCountApi, extractor_config::ServerConfig};
use log::{debug, warn};

#[cfg(feature = "danbooru")]
use bds_extractors::imageboards::prelude::DanbooruApi;

#[cfg(feature = "gelbooru")]
use bds_extractors::imageboards::prelude::GelbooruApi;

use crate::{cli::Cli, error::CliError, progress_bars::IndicatifSearchProgress};

/// Steps found by a finished search, already written as search strings.
#[derive(Debug)]
pub struct SearchOutput {
    pub lines: Vec<String>,
    pub report: DeepSearchReport,
}

/// Builds the options of a run on `server`. `--limit` overrides the server's cap.
pub fn search_options(args: &Cli, server: &ServerConfig) -> DeepSearchOptions {
    let limit = match args.limit {
        Some(limit) if limit > server.max_posts_per_search => {
            warn!(
                "Limit {} is above the {} posts {} allows per search, some searches may be cut short",
                limit, server.max_posts_per_search, server.pretty_name
            );
            limit
        }
        Some(limit) => limit,
        None => server.max_posts_per_search,
    };

    DeepSearchOptions {
        limit,
        min_id: args.min_id,
        max_id: args.max_id,
    }
}

/// Runs the deep search for the tags in `args` on `server`.
pub async fn run_search(args: &Cli, server: ServerConfig) -> Result<SearchOutput, CliError> {
    let query = Query::new(&args.tags);
    let credentials = Credentials::from_parts(args.user.clone(), args.key.clone())?;
    let options = search_options(args, &server);

    let progress: SharedSearchProgress = if args.no_progress {
        no_op_search_progress()
    } else {
        Arc::new(IndicatifSearchProgress::new(server.server)?)
    };

    debug!("Searching {} on {} with {:?}", query, server, options);

    match server.server {
        #[cfg(feature = "gelbooru")]
        ApiKind::Gelbooru => {
            let api = GelbooruApi::new(server, credentials)?.with_delay(args.delay());
            deep_search(api, &query, options, progress).await
        }
        #[cfg(feature = "danbooru")]
        ApiKind::Danbooru => {
            let api = DanbooruApi::new(server, credentials)?.with_delay(args.delay());
            deep_search(api, &query, options, progress).await
        }

        #[allow(unreachable_patterns)]
        _ => {
            #[cfg(any(feature = "danbooru", feature = "gelbooru"))]
            {
                Err(CliError::ImageboardNotEnabled {
                    imageboard: server.server.to_string(),
                })
            }
            #[cfg(not(any(feature = "danbooru", feature = "gelbooru")))]
            {
                let _ = (credentials, options, progress);
                Err(CliError::NoImageboardsEnabled)
            }
        }
    }
}

async fn deep_search<A>(
    api: A,
    query: &Query,
    options: DeepSearchOptions,
    progress: SharedSearchProgress,
) -> Result<SearchOutput, CliError>
where
    A: PostCountApi + Sync,
{
    let kind = api.kind();
    let report = DeepSearch::new(api, options)
        .with_progress(progress)
        .run(query)
        .await?;

    let lines = format_steps(query, &report.steps, kind).collect();

    Ok(SearchOutput { lines, report })
}
