//! # Booru Deep Search
//!
//! Booru search APIs refuse to page past a fixed amount of results (20000 on Gelbooru). This
//! crate splits one tag search into consecutive post id ranges so that every range stays under
//! that cap and, together, they cover every matching post exactly once.
//!
//! ```no_run
//! use bds_common::Query;
//! use bds_core::{format::format_steps, DeepSearch, DeepSearchOptions};
//! use bds_extractors::extractor::PostCountApi;
//! use bds_extractors::extractor_config::DEFAULT_SERVERS;
//! use bds_extractors::imageboards::prelude::GelbooruApi;
//!
//! async fn test() {
//!     let server = DEFAULT_SERVERS.get("gelbooru").unwrap().clone();
//!     let options = DeepSearchOptions::with_limit(server.max_posts_per_search);
//!
//!     let api = GelbooruApi::new(server, None).unwrap();
//!     let kind = api.kind();
//!
//!     let query = Query::from("1girl solo");
//!     let report = DeepSearch::new(api, options).run(&query).await.unwrap();
//!
//!     for line in format_steps(&query, &report.steps, kind) {
//!         println!("{line}");
//!     }
//! }
//! ```
pub mod deep_search;
pub mod error;
pub mod format;
pub mod progress;

pub use deep_search::{DeepSearch, DeepSearchOptions, DeepSearchReport};
