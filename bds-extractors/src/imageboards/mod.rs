//! Adapters that answer [`PostCountApi`](crate::extractor::PostCountApi) questions for a
//! family of imageboard APIs.
//!
//! ## Example with the `Gelbooru` adapter
//! ```no_run
//! use bds_common::{IdRange, Query};
//! use bds_extractors::extractor::PostCountApi;
//! use bds_extractors::extractor_config::DEFAULT_SERVERS;
//! use bds_extractors::imageboards::prelude::GelbooruApi;
//!
//! async fn test() {
//!     let server = DEFAULT_SERVERS.get("gelbooru").unwrap().clone();
//!
//!     let api = GelbooruApi::new(server, None).unwrap();
//!
//!     let query = Query::from("1girl solo");
//!
//!     let total = api.count(&query, IdRange::UNBOUNDED).await.unwrap();
//!     let below = api.count(&query, IdRange::up_to(1_000_000)).await.unwrap();
//!
//!     println!("{below} of {total} posts have an id up to 1000000");
//! }
//!```

#[cfg(feature = "danbooru")]
pub mod danbooru;

#[cfg(feature = "gelbooru")]
pub mod gelbooru;

pub mod prelude;
