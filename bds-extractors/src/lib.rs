//! All internal logic for asking booru APIs how many posts match a search.

extern crate bds_common;

pub mod auth;
pub mod error;
pub mod extractor;
pub mod extractor_config;
pub mod imageboards;
pub mod prelude;
