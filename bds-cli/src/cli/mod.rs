use bds_core::deep_search::DEFAULT_MAX_ID;
use bds_extractors::extractor_config::ServerConfig;
use log::LevelFilter;
use once_cell::sync::OnceCell;
use std::{collections::HashMap, path::PathBuf, time::Duration};

use clap::Parser;

pub mod extra;
pub mod search;

pub static AVAILABLE_SERVERS: OnceCell<HashMap<String, ServerConfig>> = OnceCell::new();

#[derive(Parser, Debug)]
#[clap(name = "Booru Deep Search", author, version, about, long_about = None)]
pub struct Cli {
    /// Tags to search
    #[clap(value_parser, required_unless_present = "servers")]
    pub tags: Vec<String>,

    /// Imageboard to search on
    ///
    /// Either the name of a known server (see --servers) or the URL of a Gelbooru-compatible API.
    /// Custom URLs also need --max-per-search and --max-per-page.
    #[clap(
        short,
        long,
        value_name = "SERVER|URL",
        default_value = "gelbooru",
        help_heading = "SERVER"
    )]
    pub api: String,

    /// User id used to authenticate to the imageboard
    #[clap(short, long, requires = "key", help_heading = "SERVER")]
    pub user: Option<String>,

    /// API key used to authenticate to the imageboard
    #[clap(short, long, requires = "user", help_heading = "SERVER")]
    pub key: Option<String>,

    /// Max amount of posts a single search can reach on a custom API
    #[clap(
        long,
        value_name = "NUMBER",
        value_parser(clap::value_parser!(u64).range(1..)),
        help_heading = "SERVER"
    )]
    pub max_per_search: Option<u64>,

    /// Max amount of posts a single page holds on a custom API
    #[clap(
        long,
        value_name = "NUMBER",
        value_parser(clap::value_parser!(u64).range(1..)),
        help_heading = "SERVER"
    )]
    pub max_per_page: Option<u64>,

    /// Wait this many milliseconds before every request
    #[clap(long, value_name = "MILLIS", help_heading = "SERVER")]
    pub delay: Option<u64>,

    /// Max amount of posts each generated search may hold
    ///
    /// Defaults to the server's max posts per search.
    #[clap(
        short,
        long,
        value_name = "NUMBER",
        value_parser(clap::value_parser!(u64).range(1..)),
        help_heading = "SEARCH"
    )]
    pub limit: Option<u64>,

    /// Ignore posts with an id lower than this
    #[clap(long, value_name = "ID", default_value_t = 0, help_heading = "SEARCH")]
    pub min_id: u64,

    /// Ignore posts with an id higher than this
    #[clap(long, value_name = "ID", default_value_t = DEFAULT_MAX_ID, help_heading = "SEARCH")]
    pub max_id: u64,

    /// Write the searches to this file instead of stdout
    #[clap(short = 'o', value_name = "PATH", help_heading = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Always overwrite output
    #[clap(short = 'y', value_parser, default_value_t = false, help_heading = "OUTPUT")]
    pub overwrite: bool,

    /// Ring the terminal bell once the search is done
    #[clap(long, action, help_heading = "OUTPUT")]
    pub bell: bool,

    /// Hide the progress bar
    #[clap(long, action, help_heading = "OUTPUT")]
    pub no_progress: bool,

    /// Print all available servers and exit
    #[clap(long, help_heading = "GENERAL")]
    pub servers: bool,

    /// Log verbosity. Overridden by RUST_LOG
    #[clap(
        long,
        value_name = "LEVEL",
        value_parser,
        ignore_case = true,
        default_value_t = LevelFilter::Info,
        help_heading = "GENERAL"
    )]
    pub log_level: LevelFilter,
}

impl Cli {
    #[inline]
    pub fn delay(&self) -> Option<Duration> {
        self.delay.map(Duration::from_millis)
    }
}
