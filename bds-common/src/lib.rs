//! Common types shared by every `booru_deep_search` crate.
//!
//! The [`Query`] and [`SearchStep`] structs travel untouched from the command line, through the
//! API adapters and into the id range partitioner.
use std::{
    env,
    fmt::Display,
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
    str::FromStr,
};

// Public Exports
pub use directories;
pub use log;
pub use reqwest;
pub use serde;
pub use serde_json;

use directories::ProjectDirs;

use log::debug;

use serde::{Deserialize, Serialize};

pub mod query;
pub mod step;

pub use query::Query;
pub use step::{IdRange, SearchStep};

/// The API families a booru can expose. Every family writes id bounds and counts posts its own way.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiKind {
    /// Gelbooru DAPI (`index.php?page=dapi&s=post&q=index`), also served by Safebooru and Rule34.
    Gelbooru,
    /// Danbooru JSON API with its `/counts/posts.json` endpoint.
    Danbooru,
}

impl Display for ApiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gelbooru => write!(f, "gelbooru"),
            Self::Danbooru => write!(f, "danbooru"),
        }
    }
}

impl FromStr for ApiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gelbooru" | "gelbooru_0_2" | "gelbooruv0_2" => Ok(Self::Gelbooru),
            "danbooru" => Ok(Self::Danbooru),
            other => Err(format!("Unknown api type: {other}")),
        }
    }
}

impl ApiKind {
    /// Each variant generates its own user-agent to connect to the imageboard site.
    ///
    /// It will always follow the version declared inside ```Cargo.toml```
    #[inline]
    pub fn user_agent(self) -> String {
        let app_name = "Rust Booru Deep Search";
        let ua = format!("{}/{} ({})", app_name, env!("CARGO_PKG_VERSION"), self);
        debug!("Using user-agent: {}", ua);
        ua
    }

    /// Writes the tags that restrict a search to `range`, in this API's syntax.
    ///
    /// Both bounds are inclusive. An unbounded side produces no tag.
    pub fn range_tags(self, range: IdRange) -> Vec<String> {
        match (self, range.low, range.high) {
            (Self::Danbooru, Some(low), Some(high)) => vec![format!("id:{low}..{high}")],
            (_, low, high) => {
                let mut tags = Vec::with_capacity(2);
                if let Some(low) = low {
                    tags.push(format!("id:>={low}"));
                }
                if let Some(high) = high {
                    tags.push(format!("id:<={high}"));
                }
                tags
            }
        }
    }

    /// Returns a `PathBuf` pointing to the configuration directory.
    ///
    /// This is XDG-compliant and resolves to
    /// `$XDG_CONFIG_HOME/booru-deep-search` on Linux or
    /// `%APPDATA%/booru-deep-search/booru-deep-search` on Windows
    ///
    /// Or you can set the env var `BDS_CONFIG_DIR` to point it to a custom location.
    pub fn config_dir() -> Result<PathBuf, io::Error> {
        let cfg_path = match env::var("BDS_CONFIG_DIR") {
            Ok(path) => PathBuf::from(path),
            Err(_) => ProjectDirs::from("org", "booru-deep-search", "booru-deep-search")
                .map(|cdir| cdir.config_dir().to_path_buf())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, "No home directory available")
                })?,
        };

        let cfold = Path::new(&cfg_path);

        if !cfold.exists() {
            create_dir_all(cfold)?;
        }

        Ok(cfold.to_path_buf())
    }
}
