//! Known imageboard servers and the limits their search APIs enforce.
use bds_common::reqwest::Url;
use bds_common::serde;
use bds_common::{
    serde::{Deserialize, Serialize},
    ApiKind,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::Display;
use std::io;
use thiserror::Error;

use crate::server_config;

pub mod macros;
pub mod serialize;

/// Query string every Gelbooru DAPI post search needs.
pub const GELBOORU_DAPI_QUERY: &str = "page=dapi&s=post&q=index";

pub static DEFAULT_SERVERS: Lazy<HashMap<String, ServerConfig>> = Lazy::new(|| {
    let mut hmap = HashMap::with_capacity(4);
    hmap.insert(
        "gelbooru".to_string(),
        server_config!(
            "gelbooru",
            "Gelbooru",
            ApiKind::Gelbooru,
            "https://gelbooru.com",
            "https://gelbooru.com/index.php?page=dapi&s=post&q=index",
            None,
            20_000,
            100
        ),
    );
    hmap.insert(
        "safebooru".to_string(),
        server_config!(
            "safebooru",
            "Safebooru",
            ApiKind::Gelbooru,
            "https://safebooru.org",
            "https://safebooru.org/index.php?page=dapi&s=post&q=index",
            None,
            200_000,
            1_000
        ),
    );
    hmap.insert(
        "rule34".to_string(),
        server_config!(
            "rule34",
            "Rule34",
            ApiKind::Gelbooru,
            "https://rule34.xxx",
            "https://api.rule34.xxx/index.php?page=dapi&s=post&q=index",
            None,
            200_000,
            1_000
        ),
    );
    hmap.insert(
        "danbooru".to_string(),
        server_config!(
            "danbooru",
            "Danbooru",
            ApiKind::Danbooru,
            "https://danbooru.donmai.us",
            "https://danbooru.donmai.us/posts.json",
            Some(String::from("https://danbooru.donmai.us/counts/posts.json")),
            200_000,
            200
        ),
    );
    hmap
});

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Server {server}: {url} is not a valid URL")]
    InvalidUrl { server: String, url: String },

    #[error("Server {server}: max_posts_per_search should be greater than 0")]
    ZeroSearchLimit { server: String },

    #[error("Server {server}: max_posts_per_page should be greater than 0")]
    ZeroPageLimit { server: String },

    #[error("Server {server}: max_posts_per_page ({per_page}) cannot be bigger than max_posts_per_search ({per_search})")]
    PageBiggerThanSearch {
        server: String,
        per_page: u64,
        per_search: u64,
    },

    #[error("Server {server}: {message}")]
    InvalidApiType { server: String, message: String },

    #[error("Failed to access server config file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to parse server config file: {source}")]
    TomlParseFail {
        #[from]
        source: toml::de::Error,
    },
}

/// Everything the adapters need to know about one imageboard.
///
/// `max_posts_per_search` is the hard cap on how deep one search can be paged through, which
/// is exactly the amount every id range must stay under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub struct ServerConfig {
    pub name: String,
    pub pretty_name: String,
    pub server: ApiKind,
    pub user_agent: String,
    pub base_url: String,
    pub api_url: String,
    pub count_url: Option<String>,
    pub max_posts_per_search: u64,
    pub max_posts_per_page: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: String::from("gelbooru"),
            pretty_name: String::from("Gelbooru"),
            server: ApiKind::Gelbooru,
            user_agent: ApiKind::Gelbooru.user_agent(),
            base_url: String::from("https://gelbooru.com"),
            api_url: String::from("https://gelbooru.com/index.php?page=dapi&s=post&q=index"),
            count_url: None,
            max_posts_per_search: 20_000,
            max_posts_per_page: 100,
        }
    }
}

impl Display for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl ServerConfig {
    /// Describes a Gelbooru-compatible server that is not one of the [`DEFAULT_SERVERS`].
    ///
    /// `api` may point either to the bare `index.php` or to the full DAPI post search; the DAPI
    /// query string is appended when missing.
    pub fn custom_gelbooru(
        api: &str,
        max_posts_per_search: u64,
        max_posts_per_page: u64,
    ) -> Result<Self, ConfigError> {
        let url = parse_url(api, api)?;

        let api_url = if url.as_str().contains("page=dapi") {
            url.to_string()
        } else if url.query().is_some() {
            format!("{url}&{GELBOORU_DAPI_QUERY}")
        } else {
            format!("{url}?{GELBOORU_DAPI_QUERY}")
        };

        let host = url.host_str().unwrap_or(api).to_string();

        let config = Self {
            name: host.clone(),
            pretty_name: host,
            server: ApiKind::Gelbooru,
            user_agent: ApiKind::Gelbooru.user_agent(),
            base_url: format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default()),
            api_url,
            count_url: None,
            max_posts_per_search,
            max_posts_per_page,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the urls and limits of this server.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url(&self.name, &self.api_url)?;

        if let Some(count_url) = &self.count_url {
            parse_url(&self.name, count_url)?;
        }

        if self.max_posts_per_search == 0 {
            return Err(ConfigError::ZeroSearchLimit {
                server: self.name.clone(),
            });
        }

        if self.max_posts_per_page == 0 {
            return Err(ConfigError::ZeroPageLimit {
                server: self.name.clone(),
            });
        }

        if self.max_posts_per_page > self.max_posts_per_search {
            return Err(ConfigError::PageBiggerThanSearch {
                server: self.name.clone(),
                per_page: self.max_posts_per_page,
                per_search: self.max_posts_per_search,
            });
        }

        Ok(())
    }
}

fn parse_url(server: &str, url: &str) -> Result<Url, ConfigError> {
    match Url::parse(url) {
        Ok(parsed) if parsed.has_host() && !parsed.scheme().is_empty() => Ok(parsed),
        _ => Err(ConfigError::InvalidUrl {
            server: server.to_string(),
            url: url.to_string(),
        }),
    }
}
