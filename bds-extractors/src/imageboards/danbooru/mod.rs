//! Count adapter for `https://danbooru.donmai.us`
//!
//! Danbooru exposes a dedicated count endpoint, so counting a range costs a single small request.
//! The lowest and highest ids come from `/posts.json` restricted to the `id` field.

use bds_common::{reqwest::Client, ApiKind, IdRange, Query};
use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::PostCountApi;
use crate::extractor_config::ServerConfig;

pub mod models;

/// Tag prefix the adapter reserves to pick the order of the returned post.
const ORDER_PREFIX: &str = "order:";

pub struct DanbooruApi {
    client: Client,
    config: ServerConfig,
    credentials: Option<Credentials>,
    delay: Option<Duration>,
}

impl DanbooruApi {
    pub fn new(
        config: ServerConfig,
        credentials: Option<Credentials>,
    ) -> Result<Self, ExtractorError> {
        if config.server != ApiKind::Danbooru {
            return Err(ExtractorError::InvalidImageboard {
                imgboard: config.name,
            });
        }

        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            config,
            credentials,
            delay: None,
        })
    }

    /// Waits `delay` before every request.
    #[must_use]
    pub fn with_delay(mut self, delay: Option<Duration>) -> Self {
        self.delay = delay;
        self
    }

    #[inline]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ExtractorError> {
        if let Some(delay) = self.delay {
            debug!("Debouncing API calls by {} ms", delay.as_millis());
            sleep(delay).await;
        }

        debug!("Requesting {url} with {params:?}");

        let mut request = self.client.get(url).query(params);

        if let Some(creds) = &self.credentials {
            request = request.query(&[
                ("login", creds.user.as_str()),
                ("api_key", creds.api_key.as_str()),
            ]);
        }

        Ok(request.send().await?.error_for_status()?.text().await?)
    }

    async fn first_id(&self, query: &Query, order: &str) -> Result<Option<u64>, ExtractorError> {
        let tags = query.with_tags([order]).join(" ");
        let body = self
            .get(
                &self.config.api_url,
                &[("tags", tags.as_str()), ("limit", "1"), ("only", "id")],
            )
            .await?;

        models::parse_first_id(&body)
    }
}

impl PostCountApi for DanbooruApi {
    async fn count(&self, query: &Query, range: IdRange) -> Result<u64, ExtractorError> {
        let count_url =
            self.config
                .count_url
                .as_deref()
                .ok_or_else(|| ExtractorError::MissingEndpoint {
                    server: self.config.name.clone(),
                    endpoint: String::from("count"),
                })?;

        let tags = query
            .with_tags(ApiKind::Danbooru.range_tags(range))
            .join(" ");
        let body = self.get(count_url, &[("tags", tags.as_str())]).await?;

        let count = models::parse_count(&body)?;
        debug!("Search matched {count} posts");
        Ok(count)
    }

    async fn max_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        self.first_id(query, "order:id_desc").await
    }

    async fn min_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        self.first_id(query, "order:id").await
    }

    fn check_query(&self, query: &Query) -> Result<(), ExtractorError> {
        match query.find_prefixed(ORDER_PREFIX) {
            Some(tag) => Err(ExtractorError::ForbiddenTag {
                tag: tag.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn kind(&self) -> ApiKind {
        ApiKind::Danbooru
    }
}
