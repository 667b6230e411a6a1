//! Count adapter for Gelbooru-based imageboards
//!
//! This adapter is compatible with every server speaking the DAPI, such as:
//! * `gelbooru.com`
//! * `safebooru.org`
//! * `rule34.xxx`
//!
//! Every request asks for a single post. The `count` attribute of the answer gives the number of
//! matching posts and the returned post gives the first id in the requested order.

use bds_common::{reqwest::Client, ApiKind, IdRange, Query};
use log::debug;
use std::time::Duration;
use tokio::time::sleep;

use crate::auth::Credentials;
use crate::error::ExtractorError;
use crate::extractor::PostCountApi;
use crate::extractor_config::ServerConfig;
use crate::imageboards::gelbooru::models::GelbooruPostsPage;

pub mod models;

/// Tag prefix the adapter reserves to pick the order of the returned post.
const SORT_PREFIX: &str = "sort:";

pub struct GelbooruApi {
    client: Client,
    config: ServerConfig,
    credentials: Option<Credentials>,
    delay: Option<Duration>,
}

impl GelbooruApi {
    pub fn new(
        config: ServerConfig,
        credentials: Option<Credentials>,
    ) -> Result<Self, ExtractorError> {
        if config.server != ApiKind::Gelbooru {
            return Err(ExtractorError::InvalidImageboard {
                imgboard: config.name,
            });
        }

        // Use common client for all connections with a set User-Agent
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

    async fn first_post(&self, tags: &[String]) -> Result<GelbooruPostsPage, ExtractorError> {
        if let Some(delay) = self.delay {
            debug!("Debouncing API calls by {} ms", delay.as_millis());
            sleep(delay).await;
        }

        let tag_string = tags.join(" ");
        debug!("Requesting {} with tags: {}", self.config.name, tag_string);

        let mut request = self.client.get(&self.config.api_url).query(&[
            ("limit", "1"),
            ("pid", "0"),
            ("tags", tag_string.as_str()),
        ]);

        if let Some(creds) = &self.credentials {
            request = request.query(&[
                ("user_id", creds.user.as_str()),
                ("api_key", creds.api_key.as_str()),
            ]);
        }

        let body = request.send().await?.error_for_status()?.text().await?;

        let page = GelbooruPostsPage::from_xml(&body)?;
        debug!("Search matched {} posts", page.count);
        Ok(page)
    }

    async fn first_id(&self, query: &Query, order: &str) -> Result<Option<u64>, ExtractorError> {
        let tags = query.with_tags([order]);
        let page = self.first_post(&tags).await?;
        Ok(page.ids.first().copied())
    }
}

impl PostCountApi for GelbooruApi {
    async fn count(&self, query: &Query, range: IdRange) -> Result<u64, ExtractorError> {
        let tags = query.with_tags(ApiKind::Gelbooru.range_tags(range));
        Ok(self.first_post(&tags).await?.count)
    }

    async fn max_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        self.first_id(query, "sort:id:desc").await
    }

    async fn min_matching_id(&self, query: &Query) -> Result<Option<u64>, ExtractorError> {
        self.first_id(query, "sort:id:asc").await
    }

    fn check_query(&self, query: &Query) -> Result<(), ExtractorError> {
        check_sort_tags(query)
    }

    fn kind(&self) -> ApiKind {
        ApiKind::Gelbooru
    }
}

fn check_sort_tags(query: &Query) -> Result<(), ExtractorError> {
    match query.find_prefixed(SORT_PREFIX) {
        Some(tag) => Err(ExtractorError::ForbiddenTag {
            tag: tag.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::extractor_config::DEFAULT_SERVERS;
    use mockito::{Matcher, Server};
    use tokio::time::Instant;

    #[test]
    fn rejects_sort_tags() {
        let api = GelbooruApi::new(DEFAULT_SERVERS.get("gelbooru").unwrap().clone(), None)
            .unwrap();

        assert!(api.check_query(&Query::from("1girl solo")).is_ok());

        match api.check_query(&Query::from("1girl Sort:id:asc")) {
            Err(ExtractorError::ForbiddenTag { tag }) => assert_eq!(tag, "Sort:id:asc"),
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(api.check_query(&Query::from("sort:score")).is_err());
    }

    #[test]
    fn refuses_danbooru_servers() {
        let server = DEFAULT_SERVERS.get("danbooru").unwrap().clone();
        assert!(matches!(
            GelbooruApi::new(server, None),
            Err(ExtractorError::InvalidImageboard { .. })
        ));
    }

    fn local_gelbooru(url: &str) -> ServerConfig {
        ServerConfig::custom_gelbooru(&format!("{url}/index.php"), 20_000, 100).unwrap()
    }

    fn dapi_query(tags: &str) -> Vec<Matcher> {
        vec![
            Matcher::UrlEncoded("page".into(), "dapi".into()),
            Matcher::UrlEncoded("s".into(), "post".into()),
            Matcher::UrlEncoded("q".into(), "index".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
            Matcher::UrlEncoded("pid".into(), "0".into()),
            Matcher::UrlEncoded("tags".into(), tags.into()),
        ]
    }

    #[tokio::test]
    async fn count_request() {
        let mut server = Server::new_async().await;

        let mut query = dapi_query("1girl id:>=5 id:<=9");
        query.push(Matcher::UrlEncoded("user_id".into(), "u".into()));
        query.push(Matcher::UrlEncoded("api_key".into(), "k".into()));

        let mock = server
            .mock("GET", "/index.php")
            .match_query(Matcher::AllOf(query))
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_body(r#"<posts count="3" offset="0"><post id="9"/></posts>"#)
            .create_async()
            .await;

        let credentials = Credentials::new(String::from("u"), String::from("k"));
        let api = GelbooruApi::new(local_gelbooru(&server.url()), Some(credentials)).unwrap();

        let count = api
            .count(&Query::from("1girl"), IdRange::new(5, 9))
            .await
            .unwrap();

        assert_eq!(count, 3);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn highest_id_request() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.php")
            .match_query(Matcher::AllOf(dapi_query("1girl solo sort:id:desc")))
            .with_status(200)
            .with_body(
                r#"<posts limit="1" offset="0" count="38127"><post><id>10999773</id></post></posts>"#,
            )
            .create_async()
            .await;

        let api = GelbooruApi::new(local_gelbooru(&server.url()), None).unwrap();

        let highest = api
            .max_matching_id(&Query::from("1girl solo"))
            .await
            .unwrap();

        assert_eq!(highest, Some(10_999_773));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn lowest_id_request() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.php")
            .match_query(Matcher::AllOf(dapi_query("1girl sort:id:asc")))
            .with_status(200)
            .with_body(r#"<posts count="0" offset="0"/>"#)
            .create_async()
            .await;

        let api = GelbooruApi::new(local_gelbooru(&server.url()), None).unwrap();

        assert_eq!(api.min_matching_id(&Query::from("1girl")).await.unwrap(), None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let api = GelbooruApi::new(local_gelbooru(&server.url()), None).unwrap();
        let result = api.count(&Query::from("1girl"), IdRange::UNBOUNDED).await;

        assert!(matches!(result, Err(ExtractorError::ConnectionError(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn waits_before_requests() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"<posts count="1" offset="0"><post id="1"/></posts>"#)
            .expect(2)
            .create_async()
            .await;

        let api = GelbooruApi::new(local_gelbooru(&server.url()), None)
            .unwrap()
            .with_delay(Some(Duration::from_millis(100)));

        let start = Instant::now();
        api.count(&Query::from("1girl"), IdRange::UNBOUNDED)
            .await
            .unwrap();
        api.count(&Query::from("1girl"), IdRange::starting_at(1))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(200));
        mock.assert_async().await;
    }
}
