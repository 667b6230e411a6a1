use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A tag search, kept as the list of tokens the user typed.
///
/// Every input string is split on whitespace, so `["1girl solo", "highres"]` and
/// `["1girl", "solo", "highres"]` produce the same query. Tokens are otherwise passed through
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    tags: Vec<String>,
}

impl Query {
    pub fn new<S>(input: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let tags = input
            .iter()
            .flat_map(|s| s.as_ref().split_whitespace())
            .map(str::to_string)
            .collect();

        Self { tags }
    }

    #[inline]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// First tag starting with `prefix`, ignoring ASCII case.
    pub fn find_prefixed(&self, prefix: &str) -> Option<&str> {
        self.tags
            .iter()
            .map(String::as_str)
            .find(|tag| {
                tag.get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
    }

    /// Returns the query tokens followed by `extra`, ready to be sent to an API.
    pub fn with_tags<I, S>(&self, extra: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags = self.tags.clone();
        tags.extend(extra.into_iter().map(Into::into));
        tags
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tags.join(" "))
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::new(&[value])
    }
}

impl From<Vec<String>> for Query {
    fn from(value: Vec<String>) -> Self {
        Self::new(&value)
    }
}

#[cfg(test)]
mod test {
    use super::Query;

    #[test]
    fn splits_every_input_string() {
        let query = Query::new(&["1girl  solo", "highres"]);
        assert_eq!(query.tags(), &["1girl", "solo", "highres"]);
        assert_eq!(query, Query::from("1girl solo highres"));
    }

    #[test]
    fn keeps_tokens_untouched() {
        let query = Query::from("Rating:General -Animated");
        assert_eq!(query.to_string(), "Rating:General -Animated");
    }

    #[test]
    fn finds_prefixed_tags() {
        let query = Query::from("1girl Sort:score solo");
        assert_eq!(query.find_prefixed("sort:"), Some("Sort:score"));
        assert_eq!(query.find_prefixed("order:"), None);
        assert_eq!(Query::from("é").find_prefixed("sort:"), None);
    }

    #[test]
    fn appends_extra_tags() {
        let query = Query::from("1girl");
        let tags = query.with_tags(["id:>=5"]);
        assert_eq!(tags, vec!["1girl", "id:>=5"]);
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn empty_input() {
        let query = Query::new::<&str>(&[]);
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }
}
