use bds_common::serde::{self, Deserialize};
use bds_common::serde_json;

use crate::error::ExtractorError;

#[derive(Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct DanbooruCounts {
    pub counts: DanbooruPostCount,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct DanbooruPostCount {
    pub posts: Option<u64>,
}

#[derive(Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct DanbooruPostId {
    pub id: Option<u64>,
}

/// Reads the answer of `/counts/posts.json`.
///
/// Danbooru answers `null` when counting timed out on its side.
pub fn parse_count(raw_json: &str) -> Result<u64, ExtractorError> {
    let response = serde_json::from_str::<DanbooruCounts>(raw_json)?;
    response
        .counts
        .posts
        .ok_or(ExtractorError::InvalidServerResponse)
}

/// Reads the id of the first post of a `/posts.json?only=id` answer.
pub fn parse_first_id(raw_json: &str) -> Result<Option<u64>, ExtractorError> {
    let posts = serde_json::from_str::<Vec<DanbooruPostId>>(raw_json)?;
    Ok(posts.first().and_then(|post| post.id))
}
