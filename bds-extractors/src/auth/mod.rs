//! User credentials for imageboard APIs that gate searches behind an account.
use std::fmt::Debug;

use bds_common::serde::{self, Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A user id was supplied without its API key.
    #[error("When specifying a user, an API key should also be specified")]
    MissingApiKey,

    /// An API key was supplied without the user it belongs to.
    #[error("When specifying an API key, a user should also be specified")]
    MissingUser,
}

/// Login pair sent along every request.
///
/// Gelbooru-like APIs call them `user_id` and `api_key`, Danbooru calls them `login` and `api_key`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub struct Credentials {
    pub user: String,
    pub api_key: String,
}

impl Credentials {
    #[must_use]
    pub const fn new(user: String, api_key: String) -> Self {
        Self { user, api_key }
    }

    /// Builds credentials out of optional command line values.
    ///
    /// Both values must be given, or none. Empty strings count as missing.
    pub fn from_parts(user: Option<String>, api_key: Option<String>) -> Result<Option<Self>, Error> {
        let user = user.filter(|u| !u.trim().is_empty());
        let api_key = api_key.filter(|k| !k.trim().is_empty());

        match (user, api_key) {
            (Some(user), Some(api_key)) => Ok(Some(Self::new(
                user.trim().to_string(),
                api_key.trim().to_string(),
            ))),
            (Some(_), None) => Err(Error::MissingApiKey),
            (None, Some(_)) => Err(Error::MissingUser),
            (None, None) => Ok(None),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
