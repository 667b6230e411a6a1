#[cfg(feature = "danbooru")]
pub use super::danbooru::DanbooruApi;

#[cfg(feature = "gelbooru")]
pub use super::gelbooru::GelbooruApi;
