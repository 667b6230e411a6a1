pub use crate::auth::Credentials;
pub use crate::error::ExtractorError;
pub use crate::extractor::PostCountApi;
pub use crate::extractor_config::ServerConfig;
