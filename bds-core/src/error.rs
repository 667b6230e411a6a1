use bds_extractors::error::ExtractorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeepSearchError {
    /// Rejected before sending any request.
    #[error("Invalid deep search options: {reason}")]
    InvalidOptions { reason: String },

    /// The imageboard claims a single post id matches more posts than the limit, so no range can
    /// be built from it.
    #[error("Imageboard reported more than {limit} posts for the id range starting at {start_id}")]
    InconsistentCount { start_id: u64, limit: u64 },

    #[error("Imageboard request failed: {source}")]
    Extractor {
        #[from]
        source: ExtractorError,
    },
}
