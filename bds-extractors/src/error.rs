use thiserror::Error;

/// Enumerates the possible errors that can arise while talking to a booru API.
///
/// None of these are retried by the adapters. They bubble up and abort the whole deep search.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The search uses tags that the adapter needs for its own requests.
    #[error("Tags must not contain {tag}, it is used internally by this imageboard's adapter")]
    ForbiddenTag { tag: String },

    /// The imageboard server returned a response that could not be understood or was not in the expected format.
    #[error("Imageboard returned an invalid response")]
    InvalidServerResponse,

    /// The server answered, but refused the request (bad credentials, rate limiting, maintenance...).
    #[error("Imageboard rejected the request: {reason}")]
    ServerRejected { reason: String },

    /// An error occurred during a network request (e.g., connection timeout, DNS resolution failure or
    /// an error status code). Wraps an underlying `reqwest::Error`.
    #[error("Connection Error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// An error occurred while deserializing a JSON response from the imageboard API.
    #[error("Error while deserializing JSON: {0}")]
    JsonSerializeFail(#[from] serde_json::Error),

    /// An error occurred while reading a XML response from the imageboard API.
    #[error("Error while reading XML: {0}")]
    XmlReadFail(#[from] quick_xml::Error),

    /// An attempt was made to use an adapter with an imageboard type it does not support.
    #[error("Invalid imageboard selected for this extractor: {imgboard}")]
    InvalidImageboard { imgboard: String },

    /// The selected server has no endpoint configured for the requested operation.
    #[error("Server {server} is missing the {endpoint} endpoint")]
    MissingEndpoint { server: String, endpoint: String },
}

impl From<quick_xml::events::attributes::AttrError> for ExtractorError {
    fn from(source: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlReadFail(source.into())
    }
}
