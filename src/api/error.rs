use thiserror::Error;

/// Failures raised while talking to the content API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid API base url `{0}`")]
    BaseUrl(String),
    #[error("unknown section `{0}` (expected top, new, ask, show or jobs)")]
    UnknownSection(String),
    /// Raised by non-HTTP sources such as test doubles.
    #[error("{0}")]
    Unavailable(String),
}
