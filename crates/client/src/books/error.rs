//! Books API client error types.

use std::sync::Arc;

/// Errors from a single fetch against the books API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Transport failure: no route, DNS failure, connection reset.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Body is not JSON or `items` has the wrong shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { FetchError::Timeout } else { FetchError::Network(Arc::new(err)) }
    }
}

impl From<FetchError> for pustaka_core::Error {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network(_) | FetchError::Timeout | FetchError::HttpError { .. } => {
                pustaka_core::Error::NetworkFailure(err.to_string())
            }
            FetchError::Parse(msg) => pustaka_core::Error::EmptyOrUnparseable(msg),
        }
    }
}
