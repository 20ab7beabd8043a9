//! Unified error types for pustaka.
//!
//! Every failure the search screen can hit collapses into one of three kinds.
//! None of them is fatal: each renders as an empty result list plus a short
//! [`Notice`], and the only recovery path is searching again.

/// Unified error taxonomy for a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Pre-flight connectivity check failed; no request was issued.
    #[error("NO_CONNECTIVITY")]
    NoConnectivity,

    /// Transport failure while the request was in flight.
    #[error("NETWORK_FAILURE: {0}")]
    NetworkFailure(String),

    /// The response was empty, not JSON, or had no usable items.
    #[error("EMPTY_OR_UNPARSEABLE: {0}")]
    EmptyOrUnparseable(String),
}

/// Fixed message shown in the empty-state area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoInternet,
    NoBooksFound,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoInternet => "No internet connection",
            Notice::NoBooksFound => "No books found",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        match err {
            Error::NoConnectivity => Notice::NoInternet,
            Error::NetworkFailure(_) | Error::EmptyOrUnparseable(_) => Notice::NoBooksFound,
        }
    }
}
