//! Detail-page link validation.
//!
//! A book is navigable only when its link parses as an absolute http(s) URL.

/// Error type for links that cannot be opened.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LinkError {
    #[error("empty link")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid link: {0}")]
    InvalidUrl(String),
}

/// Parse a detail-page link into a URL that is safe to hand to an opener.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Require an absolute URL (no scheme guessing)
/// 3. Accept only http and https
pub fn navigable(input: &str) -> Result<url::Url, LinkError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(LinkError::Empty);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_string())),
    }
}
