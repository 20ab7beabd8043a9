//! Books API client.
//!
//! Queries the public volumes endpoint and normalizes the payload into
//! [`Book`] records.
//!
//! ### Protocol
//!
//! - **Endpoint**: `https://www.googleapis.com/books/v1/volumes`
//! - **Parameters**: `q=<term>&filter=ebooks&maxResults=20`, in that order.
//! - **Authentication**: none, no custom headers beyond `Accept` and `User-Agent`.
//! - **Retries**: none. A failed fetch is reported once; the user searches again.
//! - **Normalization**: `volumeInfo.title`, `volumeInfo.authors` and the detail link
//!   become a [`Book`]; an absent `items` array is an empty result.

pub mod error;
pub mod link;
pub mod request;
pub mod response;

pub use error::FetchError;
pub use link::{LinkError, navigable};
pub use request::{SearchQuery, build_query};
pub use response::{Book, parse_books};

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use pustaka_core::AppConfig;

/// Default base URL for the books API.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "pustaka/0.1";

/// Books API client configuration.
#[derive(Debug, Clone)]
pub struct BooksConfig {
    /// Base URL (default: https://www.googleapis.com/books/v1).
    pub base_url: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: pustaka/0.x).
    pub user_agent: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for BooksConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.api_base_url.clone(), timeout: config.timeout(), user_agent: config.user_agent.clone() }
    }
}

/// Anything that can answer a search with a list of books.
///
/// The HTTP client is the production implementation; the search screen only
/// depends on this trait.
#[async_trait::async_trait]
pub trait BookSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, FetchError>;
}

/// Books API client.
#[derive(Debug, Clone)]
pub struct BooksClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BooksClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BooksConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::Parse(format!("base url: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Network(Arc::new(e)))?;

        Ok(Self { http, base_url })
    }

    /// The request URL for `query`.
    pub fn url_for(&self, query: &SearchQuery) -> Url {
        query.url(&self.base_url)
    }

    /// Run one volumes search.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, FetchError> {
        let start = Instant::now();
        let url = self.url_for(query);

        tracing::debug!("searching books API: term={}", query.term());

        let http_response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("books API response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let books = parse_books(&bytes)?;

        tracing::debug!("search completed in {:?}, {} books", start.elapsed(), books.len());

        Ok(books)
    }
}

#[async_trait::async_trait]
impl BookSource for BooksClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, FetchError> {
        BooksClient::search(self, query).await
    }
}
