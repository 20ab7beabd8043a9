//! Books API response types and normalization.

use serde::Deserialize;

use super::FetchError;
use super::link;

/// Raw response from the volumes endpoint.
///
/// Only `items` is consumed; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

/// One entry of `items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: Option<VolumeInfo>,
}

/// The `volumeInfo` object of a volume.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub info_link: Option<String>,
    #[serde(default)]
    pub canonical_volume_link: Option<String>,
    #[serde(default)]
    pub preview_link: Option<String>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    authors: Vec<String>,
    url: String,
}

impl Book {
    pub fn new(title: impl Into<String>, authors: Vec<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), authors, url: url.into() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Raw detail-page link; empty when the response carried none.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Authors joined for display, empty when there are none.
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }

    /// The detail page as an openable URL, if there is one.
    pub fn link(&self) -> Option<url::Url> {
        link::navigable(&self.url).ok()
    }
}

impl VolumeInfo {
    /// Normalize a volume; `None` when it has neither a title nor any link.
    pub fn into_book(self) -> Option<Book> {
        let url = self
            .info_link
            .or(self.canonical_volume_link)
            .or(self.preview_link)
            .unwrap_or_default();
        let title = self.title.unwrap_or_default();

        if title.trim().is_empty() && url.trim().is_empty() {
            return None;
        }

        Some(Book { title, authors: self.authors.unwrap_or_default(), url })
    }
}

/// Parse a volumes response body into books, preserving the order of `items`.
///
/// A missing or empty `items` array is an empty result, not an error.
pub fn parse_books(body: &[u8]) -> Result<Vec<Book>, FetchError> {
    let raw: VolumesResponse = serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let volumes = raw.items.unwrap_or_default();
    let total = volumes.len();

    let books: Vec<Book> = volumes
        .into_iter()
        .filter_map(|v| v.volume_info.unwrap_or_default().into_book())
        .collect();

    if books.len() < total {
        tracing::debug!(skipped = total - books.len(), "dropped volumes without title or link");
    }

    Ok(books)
}
