//! Search query construction.

use url::Url;

/// Result filter sent with every request.
pub const FILTER: &str = "ebooks";

/// Page size sent with every request.
pub const MAX_RESULTS: u8 = 20;

/// A search term ready to be embedded in the volumes URL.
///
/// Built from raw user input with every whitespace character removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    pub fn new(input: &str) -> Self {
        Self { term: input.chars().filter(|c| !c.is_whitespace()).collect() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Build the volumes request URL under `base`.
    ///
    /// Parameter order is fixed: `q`, `filter`, `maxResults`.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let path = format!("{}/volumes", base.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &self.term)
            .append_pair("filter", FILTER)
            .append_pair("maxResults", &MAX_RESULTS.to_string());
        url
    }
}

/// Derive the query for a raw input string.
pub fn build_query(input: &str) -> SearchQuery {
    SearchQuery::new(input)
}
