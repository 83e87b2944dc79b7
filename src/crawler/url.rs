//! Search and result page URL construction
//!
//! Geekbench Browser search URLs look like `{base}/search?q={query}`, with
//! the query form-encoded (spaces become `+`). Further result pages append
//! `&page={n}`.

use url::form_urlencoded;
use url::Url;

use crate::utils::error::FetchError;

/// Builder for search and result page URLs
#[derive(Debug, Clone)]
pub struct SearchUrlBuilder {
    base_url: Url,
}

impl SearchUrlBuilder {
    /// Create a builder rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if `base_url` is not an absolute URL
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { base_url })
    }

    /// Site root, used to resolve relative detail links
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the first result page for `query`
    ///
    /// # Examples
    ///
    /// ```
    /// use benchscrape::crawler::url::SearchUrlBuilder;
    ///
    /// let builder = SearchUrlBuilder::new("https://browser.geekbench.com").unwrap();
    /// assert_eq!(
    ///     builder.search_url("galaxy s24"),
    ///     "https://browser.geekbench.com/search?q=galaxy+s24"
    /// );
    /// ```
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}",
            self.base_url.as_str().trim_end_matches('/'),
            encode_query(query)
        )
    }

    /// URLs of result pages `1..=pages`
    ///
    /// Page 1 is the search URL itself.
    #[must_use]
    pub fn page_urls(search_url: &str, pages: u32) -> Vec<String> {
        let mut urls = Vec::with_capacity(pages.max(1) as usize);
        urls.push(search_url.to_string());
        urls.extend((2..=pages).map(|page| format!("{search_url}&page={page}")));
        urls
    }
}

/// Form-encode a search query
#[must_use]
pub fn encode_query(query: &str) -> String {
    form_urlencoded::byte_serialize(query.as_bytes()).collect()
}
