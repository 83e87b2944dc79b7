//! Result page discovery
//!
//! Fetches the first search page once and reads its pagination control to
//! decide how many pages the coordinator should fan out over.

use std::sync::Arc;
use std::time::Duration;

use crate::crawler::fetcher::HttpTransport;
use crate::crawler::url::SearchUrlBuilder;
use crate::parser::{pages_to_fetch, total_pages};
use crate::utils::error::{CrawlerError, FetchError};

/// Outcome of page discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// URL of the first result page
    pub search_url: String,

    /// Pages advertised by the pagination control
    pub total_pages: u32,

    /// Pages that will actually be fetched (after the cap)
    pub pages_to_fetch: u32,
}

impl Discovery {
    /// URLs of every page to fetch, first page first
    #[must_use]
    pub fn page_urls(&self) -> Vec<String> {
        SearchUrlBuilder::page_urls(&self.search_url, self.pages_to_fetch)
    }
}

/// Determines how many result pages a query has
pub struct PaginationDiscoverer {
    transport: Arc<dyn HttpTransport>,
    urls: SearchUrlBuilder,
    timeout: Option<Duration>,
    verbose: bool,
}

impl PaginationDiscoverer {
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        urls: SearchUrlBuilder,
        timeout: Option<Duration>,
        verbose: bool,
    ) -> Self {
        Self {
            transport,
            urls,
            timeout,
            verbose,
        }
    }

    /// Fetch the first page of `query` and count its result pages
    ///
    /// # Arguments
    ///
    /// * `query` - Search text, encoded into the search URL
    /// * `max_pages` - Optional page cap; values below 1 count as 1
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::Discovery` if the first page cannot be fetched
    /// or the page timeout elapses first.
    /// Unlike the other pages, this fetch is not isolated: without it there
    /// is nothing to page through.
    pub async fn discover(
        &self,
        query: &str,
        max_pages: Option<u32>,
    ) -> Result<Discovery, CrawlerError> {
        let search_url = self.urls.search_url(query);

        let fetch = self.transport.get_text(&search_url);
        let html = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| FetchError::Timeout)
                .and_then(|result| result),
            None => fetch.await,
        }
        .map_err(CrawlerError::Discovery)?;

        let total = total_pages(&html);
        let discovery = Discovery {
            search_url,
            total_pages: total,
            pages_to_fetch: pages_to_fetch(total, max_pages),
        };

        progress!(
            self.verbose,
            total_pages = discovery.total_pages,
            pages_to_fetch = discovery.pages_to_fetch,
            "Discovered result pages"
        );

        Ok(discovery)
    }
}
