//! Single result page fetch-and-extract

use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

use crate::crawler::fetcher::HttpTransport;
use crate::models::Record;
use crate::parser::ListingParser;
use crate::utils::error::FetchError;

/// Fetches one listing page and extracts its records
pub struct PageFetcher {
    transport: Arc<dyn HttpTransport>,
    parser: ListingParser,
    timeout: Option<Duration>,
    verbose: bool,
}

impl PageFetcher {
    /// Create a page fetcher
    ///
    /// # Arguments
    ///
    /// * `transport` - HTTP transport shared with the other workers
    /// * `base_url` - Site root for resolving detail links
    /// * `timeout` - Optional bound on the whole page fetch
    /// * `verbose` - Report progress at info level instead of debug
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: Url,
        timeout: Option<Duration>,
        verbose: bool,
    ) -> Self {
        Self {
            transport,
            parser: ListingParser::new(base_url),
            timeout,
            verbose,
        }
    }

    /// Fetch a page and return its records, or an empty list on failure
    pub async fn fetch_page(&self, url: &str, page: u32) -> Vec<Record> {
        match self.try_fetch_page(url, page).await {
            Ok(records) => records,
            Err(e) => {
                progress!(self.verbose, page, error = %e, "Page fetch failed");
                Vec::new()
            }
        }
    }

    /// Fetch a page and return its records
    ///
    /// Entries that fail to extract are logged and skipped; only transport
    /// failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` of the underlying request, or
    /// `FetchError::Timeout` if the configured page timeout elapses.
    pub async fn try_fetch_page(&self, url: &str, page: u32) -> Result<Vec<Record>, FetchError> {
        progress!(self.verbose, page, url, "Fetching page");
        let started = Instant::now();

        let html = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.get_text(url))
                .await
                .map_err(|_| FetchError::Timeout)??,
            None => self.transport.get_text(url).await?,
        };

        let records = self.extract(&html, page);

        progress!(
            self.verbose,
            page,
            count = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Page parsed"
        );

        Ok(records)
    }

    fn extract(&self, html: &str, page: u32) -> Vec<Record> {
        self.parser
            .parse_entries(html)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(record) => Some(record),
                Err(e) => {
                    progress!(self.verbose, page, error = %e, "Skipping listing entry");
                    None
                }
            })
            .collect()
    }
}
