//! Web crawling functionality
//!
//! This module implements the scraping side of benchscrape: page discovery,
//! single page fetch-and-extract, and the worker pool that fans out over
//! every result page of a query.

/// Progress logging whose level follows the crawler's `verbose` setting
///
/// Verbose runs report at info level, quiet runs at debug level.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

pub mod fetcher;
pub mod page;
pub mod pagination;
pub mod pipeline;
pub mod url;

pub use fetcher::{HttpFetcher, HttpTransport};
pub use page::PageFetcher;
pub use pagination::{Discovery, PaginationDiscoverer};
pub use pipeline::{ScrapeCoordinator, ScrapeEvent, ScrapeReport};
pub use self::url::SearchUrlBuilder;
