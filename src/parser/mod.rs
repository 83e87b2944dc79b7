//! HTML parsing and data extraction
//!
//! This module handles parsing Geekbench Browser search pages: the result
//! listing itself and the pagination control below it.

pub mod listing;
pub mod pagination;
pub mod selectors;

// Re-export main parser and public types
pub use listing::ListingParser;
pub use pagination::{pages_to_fetch, total_pages};
pub use selectors::{ListingSelectors, PaginationSelectors};
