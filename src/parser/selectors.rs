//! CSS selectors for Geekbench Browser search result pages
//!
//! Selectors are compiled once and shared by every parser instance.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // One search hit
    static ref LISTING_CONTAINER: Selector = parse_selector!("div.list-col");

    // Device column link: text is the system label, href the detail page
    static ref LISTING_LINK: Selector = parse_selector!("div.col-12.col-lg-4 a");

    static ref LISTING_MODEL: Selector = parse_selector!("span.list-col-model");

    // Single-core then multi-core, in document order
    static ref LISTING_SCORE: Selector = parse_selector!("span.list-col-text-score");

    static ref PAGINATION: Selector = parse_selector!("ul.pagination");

    static ref PAGINATION_LINK: Selector = parse_selector!("a.page-link");
}

/// Selectors for the result entries of a search page
pub struct ListingSelectors {
    pub container: &'static Selector,
    pub link: &'static Selector,
    pub model: &'static Selector,
    pub score: &'static Selector,
}

impl ListingSelectors {
    pub fn new() -> Self {
        Self {
            container: &LISTING_CONTAINER,
            link: &LISTING_LINK,
            model: &LISTING_MODEL,
            score: &LISTING_SCORE,
        }
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for the pagination control
pub struct PaginationSelectors {
    pub control: &'static Selector,
    pub link: &'static Selector,
}

impl PaginationSelectors {
    pub fn new() -> Self {
        Self {
            control: &PAGINATION,
            link: &PAGINATION_LINK,
        }
    }
}

impl Default for PaginationSelectors {
    fn default() -> Self {
        Self::new()
    }
}
