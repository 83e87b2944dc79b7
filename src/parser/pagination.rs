//! Pagination control parser

use scraper::Html;

use crate::parser::selectors::PaginationSelectors;

/// Total number of result pages advertised by a search page
///
/// The highest numeric page link wins. A page without a pagination control,
/// or whose control has no numeric links, is page 1 of 1.
pub fn total_pages(html: &str) -> u32 {
    let selectors = PaginationSelectors::new();
    let document = Html::parse_document(html);

    let Some(control) = document.select(selectors.control).next() else {
        return 1;
    };

    control
        .select(selectors.link)
        .filter_map(|link| {
            let text = link.text().collect::<String>();
            let text = text.trim();
            if crate::utils::is_ascii_digits(text) {
                text.parse::<u32>().ok()
            } else {
                None
            }
        })
        .filter(|&page| page > 0)
        .max()
        .unwrap_or(1)
}

/// Number of pages to actually fetch
///
/// A cap below 1 counts as 1; `None` fetches everything discovered.
#[must_use]
pub fn pages_to_fetch(total: u32, cap: Option<u32>) -> u32 {
    match cap {
        Some(cap) => total.min(cap.max(1)),
        None => total,
    }
}
