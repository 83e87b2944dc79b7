//! Search result listing parser
//!
//! Turns one Geekbench Browser search page into benchmark records. Each
//! result entry is extracted on its own, so a malformed entry only costs
//! that entry.

use scraper::{ElementRef, Html};
use url::Url;

use crate::models::{is_out_of_range, Record, NOT_AVAILABLE, UNKNOWN};
use crate::parser::selectors::ListingSelectors;
use crate::utils::error::ParseError;
use crate::utils::{is_ascii_digits, normalize_whitespace};

/// Listing page parser
pub struct ListingParser {
    selectors: ListingSelectors,
    base_url: Url,
}

impl ListingParser {
    /// Create a parser resolving detail links against `base_url`
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            selectors: ListingSelectors::new(),
            base_url,
        }
    }

    /// Extract every result entry of a page, one outcome per entry
    ///
    /// Entries come back in document order. Callers decide what to do with
    /// the failures; the page itself never fails.
    pub fn parse_entries(&self, html: &str) -> Vec<Result<Record, ParseError>> {
        let document = Html::parse_document(html);

        document
            .select(self.selectors.container)
            .map(|entry| self.extract_record(entry))
            .collect()
    }

    /// Extract the records of a page, dropping entries that fail
    pub fn parse_records(&self, html: &str) -> Vec<Record> {
        self.parse_entries(html)
            .into_iter()
            .filter_map(Result::ok)
            .collect()
    }

    /// Extract a single result entry
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingModel` if the entry has no model span,
    /// `ParseError::MissingHref` if the device link has no target and
    /// `ParseError::InvalidLink` if the target cannot be resolved.
    pub fn extract_record(&self, entry: ElementRef<'_>) -> Result<Record, ParseError> {
        let (system, url) = match entry.select(self.selectors.link).next() {
            Some(link) => {
                let href = link.value().attr("href").ok_or(ParseError::MissingHref)?;
                let url = self
                    .base_url
                    .join(href)
                    .map_err(|e| ParseError::InvalidLink(format!("{href}: {e}")))?;
                (collect_text(link).trim().to_string(), Some(url.to_string()))
            }
            None => (UNKNOWN.to_string(), None),
        };

        let model = entry
            .select(self.selectors.model)
            .next()
            .map(|span| normalize_whitespace(&join_text_nodes(span)))
            .ok_or(ParseError::MissingModel)?;

        let mut scores = entry
            .select(self.selectors.score)
            .map(|span| score_text(&collect_text(span)));
        let single_core = scores.next().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let multi_core = scores.next().unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Ok(Record::new(system, model, single_core, multi_core, url))
    }
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Trimmed non-empty text nodes joined by single spaces
///
/// Line breaks and nested tags separate tokens even without surrounding
/// whitespace in the markup.
fn join_text_nodes(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep a score only if it is a plain integer that fits in a `u64`
fn score_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_out_of_range(trimmed) {
        tracing::warn!(score = trimmed, "Score too large, recorded as N/A");
        NOT_AVAILABLE.to_string()
    } else if is_ascii_digits(trimmed) {
        trimmed.to_string()
    } else {
        NOT_AVAILABLE.to_string()
    }
}
