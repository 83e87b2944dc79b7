// Core data structures for the benchscrape crawler

use serde::{Deserialize, Serialize};

/// Placeholder for a label that could not be extracted
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a score that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// One Geekbench result entry
///
/// Scores stay textual so that `"N/A"` and other non-numeric values survive
/// every output format unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    #[serde(default = "unknown")]
    pub system: String,
    #[serde(default = "unknown")]
    pub model: String,
    #[serde(default = "not_available")]
    pub single_core: String,
    #[serde(default = "not_available")]
    pub multi_core: String,
    #[serde(default)]
    pub url: Option<String>, // absolute detail page URL
}

impl Record {
    /// Build a record, substituting placeholders for empty fields
    pub fn new(
        system: impl Into<String>,
        model: impl Into<String>,
        single_core: impl Into<String>,
        multi_core: impl Into<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            system: non_empty_or(system.into(), UNKNOWN),
            model: non_empty_or(model.into(), UNKNOWN),
            single_core: non_empty_or(single_core.into(), NOT_AVAILABLE),
            multi_core: non_empty_or(multi_core.into(), NOT_AVAILABLE),
            url: url.filter(|u| !u.is_empty()),
        }
    }

    /// Both scores parsed as integers, if both are numeric
    pub fn numeric_scores(&self) -> Option<(u64, u64)> {
        Some((parse_score(&self.single_core)?, parse_score(&self.multi_core)?))
    }

    /// The first score that is all digits but too large for `u64`
    pub fn out_of_range_score(&self) -> Option<&str> {
        [self.single_core.as_str(), self.multi_core.as_str()]
            .into_iter()
            .find(|score| is_out_of_range(score))
    }
}

fn parse_score(score: &str) -> Option<u64> {
    if crate::utils::is_ascii_digits(score) {
        score.parse().ok()
    } else {
        None
    }
}

/// All-digit text that does not fit in a `u64`
pub fn is_out_of_range(score: &str) -> bool {
    crate::utils::is_ascii_digits(score) && score.parse::<u64>().is_err()
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_placeholders() {
        let record = Record::new("", "", "", "", Some(String::new()));
        assert_eq!(record.system, UNKNOWN);
        assert_eq!(record.model, UNKNOWN);
        assert_eq!(record.single_core, NOT_AVAILABLE);
        assert_eq!(record.multi_core, NOT_AVAILABLE);
        assert!(record.url.is_none());
    }

    #[test]
    fn test_numeric_scores() {
        let record = Record::new("Samsung", "ARM", "1024", "3072", None);
        assert_eq!(record.numeric_scores(), Some((1024, 3072)));

        let partial = Record::new("Samsung", "ARM", "1024", NOT_AVAILABLE, None);
        assert_eq!(partial.numeric_scores(), None);

        assert_eq!(record.out_of_range_score(), None);
    }

    #[test]
    fn test_out_of_range_score() {
        let overflow = Record::new("Samsung", "ARM", "1", "99999999999999999999999", None);
        assert_eq!(overflow.out_of_range_score(), Some("99999999999999999999999"));
        assert!(is_out_of_range("18446744073709551616"));
        assert!(!is_out_of_range("18446744073709551615"));
        assert!(!is_out_of_range(NOT_AVAILABLE));
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"system": "Pixel 8"}"#).unwrap();
        assert_eq!(record.system, "Pixel 8");
        assert_eq!(record.model, UNKNOWN);
        assert_eq!(record.single_core, NOT_AVAILABLE);
        assert!(record.url.is_none());
    }

    #[test]
    fn test_serialize_null_url() {
        let record = Record::new("Pixel 8", "Google Tensor G3", "1700", "4300", None);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("url").unwrap().is_null());
    }
}
