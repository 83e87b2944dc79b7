//! JSON record files
//!
//! A pretty-printed array of objects with the keys `system`, `model`,
//! `single_core`, `multi_core` and `url` (`null` when absent).

use crate::models::Record;
use crate::utils::error::StoreError;

/// Encode records as a JSON array
///
/// # Errors
///
/// Returns `StoreError::Json` if serialization fails.
pub fn to_string(records: &[Record]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Decode a JSON array of records
///
/// Missing keys fall back to `"Unknown"`, `"N/A"` or no URL.
///
/// # Errors
///
/// Returns `StoreError::Json` on malformed input.
pub fn from_str(content: &str) -> Result<Vec<Record>, StoreError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_url_round_trip() {
        let records = vec![Record::new("Pixel 8", "Tensor G3", "N/A", "4300", None)];
        let json = to_string(&records).unwrap();

        assert!(json.contains("\"url\": null"));
        assert_eq!(from_str(&json).unwrap(), records);
    }

    #[test]
    fn test_key_names() {
        let records = vec![Record::new("a", "b", "1", "2", Some("https://x/1".into()))];
        let value: serde_json::Value = serde_json::from_str(&to_string(&records).unwrap()).unwrap();
        let object = value[0].as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["model", "multi_core", "single_core", "system", "url"]);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(from_str("{not json"), Err(StoreError::Json(_))));
        assert!(matches!(from_str(r#"{"system": "x"}"#), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_empty_array() {
        assert!(from_str("[]").unwrap().is_empty());
    }
}
