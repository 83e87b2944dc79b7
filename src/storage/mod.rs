//! Result file storage
//!
//! This module writes a record collection as JSON, XML or CSV, writes the
//! statistics file, and reads any of the three record formats back.

pub mod csv_store;
pub mod json_store;
pub mod xml_store;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::analytics::{calculate_statistics, ScoreStatistics};
use crate::models::Record;
use crate::utils::error::StoreError;
use crate::utils::sanitize_filename;

/// Record file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Xml,
    Csv,
}

impl OutputFormat {
    /// All record formats
    pub fn all() -> [Self; 3] {
        [Self::Xml, Self::Json, Self::Csv]
    }

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Csv => "csv",
        }
    }

    /// Detect the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnsupportedFormat` for anything but
    /// `.json`, `.xml` and `.csv`.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("xml") => Ok(Self::Xml),
            Some("csv") => Ok(Self::Csv),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Encode records in this format
    ///
    /// # Errors
    ///
    /// Returns the encoder's error.
    pub fn encode(&self, records: &[Record]) -> Result<String, StoreError> {
        match self {
            Self::Json => json_store::to_string(records),
            Self::Xml => xml_store::to_string(records),
            Self::Csv => csv_store::to_string(records),
        }
    }

    /// Decode records from this format
    ///
    /// # Errors
    ///
    /// Returns the decoder's error on malformed input.
    pub fn decode(&self, content: &str) -> Result<Vec<Record>, StoreError> {
        match self {
            Self::Json => json_store::from_str(content),
            Self::Xml => xml_store::from_str(content),
            Self::Csv => csv_store::from_str(content),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Xml => write!(f, "XML"),
            Self::Csv => write!(f, "CSV"),
        }
    }
}

/// Read a result file, picking the format from its extension
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the file does not exist,
/// `StoreError::UnsupportedFormat` for unknown extensions, the decoder's
/// error for malformed content, and `StoreError::ScoreOutOfRange` when an
/// all-digit score does not fit in a `u64`.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    let format = OutputFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let records = format.decode(&content)?;

    if let Some(score) = records.iter().find_map(Record::out_of_range_score) {
        return Err(StoreError::ScoreOutOfRange(score.to_string()));
    }

    tracing::debug!(path = %path.display(), %format, count = records.len(), "Loaded records");
    Ok(records)
}

/// Write records to `path` in `format`
///
/// # Errors
///
/// Returns the encoder's error or `StoreError::Io`.
pub fn save_records(records: &[Record], path: &Path, format: OutputFormat) -> Result<(), StoreError> {
    let content = format.encode(records)?;
    fs::write(path, content)?;

    tracing::debug!(path = %path.display(), %format, count = records.len(), "Saved records");
    Ok(())
}

/// Compute statistics for `records` and write them as a JSON object
///
/// With no numeric samples the file holds `{}`.
///
/// # Errors
///
/// Returns `StoreError::Json` or `StoreError::Io`.
pub fn save_statistics(
    records: &[Record],
    path: &Path,
) -> Result<Option<ScoreStatistics>, StoreError> {
    let stats = calculate_statistics(records);
    fs::write(path, statistics_json(stats.as_ref())?)?;
    Ok(stats)
}

/// Pretty JSON object for optional statistics
///
/// # Errors
///
/// Returns `StoreError::Json` if serialization fails.
pub fn statistics_json(stats: Option<&ScoreStatistics>) -> Result<String, StoreError> {
    let value = match stats {
        Some(stats) => serde_json::to_value(stats)?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Default output file stem
///
/// `results_{timestamp}_{query}` for scrapes, `results_{timestamp}_parsed`
/// for re-analysed files. The query is made filename-safe.
#[must_use]
pub fn default_stem(query: Option<&str>, now: DateTime<Utc>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    match query {
        Some(query) => format!("results_{timestamp}_{}", sanitize_filename(query)),
        None => format!("results_{timestamp}_parsed"),
    }
}

/// Path of a record file for `stem`
#[must_use]
pub fn record_path(stem: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{stem}.{}", format.extension()))
}

/// Path of the statistics file for `stem`
#[must_use]
pub fn stats_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{stem}_stats.json"))
}
