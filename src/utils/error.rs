//! Error types for the benchscrape crawler
//!
//! This module defines the domain-specific error types used throughout the
//! crawler, parser and result store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error (connection refused, DNS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code
    #[error("Server returned status {0}")]
    Status(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors that can occur while extracting a record from a listing container
#[derive(Error, Debug)]
pub enum ParseError {
    /// The container has no model span
    #[error("Model span not found in listing entry")]
    MissingModel,

    /// The detail link has no href attribute
    #[error("Detail link has no href attribute")]
    MissingHref,

    /// Detail link could not be resolved against the base URL
    #[error("Invalid detail link: {0}")]
    InvalidLink(String),
}

/// General crawler errors
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// The first search page could not be fetched
    #[error("Discovery failed: {0}")]
    Discovery(#[source] FetchError),
}

/// Errors raised while reading or writing result files
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input file does not exist
    #[error("File not found - {}", .0.display())]
    NotFound(PathBuf),

    /// Unknown file extension
    #[error("Unsupported file format - {0}")]
    UnsupportedFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML reader or writer error
    #[error("XML error: {0}")]
    Xml(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Numeric score too large to summarise
    #[error("Score out of range - {0}")]
    ScoreOutOfRange(String),
}

impl StoreError {
    /// Wrap any quick-xml error
    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}
