//! Unified error handling for the benchscrape crate
//!
//! Domain errors live in [`crate::utils::error`]; [`Error`] gathers the ones
//! that reach the command layer so they can be classified for reporting.
//!
//! # Usage
//!
//! ```rust,ignore
//! use benchscrape::error::{Error, ErrorCategory};
//!
//! fn report(err: Error) {
//!     if err.category() == ErrorCategory::Storage {
//!         eprintln!("Could not read results: {err}");
//!     }
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{CrawlerError, FetchError, ParseError, StoreError};

/// Coarse classification used in log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures: HTTP, timeouts, bad status
    Network,
    /// Malformed or out-of-range file content
    Parsing,
    /// Missing files, unknown formats, I/O
    Storage,
    /// Invalid settings
    Config,
}

impl ErrorCategory {
    /// Short label for structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }
}

/// Errors surfaced to the command layer
#[derive(Error, Debug)]
pub enum Error {
    /// A scrape could not start
    #[error("Crawler error: {0}")]
    Crawler(#[from] CrawlerError),

    /// The HTTP client could not be set up
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A result file could not be read or written
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A configuration value is out of bounds
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Crawler(_) | Self::Fetch(_) => ErrorCategory::Network,
            Self::Store(
                StoreError::Json(_)
                | StoreError::Xml(_)
                | StoreError::Csv(_)
                | StoreError::ScoreOutOfRange(_),
            ) => ErrorCategory::Parsing,
            Self::Store(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
