//! benchscrape - Concurrent Geekbench Browser scraper
//!
//! Searches the Geekbench Browser for a device or processor, fetches every
//! result page through a bounded worker pool, and turns each listing entry
//! into a [`Record`]. Collections can be saved as JSON, XML or CSV, loaded
//! back, and summarised into score statistics.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page discovery, page fetching and the worker pool
//! - [`parser`] - HTML listing and pagination extraction
//! - [`models`] - The benchmark record
//! - [`analytics`] - Score statistics
//! - [`storage`] - JSON, XML and CSV result files
//! - [`utils`] - Common utilities and domain error types
//!
//! # Example
//!
//! ```no_run
//! use benchscrape::config::Config;
//! use benchscrape::crawler::ScrapeCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let coordinator = ScrapeCoordinator::new(config.crawler)?;
//!     let records = coordinator.run("sm-a566b").await;
//!     let stats = benchscrape::analytics::calculate_statistics(&records);
//!     println!("{stats:?}");
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{calculate_statistics, ScoreStatistics};
    pub use crate::config::{Config, CrawlerConfig};
    pub use crate::crawler::{HttpTransport, ScrapeCoordinator, ScrapeEvent, ScrapeReport};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::Record;
    pub use crate::storage::{load_records, save_records, save_statistics, OutputFormat};
}

// Direct re-exports for convenience
pub use models::Record;
