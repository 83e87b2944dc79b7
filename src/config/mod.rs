//! Configuration management for the benchscrape crawler
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Accepted values for `LoggingConfig::level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Default Geekbench Browser endpoint
pub const DEFAULT_BASE_URL: &str = "https://browser.geekbench.com";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Site root used to build search and detail URLs
    pub base_url: String,

    /// Worker pool size
    pub threads: usize,

    /// Maximum number of result pages to fetch (None = all)
    pub max_pages: Option<u32>,

    /// HTTP client timeout in seconds
    pub request_timeout_secs: u64,

    /// Optional bound on a single page fetch, in seconds
    pub page_timeout_secs: Option<u64>,

    /// User agent string
    pub user_agent: String,

    /// Emit per-page progress notifications
    pub verbose: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = CrawlerConfig::default();

        let base_url =
            std::env::var("BENCHSCRAPE_BASE_URL").unwrap_or_else(|_| defaults.base_url.clone());

        let threads = std::env::var("BENCHSCRAPE_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.threads);

        let request_timeout_secs = std::env::var("BENCHSCRAPE_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let page_timeout_secs = std::env::var("BENCHSCRAPE_PAGE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        let user_agent =
            std::env::var("BENCHSCRAPE_USER_AGENT").unwrap_or_else(|_| defaults.user_agent.clone());

        let log_level =
            std::env::var("BENCHSCRAPE_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("BENCHSCRAPE_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            crawler: CrawlerConfig {
                base_url,
                threads,
                max_pages: None,
                request_timeout_secs,
                page_timeout_secs,
                user_agent,
                verbose: defaults.verbose,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first invalid setting.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.crawler.threads == 0 {
            return Err(Error::config("threads must be greater than 0"));
        }

        if self.crawler.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        if self.crawler.page_timeout_secs == Some(0) {
            return Err(Error::config("page_timeout_secs must be greater than 0"));
        }

        if let Err(e) = url::Url::parse(&self.crawler.base_url) {
            return Err(Error::config(format!(
                "Invalid base_url: {} ({e})",
                self.crawler.base_url
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::config(format!(
                "Invalid log level: {} (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl CrawlerConfig {
    /// HTTP client timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Worker pool size, clamped to at least one worker
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.threads.max(1)
    }

    /// Per-page fetch bound, if configured
    #[must_use]
    pub fn page_timeout(&self) -> Option<Duration> {
        self.page_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            threads: 1,
            max_pages: None,
            request_timeout_secs: 30,
            page_timeout_secs: None,
            user_agent: format!("benchscrape/{}", env!("CARGO_PKG_VERSION")),
            verbose: true,
        }
    }
}

impl LoggingConfig {
    /// Default tracing filter directives when `RUST_LOG` is not set
    ///
    /// `level` applies to every crate; the crawler's own progress logging is
    /// raised to `debug` on verbose runs and kept at `info` otherwise.
    #[must_use]
    pub fn filter_directives(&self, verbose: bool) -> String {
        let own = if verbose { "debug" } else { "info" };
        format!("benchscrape={own},{}", self.level.to_ascii_lowercase())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
