//! Worker pool based scrape pipeline
//!
//! This module implements the multi-page fetch using tokio tasks fed from a
//! shared mpsc queue, with a single collector gathering finished pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Discovery  │     │  Page URL   │     │    Page     │     │  Collector  │
//! │ (1st page)  │────▶│    Queue    │────▶│   Workers   │────▶│   (merge)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                           │                   │                   │
//!                      mpsc channel        mpsc channel             │
//!                           │                   │                   │
//!                           └───────────────────┴───────────────────┘
//!                                              │
//!                                       ScrapeEvent stream
//! ```
//!
//! Pages finish in any order; the merged collection only guarantees
//! membership, not order.
//!
//! # Example
//!
//! ```no_run
//! use benchscrape::config::CrawlerConfig;
//! use benchscrape::crawler::pipeline::ScrapeCoordinator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = CrawlerConfig {
//!     threads: 4,
//!     max_pages: Some(5),
//!     ..CrawlerConfig::default()
//! };
//! let coordinator = ScrapeCoordinator::new(config)?;
//! let records = coordinator.run("sm-a566b").await;
//!
//! println!("Collected {} records", records.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{HttpFetcher, HttpTransport};
use crate::crawler::page::PageFetcher;
use crate::crawler::pagination::{Discovery, PaginationDiscoverer};
use crate::crawler::url::SearchUrlBuilder;
use crate::models::Record;
use crate::utils::error::{CrawlerError, FetchError};

// ============================================================================
// Message Types
// ============================================================================

/// Message from the URL queue to a worker
#[derive(Debug, Clone)]
struct PageJob {
    /// 1-based page number
    page: u32,

    /// Page URL
    url: String,
}

/// Message from a worker to the collector
#[derive(Debug)]
struct PageResult {
    page: u32,
    elapsed: Duration,
    outcome: Result<Vec<Record>, FetchError>,
}

/// Progress notification emitted while scraping
///
/// Purely observational: dropping the receiver never affects the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    /// First page fetched and pagination read
    DiscoveryCompleted { total_pages: u32, pages_to_fetch: u32 },

    /// First page could not be fetched
    DiscoveryFailed { error: String },

    /// A worker picked up a page
    PageStarted { page: u32, url: String },

    /// A page was fetched and parsed
    PageCompleted {
        page: u32,
        records: usize,
        elapsed: Duration,
    },

    /// A page fetch failed; it contributes no records
    PageFailed { page: u32, error: String },

    /// All workers joined
    Finished { total_records: usize },
}

// ============================================================================
// Report
// ============================================================================

/// Result of a full scrape
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// Merged records in completion order
    pub records: Vec<Record>,

    /// Pages advertised by the pagination control
    pub total_pages: u32,

    /// Pages handed to the worker pool
    pub pages_requested: u32,

    /// Pages whose fetch failed
    pub pages_failed: u32,
}

// ============================================================================
// Coordinator
// ============================================================================

/// Orchestrates discovery and the page worker pool
pub struct ScrapeCoordinator {
    transport: Arc<dyn HttpTransport>,
    urls: SearchUrlBuilder,
    config: CrawlerConfig,
    events: Option<mpsc::UnboundedSender<ScrapeEvent>>,
}

impl ScrapeCoordinator {
    /// Create a coordinator backed by a real HTTP client
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: CrawlerConfig) -> Result<Self, FetchError> {
        let transport = Arc::new(HttpFetcher::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// Create a coordinator over any transport
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the configured base URL is invalid.
    pub fn with_transport(
        config: CrawlerConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, FetchError> {
        let urls = SearchUrlBuilder::new(&config.base_url)?;
        Ok(Self {
            transport,
            urls,
            config,
            events: None,
        })
    }

    /// Send progress notifications to `events`
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ScrapeEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Scrape every page of `query`
    ///
    /// A failed discovery yields an empty collection, the same as a query
    /// with no hits. Use [`try_run`](Self::try_run) to tell them apart.
    pub async fn run(&self, query: &str) -> Vec<Record> {
        match self.try_run(query).await {
            Ok(report) => report.records,
            Err(e) => {
                tracing::error!(query, error = %e, "Scrape aborted");
                Vec::new()
            }
        }
    }

    /// Scrape every page of `query`, reporting discovery failure
    ///
    /// # Errors
    ///
    /// Returns `CrawlerError::Discovery` if the first page cannot be fetched.
    /// Failures of later pages are absorbed into the report.
    pub async fn try_run(&self, query: &str) -> Result<ScrapeReport, CrawlerError> {
        progress!(
            self.config.verbose,
            query,
            threads = self.config.worker_count(),
            max_pages = ?self.config.max_pages,
            "Starting search"
        );

        let discoverer = PaginationDiscoverer::new(
            Arc::clone(&self.transport),
            self.urls.clone(),
            self.config.page_timeout(),
            self.config.verbose,
        );

        let discovery = match discoverer.discover(query, self.config.max_pages).await {
            Ok(discovery) => discovery,
            Err(e) => {
                self.emit(ScrapeEvent::DiscoveryFailed {
                    error: e.to_string(),
                });
                return Err(e);
            }
        };

        self.emit(ScrapeEvent::DiscoveryCompleted {
            total_pages: discovery.total_pages,
            pages_to_fetch: discovery.pages_to_fetch,
        });

        Ok(self.fetch_pages(&discovery).await)
    }

    /// Fetch every page of a discovery through the worker pool
    pub async fn fetch_pages(&self, discovery: &Discovery) -> ScrapeReport {
        let urls = discovery.page_urls();
        let pages_requested = urls.len() as u32;
        let workers = self.config.worker_count().min(urls.len().max(1));

        let fetcher = Arc::new(PageFetcher::new(
            Arc::clone(&self.transport),
            self.urls.base_url().clone(),
            self.config.page_timeout(),
            self.config.verbose,
        ));

        // Queue holds every job up front, so sends never wait on workers
        let (job_tx, job_rx) = mpsc::channel::<PageJob>(urls.len().max(1));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<PageResult>();

        for (idx, url) in urls.into_iter().enumerate() {
            let job = PageJob {
                page: idx as u32 + 1,
                url,
            };
            if job_tx.send(job).await.is_err() {
                tracing::error!("Failed to queue page job - channel closed");
                break;
            }
        }
        drop(job_tx);

        let handles = self.spawn_workers(workers, fetcher, job_rx, result_tx);

        let mut report = ScrapeReport {
            total_pages: discovery.total_pages,
            pages_requested,
            ..ScrapeReport::default()
        };

        // Completion order
        while let Some(result) = result_rx.recv().await {
            match result.outcome {
                Ok(records) => {
                    self.emit(ScrapeEvent::PageCompleted {
                        page: result.page,
                        records: records.len(),
                        elapsed: result.elapsed,
                    });
                    report.records.extend(records);
                }
                Err(e) => {
                    progress!(self.config.verbose, page = result.page, error = %e, "Page failed");
                    self.emit(ScrapeEvent::PageFailed {
                        page: result.page,
                        error: e.to_string(),
                    });
                    report.pages_failed += 1;
                }
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Page worker panicked");
            }
        }

        progress!(
            self.config.verbose,
            total_records = report.records.len(),
            pages = report.pages_requested,
            failed = report.pages_failed,
            "Total results collected"
        );
        self.emit(ScrapeEvent::Finished {
            total_records: report.records.len(),
        });

        report
    }

    /// Spawn page worker tasks
    fn spawn_workers(
        &self,
        count: usize,
        fetcher: Arc<PageFetcher>,
        job_rx: mpsc::Receiver<PageJob>,
        result_tx: mpsc::UnboundedSender<PageResult>,
    ) -> Vec<JoinHandle<()>> {
        let job_rx = Arc::new(tokio::sync::Mutex::new(job_rx));
        let mut handles = Vec::with_capacity(count);

        for worker_id in 0..count {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let fetcher = Arc::clone(&fetcher);
            let events = self.events.clone();

            let handle = tokio::spawn(async move {
                loop {
                    let job = {
                        let mut rx = job_rx.lock().await;
                        rx.recv().await
                    };

                    let Some(job) = job else {
                        break; // Queue drained
                    };

                    tracing::debug!(worker_id, page = job.page, "Worker picked up page");
                    if let Some(events) = &events {
                        let _ = events.send(ScrapeEvent::PageStarted {
                            page: job.page,
                            url: job.url.clone(),
                        });
                    }

                    let started = Instant::now();
                    let outcome = fetcher.try_fetch_page(&job.url, job.page).await;

                    let result = PageResult {
                        page: job.page,
                        elapsed: started.elapsed(),
                        outcome,
                    };
                    if result_tx.send(result).is_err() {
                        tracing::error!(worker_id, "Result channel closed");
                        break;
                    }
                }

                tracing::debug!(worker_id, "Page worker shutting down");
            });

            handles.push(handle);
        }

        handles
    }

    fn emit(&self, event: ScrapeEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}
