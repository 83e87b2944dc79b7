use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use benchscrape::config::CrawlerConfig;
use benchscrape::crawler::ScrapeCoordinator;
use benchscrape::error::{Error, StoreError};
use benchscrape::models::Record;
use benchscrape::storage::{self, OutputFormat};

/// Which output files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSelection {
    pub xml: bool,
    pub json: bool,
    pub csv: bool,
    pub stats: bool,
}

impl OutputSelection {
    /// Resolve the output flags; `--all` selects everything and no flag at
    /// all falls back to XML
    pub fn from_flags(json: bool, xml: bool, csv: bool, stats: bool, all: bool) -> Self {
        let selection = Self {
            xml: xml || all,
            json: json || all,
            csv: csv || all,
            stats: stats || all,
        };

        if selection.is_empty() {
            Self {
                xml: true,
                ..selection
            }
        } else {
            selection
        }
    }

    fn is_empty(&self) -> bool {
        !(self.xml || self.json || self.csv || self.stats)
    }

    /// Selected record formats in write order
    pub fn formats(&self) -> Vec<OutputFormat> {
        OutputFormat::all()
            .into_iter()
            .filter(|format| match format {
                OutputFormat::Xml => self.xml,
                OutputFormat::Json => self.json,
                OutputFormat::Csv => self.csv,
            })
            .collect()
    }
}

/// Inputs of a scrape or re-analysis run
pub struct ScrapeParams {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub output: Option<String>,
    pub outputs: OutputSelection,
    pub crawler: CrawlerConfig,
}

/// Scrape `query`, or load `file`, then write the selected outputs
///
/// Returns a failure exit code when there is nothing to do, the input file
/// cannot be read, or no records were found. An empty query counts as no
/// query.
pub async fn scrape(params: ScrapeParams) -> Result<ExitCode> {
    let query = params.query.as_deref().filter(|q| !q.is_empty());

    let records = if let Some(file) = &params.file {
        println!("Parsing results from file: {}", file.display());
        match load(file) {
            Some(records) => records,
            None => return Ok(ExitCode::FAILURE),
        }
    } else if let Some(query) = query {
        println!(
            "Searching for: '{query}' with {} thread(s)",
            params.crawler.worker_count()
        );
        let started = Instant::now();
        let records = search(query, params.crawler.clone()).await?;
        println!(
            "Scraping completed in {:.2} seconds",
            started.elapsed().as_secs_f64()
        );
        records
    } else {
        eprintln!("Error: either a query or an input file must be specified");
        return Ok(ExitCode::FAILURE);
    };

    if records.is_empty() {
        eprintln!("No results found!");
        return Ok(ExitCode::FAILURE);
    }

    let stem = params.output.clone().unwrap_or_else(|| {
        let query = if params.file.is_some() { None } else { query };
        storage::default_stem(query, chrono::Utc::now())
    });

    write_outputs(&records, &stem, params.outputs)?;

    Ok(ExitCode::SUCCESS)
}

async fn search(query: &str, config: CrawlerConfig) -> Result<Vec<Record>> {
    let coordinator = ScrapeCoordinator::new(config)
        .map_err(Error::from)
        .context("Failed to create scrape coordinator")?;

    match coordinator.try_run(query).await {
        Ok(report) => {
            tracing::info!(
                records = report.records.len(),
                pages = report.pages_requested,
                failed = report.pages_failed,
                "Scrape finished"
            );
            Ok(report.records)
        }
        Err(e) => {
            let err = Error::from(e);
            tracing::error!(query, category = err.category().as_str(), error = %err, "Search failed");
            Ok(Vec::new())
        }
    }
}

fn load(path: &Path) -> Option<Vec<Record>> {
    match storage::load_records(path) {
        Ok(records) => Some(records),
        Err(e) => {
            let err = Error::from(e);
            tracing::debug!(category = err.category().as_str(), "Input file rejected");
            match &err {
                Error::Store(store @ (StoreError::NotFound(_) | StoreError::UnsupportedFormat(_))) => {
                    eprintln!("Error: {store}");
                }
                _ => eprintln!("Error parsing file {}: {err}", path.display()),
            }
            None
        }
    }
}

fn write_outputs(records: &[Record], stem: &str, outputs: OutputSelection) -> Result<()> {
    for format in outputs.formats() {
        let path = storage::record_path(stem, format);
        storage::save_records(records, &path, format)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{format} output saved to {}", path.display());
    }

    if outputs.stats {
        let path = storage::stats_path(stem);
        let stats = storage::save_statistics(records, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Statistics JSON saved to {}", path.display());

        println!("\nBenchmark Statistics:");
        println!("{}", storage::statistics_json(stats.as_ref())?);
    }

    Ok(())
}
