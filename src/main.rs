use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use benchscrape::config::Config;

mod commands;

use commands::{OutputSelection, ScrapeParams};

#[derive(Parser)]
#[command(
    name = "benchscrape",
    version,
    about = "Geekbench Browser scraper - collect and analyze CPU benchmark results",
    long_about = None
)]
struct Cli {
    /// Device model to search for (e.g. "sm-a566b")
    query: Option<String>,

    /// Number of concurrent page workers [default: 1]
    #[arg(short, long, allow_negative_numbers = true)]
    threads: Option<i64>,

    /// Maximum number of result pages (default: all)
    #[arg(short, long, allow_negative_numbers = true)]
    pages: Option<i64>,

    /// Parse results from a .json, .xml or .csv file instead of scraping
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base name for output files (without extension)
    #[arg(short, long)]
    output: Option<String>,

    /// Write results as JSON
    #[arg(long)]
    json: bool,

    /// Write results as XML
    #[arg(long)]
    xml: bool,

    /// Write results as CSV
    #[arg(long)]
    csv: bool,

    /// Write score statistics as JSON
    #[arg(long)]
    stats: bool,

    /// Write every output format
    #[arg(long)]
    all: bool,

    /// Disable per-page progress logging
    #[arg(short, long)]
    quiet: bool,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-page fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    let verbose = !cli.quiet && config.crawler.verbose;
    setup_tracing(&log_format, &config.logging.filter_directives(verbose))?;

    apply_overrides(&cli, &mut config);
    config.crawler.verbose = verbose;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded");

    let params = ScrapeParams {
        query: cli.query,
        file: cli.file,
        output: cli.output,
        outputs: OutputSelection::from_flags(cli.json, cli.xml, cli.csv, cli.stats, cli.all),
        crawler: config.crawler,
    };

    commands::scrape(params).await
}

/// Apply command-line flags on top of file or environment settings
///
/// Only flags that were given override; thread counts and page caps below 1
/// are raised to 1.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(threads) = cli.threads {
        if threads < 1 {
            tracing::warn!(threads, "Thread count must be at least 1. Using 1 thread.");
        }
        config.crawler.threads = usize::try_from(threads.max(1)).unwrap_or(usize::MAX);
    }

    if let Some(pages) = cli.pages {
        if pages < 1 {
            tracing::warn!(pages, "Page limit must be at least 1. Fetching 1 page.");
        }
        config.crawler.max_pages = Some(u32::try_from(pages.max(1)).unwrap_or(u32::MAX));
    }

    if cli.timeout.is_some() {
        config.crawler.page_timeout_secs = cli.timeout;
    }
}

fn setup_tracing(format: &str, directives: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overridden(args: &[&str], config: Config) -> Config {
        let cli = Cli::try_parse_from(std::iter::once("benchscrape").chain(args.iter().copied()))
            .unwrap();
        let mut config = config;
        apply_overrides(&cli, &mut config);
        config
    }

    fn file_config() -> Config {
        toml::from_str(
            r#"
            [crawler]
            threads = 6
            max_pages = 4
            page_timeout_secs = 20
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_values_kept_without_flags() {
        let config = overridden(&["pixel"], file_config());
        assert_eq!(config.crawler.threads, 6);
        assert_eq!(config.crawler.max_pages, Some(4));
        assert_eq!(config.crawler.page_timeout_secs, Some(20));
    }

    #[test]
    fn test_flags_override_config() {
        let config = overridden(
            &["pixel", "-t", "3", "-p", "2", "--timeout", "5"],
            file_config(),
        );
        assert_eq!(config.crawler.threads, 3);
        assert_eq!(config.crawler.max_pages, Some(2));
        assert_eq!(config.crawler.page_timeout_secs, Some(5));
    }

    #[test]
    fn test_values_below_one_clamped() {
        let config = overridden(&["pixel", "-t", "0", "-p", "-1"], file_config());
        assert_eq!(config.crawler.threads, 1);
        assert_eq!(config.crawler.max_pages, Some(1));

        let config = overridden(&["pixel", "--threads", "-4"], Config::default());
        assert_eq!(config.crawler.threads, 1);
    }

    #[test]
    fn test_output_flags_parse() {
        let cli = Cli::try_parse_from(["benchscrape", "-f", "in.json", "--all", "-o", "out"]).unwrap();
        assert!(cli.query.is_none());
        assert!(cli.all);
        assert_eq!(cli.output.as_deref(), Some("out"));
    }
}
