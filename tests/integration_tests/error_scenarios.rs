//! Error scenario tests
//!
//! Failures at each level of the pipeline: discovery, a single page, a
//! single listing entry, and slow pages.

use std::time::Duration;

use benchscrape::crawler::ScrapeCoordinator;
use benchscrape::error::CrawlerError;
use benchscrape::models::NOT_AVAILABLE;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::pipeline_test::mount_page;
use crate::common::{crawler_config, listing_entry, malformed_entry, numbered_page, search_page};

// ============================================================================
// Discovery Failures
// ============================================================================

#[tokio::test]
async fn test_discovery_server_error_yields_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let coordinator = ScrapeCoordinator::new(crawler_config(&server.uri(), 4)).unwrap();

    assert!(coordinator.run("pixel").await.is_empty());
    assert!(matches!(
        coordinator.try_run("pixel").await,
        Err(CrawlerError::Discovery(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_yields_empty() {
    // Nothing listens on port 9 of the loopback interface
    let coordinator = ScrapeCoordinator::new(crawler_config("http://127.0.0.1:9", 2)).unwrap();
    assert!(coordinator.run("pixel").await.is_empty());
}

// ============================================================================
// Page Failures
// ============================================================================

#[tokio::test]
async fn test_failed_page_is_isolated() {
    let server = MockServer::start().await;
    mount_page(&server, 1, numbered_page(1, 3, 3), None).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_page(&server, 3, numbered_page(3, 3, 3), None).await;

    let report = ScrapeCoordinator::new(crawler_config(&server.uri(), 3))
        .unwrap()
        .try_run("pixel")
        .await
        .unwrap();

    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.records.len(), 6);
    assert!(report.records.iter().all(|r| !r.system.starts_with("Pixel 2")));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    mount_page(&server, 1, numbered_page(1, 2, 2), None).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(numbered_page(2, 2, 2))
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&server)
        .await;

    let mut config = crawler_config(&server.uri(), 2);
    config.page_timeout_secs = Some(1);
    let report = ScrapeCoordinator::new(config)
        .unwrap()
        .try_run("pixel")
        .await
        .unwrap();

    assert_eq!(report.pages_failed, 1);
    assert_eq!(report.records.len(), 2);
}

// ============================================================================
// Entry Failures
// ============================================================================

#[tokio::test]
async fn test_malformed_entry_is_isolated() {
    let server = MockServer::start().await;
    let page = search_page(
        &[
            malformed_entry(),
            listing_entry("/v6/cpu/42", "Galaxy S24", "ARM ARMv8 (8 cores)", &["2100", "6500"]),
        ],
        1,
    );
    mount_page(&server, 1, page, None).await;

    let records = ScrapeCoordinator::new(crawler_config(&server.uri(), 1))
        .unwrap()
        .run("pixel")
        .await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].system, "Galaxy S24");
    assert_eq!(records[0].model, "ARM ARMv8 (8 cores)");
}

#[tokio::test]
async fn test_missing_and_invalid_scores() {
    let server = MockServer::start().await;
    let page = search_page(
        &[
            listing_entry("/v6/cpu/1", "No scores", "ARM", &[]),
            listing_entry("/v6/cpu/2", "One score", "ARM", &["1500"]),
            listing_entry("/v6/cpu/3", "Pending", "ARM", &["-", "12a"]),
        ],
        1,
    );
    mount_page(&server, 1, page, None).await;

    let mut records = ScrapeCoordinator::new(crawler_config(&server.uri(), 1))
        .unwrap()
        .run("pixel")
        .await;
    records.sort_by(|a, b| a.url.cmp(&b.url));

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].single_core, NOT_AVAILABLE);
    assert_eq!(records[0].multi_core, NOT_AVAILABLE);
    assert_eq!(records[1].single_core, "1500");
    assert_eq!(records[1].multi_core, NOT_AVAILABLE);
    assert_eq!(records[2].single_core, NOT_AVAILABLE);
    assert_eq!(records[2].multi_core, NOT_AVAILABLE);
}
