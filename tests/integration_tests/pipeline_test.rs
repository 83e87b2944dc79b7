//! End-to-end scrape pipeline tests
//!
//! Tests the complete workflow:
//! 1. Discovery of the page count from the first search page
//! 2. Page fetch through the worker pool (mocked HTTP)
//! 3. Listing extraction
//! 4. Merge and statistics

use std::collections::HashSet;

use benchscrape::analytics::calculate_statistics;
use benchscrape::crawler::ScrapeCoordinator;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{crawler_config, numbered_page, sorted};

const QUERY: &str = "pixel";

/// Serve page `page` of the search for `QUERY`, expecting `hits` requests
pub async fn mount_page(server: &MockServer, page: u32, body: String, hits: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", QUERY));
    let mock = if page == 1 {
        mock.and(query_param_is_missing("page"))
    } else {
        mock.and(query_param("page", page.to_string()))
    };

    let mock = mock.respond_with(ResponseTemplate::new(200).set_body_string(body));
    match hits {
        Some(hits) => mock.expect(hits).mount(server).await,
        None => mock.mount(server).await,
    }
}

async fn three_page_site(hits: Option<u64>) -> MockServer {
    let server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&server, page, numbered_page(page, 3, 3), hits).await;
    }
    server
}

// ============================================================================
// Complete Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_scrape_collects_every_page() {
    let server = MockServer::start().await;
    // Discovery and the worker pool both fetch the first page
    mount_page(&server, 1, numbered_page(1, 3, 3), Some(2)).await;
    mount_page(&server, 2, numbered_page(2, 3, 3), Some(1)).await;
    mount_page(&server, 3, numbered_page(3, 3, 3), Some(1)).await;

    let coordinator = ScrapeCoordinator::new(crawler_config(&server.uri(), 3)).unwrap();
    let report = coordinator.try_run(QUERY).await.unwrap();

    assert_eq!(report.total_pages, 3);
    assert_eq!(report.pages_requested, 3);
    assert_eq!(report.pages_failed, 0);
    assert_eq!(report.records.len(), 9);

    let urls: HashSet<String> = report.records.iter().filter_map(|r| r.url.clone()).collect();
    assert_eq!(urls.len(), 9);
    assert!(urls.contains(&format!("{}/v6/cpu/302", server.uri())));
}

#[tokio::test]
async fn test_page_cap_skips_later_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, numbered_page(1, 3, 3), Some(2)).await;
    mount_page(&server, 2, numbered_page(2, 3, 3), Some(1)).await;
    mount_page(&server, 3, numbered_page(3, 3, 3), Some(0)).await;

    let mut config = crawler_config(&server.uri(), 2);
    config.max_pages = Some(2);
    let report = ScrapeCoordinator::new(config)
        .unwrap()
        .try_run(QUERY)
        .await
        .unwrap();

    assert_eq!(report.total_pages, 3);
    assert_eq!(report.pages_requested, 2);
    assert_eq!(report.records.len(), 6);
    assert!(report
        .records
        .iter()
        .all(|r| !r.system.starts_with("Pixel 3")));
}

#[tokio::test]
async fn test_single_page_without_pagination() {
    let server = MockServer::start().await;
    mount_page(&server, 1, numbered_page(1, 2, 1), Some(2)).await;

    let records = ScrapeCoordinator::new(crawler_config(&server.uri(), 4))
        .unwrap()
        .run(QUERY)
        .await;

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_pool_size_does_not_change_membership() {
    let server = three_page_site(None).await;

    let single = ScrapeCoordinator::new(crawler_config(&server.uri(), 1))
        .unwrap()
        .run(QUERY)
        .await;
    let pooled = ScrapeCoordinator::new(crawler_config(&server.uri(), 8))
        .unwrap()
        .run(QUERY)
        .await;

    assert_eq!(single.len(), 9);
    assert_eq!(sorted(single), sorted(pooled));
}

#[tokio::test]
async fn test_statistics_over_scraped_records() {
    let server = three_page_site(None).await;

    let records = ScrapeCoordinator::new(crawler_config(&server.uri(), 2))
        .unwrap()
        .run(QUERY)
        .await;
    let stats = calculate_statistics(&records).unwrap();

    assert_eq!(stats.sample_count, 9);
    assert_eq!(stats.min_single_core, 1100);
    assert_eq!(stats.max_single_core, 1302);
    assert_eq!(stats.min_multi_core, 3100);
    assert_eq!(stats.max_multi_core, 3302);
    // (100 + 101 + 102 + 200 + ... + 302) / 9 = 201
    assert!((stats.mean_single_core - 1201.0).abs() < f64::EPSILON);
}
