//! Common test utilities

#![allow(dead_code)]

use benchscrape::config::CrawlerConfig;
use benchscrape::models::Record;

/// One well-formed listing entry
pub fn listing_entry(href: &str, system: &str, model: &str, scores: &[&str]) -> String {
    let scores: String = scores
        .iter()
        .map(|score| format!(r#"<span class="list-col-text-score">{score}</span>"#))
        .collect();
    format!(
        r#"<div class="row">
  <div class="list-col">
    <div class="col-12 col-lg-4">
      <a href="{href}">{system}</a>
      <span class="list-col-subtitle">Uploaded today</span>
    </div>
    <div class="col-6 col-lg-3">
      <span class="list-col-model">
        {model}
      </span>
    </div>
    <div class="col-6 col-lg-2">{scores}</div>
  </div>
</div>"#
    )
}

/// Entry with no model span, which the parser rejects
pub fn malformed_entry() -> String {
    r#"<div class="list-col">
  <div class="col-12 col-lg-4"><a href="/v6/cpu/0">Broken</a></div>
  <span class="list-col-text-score">1</span>
</div>"#
        .to_string()
}

/// Pagination control with numbered links `1..=pages`, plus a "Next" link
pub fn pagination(pages: u32) -> String {
    if pages <= 1 {
        return String::new();
    }
    let items: String = (1..=pages)
        .map(|page| {
            format!(r#"<li class="page-item"><a class="page-link" href="?page={page}">{page}</a></li>"#)
        })
        .collect();
    format!(
        r#"<nav><ul class="pagination">{items}<li class="page-item"><a class="page-link" href="?page=2">Next</a></li></ul></nav>"#
    )
}

/// A full search result page
pub fn search_page(entries: &[String], pages: u32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Search - Geekbench</title></head>
<body>
<div class="container">
{}
</div>
{}
</body>
</html>"#,
        entries.join("\n"),
        pagination(pages)
    )
}

/// Page `page` of a result set, `count` entries with distinct detail links
pub fn numbered_page(page: u32, count: u32, pages: u32) -> String {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            let id = page * 100 + i;
            listing_entry(
                &format!("/v6/cpu/{id}"),
                &format!("Pixel {id}"),
                "ARM ARMv8 2850 MHz (8 cores)",
                &[&(1000 + id).to_string(), &(3000 + id).to_string()],
            )
        })
        .collect();
    search_page(&entries, pages)
}

/// Quiet crawler configuration pointed at `base_url`
pub fn crawler_config(base_url: &str, threads: usize) -> CrawlerConfig {
    CrawlerConfig {
        base_url: base_url.to_string(),
        threads,
        request_timeout_secs: 5,
        verbose: false,
        ..CrawlerConfig::default()
    }
}

/// Records covering every field shape the stores must carry
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(
            "Samsung SM-A566B",
            "ARM ARMv8 2002 MHz (8 cores)",
            "1003",
            "2998",
            Some("https://browser.geekbench.com/v6/cpu/11111".into()),
        ),
        Record::new(
            "Samsung SM-A566B",
            "ARM ARMv8 2002 MHz (8 cores)",
            "1010",
            "3101",
            Some("https://browser.geekbench.com/v6/cpu/22222".into()),
        ),
        Record::new("Unknown", "ARM ARMv8", "N/A", "N/A", None),
    ]
}

/// Sort by URL then the remaining fields, for order-insensitive comparisons
pub fn sorted(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| {
        (&a.url, &a.system, &a.single_core, &a.multi_core)
            .cmp(&(&b.url, &b.system, &b.single_core, &b.multi_core))
    });
    records
}
