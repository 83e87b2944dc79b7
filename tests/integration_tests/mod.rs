//! Integration tests module
//!
//! End-to-end tests for the benchscrape pipeline: discovery, the page worker
//! pool, and failure isolation, all served by a wiremock server.

pub mod error_scenarios;
pub mod pipeline_test;
