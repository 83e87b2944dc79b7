pub mod scrape;

// Re-export command functions for convenience
pub use scrape::{scrape, OutputSelection, ScrapeParams};
