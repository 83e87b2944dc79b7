//! Score statistics over a set of benchmark records
//!
//! Only records whose single-core and multi-core scores are both plain
//! decimal integers take part; `"N/A"` and any other text is skipped rather
//! than coerced. Sums are accumulated as integers so the result does not
//! depend on record order.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Min/mean/max summary of both score dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreStatistics {
    /// Mean single-core score, rounded to 2 decimals
    pub mean_single_core: f64,

    /// Mean multi-core score, rounded to 2 decimals
    pub mean_multi_core: f64,

    pub min_single_core: u64,
    pub max_single_core: u64,
    pub min_multi_core: u64,
    pub max_multi_core: u64,

    /// Number of records with two numeric scores
    pub sample_count: usize,
}

/// Running accumulator for one score dimension
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    sum: u128,
    min: u64,
    max: u64,
}

impl Accumulator {
    fn new(first: u64) -> Self {
        Self {
            sum: u128::from(first),
            min: first,
            max: first,
        }
    }

    fn push(&mut self, value: u64) {
        self.sum += u128::from(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self, count: usize) -> f64 {
        round2(self.sum as f64 / count as f64)
    }
}

/// Compute score statistics for a record collection
///
/// Returns `None` when no record carries two numeric scores. Scores must fit
/// in a `u64`; result files holding larger values are rejected when loaded
/// and the listing parser reports them as `"N/A"`, so only hand-built records
/// can reach this point with one, and those are logged and skipped.
///
/// # Examples
///
/// ```
/// use benchscrape::analytics::calculate_statistics;
/// use benchscrape::models::Record;
///
/// let records = vec![
///     Record::new("A", "cpu", "1000", "3000", None),
///     Record::new("B", "cpu", "2001", "N/A", None),
/// ];
/// let stats = calculate_statistics(&records).unwrap();
/// assert_eq!(stats.sample_count, 1);
/// assert_eq!(stats.mean_single_core, 1000.0);
/// ```
#[must_use]
pub fn calculate_statistics(records: &[Record]) -> Option<ScoreStatistics> {
    let mut pairs = records.iter().filter_map(|record| {
        let scores = record.numeric_scores();
        if scores.is_none() {
            if let Some(score) = record.out_of_range_score() {
                tracing::warn!(score, system = %record.system, "Score too large for statistics, record skipped");
            }
        }
        scores
    });

    let (first_single, first_multi) = pairs.next()?;
    let mut single = Accumulator::new(first_single);
    let mut multi = Accumulator::new(first_multi);
    let mut count = 1usize;

    for (s, m) in pairs {
        single.push(s);
        multi.push(m);
        count += 1;
    }

    Some(ScoreStatistics {
        mean_single_core: single.mean(count),
        mean_multi_core: multi.mean(count),
        min_single_core: single.min,
        max_single_core: single.max,
        min_multi_core: multi.min,
        max_multi_core: multi.max,
        sample_count: count,
    })
}

/// Round to 2 decimal places, halves away from zero
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
