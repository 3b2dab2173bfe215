//! Bounded trailing series for sparkline history.
//!
//! A [`HistorySeries`] keeps the most recent samples of one metric, oldest
//! first, evicting from the head once it holds [`HISTORY_LEN`] values. It
//! serializes as a plain JSON array so it can live in the persisted state;
//! decoding a longer array keeps only the newest samples.
//!
//! # Example
//!
//! ```rust,ignore
//! use tmon::history::HistorySeries;
//!
//! let mut series = HistorySeries::new();
//! for i in 0..100 {
//!     series.push(f64::from(i));
//! }
//! assert_eq!(series.len(), 60); // Bounded
//! assert_eq!(series.latest(), Some(99.0));
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of samples per series.
pub const HISTORY_LEN: usize = 60;

/// A fixed-capacity trailing series of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct HistorySeries {
    data: VecDeque<f64>,
    capacity: usize,
}

impl HistorySeries {
    /// Creates an empty series holding up to [`HISTORY_LEN`] samples.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_LEN)
    }

    /// Creates an empty series with a custom bound (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { data: VecDeque::with_capacity(capacity), capacity }
    }

    /// Appends a sample, evicting the oldest once at capacity.
    ///
    /// Non-finite samples are stored as 0.
    pub fn push(&mut self, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        while self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Returns a new series with `value` appended; `self` is unchanged.
    #[must_use]
    pub fn pushed(&self, value: f64) -> Self {
        let mut next = self.clone();
        next.push(value);
        next
    }

    /// The most recent sample.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.data.back().copied()
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no samples have been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum number of samples held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// The newest `n` samples, oldest first.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<f64> {
        let skip = self.data.len().saturating_sub(n);
        self.data.iter().skip(skip).copied().collect()
    }

    /// Largest sample, 0 when empty.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

impl Default for HistorySeries {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<f64>> for HistorySeries {
    fn from(values: Vec<f64>) -> Self {
        let mut series = Self::new();
        let skip = values.len().saturating_sub(HISTORY_LEN);
        for v in values.into_iter().skip(skip) {
            series.push(v);
        }
        series
    }
}

impl From<HistorySeries> for Vec<f64> {
    fn from(series: HistorySeries) -> Self {
        series.data.into_iter().collect()
    }
}

/// Pure append: `series` plus `value`, bounded to `max_len` newest samples.
#[must_use]
pub fn push(series: &[f64], value: f64, max_len: usize) -> Vec<f64> {
    let keep = max_len.saturating_sub(1).min(series.len());
    let mut next = Vec::with_capacity(keep + 1);
    next.extend_from_slice(&series[series.len() - keep..]);
    if max_len > 0 {
        next.push(value);
    }
    next
}
