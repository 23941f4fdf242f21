//! Progress snapshots emitted during long permutation searches.

use chrono::{DateTime, Utc};

/// Point-in-time view of a running search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchProgress {
    /// Permutations evaluated so far.
    pub evaluated: u64,
    /// Total permutations, if it fits in a `u64`.
    pub total: Option<u64>,
    pub best_yield: u64,
    pub started_at: DateTime<Utc>,
    pub at: DateTime<Utc>,
}

impl SearchProgress {
    /// Fraction of the permutation space covered, in `[0, 1]`.
    pub fn fraction_done(&self) -> Option<f64> {
        self.total
            .filter(|&t| t > 0)
            .map(|t| self.evaluated as f64 / t as f64)
    }

    /// Evaluation rate since the search started.
    pub fn per_second(&self) -> f64 {
        let elapsed = (self.at - self.started_at).num_milliseconds();
        if elapsed <= 0 {
            return 0.0;
        }
        self.evaluated as f64 * 1000.0 / elapsed as f64
    }
}

/// Decides when a progress report is due.
#[derive(Clone, Debug)]
pub struct ProgressTicker {
    interval: u64,
}

impl ProgressTicker {
    /// An interval of 0 disables reporting.
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }

    #[inline]
    pub fn is_due(&self, evaluated: u64) -> bool {
        self.interval != 0 && evaluated % self.interval == 0
    }
}
