//! Configuration types for the schedule search.

use pyo3::prelude::*;

/// Search strategy names accepted by `SearchConfig::strategy`.
pub const STRATEGY_PERMUTATION: &str = "permutation";
pub const STRATEGY_SUBSET_DP: &str = "subset_dp";

/// Configuration for a schedule search.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Valve the agent starts at. Never part of a schedule.
    #[pyo3(get, set)]
    pub start_node: String,
    /// Total time units available.
    #[pyo3(get, set)]
    pub time_budget: u32,
    /// Search strategy: "permutation" or "subset_dp"
    #[pyo3(get, set)]
    pub strategy: String,
    /// Verbosity level: 0=silent, 1=improvements, 2=progress, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Emit a progress report every this many evaluated permutations (0 disables).
    #[pyo3(get, set)]
    pub progress_interval: u64,
    /// Refuse to search when more yield-bearing valves than this are present.
    #[pyo3(get, set)]
    pub max_candidates: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_node: "AA".to_string(),
            time_budget: 30,
            strategy: STRATEGY_PERMUTATION.to_string(),
            verbosity: 0,
            progress_interval: 100_000_000,
            max_candidates: None,
        }
    }
}

#[pymethods]
impl SearchConfig {
    #[new]
    #[pyo3(signature = (
        start_node=None,
        time_budget=None,
        strategy=None,
        verbosity=None,
        progress_interval=None,
        max_candidates=None
    ))]
    fn new(
        start_node: Option<String>,
        time_budget: Option<u32>,
        strategy: Option<String>,
        verbosity: Option<u8>,
        progress_interval: Option<u64>,
        max_candidates: Option<usize>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            start_node: start_node.unwrap_or(defaults.start_node),
            time_budget: time_budget.unwrap_or(defaults.time_budget),
            strategy: strategy.unwrap_or(defaults.strategy),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            progress_interval: progress_interval.unwrap_or(defaults.progress_interval),
            max_candidates: max_candidates.or(defaults.max_candidates),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SearchConfig(start_node={:?}, time_budget={}, strategy={:?})",
            self.start_node, self.time_budget, self.strategy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.start_node, "AA");
        assert_eq!(config.time_budget, 30);
        assert_eq!(config.strategy, STRATEGY_PERMUTATION);
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.progress_interval, 100_000_000);
        assert!(config.max_candidates.is_none());
    }

    #[test]
    fn test_constructor_fills_defaults() {
        let config = SearchConfig::new(
            None,
            Some(26),
            Some(STRATEGY_SUBSET_DP.to_string()),
            None,
            None,
            Some(15),
        );
        assert_eq!(config.start_node, "AA");
        assert_eq!(config.time_budget, 26);
        assert_eq!(config.strategy, STRATEGY_SUBSET_DP);
        assert_eq!(config.max_candidates, Some(15));
    }
}
