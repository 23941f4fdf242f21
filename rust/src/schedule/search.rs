//! Best-schedule search.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::{SearchConfig, STRATEGY_PERMUTATION, STRATEGY_SUBSET_DP};
use crate::graph::{GraphError, GraphModel};
use crate::node_index::NodeId;
use crate::shortest_path::ShortestPathMatrix;
use crate::{log_debug, log_improvements, log_progress};

use super::evaluator::ScheduleEvaluator;
use super::permutations::{permutation_count, Permutations};
use super::progress::{ProgressTicker, SearchProgress};
use super::subset::{SubsetSolver, MAX_SUBSET_CANDIDATES};

/// Errors that can occur before a search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Unknown search strategy: {0}")]
    UnknownStrategy(String),
    #[error("{count} yield-bearing valves exceed the limit of {limit}")]
    TooManyCandidates { count: usize, limit: usize },
}

/// Search strategy, parsed from `SearchConfig::strategy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Permutation,
    SubsetDp,
}

impl Strategy {
    pub fn parse(name: &str) -> Result<Self, SearchError> {
        match name {
            STRATEGY_PERMUTATION => Ok(Self::Permutation),
            STRATEGY_SUBSET_DP => Ok(Self::SubsetDp),
            other => Err(SearchError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permutation => STRATEGY_PERMUTATION,
            Self::SubsetDp => STRATEGY_SUBSET_DP,
        }
    }
}

/// Best schedule found and how it was found.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub schedule: Vec<NodeId>,
    pub total_yield: u64,
    /// Permutations evaluated, or DP states explored.
    pub evaluated: u64,
    pub strategy: Strategy,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Finds the visiting order with the highest total yield.
pub struct ScheduleSearch<'a> {
    graph: &'a GraphModel,
    matrix: &'a ShortestPathMatrix,
    start: NodeId,
    time_budget: u32,
    candidates: Vec<NodeId>,
    strategy: Strategy,
    verbosity: u8,
    progress_interval: u64,
}

impl<'a> ScheduleSearch<'a> {
    /// Resolve the start node and candidate set, and validate the config.
    pub fn new(
        graph: &'a GraphModel,
        matrix: &'a ShortestPathMatrix,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let start = graph.id_of(&config.start_node)?;
        let strategy = Strategy::parse(&config.strategy)?;
        let candidates = graph.candidates(start);

        let limit = match (strategy, config.max_candidates) {
            (Strategy::SubsetDp, Some(max)) => Some(max.min(MAX_SUBSET_CANDIDATES)),
            (Strategy::SubsetDp, None) => Some(MAX_SUBSET_CANDIDATES),
            (Strategy::Permutation, max) => max,
        };
        if let Some(limit) = limit {
            if candidates.len() > limit {
                return Err(SearchError::TooManyCandidates {
                    count: candidates.len(),
                    limit,
                });
            }
        }

        log_debug!(
            config.verbosity,
            "Search from {} with budget {}: {} candidates {:?}",
            config.start_node,
            config.time_budget,
            candidates.len(),
            candidates
                .iter()
                .filter_map(|&id| graph.name_of(id).ok())
                .collect::<Vec<_>>()
        );

        Ok(Self {
            graph,
            matrix,
            start,
            time_budget: config.time_budget,
            candidates,
            strategy,
            verbosity: config.verbosity,
            progress_interval: config.progress_interval,
        })
    }

    pub fn candidates(&self) -> &[NodeId] {
        &self.candidates
    }

    pub fn evaluator(&self) -> ScheduleEvaluator<'a> {
        ScheduleEvaluator::new(self.graph, self.matrix, self.start, self.time_budget)
    }

    /// Run the configured strategy.
    pub fn run(&self) -> SearchOutcome {
        match self.strategy {
            Strategy::Permutation => self.run_with_progress(|_| {}),
            Strategy::SubsetDp => self.run_subset_dp(),
        }
    }

    /// Exhaustive permutation search, reporting progress to `on_progress`.
    ///
    /// Every permutation of the candidates is evaluated. A permutation
    /// replaces the current best only with a strictly greater yield, so the
    /// earliest permutation reaching the optimum is returned.
    pub fn run_with_progress<F>(&self, mut on_progress: F) -> SearchOutcome
    where
        F: FnMut(&SearchProgress),
    {
        let started_at = Utc::now();
        let evaluator = self.evaluator();
        let ticker = ProgressTicker::new(self.progress_interval);
        let total = permutation_count(self.candidates.len());

        let mut best_schedule: Vec<NodeId> = Vec::new();
        let mut best_yield = evaluator.total_yield(&best_schedule);
        let mut evaluated: u64 = 0;

        let mut permutations = Permutations::new(self.candidates.clone());
        while let Some(order) = permutations.advance() {
            evaluated += 1;
            if ticker.is_due(evaluated) {
                let progress = SearchProgress {
                    evaluated,
                    total,
                    best_yield,
                    started_at,
                    at: Utc::now(),
                };
                log_progress!(
                    self.verbosity,
                    "{} evaluated {} of {:?} permutations ({:.0}/s), best {}",
                    progress.at.to_rfc3339(),
                    progress.evaluated,
                    progress.total,
                    progress.per_second(),
                    progress.best_yield
                );
                on_progress(&progress);
            }

            let released = evaluator.total_yield(order);
            if released > best_yield {
                best_yield = released;
                best_schedule.clear();
                best_schedule.extend_from_slice(order);
                log_improvements!(
                    self.verbosity,
                    "New best schedule: {} {:?}",
                    best_yield,
                    self.names(&best_schedule)
                );
            }
        }

        let finished_at = Utc::now();
        log_improvements!(
            self.verbosity,
            "Checked {} permutations of {} valves, best {}",
            evaluated,
            self.candidates.len(),
            best_yield
        );

        SearchOutcome {
            schedule: best_schedule,
            total_yield: best_yield,
            evaluated,
            strategy: Strategy::Permutation,
            started_at,
            finished_at,
        }
    }

    /// Memoized search over (position, time remaining, visited set).
    pub fn run_subset_dp(&self) -> SearchOutcome {
        let started_at = Utc::now();
        let mut solver = SubsetSolver::new(
            self.graph,
            self.matrix,
            self.start,
            self.time_budget,
            self.candidates.clone(),
        );
        let (schedule, total_yield) = solver.solve();

        log_debug!(self.verbosity, "Subset DP explored {} states", solver.states());
        log_improvements!(
            self.verbosity,
            "Best schedule: {} {:?}",
            total_yield,
            self.names(&schedule)
        );

        SearchOutcome {
            schedule,
            total_yield,
            evaluated: solver.states() as u64,
            strategy: Strategy::SubsetDp,
            started_at,
            finished_at: Utc::now(),
        }
    }

    fn names(&self, schedule: &[NodeId]) -> Vec<&str> {
        schedule
            .iter()
            .filter_map(|&id| self.graph.name_of(id).ok())
            .collect()
    }
}

/// Compute shortest paths for `graph`, then search with `config`.
pub fn find_best_schedule(
    graph: &GraphModel,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    let matrix = ShortestPathMatrix::new(graph);
    log_debug!(
        config.verbosity,
        "Shortest paths computed for {} nodes (unreachable = {})",
        matrix.len(),
        matrix.unreachable()
    );
    let search = ScheduleSearch::new(graph, &matrix, config)?;
    Ok(search.run())
}
