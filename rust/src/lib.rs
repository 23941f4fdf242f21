//! Valve scheduling: shortest paths over a tunnel graph and a search for the
//! visiting order that releases the most flow before a deadline.
//!
//! The core is pure Rust; this module also exposes it to Python.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

mod config;
pub mod graph;
pub mod logging;
mod models;
pub mod node_index;
pub mod schedule;
pub mod shortest_path;

pub use config::{SearchConfig, STRATEGY_PERMUTATION, STRATEGY_SUBSET_DP};
pub use graph::{Edge, GraphError, GraphModel, Node};
pub use models::{ScheduleResult, Valve};
pub use node_index::{NodeId, NodeIndex};
pub use schedule::{
    find_best_schedule, ScheduleEvaluator, ScheduleSearch, SearchError, SearchOutcome, Strategy,
};
pub use shortest_path::{PathError, ShortestPathMatrix};

fn graph_err(e: GraphError) -> PyErr {
    match e {
        GraphError::NotFound(_) => PyKeyError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn search_err(e: SearchError) -> PyErr {
    match e {
        SearchError::Graph(inner) => graph_err(inner),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Resolve a search outcome's IDs back to valve names.
fn to_result(graph: &GraphModel, outcome: SearchOutcome) -> Result<ScheduleResult, GraphError> {
    let schedule = outcome
        .schedule
        .iter()
        .map(|&id| graph.name_of(id).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ScheduleResult {
        schedule,
        total_yield: outcome.total_yield,
        evaluated: outcome.evaluated,
        strategy: outcome.strategy.as_str().to_string(),
        started_at: outcome.started_at,
        finished_at: outcome.finished_at,
    })
}

/// Find the visiting order with the highest total yield.
///
/// # Arguments
/// * `valves` - Full valve set; every tunnel must name a valve in the set
/// * `config` - Search configuration (start valve, budget, strategy, ...)
///
/// # Raises
/// * KeyError if the start valve does not exist
/// * ValueError for duplicate valves, dangling tunnels, unknown strategy or too many candidates
#[pyfunction]
#[pyo3(name = "find_best_schedule", signature = (valves, config=None))]
fn py_find_best_schedule(
    valves: Vec<Valve>,
    config: Option<SearchConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    let graph = GraphModel::new(valves).map_err(graph_err)?;
    let outcome = find_best_schedule(&graph, &config).map_err(search_err)?;
    to_result(&graph, outcome).map_err(graph_err)
}

/// Total yield of visiting `schedule` in order from `start`.
#[pyfunction]
#[pyo3(signature = (valves, schedule, start="AA".to_string(), time_budget=30))]
fn evaluate_schedule(
    valves: Vec<Valve>,
    schedule: Vec<String>,
    start: String,
    time_budget: u32,
) -> PyResult<u64> {
    let graph = GraphModel::new(valves).map_err(graph_err)?;
    let matrix = ShortestPathMatrix::new(&graph);
    let start = graph.id_of(&start).map_err(graph_err)?;
    ScheduleEvaluator::new(&graph, &matrix, start, time_budget)
        .evaluate_by_name(schedule.as_slice())
        .map_err(graph_err)
}

/// Valves visited after `from` on a shortest path to `to`; empty if unreachable.
#[pyfunction]
#[pyo3(name = "shortest_path")]
fn py_shortest_path(valves: Vec<Valve>, from: String, to: String) -> PyResult<Vec<String>> {
    let graph = GraphModel::new(valves).map_err(graph_err)?;
    let matrix = ShortestPathMatrix::new(&graph);
    matrix.path_by_name(&graph, &from, &to).map_err(graph_err)
}

/// Hop distances in input order; `None` marks unreachable pairs.
#[pyfunction]
fn distance_matrix(valves: Vec<Valve>) -> PyResult<Vec<Vec<Option<u32>>>> {
    let graph = GraphModel::new(valves).map_err(graph_err)?;
    Ok(ShortestPathMatrix::new(&graph).to_rows())
}

/// The valve_scheduler Python module.
#[pymodule]
fn valve_scheduler(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Valve>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<SearchConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_find_best_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_shortest_path, m)?)?;
    m.add_function(wrap_pyfunction!(distance_matrix, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;

    #[test]
    fn test_to_result_resolves_names() {
        let graph = GraphModel::new(three_node_chain()).unwrap();
        let config = SearchConfig {
            start_node: "Start".to_string(),
            ..SearchConfig::default()
        };
        let outcome = find_best_schedule(&graph, &config).unwrap();
        let result = to_result(&graph, outcome).unwrap();

        assert_eq!(result.schedule, vec!["B", "C"]);
        assert_eq!(result.total_yield, 416);
        assert_eq!(result.strategy, "permutation");
    }
}
