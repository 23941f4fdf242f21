//! Core data types exchanged with callers.

use chrono::{DateTime, Utc};
use pyo3::prelude::*;

/// A valve record as supplied by the input parser.
///
/// `tunnels` names the valves directly reachable from this one, one time unit each.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valve {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub flow_rate: u32,
    #[pyo3(get, set)]
    pub tunnels: Vec<String>,
}

impl Valve {
    /// Convenience constructor for Rust callers.
    pub fn new<S: Into<String>>(name: S, flow_rate: u32, tunnels: &[&str]) -> Self {
        Self {
            name: name.into(),
            flow_rate,
            tunnels: tunnels.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[pymethods]
impl Valve {
    #[new]
    #[pyo3(signature = (name, flow_rate, tunnels=Vec::new()))]
    fn py_new(name: String, flow_rate: u32, tunnels: Vec<String>) -> Self {
        Self {
            name,
            flow_rate,
            tunnels,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Valve(name={:?}, flow_rate={}, tunnels={:?})",
            self.name, self.flow_rate, self.tunnels
        )
    }
}

/// Result of a schedule search, with names resolved.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleResult {
    /// Visiting order (excludes the start valve).
    #[pyo3(get)]
    pub schedule: Vec<String>,
    #[pyo3(get)]
    pub total_yield: u64,
    /// Number of complete schedules evaluated (permutations, or DP states).
    #[pyo3(get)]
    pub evaluated: u64,
    #[pyo3(get)]
    pub strategy: String,
    #[pyo3(get)]
    pub started_at: DateTime<Utc>,
    #[pyo3(get)]
    pub finished_at: DateTime<Utc>,
}

#[pymethods]
impl ScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(total_yield={}, schedule={:?}, strategy={:?}, evaluated={})",
            self.total_yield, self.schedule, self.strategy, self.evaluated
        )
    }
}
