//! Simulate a visiting order and total up the yield.

use crate::graph::{GraphError, GraphModel};
use crate::node_index::NodeId;
use crate::shortest_path::ShortestPathMatrix;

/// One visited node: time left after travelling there and activating it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub node: NodeId,
    pub flow_rate: u32,
    /// `None` once the agent is stranded behind an unreachable hop.
    pub time_remaining: Option<i64>,
}

impl Segment {
    /// Yield contributed by this node; zero if activated with no time left.
    #[inline]
    pub fn released(&self) -> u64 {
        match self.time_remaining {
            Some(t) if t > 0 => t as u64 * self.flow_rate as u64,
            _ => 0,
        }
    }
}

/// Evaluates schedules from a fixed start node and time budget.
#[derive(Clone, Copy)]
pub struct ScheduleEvaluator<'a> {
    graph: &'a GraphModel,
    matrix: &'a ShortestPathMatrix,
    start: NodeId,
    time_budget: u32,
}

impl<'a> ScheduleEvaluator<'a> {
    pub fn new(
        graph: &'a GraphModel,
        matrix: &'a ShortestPathMatrix,
        start: NodeId,
        time_budget: u32,
    ) -> Self {
        Self {
            graph,
            matrix,
            start,
            time_budget,
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn time_budget(&self) -> u32 {
        self.time_budget
    }

    /// One segment per scheduled node, in order.
    ///
    /// Every hop costs its shortest distance plus one unit to activate. All
    /// segments are produced, including ones past the deadline; callers filter
    /// on `released()`.
    pub fn segments<'s>(&self, schedule: &'s [NodeId]) -> impl Iterator<Item = Segment> + 's
    where
        'a: 's,
    {
        let graph: &'s GraphModel = self.graph;
        let matrix: &'s ShortestPathMatrix = self.matrix;
        let initial = (self.start, Some(self.time_budget as i64));

        schedule
            .iter()
            .scan(initial, move |(position, remaining), &next| {
                *remaining = match (*remaining, matrix.distance(*position, next)) {
                    (Some(t), Some(d)) => Some(t - d as i64 - 1),
                    _ => None,
                };
                *position = next;
                Some(Segment {
                    node: next,
                    flow_rate: graph.node(next).map_or(0, |n| n.flow_rate),
                    time_remaining: *remaining,
                })
            })
    }

    /// Total yield of visiting `schedule` in order.
    pub fn total_yield(&self, schedule: &[NodeId]) -> u64 {
        self.segments(schedule).map(|s| s.released()).sum()
    }

    /// Name-based convenience wrapper around `total_yield`.
    pub fn evaluate_by_name<S: AsRef<str>>(&self, schedule: &[S]) -> Result<u64, GraphError> {
        let ids = schedule
            .iter()
            .map(|name| self.graph.id_of(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.total_yield(&ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;

    fn setup(valves: Vec<crate::models::Valve>) -> (GraphModel, ShortestPathMatrix) {
        let graph = GraphModel::new(valves).unwrap();
        let matrix = ShortestPathMatrix::new(&graph);
        (graph, matrix)
    }

    #[test]
    fn test_three_node_regression() {
        let (graph, matrix) = setup(three_node_chain());
        let start = graph.id_of("Start").unwrap();
        let eval = ScheduleEvaluator::new(&graph, &matrix, start, 30);

        // B: 30 - 1 - 1 = 28 -> 28 * 13 = 364; C: 28 - 1 - 1 = 26 -> 26 * 2 = 52
        assert_eq!(eval.evaluate_by_name(&["B", "C"]).unwrap(), 416);
        // C: 30 - 2 - 1 = 27 -> 54; B: 27 - 1 - 1 = 25 -> 325
        assert_eq!(eval.evaluate_by_name(&["C", "B"]).unwrap(), 379);
        assert_eq!(eval.evaluate_by_name::<&str>(&[]).unwrap(), 0);
    }

    #[test]
    fn test_segments_track_time_remaining() {
        let (graph, matrix) = setup(three_node_chain());
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 30);

        let segments: Vec<Segment> = eval.segments(&[1, 2]).collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].time_remaining, Some(28));
        assert_eq!(segments[0].released(), 364);
        assert_eq!(segments[1].time_remaining, Some(26));
        assert_eq!(segments[1].released(), 52);
    }

    #[test]
    fn test_ten_valve_known_best_order() {
        let (graph, matrix) = setup(ten_valve_example());
        let eval = ScheduleEvaluator::new(&graph, &matrix, graph.id_of("AA").unwrap(), 30);

        let total = eval
            .evaluate_by_name(&["DD", "BB", "JJ", "HH", "EE", "CC"])
            .unwrap();
        assert_eq!(total, 1651);
    }

    #[test]
    fn test_expired_segments_contribute_zero() {
        let (graph, matrix) = setup(three_node_chain());
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 3);

        // B: 3 - 2 = 1 -> 13; C: 1 - 2 = -1 -> 0
        let segments: Vec<Segment> = eval.segments(&[1, 2]).collect();
        assert_eq!(segments[1].time_remaining, Some(-1));
        assert_eq!(segments[1].released(), 0);
        assert_eq!(eval.total_yield(&[1, 2]), 13);

        // Exactly zero remaining also contributes nothing.
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 2);
        assert_eq!(eval.total_yield(&[1]), 0);
    }

    #[test]
    fn test_zero_budget_never_negative() {
        let (graph, matrix) = setup(ten_valve_example());
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 0);
        assert_eq!(eval.total_yield(&[3, 1, 9, 7, 4, 2]), 0);
    }

    #[test]
    fn test_unreachable_hop_strands_the_rest() {
        let (graph, matrix) = setup(chain_with_isolated());
        let island = graph.id_of("Island").unwrap();
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 30);

        let segments: Vec<Segment> = eval.segments(&[1, island, 2]).collect();
        assert_eq!(segments[0].released(), 364);
        assert_eq!(segments[1].time_remaining, None);
        assert_eq!(segments[2].time_remaining, None);
        assert_eq!(eval.total_yield(&[1, island, 2]), 364);
        assert_eq!(eval.total_yield(&[1, 2, island]), 416);
    }

    #[test]
    fn test_deterministic() {
        let (graph, matrix) = setup(ten_valve_example());
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 30);
        let schedule = [7, 9, 3, 1, 4, 2];

        let first = eval.total_yield(&schedule);
        for _ in 0..5 {
            assert_eq!(eval.total_yield(&schedule), first);
        }
    }

    #[test]
    fn test_unknown_name() {
        let (graph, matrix) = setup(three_node_chain());
        let eval = ScheduleEvaluator::new(&graph, &matrix, 0, 30);
        assert_eq!(
            eval.evaluate_by_name(&["B", "Q"]),
            Err(GraphError::NotFound("Q".to_string()))
        );
    }
}
