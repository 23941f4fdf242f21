//! Subset dynamic programming over visited-valve bitmasks.
//!
//! State is (current position, time remaining, visited mask). Each state
//! memoizes the best additional yield and the first candidate achieving it,
//! so the result matches the exhaustive search's total without enumerating
//! permutations.

use rustc_hash::FxHashMap;

use crate::graph::GraphModel;
use crate::node_index::NodeId;
use crate::shortest_path::ShortestPathMatrix;

/// Most candidates representable in the visited mask.
pub const MAX_SUBSET_CANDIDATES: usize = u64::BITS as usize;

/// Position 0 is the start node; position `i + 1` is `candidates[i]`.
type StateKey = (u8, u32, u64);

#[derive(Clone, Copy, Debug)]
struct Memo {
    best: u64,
    choice: Option<u8>,
}

pub struct SubsetSolver<'a> {
    matrix: &'a ShortestPathMatrix,
    start: NodeId,
    time_budget: u32,
    candidates: Vec<NodeId>,
    rates: Vec<u64>,
    memo: FxHashMap<StateKey, Memo>,
}

impl<'a> SubsetSolver<'a> {
    /// `candidates` must hold at most `MAX_SUBSET_CANDIDATES` distinct IDs,
    /// none equal to `start`.
    pub fn new(
        graph: &GraphModel,
        matrix: &'a ShortestPathMatrix,
        start: NodeId,
        time_budget: u32,
        candidates: Vec<NodeId>,
    ) -> Self {
        debug_assert!(candidates.len() <= MAX_SUBSET_CANDIDATES);
        let rates = candidates
            .iter()
            .map(|&id| graph.node(id).map_or(0, |n| n.flow_rate as u64))
            .collect();
        Self {
            matrix,
            start,
            time_budget,
            candidates,
            rates,
            memo: FxHashMap::default(),
        }
    }

    fn node_at(&self, position: u8) -> NodeId {
        match position {
            0 => self.start,
            p => self.candidates[p as usize - 1],
        }
    }

    fn best_from(&mut self, position: u8, time: u32, visited: u64) -> u64 {
        let key = (position, time, visited);
        if let Some(memo) = self.memo.get(&key) {
            return memo.best;
        }

        let here = self.node_at(position);
        let mut best = Memo {
            best: 0,
            choice: None,
        };
        for i in 0..self.candidates.len() {
            let bit = 1u64 << i;
            if visited & bit != 0 {
                continue;
            }
            let Some(distance) = self.matrix.distance(here, self.candidates[i]) else {
                continue;
            };
            let cost = distance + 1;
            if cost >= time {
                continue;
            }
            let remaining = time - cost;
            let released = remaining as u64 * self.rates[i];
            let value = released + self.best_from(i as u8 + 1, remaining, visited | bit);
            if value > best.best {
                best = Memo {
                    best: value,
                    choice: Some(i as u8),
                };
            }
        }

        self.memo.insert(key, best);
        best.best
    }

    /// Solve and return `(schedule, total_yield)`.
    ///
    /// The schedule lists productive visits first, then the remaining
    /// candidates in their given order; evaluating it reproduces the total.
    pub fn solve(&mut self) -> (Vec<NodeId>, u64) {
        let total = self.best_from(0, self.time_budget, 0);

        let mut schedule = Vec::with_capacity(self.candidates.len());
        let (mut position, mut time, mut visited) = (0u8, self.time_budget, 0u64);
        while let Some(choice) = self
            .memo
            .get(&(position, time, visited))
            .and_then(|m| m.choice)
        {
            let here = self.node_at(position);
            let next = self.candidates[choice as usize];
            let Some(distance) = self.matrix.distance(here, next) else {
                break;
            };
            schedule.push(next);
            time -= distance + 1;
            visited |= 1u64 << choice;
            position = choice + 1;
        }

        for (i, &id) in self.candidates.iter().enumerate() {
            if visited & (1u64 << i) == 0 {
                schedule.push(id);
            }
        }

        (schedule, total)
    }

    /// Distinct states explored.
    pub fn states(&self) -> usize {
        self.memo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures::*;
    use crate::schedule::evaluator::ScheduleEvaluator;

    #[test]
    fn test_three_node_chain() {
        let graph = GraphModel::new(three_node_chain()).unwrap();
        let matrix = ShortestPathMatrix::new(&graph);
        let start = graph.id_of("Start").unwrap();
        let mut solver = SubsetSolver::new(&graph, &matrix, start, 30, graph.candidates(start));

        let (schedule, total) = solver.solve();
        assert_eq!(total, 416);
        assert_eq!(schedule, vec![1, 2]);
        assert!(solver.states() > 0);
    }

    #[test]
    fn test_ten_valve_example() {
        let graph = GraphModel::new(ten_valve_example()).unwrap();
        let matrix = ShortestPathMatrix::new(&graph);
        let start = graph.id_of("AA").unwrap();
        let mut solver = SubsetSolver::new(&graph, &matrix, start, 30, graph.candidates(start));

        let (schedule, total) = solver.solve();
        assert_eq!(total, 1651);
        assert_eq!(schedule.len(), 6);

        let eval = ScheduleEvaluator::new(&graph, &matrix, start, 30);
        assert_eq!(eval.total_yield(&schedule), total);
    }

    #[test]
    fn test_unproductive_tail_appended() {
        let graph = GraphModel::new(three_node_chain()).unwrap();
        let matrix = ShortestPathMatrix::new(&graph);
        // Only enough time to open B.
        let mut solver = SubsetSolver::new(&graph, &matrix, 0, 3, graph.candidates(0));

        let (schedule, total) = solver.solve();
        assert_eq!(total, 13);
        assert_eq!(schedule, vec![1, 2]);
    }

    #[test]
    fn test_isolated_candidate_skipped() {
        let graph = GraphModel::new(chain_with_isolated()).unwrap();
        let matrix = ShortestPathMatrix::new(&graph);
        let island = graph.id_of("Island").unwrap();
        let mut solver = SubsetSolver::new(&graph, &matrix, 0, 30, graph.candidates(0));

        let (schedule, total) = solver.solve();
        assert_eq!(total, 416);
        assert_eq!(schedule, vec![1, 2, island]);
    }
}
