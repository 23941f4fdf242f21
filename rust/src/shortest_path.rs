//! All-pairs shortest paths over the tunnel graph (Floyd–Warshall).
//!
//! Distances are hop counts. An unreachable pair holds the sentinel `n + 1`,
//! which is larger than any acyclic path in an `n`-node graph (at most
//! `n - 1` hops). The sentinel never leaves this module: `distance` returns
//! `None` for it, and relaxation skips it instead of adding it.

use thiserror::Error;

use crate::graph::{GraphError, GraphModel};
use crate::node_index::NodeId;

/// Path query between two nodes with no connecting path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("No path from node {from} to node {to}")]
    Unreachable { from: NodeId, to: NodeId },
}

/// Distance and next-hop matrices, both `n × n`, row-major by source.
#[derive(Clone, Debug)]
pub struct ShortestPathMatrix {
    n: usize,
    unreachable: u32,
    dist: Vec<u32>,
    next: Vec<Option<NodeId>>,
}

impl ShortestPathMatrix {
    /// Run Floyd–Warshall over the graph's edges.
    ///
    /// Only strict improvements replace an entry, so among equal-length
    /// paths the one found first is kept.
    pub fn new(graph: &GraphModel) -> Self {
        let n = graph.len();
        // GraphModel caps n well below u32::MAX / 2.
        let unreachable = n as u32 + 1;

        let mut dist = vec![unreachable; n * n];
        let mut next = vec![None; n * n];

        for edge in graph.edges() {
            let cell = edge.from as usize * n + edge.to as usize;
            dist[cell] = 1;
            next[cell] = Some(edge.to);
        }
        for i in 0..n {
            dist[i * n + i] = 0;
            next[i * n + i] = Some(i as NodeId);
        }

        for k in 0..n {
            for i in 0..n {
                let ik = dist[i * n + k];
                if ik == unreachable {
                    continue;
                }
                for j in 0..n {
                    let kj = dist[k * n + j];
                    if kj == unreachable {
                        continue;
                    }
                    let through = ik + kj;
                    if through < dist[i * n + j] {
                        dist[i * n + j] = through;
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        Self {
            n,
            unreachable,
            dist,
            next,
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The "no path" sentinel, `n + 1`.
    pub fn unreachable(&self) -> u32 {
        self.unreachable
    }

    #[inline]
    fn cell(&self, from: NodeId, to: NodeId) -> usize {
        debug_assert!((from as usize) < self.n && (to as usize) < self.n);
        from as usize * self.n + to as usize
    }

    /// Shortest hop count, or `None` if `to` cannot be reached from `from`.
    #[inline]
    pub fn distance(&self, from: NodeId, to: NodeId) -> Option<u32> {
        let d = self.dist[self.cell(from, to)];
        (d != self.unreachable).then_some(d)
    }

    /// Raw matrix entry, sentinel included. Not for arithmetic.
    #[inline]
    pub fn raw_distance(&self, from: NodeId, to: NodeId) -> u32 {
        self.dist[self.cell(from, to)]
    }

    #[inline]
    pub fn next_hop(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        self.next[self.cell(from, to)]
    }

    /// Nodes visited after `from` on the way to `to`, ending with `to`.
    ///
    /// The path is empty when `to` is unreachable or when `from == to`.
    pub fn path(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        self.try_path(from, to).unwrap_or_default()
    }

    /// Like `path`, but reports an unreachable target as an error.
    pub fn try_path(&self, from: NodeId, to: NodeId) -> Result<Vec<NodeId>, PathError> {
        if self.next_hop(from, to).is_none() {
            return Err(PathError::Unreachable { from, to });
        }

        let mut path = Vec::new();
        let mut position = from;
        while position != to {
            position = self
                .next_hop(position, to)
                .ok_or(PathError::Unreachable { from, to })?;
            path.push(position);
        }
        Ok(path)
    }

    /// Name-based path query. Unknown names fail; unreachable pairs give an empty path.
    pub fn path_by_name(
        &self,
        graph: &GraphModel,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, GraphError> {
        let from = graph.id_of(from)?;
        let to = graph.id_of(to)?;
        self.path(from, to)
            .into_iter()
            .map(|id| graph.name_of(id).map(str::to_string))
            .collect()
    }

    /// Distance rows with unreachable entries as `None`.
    pub fn to_rows(&self) -> Vec<Vec<Option<u32>>> {
        (0..self.n as NodeId)
            .map(|from| (0..self.n as NodeId).map(|to| self.distance(from, to)).collect())
            .collect()
    }
}
