//! Valve/tunnel graph model.

use thiserror::Error;

use crate::models::Valve;
use crate::node_index::{NodeId, NodeIndex};

/// Largest node count whose unreachable sentinel (n + 1) can be doubled in a `u32`.
pub const MAX_NODES: usize = (u32::MAX / 2 - 1) as usize;

/// Errors raised while building or querying the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NotFound(String),
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),
    #[error("Node {node} has a tunnel to unknown node {neighbor}")]
    UnknownNeighbor { node: String, neighbor: String },
    #[error("Graph has {0} nodes, more than the supported maximum")]
    TooManyNodes(usize),
}

/// A valve with its tunnels resolved to node IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub flow_rate: u32,
    pub neighbors: Vec<NodeId>,
}

/// A unit-weight directed edge derived from a node's tunnel list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Immutable read model over the valve graph.
#[derive(Clone, Debug)]
pub struct GraphModel {
    index: NodeIndex,
    nodes: Vec<Node>,
}

impl GraphModel {
    /// Build the graph, resolving every tunnel name against the full valve set.
    pub fn new(valves: Vec<Valve>) -> Result<Self, GraphError> {
        if valves.len() > MAX_NODES {
            return Err(GraphError::TooManyNodes(valves.len()));
        }

        let index = NodeIndex::from_names(valves.iter().map(|v| v.name.as_str()))?;

        let mut nodes = Vec::with_capacity(valves.len());
        for (id, valve) in valves.into_iter().enumerate() {
            let neighbors = valve
                .tunnels
                .iter()
                .map(|neighbor| {
                    index
                        .get(neighbor)
                        .ok_or_else(|| GraphError::UnknownNeighbor {
                            node: valve.name.clone(),
                            neighbor: neighbor.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            nodes.push(Node {
                id: id as NodeId,
                name: valve.name,
                flow_rate: valve.flow_rate,
                neighbors,
            });
        }

        Ok(Self { index, nodes })
    }

    pub fn index(&self) -> &NodeIndex {
        &self.index
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Look up a node by name.
    pub fn node_by_name(&self, name: &str) -> Result<&Node, GraphError> {
        self.index
            .get(name)
            .and_then(|id| self.node(id))
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    pub fn id_of(&self, name: &str) -> Result<NodeId, GraphError> {
        self.index
            .get(name)
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    /// Resolve an ID back to its name (IDs come from this graph, so this only
    /// fails for foreign IDs).
    pub fn name_of(&self, id: NodeId) -> Result<&str, GraphError> {
        self.index
            .resolve(id)
            .ok_or_else(|| GraphError::NotFound(format!("#{id}")))
    }

    /// Every (node, neighbor) pair from the tunnel lists.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.neighbors
                .iter()
                .map(move |&to| Edge { from: node.id, to })
        })
    }

    /// Nodes with a non-zero flow rate, highest rate first, ties by name.
    pub fn nodes_with_positive_yield(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.iter().filter(|n| n.flow_rate > 0).collect();
        nodes.sort_by(|a, b| b.flow_rate.cmp(&a.flow_rate).then_with(|| a.name.cmp(&b.name)));
        nodes
    }

    /// The permutation universe for a search starting at `start`.
    pub fn candidates(&self, start: NodeId) -> Vec<NodeId> {
        self.nodes_with_positive_yield()
            .into_iter()
            .map(|n| n.id)
            .filter(|&id| id != start)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::Valve;

    /// Start -> B -> C chain from the three-node scenario.
    pub fn three_node_chain() -> Vec<Valve> {
        vec![
            Valve::new("Start", 0, &["B"]),
            Valve::new("B", 13, &["Start", "C"]),
            Valve::new("C", 2, &["B"]),
        ]
    }

    /// The well-known ten-valve example; best yield from AA in 30 is 1651.
    pub fn ten_valve_example() -> Vec<Valve> {
        vec![
            Valve::new("AA", 0, &["DD", "II", "BB"]),
            Valve::new("BB", 13, &["CC", "AA"]),
            Valve::new("CC", 2, &["DD", "BB"]),
            Valve::new("DD", 20, &["CC", "AA", "EE"]),
            Valve::new("EE", 3, &["FF", "DD"]),
            Valve::new("FF", 0, &["EE", "GG"]),
            Valve::new("GG", 0, &["FF", "HH"]),
            Valve::new("HH", 22, &["GG"]),
            Valve::new("II", 0, &["AA", "JJ"]),
            Valve::new("JJ", 21, &["II"]),
        ]
    }

    /// Three-node chain plus an unconnected high-yield valve.
    pub fn chain_with_isolated() -> Vec<Valve> {
        let mut valves = three_node_chain();
        valves.push(Valve::new("Island", 50, &[]));
        valves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::*;

    #[test]
    fn test_node_by_name() {
        let graph = GraphModel::new(three_node_chain()).unwrap();

        let b = graph.node_by_name("B").unwrap();
        assert_eq!(b.flow_rate, 13);
        assert_eq!(b.neighbors, vec![0, 2]);

        assert_eq!(
            graph.node_by_name("Nope"),
            Err(GraphError::NotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_unknown_neighbor_rejected() {
        let valves = vec![Valve::new("AA", 0, &["BB"])];
        let err = GraphModel::new(valves).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNeighbor {
                node: "AA".to_string(),
                neighbor: "BB".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let valves = vec![Valve::new("AA", 0, &[]), Valve::new("AA", 5, &[])];
        assert_eq!(
            GraphModel::new(valves).unwrap_err(),
            GraphError::DuplicateNode("AA".to_string())
        );
    }

    #[test]
    fn test_edges_from_adjacency() {
        let graph = GraphModel::new(three_node_chain()).unwrap();
        let edges: Vec<Edge> = graph.edges().collect();

        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&Edge { from: 0, to: 1 }));
        assert!(edges.contains(&Edge { from: 1, to: 0 }));
        assert!(edges.contains(&Edge { from: 1, to: 2 }));
        assert!(edges.contains(&Edge { from: 2, to: 1 }));
    }

    #[test]
    fn test_positive_yield_ordering() {
        let graph = GraphModel::new(ten_valve_example()).unwrap();
        let names: Vec<&str> = graph
            .nodes_with_positive_yield()
            .iter()
            .map(|n| n.name.as_str())
            .collect();

        assert_eq!(names, vec!["HH", "JJ", "DD", "BB", "EE", "CC"]);
    }

    #[test]
    fn test_positive_yield_ties_broken_by_name() {
        let valves = vec![
            Valve::new("ZZ", 5, &[]),
            Valve::new("AA", 0, &[]),
            Valve::new("MM", 5, &[]),
        ];
        let graph = GraphModel::new(valves).unwrap();
        let names: Vec<&str> = graph
            .nodes_with_positive_yield()
            .iter()
            .map(|n| n.name.as_str())
            .collect();

        assert_eq!(names, vec!["MM", "ZZ"]);
    }

    #[test]
    fn test_candidates_exclude_start() {
        let valves = vec![
            Valve::new("AA", 7, &["BB"]),
            Valve::new("BB", 3, &["AA"]),
        ];
        let graph = GraphModel::new(valves).unwrap();
        let start = graph.id_of("AA").unwrap();

        assert_eq!(graph.candidates(start), vec![1]);
    }
}
