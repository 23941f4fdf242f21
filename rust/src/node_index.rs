//! Fixed mapping between valve names and dense integer IDs.
//!
//! Built once from the full valve set; both shortest-path matrices are
//! addressed through the IDs it hands out.

use rustc_hash::FxHashMap;

use crate::graph::GraphError;

/// Dense node ID (u32 for compact matrix indexing and fast hashing).
pub type NodeId = u32;

/// Immutable bijection between node names and `0..n`.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    to_id: FxHashMap<String, NodeId>,
    from_id: Vec<String>,
}

impl NodeIndex {
    /// Assign IDs in iteration order.
    ///
    /// Returns `GraphError::DuplicateNode` if a name appears twice.
    pub fn from_names<I, S>(names: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names.into_iter();
        let (lower, _) = names.size_hint();
        let mut to_id: FxHashMap<String, NodeId> =
            FxHashMap::with_capacity_and_hasher(lower, Default::default());
        let mut from_id = Vec::with_capacity(lower);

        for name in names {
            let name = name.as_ref();
            if to_id.contains_key(name) {
                return Err(GraphError::DuplicateNode(name.to_string()));
            }
            let id = from_id.len() as NodeId;
            from_id.push(name.to_string());
            to_id.insert(name.to_string(), id);
        }

        Ok(Self { to_id, from_id })
    }

    /// Get the ID for a name, if it exists.
    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.to_id.get(name).copied()
    }

    /// Get the name for an ID.
    #[inline]
    pub fn resolve(&self, id: NodeId) -> Option<&str> {
        self.from_id.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_id.is_empty()
    }
}
