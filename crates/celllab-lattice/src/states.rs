//! Per-node state storage.

use celllab_core::{NodeId, NodeState};

/// The state of every node of a lattice, indexed by [`NodeId`].
///
/// A thin wrapper over `Vec<NodeState>`. Indexing methods panic on
/// out-of-range ids; the engine validates caller-supplied ids before
/// touching storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeStates {
    values: Vec<NodeState>,
}

impl NodeStates {
    /// Wrap an existing state vector.
    pub fn new(values: Vec<NodeState>) -> Self {
        Self { values }
    }

    /// `len` nodes, all in `state`.
    pub fn filled(len: usize, state: NodeState) -> Self {
        Self {
            values: vec![state; len],
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// State of `node`.
    #[inline]
    pub fn get(&self, node: NodeId) -> NodeState {
        self.values[node.index()]
    }

    /// Overwrite the state of `node`, returning the previous value.
    #[inline]
    pub fn set(&mut self, node: NodeId, state: NodeState) -> NodeState {
        std::mem::replace(&mut self.values[node.index()], state)
    }

    /// All states in node order.
    pub fn as_slice(&self) -> &[NodeState] {
        &self.values
    }

    /// Number of nodes in each state `0..state_count`.
    ///
    /// States at or above `state_count` are not counted.
    pub fn counts(&self, state_count: usize) -> Vec<usize> {
        let mut counts = vec![0; state_count];
        for s in &self.values {
            if let Some(c) = counts.get_mut(s.index()) {
                *c += 1;
            }
        }
        counts
    }
}

impl From<Vec<NodeState>> for NodeStates {
    fn from(values: Vec<NodeState>) -> Self {
        Self::new(values)
    }
}
