//! Error types for node selection.

use celllab_core::NodeId;

/// Errors arising from compiling a [`Region`](crate::Region) against a lattice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// A row or column bound lies outside the lattice.
    #[error("{axis} {value} out of bounds: lattice has {len}")]
    OutOfBounds {
        /// `"row"` or `"col"`.
        axis: &'static str,
        /// The offending bound.
        value: u32,
        /// Length of the axis.
        len: u32,
    },
    /// A range has `min > max`.
    #[error("{axis} range is inverted: min {min} > max {max}")]
    Inverted {
        /// `"row"` or `"col"`.
        axis: &'static str,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
    /// An explicit node id lies outside the lattice.
    #[error("node {node} is out of range for {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node.
        node: NodeId,
        /// Number of nodes in the lattice.
        node_count: usize,
    },
}
