//! Closed-boundary flags for raster edges.

use serde::{Deserialize, Serialize};

/// Which perimeter edges of a raster are closed.
///
/// A closed node never takes part in a transition: every link touching it
/// is inert. A perimeter node is closed if *any* edge it lies on is closed,
/// so corners shared with a closed edge stay closed even when the other
/// edge is open.
///
/// # Examples
///
/// ```
/// use celllab_core::NodeId;
/// use celllab_lattice::{ClosedEdges, Lattice, OrientedRaster};
///
/// // Flow leaves through the right edge; every other wall is solid.
/// let grid = OrientedRaster::new(4, 4, ClosedEdges::all_but_right()).unwrap();
/// assert!(grid.is_closed_node(NodeId(4)));   // row 1, col 0 (left edge)
/// assert!(!grid.is_closed_node(NodeId(7)));  // row 1, col 3 (right edge)
/// assert!(grid.is_closed_node(NodeId(3)));   // bottom-right corner
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClosedEdges {
    /// Column `cols - 1`.
    pub right: bool,
    /// Row `rows - 1`.
    pub top: bool,
    /// Column 0.
    pub left: bool,
    /// Row 0.
    pub bottom: bool,
}

impl ClosedEdges {
    /// Every edge open.
    pub const fn open() -> Self {
        Self {
            right: false,
            top: false,
            left: false,
            bottom: false,
        }
    }

    /// Every edge closed.
    pub const fn closed() -> Self {
        Self {
            right: true,
            top: true,
            left: true,
            bottom: true,
        }
    }

    /// Every edge closed except the right one.
    pub const fn all_but_right() -> Self {
        Self {
            right: false,
            top: true,
            left: true,
            bottom: true,
        }
    }

    /// Whether the node at `(row, col)` of a `rows × cols` raster is closed.
    pub fn is_closed(&self, row: u32, col: u32, rows: u32, cols: u32) -> bool {
        (self.bottom && row == 0)
            || (self.top && row + 1 == rows)
            || (self.left && col == 0)
            || (self.right && col + 1 == cols)
    }
}
