//! 2D raster with 4-connected, oriented links.

use crate::boundary::ClosedEdges;
use crate::lattice::{Lattice, Link};
use celllab_core::{ConfigError, LinkId, NodeId, Orientation};
use smallvec::SmallVec;

/// A two-dimensional raster of nodes joined by horizontal and vertical links.
///
/// Node `(row, col)` has id `row * cols + col`, with row 0 at the **bottom**
/// of the domain. Each node links to its right-hand neighbour (horizontal,
/// tail = left) and to the neighbour above it (vertical, tail = bottom).
///
/// Links are numbered row by row: first the horizontal links of row `r`
/// from left to right, then the vertical links from row `r` up to row
/// `r + 1`, from left to right.
///
/// # Examples
///
/// ```
/// use celllab_core::{LinkId, NodeId, Orientation};
/// use celllab_lattice::{ClosedEdges, Lattice, OrientedRaster};
///
/// let grid = OrientedRaster::new(3, 4, ClosedEdges::open()).unwrap();
/// assert_eq!(grid.node_count(), 12);
/// // 3 rows × 3 horizontal + 2 × 4 vertical.
/// assert_eq!(grid.link_count(), 17);
///
/// let first_vertical = grid.link(LinkId(3));
/// assert_eq!(first_vertical.orientation, Orientation::Vertical);
/// assert_eq!(first_vertical.tail, NodeId(0));
/// assert_eq!(first_vertical.head, NodeId(4));
/// ```
#[derive(Clone, Debug)]
pub struct OrientedRaster {
    rows: u32,
    cols: u32,
    closed: Vec<bool>,
    links: Vec<Link>,
    incident: Vec<SmallVec<[LinkId; 4]>>,
}

impl OrientedRaster {
    /// Largest node count: ids and link ids must both fit in `u32`.
    pub const MAX_NODES: u64 = (u32::MAX / 2) as u64;

    /// Build a raster whose closed nodes are the perimeter nodes of the
    /// closed edges in `edges`.
    pub fn new(rows: u32, cols: u32, edges: ClosedEdges) -> Result<Self, ConfigError> {
        Self::with_boundary(rows, cols, |row, col| edges.is_closed(row, col, rows, cols))
    }

    /// Build a raster whose closed nodes are given by a predicate over
    /// `(row, col)`.
    pub fn with_boundary(
        rows: u32,
        cols: u32,
        is_closed: impl Fn(u32, u32) -> bool,
    ) -> Result<Self, ConfigError> {
        check_dims(rows, cols)?;
        let mut closed = Vec::with_capacity((rows as usize) * (cols as usize));
        for row in 0..rows {
            for col in 0..cols {
                closed.push(is_closed(row, col));
            }
        }
        Ok(Self::build(rows, cols, closed))
    }

    /// Build a raster with an explicit set of closed nodes.
    ///
    /// Returns [`ConfigError::ClosedNodeOutOfRange`] if any id is outside
    /// the raster.
    pub fn with_closed_nodes(
        rows: u32,
        cols: u32,
        closed_nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<Self, ConfigError> {
        check_dims(rows, cols)?;
        let node_count = (rows as usize) * (cols as usize);
        let mut closed = vec![false; node_count];
        for node in closed_nodes {
            let flag = closed
                .get_mut(node.index())
                .ok_or(ConfigError::ClosedNodeOutOfRange { node, node_count })?;
            *flag = true;
        }
        Ok(Self::build(rows, cols, closed))
    }

    fn build(rows: u32, cols: u32, closed: Vec<bool>) -> Self {
        let node_count = closed.len();
        let link_count =
            (rows as usize) * (cols as usize - 1) + (rows as usize - 1) * (cols as usize);
        let mut links = Vec::with_capacity(link_count);
        let mut incident: Vec<SmallVec<[LinkId; 4]>> = vec![SmallVec::new(); node_count];

        let mut push = |tail: u32, head: u32, orientation: Orientation| {
            let id = LinkId(links.len() as u32);
            links.push(Link {
                id,
                tail: NodeId(tail),
                head: NodeId(head),
                orientation,
            });
            incident[tail as usize].push(id);
            incident[head as usize].push(id);
        };

        for row in 0..rows {
            for col in 0..cols - 1 {
                let tail = row * cols + col;
                push(tail, tail + 1, Orientation::Horizontal);
            }
            if row + 1 < rows {
                for col in 0..cols {
                    let tail = row * cols + col;
                    push(tail, tail + cols, Orientation::Vertical);
                }
            }
        }

        Self {
            rows,
            cols,
            closed,
            links,
            incident,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Id of the node at `(row, col)`, if in bounds.
    pub fn node_at(&self, row: u32, col: u32) -> Option<NodeId> {
        (row < self.rows && col < self.cols).then(|| NodeId(row * self.cols + col))
    }

    /// `(row, col)` of `node`, if in bounds.
    pub fn coords(&self, node: NodeId) -> Option<(u32, u32)> {
        (node.index() < self.closed.len()).then(|| (node.0 / self.cols, node.0 % self.cols))
    }

    /// Ids of all closed nodes, ascending.
    pub fn closed_nodes(&self) -> Vec<NodeId> {
        self.closed
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }
}

fn check_dims(rows: u32, cols: u32) -> Result<(), ConfigError> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::EmptyLattice);
    }
    let nodes = rows as u64 * cols as u64;
    if nodes > OrientedRaster::MAX_NODES {
        return Err(ConfigError::DimensionTooLarge {
            name: "rows * cols",
            value: nodes,
            max: OrientedRaster::MAX_NODES,
        });
    }
    Ok(())
}

impl Lattice for OrientedRaster {
    fn node_count(&self) -> usize {
        self.closed.len()
    }

    fn links(&self) -> &[Link] {
        &self.links
    }

    fn links_of(&self, node: NodeId) -> &[LinkId] {
        &self.incident[node.index()]
    }

    fn is_closed_node(&self, node: NodeId) -> bool {
        self.closed[node.index()]
    }
}
