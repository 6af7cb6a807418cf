//! Node selection on a raster.
//!
//! A [`Region`] describes a set of raster nodes in grid terms (columns,
//! rows, rectangles) and compiles to a sorted, deduplicated id list. Drivers
//! use it to pick the nodes they inject into between advance calls, e.g. a
//! band of columns refilled with particles every interval.

use crate::error::RegionError;
use crate::lattice::Lattice;
use crate::raster::OrientedRaster;
use celllab_core::NodeId;
use serde::{Deserialize, Serialize};

/// A set of raster nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Every node.
    All,
    /// Every node whose column lies in `min..=max`.
    Columns {
        /// First column (inclusive).
        min: u32,
        /// Last column (inclusive).
        max: u32,
    },
    /// Every node whose row lies in `min..=max`.
    Rows {
        /// First row (inclusive).
        min: u32,
        /// Last row (inclusive).
        max: u32,
    },
    /// Axis-aligned rectangle, bounds inclusive.
    Rect {
        /// First and last row.
        rows: (u32, u32),
        /// First and last column.
        cols: (u32, u32),
    },
    /// Every node not flagged closed.
    Open,
    /// Explicit node list.
    Nodes(Vec<NodeId>),
}

impl Region {
    /// Compile this region against `grid` into ascending, unique node ids.
    ///
    /// # Examples
    ///
    /// ```
    /// use celllab_core::NodeId;
    /// use celllab_lattice::{ClosedEdges, OrientedRaster, Region};
    ///
    /// let grid = OrientedRaster::new(3, 4, ClosedEdges::open()).unwrap();
    /// let left = Region::Columns { min: 0, max: 0 }.compile(&grid).unwrap();
    /// assert_eq!(left, vec![NodeId(0), NodeId(4), NodeId(8)]);
    /// ```
    pub fn compile(&self, grid: &OrientedRaster) -> Result<Vec<NodeId>, RegionError> {
        let rows = grid.rows();
        let cols = grid.cols();
        match self {
            Self::All => Ok(rect(grid, (0, rows - 1), (0, cols - 1))),
            Self::Columns { min, max } => {
                check_range("col", *min, *max, cols)?;
                Ok(rect(grid, (0, rows - 1), (*min, *max)))
            }
            Self::Rows { min, max } => {
                check_range("row", *min, *max, rows)?;
                Ok(rect(grid, (*min, *max), (0, cols - 1)))
            }
            Self::Rect {
                rows: row_range,
                cols: col_range,
            } => {
                check_range("row", row_range.0, row_range.1, rows)?;
                check_range("col", col_range.0, col_range.1, cols)?;
                Ok(rect(grid, *row_range, *col_range))
            }
            Self::Open => Ok((0..grid.node_count() as u32)
                .map(NodeId)
                .filter(|&n| !grid.is_closed_node(n))
                .collect()),
            Self::Nodes(nodes) => {
                let node_count = grid.node_count();
                if let Some(&node) = nodes.iter().find(|n| n.index() >= node_count) {
                    return Err(RegionError::NodeOutOfRange { node, node_count });
                }
                let mut sorted = nodes.clone();
                sorted.sort_unstable();
                sorted.dedup();
                Ok(sorted)
            }
        }
    }
}

fn check_range(axis: &'static str, min: u32, max: u32, len: u32) -> Result<(), RegionError> {
    if min > max {
        return Err(RegionError::Inverted { axis, min, max });
    }
    if max >= len {
        return Err(RegionError::OutOfBounds {
            axis,
            value: max,
            len,
        });
    }
    Ok(())
}

fn rect(grid: &OrientedRaster, rows: (u32, u32), cols: (u32, u32)) -> Vec<NodeId> {
    let width = grid.cols();
    let mut out =
        Vec::with_capacity(((rows.1 - rows.0 + 1) as usize) * ((cols.1 - cols.0 + 1) as usize));
    for row in rows.0..=rows.1 {
        for col in cols.0..=cols.1 {
            out.push(NodeId(row * width + col));
        }
    }
    out
}
