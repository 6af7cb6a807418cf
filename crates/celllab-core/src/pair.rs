//! Link orientation and oriented pair states.

use crate::state::NodeState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial orientation of a link.
///
/// On a raster, horizontal links join a node to its right-hand neighbour
/// and vertical links join a node to the neighbour above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left (tail) to right (head).
    Horizontal,
    /// Bottom (tail) to top (head).
    Vertical,
}

impl Orientation {
    /// Both orientations, horizontal first.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// `0` for horizontal, `1` for vertical.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// The ordered states at a link's tail and head, plus its orientation.
///
/// This is the key of the transition rule table. `tail` is always the
/// state of the link's first (left or bottom) endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairState {
    /// State of the left/bottom endpoint.
    pub tail: NodeState,
    /// State of the right/top endpoint.
    pub head: NodeState,
    /// Orientation of the link.
    pub orientation: Orientation,
}

impl PairState {
    /// Build a pair state.
    pub fn new(tail: NodeState, head: NodeState, orientation: Orientation) -> Self {
        Self {
            tail,
            head,
            orientation,
        }
    }
}

impl From<(u8, u8, Orientation)> for PairState {
    fn from((tail, head, orientation): (u8, u8, Orientation)) -> Self {
        Self::new(NodeState(tail), NodeState(head), orientation)
    }
}

impl fmt::Display for PairState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{}, {})", self.tail, self.head, self.orientation)
    }
}
