//! Lattice built from an explicit adjacency description.

use crate::lattice::{Lattice, Link};
use celllab_core::{ConfigError, LinkId, NodeId, Orientation};
use smallvec::SmallVec;
use std::collections::HashSet;

/// A lattice whose links are listed explicitly.
///
/// Use this when the topology is not a plain raster (masked domains,
/// irregular meshes, hand-built test fixtures). Each entry is
/// `(tail, head, orientation)`; the caller is responsible for choosing
/// tail/head consistently with the rule table (left/bottom as tail).
/// Links keep the order in which they were given.
///
/// # Examples
///
/// ```
/// use celllab_core::{NodeId, Orientation};
/// use celllab_lattice::{Lattice, LinkGraph};
///
/// // Three nodes in a row, the middle one closed.
/// let g = LinkGraph::new(
///     3,
///     [
///         (NodeId(0), NodeId(1), Orientation::Horizontal),
///         (NodeId(1), NodeId(2), Orientation::Horizontal),
///     ],
///     [NodeId(1)],
/// )
/// .unwrap();
/// assert_eq!(g.link_count(), 2);
/// assert!(g.is_closed_link(NodeId(0), NodeId(1)));
/// ```
#[derive(Clone, Debug)]
pub struct LinkGraph {
    closed: Vec<bool>,
    links: Vec<Link>,
    incident: Vec<SmallVec<[LinkId; 4]>>,
}

impl LinkGraph {
    /// Largest node or link count.
    pub const MAX_NODES: u64 = u32::MAX as u64;

    /// Build a graph of `node_count` nodes from a link list and a
    /// closed-node set.
    ///
    /// Rejects self-loops, out-of-range endpoints and node pairs listed
    /// twice (in either order).
    pub fn new(
        node_count: usize,
        links: impl IntoIterator<Item = (NodeId, NodeId, Orientation)>,
        closed_nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<Self, ConfigError> {
        if node_count == 0 {
            return Err(ConfigError::EmptyLattice);
        }
        if node_count as u64 > Self::MAX_NODES {
            return Err(ConfigError::DimensionTooLarge {
                name: "nodes",
                value: node_count as u64,
                max: Self::MAX_NODES,
            });
        }

        let mut closed = vec![false; node_count];
        for node in closed_nodes {
            let flag = closed
                .get_mut(node.index())
                .ok_or(ConfigError::ClosedNodeOutOfRange { node, node_count })?;
            *flag = true;
        }

        let mut out = Vec::new();
        let mut incident: Vec<SmallVec<[LinkId; 4]>> = vec![SmallVec::new(); node_count];
        let mut seen = HashSet::new();
        for (tail, head, orientation) in links {
            let invalid = |reason| ConfigError::InvalidLink {
                tail,
                head,
                reason,
            };
            if tail.index() >= node_count || head.index() >= node_count {
                return Err(invalid("endpoint out of range"));
            }
            if tail == head {
                return Err(invalid("self-loop"));
            }
            if !seen.insert((tail.min(head), tail.max(head))) {
                return Err(invalid("node pair already linked"));
            }
            if out.len() as u64 >= Self::MAX_NODES {
                return Err(invalid("too many links"));
            }
            let id = LinkId(out.len() as u32);
            out.push(Link {
                id,
                tail,
                head,
                orientation,
            });
            incident[tail.index()].push(id);
            incident[head.index()].push(id);
        }

        Ok(Self {
            closed,
            links: out,
            incident,
        })
    }
}

impl Lattice for LinkGraph {
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
