//! The core `Lattice` trait and the `Link` record.

use celllab_core::{ContractViolation, LinkId, NodeId, Orientation};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::any::Any;

/// An oriented link between two adjacent nodes.
///
/// `tail` is the left endpoint of a horizontal link or the bottom endpoint
/// of a vertical link; `head` is the other one. Rule tables are keyed on the
/// states in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Position of this link in the lattice's canonical link order.
    pub id: LinkId,
    /// Left or bottom endpoint.
    pub tail: NodeId,
    /// Right or top endpoint.
    pub head: NodeId,
    /// Orientation of the link.
    pub orientation: Orientation,
}

impl Link {
    /// Whether `node` is one of this link's endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.tail == node || self.head == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.tail == node {
            Some(self.head)
        } else if self.head == node {
            Some(self.tail)
        } else {
            None
        }
    }
}

/// Topology of a lattice: nodes, oriented links, and boundary flags.
///
/// Topology is immutable after construction. Backends precompute their
/// link table and per-node incidence lists once, so every query here is a
/// slice lookup.
///
/// Methods taking a `NodeId` or `LinkId` panic when the id is out of range;
/// callers holding untrusted ids validate them with
/// [`check_node`](Lattice::check_node) / [`check_link`](Lattice::check_link)
/// first.
pub trait Lattice: Any + Send + Sync + 'static {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// All links in canonical order; `links()[i].id == LinkId(i)`.
    fn links(&self) -> &[Link];

    /// Links incident to `node`, in ascending id order.
    fn links_of(&self, node: NodeId) -> &[LinkId];

    /// Whether `node` is a closed boundary node.
    fn is_closed_node(&self, node: NodeId) -> bool;

    /// Number of links.
    fn link_count(&self) -> usize {
        self.links().len()
    }

    /// The link with the given id.
    fn link(&self, id: LinkId) -> &Link {
        &self.links()[id.index()]
    }

    /// Neighbours of `node` with the orientation of the joining link,
    /// in ascending link order.
    fn neighbors(&self, node: NodeId) -> SmallVec<[(NodeId, Orientation); 4]> {
        self.links_of(node)
            .iter()
            .filter_map(|&id| {
                let link = self.link(id);
                link.other(node).map(|nb| (nb, link.orientation))
            })
            .collect()
    }

    /// The link joining `a` and `b`, in either order.
    fn link_between(&self, a: NodeId, b: NodeId) -> Option<&Link> {
        self.links_of(a)
            .iter()
            .map(|&id| self.link(id))
            .find(|link| link.other(a) == Some(b))
    }

    /// Whether the link `id` is closed (either endpoint closed).
    fn is_link_closed(&self, id: LinkId) -> bool {
        let link = self.link(id);
        self.is_closed_node(link.tail) || self.is_closed_node(link.head)
    }

    /// Whether the pair `a`, `b` can never transition.
    ///
    /// True if either endpoint is a closed boundary node, or if the two
    /// nodes are not adjacent at all.
    fn is_closed_link(&self, a: NodeId, b: NodeId) -> bool {
        match self.link_between(a, b) {
            Some(link) => self.is_link_closed(link.id),
            None => true,
        }
    }

    /// Validate a node id supplied by a caller.
    fn check_node(&self, node: NodeId) -> Result<(), ContractViolation> {
        if node.index() < self.node_count() {
            Ok(())
        } else {
            Err(ContractViolation::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Validate a link id supplied by a caller.
    fn check_link(&self, link: LinkId) -> Result<(), ContractViolation> {
        if link.index() < self.link_count() {
            Ok(())
        } else {
            Err(ContractViolation::LinkOutOfRange {
                link,
                link_count: self.link_count(),
            })
        }
    }
}

impl dyn Lattice {
    /// Attempt to downcast a trait object to a concrete lattice type.
    pub fn downcast_ref<T: Lattice>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
