//! Lattice trait compliance test helpers.
//!
//! These functions verify that a Lattice implementation satisfies the
//! invariants the transition engine relies on. Reused across backend test
//! modules (OrientedRaster, LinkGraph).

use crate::lattice::Lattice;
use celllab_core::{LinkId, NodeId};
use indexmap::IndexSet;

/// Assert that `links()[i].id == LinkId(i)` for every link.
pub fn assert_link_ids_dense(lattice: &dyn Lattice) {
    for (i, link) in lattice.links().iter().enumerate() {
        assert_eq!(
            link.id,
            LinkId(i as u32),
            "link at position {i} has id {}",
            link.id
        );
    }
}

/// Assert that every link joins two distinct, in-range nodes.
pub fn assert_link_endpoints_valid(lattice: &dyn Lattice) {
    for link in lattice.links() {
        assert_ne!(link.tail, link.head, "{} is a self-loop", link.id);
        assert!(
            lattice.check_node(link.tail).is_ok(),
            "{} tail out of range",
            link.id
        );
        assert!(
            lattice.check_node(link.head).is_ok(),
            "{} head out of range",
            link.id
        );
    }
}

/// Assert that no node pair is joined by more than one link.
pub fn assert_no_parallel_links(lattice: &dyn Lattice) {
    let pairs: IndexSet<_> = lattice
        .links()
        .iter()
        .map(|l| (l.tail.min(l.head), l.tail.max(l.head)))
        .collect();
    assert_eq!(pairs.len(), lattice.link_count(), "parallel links present");
}

/// Assert that `links_of(n)` is exactly the set of links touching `n`, ascending.
pub fn assert_incidence_consistent(lattice: &dyn Lattice) {
    for n in 0..lattice.node_count() as u32 {
        let node = NodeId(n);
        let expected: Vec<LinkId> = lattice
            .links()
            .iter()
            .filter(|l| l.touches(node))
            .map(|l| l.id)
            .collect();
        assert_eq!(
            lattice.links_of(node),
            expected.as_slice(),
            "incidence mismatch at node {node}"
        );
    }
}

/// Assert that `b in neighbors(a)` implies `a in neighbors(b)` with the same orientation.
pub fn assert_neighbors_symmetric(lattice: &dyn Lattice) {
    for n in 0..lattice.node_count() as u32 {
        let node = NodeId(n);
        for (nb, orientation) in lattice.neighbors(node) {
            assert!(
                lattice.neighbors(nb).contains(&(node, orientation)),
                "neighbour symmetry violated: {nb} in N({node}) but {node} not in N({nb})"
            );
        }
    }
}

/// Assert that `is_closed_link` agrees with the per-link closed flag.
pub fn assert_closed_links_consistent(lattice: &dyn Lattice) {
    for link in lattice.links() {
        let by_pair = lattice.is_closed_link(link.tail, link.head);
        let reversed = lattice.is_closed_link(link.head, link.tail);
        let by_id = lattice.is_link_closed(link.id);
        assert_eq!(by_pair, by_id, "closed flag mismatch on {}", link.id);
        assert_eq!(
            by_pair, reversed,
            "closed flag not symmetric on {}",
            link.id
        );
    }
}

/// Run all compliance checks on a lattice.
pub fn run_full_compliance(lattice: &dyn Lattice) {
    assert_link_ids_dense(lattice);
    assert_link_endpoints_valid(lattice);
    assert_no_parallel_links(lattice);
    assert_incidence_consistent(lattice);
    assert_neighbors_symmetric(lattice);
    assert_closed_links_consistent(lattice);
}
