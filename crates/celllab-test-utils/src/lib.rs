//! Test fixtures and scenario builders for celllab development.
//!
//! Provides the river model fixtures ([`fixtures`]) and helpers for
//! generating reproducible initial conditions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use celllab_core::{NodeId, NodeState};
use celllab_lattice::{Lattice, OrientedRaster};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use fixtures::{
    golden_grid, golden_initial_states, river_grid, river_rule_specs, river_rule_table,
    river_state_dict, FLUID, GOLDEN_SEED, GOLDEN_SEED_NODE, PARTICLE, RIVER_TOML,
};

/// `len` nodes, each `PARTICLE` with probability `density`, else `FLUID`.
///
/// Deterministic for a given `seed`.
pub fn random_states(len: usize, density: f64, seed: u64) -> Vec<NodeState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.random::<f64>() < density {
                PARTICLE
            } else {
                FLUID
            }
        })
        .collect()
}

/// Like [`random_states`], but closed nodes are always `FLUID`.
pub fn random_open_states(grid: &OrientedRaster, density: f64, seed: u64) -> Vec<NodeState> {
    let mut states = random_states(grid.node_count(), density, seed);
    for node in grid.closed_nodes() {
        states[node.index()] = FLUID;
    }
    states
}

/// Nodes of `grid` that are open and in `state`.
pub fn open_nodes_in(
    grid: &OrientedRaster,
    states: &[NodeState],
    state: NodeState,
) -> Vec<NodeId> {
    (0..grid.node_count() as u32)
        .map(NodeId)
        .filter(|&n| !grid.is_closed_node(n) && states[n.index()] == state)
        .collect()
}

/// Builder for the common "river grid with particles" scenario.
pub struct TestScenario {
    pub rows: u32,
    pub cols: u32,
    pub density: f64,
    pub seed: u64,
}

impl TestScenario {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            density: 0.2,
            seed: 0,
        }
    }

    pub fn density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The grid and initial states of this scenario.
    pub fn build(&self) -> (OrientedRaster, Vec<NodeState>) {
        let grid = river_grid(self.rows, self.cols);
        let states = random_open_states(&grid, self.density, self.seed);
        (grid, states)
    }
}
