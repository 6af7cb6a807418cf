//! Benchmark profiles and demo drivers for celllab.
//!
//! - [`RiverProfile`]: grains fed into a river cross-section from the left,
//!   carried right by the flow and pulled down by gravity
//! - [`RiverRun`]: a built profile, stepped one feed interval at a time
//! - [`concentration_profile`]: per-row particle fraction in a column window

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;
use std::time::Duration;

use celllab_core::{ContractViolation, NodeId, NodeState, Orientation, StateDict};
use celllab_engine::{AdvanceReport, EngineConfig, TransitionEngine};
use celllab_lattice::{ClosedEdges, Lattice, OrientedRaster, Region};
use celllab_rules::{RuleSpec, RuleTable};

/// State of a fluid node.
pub const FLUID: NodeState = NodeState(0);
/// State of a node holding a grain.
pub const PARTICLE: NodeState = NodeState(1);

/// The four river transitions: a biased random walk where flow pushes
/// grains right and gravity slightly outweighs turbulence.
pub fn river_rules() -> Result<RuleTable, celllab_core::ConfigError> {
    use Orientation::{Horizontal, Vertical};
    RuleTable::new(
        StateDict::new(["fluid", "particle"])?,
        [
            RuleSpec::new((0, 1, Horizontal), (1, 0, Horizontal), 0.1, "left motion"),
            RuleSpec::new((1, 0, Horizontal), (0, 1, Horizontal), 9.9, "right motion"),
            RuleSpec::new((0, 1, Vertical), (1, 0, Vertical), 10.55, "down motion"),
            RuleSpec::new((1, 0, Vertical), (0, 1, Vertical), 9.45, "up motion"),
        ],
    )
}

/// Parameters of a river run.
#[derive(Clone, Debug)]
pub struct RiverProfile {
    /// Grid rows (height of the cross-section).
    pub rows: u32,
    /// Grid columns (length of the reach).
    pub cols: u32,
    /// Number of leftmost columns refilled with grains every interval.
    pub feed_columns: u32,
    /// Simulated time between refills.
    pub interval: f64,
    /// Total simulated time.
    pub duration: f64,
    /// Wall-clock time between progress lines.
    pub report_every: Duration,
    /// Random seed.
    pub seed: u64,
}

impl Default for RiverProfile {
    /// 50 × 200 grid fed over the left 5 % of columns, refilled every 1.0
    /// for 20.0 time units.
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 200,
            feed_columns: 10,
            interval: 1.0,
            duration: 20.0,
            report_every: Duration::from_secs(10),
            seed: 0,
        }
    }
}

impl RiverProfile {
    /// A 20 × 60 variant for quick benchmarks.
    pub fn small() -> Self {
        Self {
            rows: 20,
            cols: 60,
            feed_columns: 3,
            ..Self::default()
        }
    }

    /// Grid closed on every edge except the right one.
    pub fn grid(&self) -> Result<OrientedRaster, celllab_core::ConfigError> {
        OrientedRaster::new(self.rows, self.cols, ClosedEdges::all_but_right())
    }

    /// Open nodes in the feed columns.
    pub fn feed_nodes(&self, grid: &OrientedRaster) -> Result<Vec<NodeId>, Box<dyn Error>> {
        if self.feed_columns == 0 {
            return Ok(Vec::new());
        }
        let nodes = Region::Columns {
            min: 0,
            max: self.feed_columns - 1,
        }
        .compile(grid)?;
        Ok(nodes
            .into_iter()
            .filter(|&n| !grid.is_closed_node(n))
            .collect())
    }

    /// Build the grid, rules and engine, with the feed columns full.
    pub fn build(&self) -> Result<RiverRun, Box<dyn Error>> {
        let grid = self.grid()?;
        let feed = self.feed_nodes(&grid)?;
        let mut initial = vec![FLUID; grid.node_count()];
        for &n in &feed {
            initial[n.index()] = PARTICLE;
        }
        let engine = TransitionEngine::builder()
            .lattice(grid)
            .rule_table(river_rules()?)
            .initial_states(initial)
            .config(EngineConfig::with_seed(self.seed))
            .build()?;
        Ok(RiverRun {
            engine,
            feed,
            interval: self.interval,
        })
    }
}

/// A river simulation in progress.
#[derive(Debug)]
pub struct RiverRun {
    /// The engine being driven.
    pub engine: TransitionEngine,
    /// Nodes refilled before every interval.
    pub feed: Vec<NodeId>,
    interval: f64,
}

impl RiverRun {
    /// Refill the feed nodes, then advance one interval.
    pub fn step(&mut self) -> Result<AdvanceReport, ContractViolation> {
        self.engine.set_states(&self.feed, PARTICLE)?;
        let target = self.engine.current_time() + self.interval;
        self.engine.advance_to(target)
    }
}

/// Fraction of `state` in each row over columns `center - half_width ..
/// center + half_width`, bottom row first.
///
/// The window is clipped to the grid.
///
/// # Errors
///
/// [`ContractViolation::StateLength`] unless `states` holds one entry per
/// grid node.
pub fn concentration_profile(
    grid: &OrientedRaster,
    states: &[NodeState],
    center: u32,
    half_width: u32,
    state: NodeState,
) -> Result<Vec<f64>, ContractViolation> {
    if states.len() != grid.node_count() {
        return Err(ContractViolation::StateLength {
            expected: grid.node_count(),
            got: states.len(),
        });
    }
    let lo = center.saturating_sub(half_width);
    let hi = center.saturating_add(half_width).min(grid.cols());
    if lo >= hi {
        return Ok(vec![0.0; grid.rows() as usize]);
    }
    let profile = (0..grid.rows())
        .map(|row| {
            let start = (row * grid.cols() + lo) as usize;
            let end = (row * grid.cols() + hi) as usize;
            let hits = states[start..end].iter().filter(|&&s| s == state).count();
            hits as f64 / (hi - lo) as f64
        })
        .collect();
    Ok(profile)
}
