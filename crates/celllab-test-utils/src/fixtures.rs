//! Reusable model fixtures.
//!
//! The river model: two states (`0 = fluid`, `1 = particle`) and four swap
//! rules that bias particles rightwards and downwards.
//!
//! - [`river_rule_specs`] / [`river_rule_table`]: the rules in Rust.
//! - [`RIVER_TOML`]: the same table as a TOML document.
//! - [`golden_grid`] / [`golden_initial_states`]: the 4×4 regression
//!   scenario.

use celllab_core::{NodeId, NodeState, Orientation, StateDict};
use celllab_lattice::{ClosedEdges, OrientedRaster};
use celllab_rules::{RuleSpec, RuleTable};

pub const FLUID: NodeState = NodeState(0);
pub const PARTICLE: NodeState = NodeState(1);

/// Node seeded with a particle in the golden scenario: row 2, column 1.
pub const GOLDEN_SEED_NODE: NodeId = NodeId(2 * 4 + 1);

/// Random seed of the golden scenario.
pub const GOLDEN_SEED: u64 = 42;

/// The river rule table in TOML form.
pub const RIVER_TOML: &str = r#"
states = ["fluid", "particle"]

[[rules]]
from = [0, 1, "horizontal"]
to = [1, 0, "horizontal"]
rate = 0.1
label = "left motion"

[[rules]]
from = [1, 0, "horizontal"]
to = [0, 1, "horizontal"]
rate = 9.9
label = "right motion"

[[rules]]
from = [0, 1, "vertical"]
to = [1, 0, "vertical"]
rate = 10.55
label = "down motion"

[[rules]]
from = [1, 0, "vertical"]
to = [0, 1, "vertical"]
rate = 9.45
label = "up motion"
"#;

pub fn river_state_dict() -> StateDict {
    StateDict::new(["fluid", "particle"]).expect("two names are a valid dictionary")
}

/// The four river rules, in the order left, right, down, up.
pub fn river_rule_specs() -> Vec<RuleSpec> {
    use Orientation::{Horizontal, Vertical};
    vec![
        RuleSpec::new((0, 1, Horizontal), (1, 0, Horizontal), 0.1, "left motion"),
        RuleSpec::new((1, 0, Horizontal), (0, 1, Horizontal), 9.9, "right motion"),
        RuleSpec::new((0, 1, Vertical), (1, 0, Vertical), 10.55, "down motion"),
        RuleSpec::new((1, 0, Vertical), (0, 1, Vertical), 9.45, "up motion"),
    ]
}

pub fn river_rule_table() -> RuleTable {
    RuleTable::new(river_state_dict(), river_rule_specs()).expect("river rules are valid")
}

/// A `rows × cols` raster closed on every edge except the right one.
pub fn river_grid(rows: u32, cols: u32) -> OrientedRaster {
    OrientedRaster::new(rows, cols, ClosedEdges::all_but_right()).expect("non-empty grid")
}

/// The 4×4 grid of the golden scenario.
pub fn golden_grid() -> OrientedRaster {
    river_grid(4, 4)
}

/// All fluid except [`GOLDEN_SEED_NODE`].
pub fn golden_initial_states() -> Vec<NodeState> {
    let mut states = vec![FLUID; 16];
    states[GOLDEN_SEED_NODE.index()] = PARTICLE;
    states
}
