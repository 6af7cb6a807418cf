//! celllab: continuous-time stochastic cellular automata.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all celllab sub-crates. For most users, adding `celllab` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use celllab::prelude::*;
//!
//! // Two nodes joined by one horizontal link; a particle hops right.
//! let grid = OrientedRaster::new(1, 2, ClosedEdges::open()).unwrap();
//! let mut engine = TransitionEngine::builder()
//!     .lattice(grid)
//!     .state_dict(StateDict::new(["empty", "particle"]).unwrap())
//!     .rule(RuleSpec::new(
//!         (1, 0, Orientation::Horizontal),
//!         (0, 1, Orientation::Horizontal),
//!         1.0,
//!         "hop",
//!     ))
//!     .initial_states(vec![NodeState(1), NodeState(0)])
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let report = engine.advance_to(100.0).unwrap();
//! assert_eq!(report.fired, 1);
//! assert_eq!(engine.state(NodeId(1)).unwrap(), NodeState(1));
//! assert_eq!(engine.current_time(), 100.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `celllab-core` | IDs, states, pair states, error types |
//! | [`lattice`] | `celllab-lattice` | Lattice trait, raster and graph backends, regions |
//! | [`rules`] | `celllab-rules` | Transition rules, rule tables, TOML loading |
//! | [`engine`] | `celllab-engine` | Event queue, transition engine, observers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`celllab-core`).
///
/// Node and link IDs, node states and the state dictionary, pair states,
/// and the two error types [`types::ConfigError`] and
/// [`types::ContractViolation`].
pub use celllab_core as types;

/// Lattices (`celllab-lattice`).
///
/// Provides the [`lattice::Lattice`] trait and the
/// [`lattice::OrientedRaster`] and [`lattice::LinkGraph`] backends.
pub use celllab_lattice as lattice;

/// Transition rules (`celllab-rules`).
pub use celllab_rules as rules;

/// The event-driven engine (`celllab-engine`).
///
/// [`engine::TransitionEngine`] advances a lattice through time;
/// [`engine::EventQueue`] is its time-ordered event store.
pub use celllab_engine as engine;

/// Common imports for typical celllab usage.
///
/// ```rust
/// use celllab::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use celllab_core::{LinkId, NodeId, NodeState, Orientation, PairState, StateDict};

    // Errors
    pub use celllab_core::{ConfigError, ContractViolation};

    // Lattices
    pub use celllab_lattice::{ClosedEdges, Lattice, LinkGraph, OrientedRaster, Region};

    // Rules
    pub use celllab_rules::{RuleSpec, RuleTable};

    // Engine
    pub use celllab_engine::{
        AdvanceReport, EngineConfig, TransitionEngine, TransitionLog, TransitionObserver,
    };
}
