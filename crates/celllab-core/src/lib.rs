//! Core types for celllab continuous-time cellular automata.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! identifiers, node states, link orientations and error taxonomy shared by
//! the lattice, rule-table and engine crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod pair;
pub mod state;

pub use error::{ConfigError, ContractViolation};
pub use id::{LinkId, NodeId};
pub use pair::{Orientation, PairState};
pub use state::{NodeState, StateDict};
