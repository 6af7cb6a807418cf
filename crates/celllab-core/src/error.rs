//! Error taxonomy for celllab.
//!
//! Two kinds of failure exist. [`ConfigError`] is raised while building a
//! lattice, rule table or engine and means the model description itself is
//! malformed. [`ContractViolation`] is raised by a call on an already-built
//! engine whose arguments break the calling contract. Both abort the
//! operation before anything is mutated.
//!
//! Stale scheduled events are ordinary flow inside the engine and have no
//! error type.

use crate::id::{LinkId, NodeId};
use crate::pair::{Orientation, PairState};
use crate::state::NodeState;

/// A malformed model description, detected at construction time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A state dictionary was built from an empty name list.
    #[error("state dictionary must name at least one state")]
    EmptyStateDict,

    /// A state dictionary has more entries than `NodeState` can address.
    #[error("state dictionary has {count} states, at most {max} are supported")]
    TooManyStates {
        /// Number of names supplied.
        count: usize,
        /// Largest supported count.
        max: usize,
    },

    /// A rule or initial state uses a state missing from the dictionary.
    #[error("state {state} is out of range for a dictionary of {state_count} states")]
    StateOutOfRange {
        /// The offending state.
        state: NodeState,
        /// Number of states in the dictionary.
        state_count: usize,
    },

    /// A rule entry has a rate that is zero, negative, or not finite.
    #[error("rule for {pair} has non-positive rate {rate}")]
    NonPositiveRate {
        /// Pair state the rule applies to.
        pair: PairState,
        /// The offending rate.
        rate: f64,
    },

    /// Two rule entries share the same (tail, head, orientation) key.
    #[error("duplicate rule for {pair}")]
    DuplicateRule {
        /// The repeated key.
        pair: PairState,
    },

    /// A rule's source and target pair states disagree on orientation.
    #[error("rule '{label}' maps a {from} pair to a {to} pair")]
    OrientationMismatch {
        /// Process label of the rule.
        label: String,
        /// Orientation of the source pair.
        from: Orientation,
        /// Orientation of the target pair.
        to: Orientation,
    },

    /// A lattice was requested with zero nodes.
    #[error("lattice must have at least one node")]
    EmptyLattice,

    /// A lattice dimension exceeds what node ids can address.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension (`rows * cols`, `nodes`).
        name: &'static str,
        /// Requested value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },

    /// An explicit closed-node set names a node outside the lattice.
    #[error("closed node {node} is out of range for {node_count} nodes")]
    ClosedNodeOutOfRange {
        /// The offending node.
        node: NodeId,
        /// Number of nodes in the lattice.
        node_count: usize,
    },

    /// An adjacency description contains a link the engine cannot use.
    #[error("invalid link {tail}-{head}: {reason}")]
    InvalidLink {
        /// First endpoint as given.
        tail: NodeId,
        /// Second endpoint as given.
        head: NodeId,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The initial state vector does not have one entry per node.
    #[error("initial state vector has {got} entries, lattice has {expected} nodes")]
    InitialStateLength {
        /// Number of lattice nodes.
        expected: usize,
        /// Number of states supplied.
        got: usize,
    },

    /// A required builder input was never supplied.
    #[error("missing required input: {what}")]
    MissingInput {
        /// Which input is missing.
        what: &'static str,
    },

    /// Two builder inputs describe the same thing in different ways.
    #[error("conflicting inputs: {what}")]
    ConflictingInput {
        /// Which inputs conflict.
        what: &'static str,
    },

    /// The configured start time is NaN or infinite.
    #[error("start time must be finite, got {value}")]
    InvalidStartTime {
        /// The offending value.
        value: f64,
    },

    /// A serialized rule table could not be parsed.
    #[error("rule table parse error: {detail}")]
    Parse {
        /// Parser message.
        detail: String,
    },
}

/// A call on a built engine whose arguments break the calling contract.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContractViolation {
    /// `advance_to` was asked to move the clock backwards.
    #[error("target time {target} is before current time {current}")]
    TimeRegression {
        /// Requested target time.
        target: f64,
        /// Engine clock at the time of the call.
        current: f64,
    },

    /// `advance_to` was given NaN or an infinite target.
    #[error("target time must be finite, got {value}")]
    NonFiniteTime {
        /// The offending value.
        value: f64,
    },

    /// A node index is outside the lattice.
    #[error("node {node} is out of range for {node_count} nodes")]
    NodeOutOfRange {
        /// The offending node.
        node: NodeId,
        /// Number of nodes in the lattice.
        node_count: usize,
    },

    /// A link index is outside the lattice.
    #[error("link {link} is out of range for {link_count} links")]
    LinkOutOfRange {
        /// The offending link.
        link: LinkId,
        /// Number of links in the lattice.
        link_count: usize,
    },

    /// An injected state value is not in the model's state dictionary.
    #[error("state {state} is out of range for a dictionary of {state_count} states")]
    StateOutOfRange {
        /// The offending state.
        state: NodeState,
        /// Number of states in the dictionary.
        state_count: usize,
    },

    /// A full-grid state replacement has the wrong length.
    #[error("state vector has {got} entries, lattice has {expected} nodes")]
    StateLength {
        /// Number of lattice nodes.
        expected: usize,
        /// Number of states supplied.
        got: usize,
    },
}
