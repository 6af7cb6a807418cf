//! Discrete node states and the state dictionary.

use crate::error::{ConfigError, ContractViolation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The discrete state held by one lattice node.
///
/// The meaning of each value is domain-defined and named by a
/// [`StateDict`]; the river model uses `0 = fluid` and `1 = particle`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeState(pub u8);

impl NodeState {
    /// The state as a `usize` index (for histograms and dictionaries).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for NodeState {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Names of the node states a model uses.
///
/// State `i` is named `names[i]`; every state value a model touches must be
/// strictly below [`len`](StateDict::len).
///
/// # Examples
///
/// ```
/// use celllab_core::{NodeState, StateDict};
///
/// let dict = StateDict::new(["fluid", "particle"]).unwrap();
/// assert_eq!(dict.len(), 2);
/// assert_eq!(dict.name(NodeState(1)), Some("particle"));
/// assert!(dict.contains(NodeState(1)));
/// assert!(!dict.contains(NodeState(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDict {
    names: Vec<String>,
}

impl StateDict {
    /// Largest number of states a dictionary can hold.
    pub const MAX_STATES: usize = u8::MAX as usize + 1;

    /// Build a dictionary from state names in state order.
    ///
    /// Returns [`ConfigError::EmptyStateDict`] for an empty list and
    /// [`ConfigError::TooManyStates`] beyond [`MAX_STATES`](Self::MAX_STATES).
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ConfigError::EmptyStateDict);
        }
        if names.len() > Self::MAX_STATES {
            return Err(ConfigError::TooManyStates {
                count: names.len(),
                max: Self::MAX_STATES,
            });
        }
        Ok(Self { names })
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`: construction rejects empty dictionaries.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `state` is one of this dictionary's states.
    pub fn contains(&self, state: NodeState) -> bool {
        state.index() < self.names.len()
    }

    /// Name of `state`, if it exists.
    pub fn name(&self, state: NodeState) -> Option<&str> {
        self.names.get(state.index()).map(String::as_str)
    }

    /// All states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = NodeState> + '_ {
        (0..self.names.len()).map(|i| NodeState(i as u8))
    }

    /// Validate a state supplied at construction time.
    pub fn check_config(&self, state: NodeState) -> Result<(), ConfigError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(ConfigError::StateOutOfRange {
                state,
                state_count: self.len(),
            })
        }
    }

    /// Validate a state supplied at call time.
    pub fn check_call(&self, state: NodeState) -> Result<(), ContractViolation> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(ContractViolation::StateOutOfRange {
                state,
                state_count: self.len(),
            })
        }
    }
}
