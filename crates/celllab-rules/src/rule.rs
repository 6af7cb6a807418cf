//! Rule records.

use celllab_core::{NodeState, Orientation, PairState};
use serde::{Deserialize, Serialize};

/// One entry of a rule table as written by the model author.
///
/// `from` is the pair state that enables the transition and `to` the pair
/// state it produces. Both carry an orientation, and they must agree.
///
/// # Examples
///
/// ```
/// use celllab_core::Orientation::Horizontal;
/// use celllab_rules::RuleSpec;
///
/// // A particle on the right of a fluid node hops left.
/// let spec = RuleSpec::new((0, 1, Horizontal), (1, 0, Horizontal), 0.1, "left motion");
/// assert_eq!(spec.rate, 0.1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Pair state that enables the transition.
    pub from: PairState,
    /// Pair state after the transition.
    pub to: PairState,
    /// Rate of the transition (events per unit time), strictly positive.
    pub rate: f64,
    /// Process name reported for every firing of this rule.
    pub label: String,
}

impl RuleSpec {
    /// Build a rule record.
    pub fn new(
        from: impl Into<PairState>,
        to: impl Into<PairState>,
        rate: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rate,
            label: label.into(),
        }
    }
}

/// A validated rule, as stored in a [`RuleTable`](crate::RuleTable).
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    /// Key the rule is stored under.
    pub from: PairState,
    /// New state of the link's tail.
    pub to_tail: NodeState,
    /// New state of the link's head.
    pub to_head: NodeState,
    /// Strictly positive, finite rate.
    pub rate: f64,
    /// Process name.
    pub label: String,
}

impl Rule {
    /// Orientation this rule applies to.
    pub fn orientation(&self) -> Orientation {
        self.from.orientation
    }

    /// Whether firing this rule leaves the pair unchanged.
    pub fn is_identity(&self) -> bool {
        self.from.tail == self.to_tail && self.from.head == self.to_head
    }

    /// Whether this rule exchanges the two endpoint states.
    pub fn is_swap(&self) -> bool {
        self.from.tail == self.to_head && self.from.head == self.to_tail
    }
}
