//! The validated, immutable transition rule table.

use crate::rule::{Rule, RuleSpec};
use celllab_core::{ConfigError, NodeState, Orientation, PairState, StateDict};

/// Immutable mapping from oriented pair states to transition rules.
///
/// Lookups go through a dense slot array indexed by
/// `(tail, head, orientation)`, so they cost one bounds check regardless of
/// table size. Rules keep the order they were given in.
///
/// # Examples
///
/// ```
/// use celllab_core::{NodeState, Orientation::*, StateDict};
/// use celllab_rules::{RuleSpec, RuleTable};
///
/// let states = StateDict::new(["fluid", "particle"]).unwrap();
/// let table = RuleTable::new(
///     states,
///     [
///         RuleSpec::new((0, 1, Vertical), (1, 0, Vertical), 10.55, "down motion"),
///         RuleSpec::new((1, 0, Vertical), (0, 1, Vertical), 9.45, "up motion"),
///     ],
/// )
/// .unwrap();
///
/// let down = table.lookup(NodeState(0), NodeState(1), Vertical).unwrap();
/// assert_eq!(down.label, "down motion");
/// assert!(table.lookup(NodeState(0), NodeState(1), Horizontal).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct RuleTable {
    states: StateDict,
    rules: Vec<Rule>,
    slots: Vec<Option<u32>>,
}

impl RuleTable {
    /// Validate `specs` against `states` and build the table.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::StateOutOfRange`] if a rule mentions a state not in
    ///   `states`
    /// - [`ConfigError::OrientationMismatch`] if `from` and `to` disagree
    /// - [`ConfigError::NonPositiveRate`] for a rate that is not finite and
    ///   strictly positive
    /// - [`ConfigError::DuplicateRule`] for a repeated `from` key
    pub fn new(
        states: StateDict,
        specs: impl IntoIterator<Item = RuleSpec>,
    ) -> Result<Self, ConfigError> {
        let n = states.len();
        let mut slots = vec![None; n * n * 2];
        let mut rules = Vec::new();

        for spec in specs {
            for s in [spec.from.tail, spec.from.head, spec.to.tail, spec.to.head] {
                states.check_config(s)?;
            }
            if spec.from.orientation != spec.to.orientation {
                return Err(ConfigError::OrientationMismatch {
                    label: spec.label,
                    from: spec.from.orientation,
                    to: spec.to.orientation,
                });
            }
            if !(spec.rate.is_finite() && spec.rate > 0.0) {
                return Err(ConfigError::NonPositiveRate {
                    pair: spec.from,
                    rate: spec.rate,
                });
            }
            let slot = &mut slots[slot_index(n, spec.from)];
            if slot.is_some() {
                return Err(ConfigError::DuplicateRule { pair: spec.from });
            }
            *slot = Some(rules.len() as u32);
            rules.push(Rule {
                from: spec.from,
                to_tail: spec.to.tail,
                to_head: spec.to.head,
                rate: spec.rate,
                label: spec.label,
            });
        }

        Ok(Self {
            states,
            rules,
            slots,
        })
    }

    /// A table with no rules: every link is inert.
    pub fn empty(states: StateDict) -> Self {
        let n = states.len();
        Self {
            states,
            rules: Vec::new(),
            slots: vec![None; n * n * 2],
        }
    }

    /// The rule enabled by `tail`/`head` on a link of `orientation`, if any.
    ///
    /// States outside the table's dictionary have no rule.
    #[inline]
    pub fn lookup(
        &self,
        tail: NodeState,
        head: NodeState,
        orientation: Orientation,
    ) -> Option<&Rule> {
        self.lookup_pair(PairState::new(tail, head, orientation))
    }

    /// The rule keyed by `pair`, if any.
    #[inline]
    pub fn lookup_pair(&self, pair: PairState) -> Option<&Rule> {
        let n = self.states.len();
        if pair.tail.index() >= n || pair.head.index() >= n {
            return None;
        }
        self.slots[slot_index(n, pair)].map(|i| &self.rules[i as usize])
    }

    /// The state dictionary the table was validated against.
    pub fn states(&self) -> &StateDict {
        &self.states
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in the order they were given.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Whether every rule only exchanges its two endpoint states.
    ///
    /// Tables made only of swaps conserve the count of every state.
    pub fn is_conservative(&self) -> bool {
        self.rules.iter().all(|r| r.is_swap() || r.is_identity())
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn slot_index(n: usize, pair: PairState) -> usize {
    (pair.tail.index() * n + pair.head.index()) * 2 + pair.orientation.index()
}

#[cfg(test)]
mod tests {
    use super::*;
    use celllab_core::Orientation::{Horizontal, Vertical};
    use proptest::prelude::*;

    fn two_states() -> StateDict {
        StateDict::new(["fluid", "particle"]).unwrap()
    }

    fn river_specs() -> Vec<RuleSpec> {
        vec![
            RuleSpec::new((0, 1, Horizontal), (1, 0, Horizontal), 0.1, "left motion"),
            RuleSpec::new((1, 0, Horizontal), (0, 1, Horizontal), 9.9, "right motion"),
            RuleSpec::new((0, 1, Vertical), (1, 0, Vertical), 10.55, "down motion"),
            RuleSpec::new((1, 0, Vertical), (0, 1, Vertical), 9.45, "up motion"),
        ]
    }

    #[test]
    fn lookup_hits_and_misses() {
        let t = RuleTable::new(two_states(), river_specs()).unwrap();
        assert_eq!(t.len(), 4);

        let r = t.lookup(NodeState(1), NodeState(0), Horizontal).unwrap();
        assert_eq!(r.label, "right motion");
        assert_eq!((r.to_tail, r.to_head), (NodeState(0), NodeState(1)));
        assert_eq!(r.rate, 9.9);

        assert!(t.lookup(NodeState(0), NodeState(0), Horizontal).is_none());
        assert!(t.lookup(NodeState(1), NodeState(1), Vertical).is_none());
    }

    #[test]
    fn lookup_out_of_dictionary_is_inert() {
        let t = RuleTable::new(two_states(), river_specs()).unwrap();
        assert!(t.lookup(NodeState(9), NodeState(0), Horizontal).is_none());
    }

    #[test]
    fn preserves_given_order() {
        let t = RuleTable::new(two_states(), river_specs()).unwrap();
        let labels: Vec<&str> = t.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["left motion", "right motion", "down motion", "up motion"]
        );
    }

    #[test]
    fn river_table_is_conservative() {
        let t = RuleTable::new(two_states(), river_specs()).unwrap();
        assert!(t.is_conservative());

        let creation = RuleTable::new(
            two_states(),
            [RuleSpec::new(
                (0, 0, Horizontal),
                (1, 1, Horizontal),
                1.0,
                "spawn",
            )],
        )
        .unwrap();
        assert!(!creation.is_conservative());
    }

    #[test]
    fn empty_table() {
        let t = RuleTable::empty(two_states());
        assert!(t.is_empty());
        assert!(t.lookup(NodeState(0), NodeState(1), Horizontal).is_none());
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn rejects_zero_rate() {
        let err = RuleTable::new(
            two_states(),
            [RuleSpec::new(
                (0, 1, Horizontal),
                (1, 0, Horizontal),
                0.0,
                "stuck",
            )],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositiveRate { rate, .. } if rate == 0.0
        ));
    }

    #[test]
    fn rejects_negative_and_nan_rate() {
        for rate in [-1.0, f64::NAN, f64::INFINITY] {
            let result = RuleTable::new(
                two_states(),
                [RuleSpec::new(
                    (0, 1, Vertical),
                    (1, 0, Vertical),
                    rate,
                    "bad",
                )],
            );
            assert!(
                matches!(result, Err(ConfigError::NonPositiveRate { .. })),
                "rate {rate} accepted"
            );
        }
    }

    #[test]
    fn rejects_duplicate_key() {
        let mut specs = river_specs();
        specs.push(RuleSpec::new(
            (0, 1, Vertical),
            (0, 1, Vertical),
            1.0,
            "again",
        ));
        let err = RuleTable::new(two_states(), specs).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateRule {
                pair: PairState::from((0, 1, Vertical))
            }
        );
    }

    #[test]
    fn same_pair_different_orientation_is_not_duplicate() {
        let t = RuleTable::new(
            two_states(),
            [
                RuleSpec::new((0, 1, Horizontal), (1, 0, Horizontal), 1.0, "h"),
                RuleSpec::new((0, 1, Vertical), (1, 0, Vertical), 2.0, "v"),
            ],
        )
        .unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn rejects_orientation_mismatch() {
        let err = RuleTable::new(
            two_states(),
            [RuleSpec::new(
                (0, 1, Horizontal),
                (1, 0, Vertical),
                1.0,
                "twist",
            )],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::OrientationMismatch {
                label: "twist".to_string(),
                from: Horizontal,
                to: Vertical,
            }
        );
    }

    #[test]
    fn rejects_state_outside_dictionary() {
        let err = RuleTable::new(
            two_states(),
            [RuleSpec::new(
                (0, 1, Horizontal),
                (2, 0, Horizontal),
                1.0,
                "mystery",
            )],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::StateOutOfRange {
                state: NodeState(2),
                state_count: 2
            }
        ));
    }

    proptest! {
        #[test]
        fn every_stored_rule_is_found_under_its_key(
            n in 1u8..6,
            entries in proptest::collection::vec(
                (0u8..6, 0u8..6, any::<bool>(), 0.01f64..100.0),
                0..20,
            ),
        ) {
            let states = StateDict::new((0..n).map(|i| format!("s{i}"))).unwrap();
            let mut seen = std::collections::HashSet::new();
            let specs: Vec<RuleSpec> = entries
                .into_iter()
                .map(|(a, b, v, rate)| {
                    let o = if v { Vertical } else { Horizontal };
                    (a % n, b % n, o, rate)
                })
                .filter(|&(a, b, o, _)| seen.insert((a, b, o)))
                .map(|(a, b, o, rate)| {
                    RuleSpec::new((a, b, o), (b, a, o), rate, format!("{a}{b}"))
                })
                .collect();
            let table = RuleTable::new(states, specs.clone()).unwrap();
            prop_assert_eq!(table.len(), specs.len());
            for spec in &specs {
                let rule = table.lookup_pair(spec.from).unwrap();
                prop_assert_eq!(rule.rate, spec.rate);
                prop_assert_eq!(&rule.label, &spec.label);
            }
        }
    }
}
