//! The event-driven transition engine.
//!
//! [`TransitionEngine`] owns the lattice, node states, rule table, event
//! queue, clock and random stream of one simulation. It advances simulated
//! time with a kinetic Monte Carlo loop:
//!
//! 1. Every open link whose pair state matches a rule holds one scheduled
//!    event at `clock + Δt`, `Δt ~ Exp(rate)`.
//! 2. [`advance_to`](TransitionEngine::advance_to) fires events in time
//!    order up to the target. An event whose endpoint states changed since
//!    it was scheduled is stale and is dropped.
//! 3. After a firing, the fired link and every other link touching either
//!    endpoint is rescheduled from the new states.
//!
//! # Ownership model
//!
//! `TransitionEngine` is [`Send`]: independent engines can run on separate
//! threads. All mutating methods take `&mut self`; there is no shared state
//! between engines.

use celllab_core::{
    ConfigError, ContractViolation, LinkId, NodeId, NodeState, PairState, StateDict,
};
use celllab_lattice::{Lattice, Link, NodeStates};
use celllab_rules::{RuleSpec, RuleTable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::metrics::{AdvanceReport, EngineStats};
use crate::observer::{TransitionObserver, TransitionRecord};
use crate::queue::EventQueue;

// Compile-time assertion: TransitionEngine is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TransitionEngine>();
    }
};

/// Draw an exponential waiting time with the given rate.
///
/// Inverse-CDF sampling: `u` is uniform in `[0, 1)`, so `1 - u` is in
/// `(0, 1]` and the logarithm is finite.
fn exponential_wait(rng: &mut ChaCha8Rng, rate: f64) -> f64 {
    let u: f64 = rng.random();
    -(1.0 - u).ln() / rate
}

// ── TransitionEngine ────────────────────────────────────────────

/// Continuous-time cellular automaton driven by a per-link event queue.
///
/// Build one with [`TransitionEngine::builder`] or [`TransitionEngine::new`].
/// The queue is seeded lazily: the first [`advance_to`](Self::advance_to)
/// calls [`initialize`](Self::initialize) if the caller has not.
///
/// # Examples
///
/// ```
/// use celllab_core::{NodeId, NodeState, Orientation::Horizontal, StateDict};
/// use celllab_engine::TransitionEngine;
/// use celllab_lattice::{ClosedEdges, OrientedRaster};
/// use celllab_rules::RuleSpec;
///
/// let grid = OrientedRaster::new(1, 3, ClosedEdges::open()).unwrap();
/// let mut engine = TransitionEngine::builder()
///     .lattice(grid)
///     .state_dict(StateDict::new(["fluid", "particle"]).unwrap())
///     .rule(RuleSpec::new((1, 0, Horizontal), (0, 1, Horizontal), 5.0, "right motion"))
///     .initial_states(vec![NodeState(1), NodeState(0), NodeState(0)])
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let report = engine.advance_to(100.0).unwrap();
/// assert_eq!(report.fired, 2);
/// assert_eq!(engine.state(NodeId(2)).unwrap(), NodeState(1));
/// assert_eq!(engine.current_time(), 100.0);
/// ```
pub struct TransitionEngine {
    lattice: Box<dyn Lattice>,
    rules: RuleTable,
    states: NodeStates,
    closed_links: Vec<bool>,
    queue: EventQueue,
    clock: f64,
    rng: ChaCha8Rng,
    config: EngineConfig,
    observer: Option<Box<dyn TransitionObserver>>,
    stats: EngineStats,
    initialized: bool,
}

impl TransitionEngine {
    /// Start a [`TransitionEngineBuilder`].
    pub fn builder() -> TransitionEngineBuilder {
        TransitionEngineBuilder::default()
    }

    /// Build an engine from already-validated parts.
    ///
    /// `initial` must hold one state per lattice node, each within the rule
    /// table's state dictionary.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InitialStateLength`], [`ConfigError::StateOutOfRange`]
    /// or [`ConfigError::InvalidStartTime`].
    pub fn new(
        lattice: Box<dyn Lattice>,
        rules: RuleTable,
        initial: Vec<NodeState>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if initial.len() != lattice.node_count() {
            return Err(ConfigError::InitialStateLength {
                expected: lattice.node_count(),
                got: initial.len(),
            });
        }
        for &s in &initial {
            rules.states().check_config(s)?;
        }

        let closed_links = (0..lattice.link_count())
            .map(|i| lattice.is_link_closed(LinkId(i as u32)))
            .collect();
        let queue = EventQueue::new(lattice.link_count());

        Ok(Self {
            closed_links,
            queue,
            states: NodeStates::new(initial),
            clock: config.start_time,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            lattice,
            rules,
            config,
            observer: None,
            stats: EngineStats::default(),
            initialized: false,
        })
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Give every link a fresh event from the current states and clock.
    ///
    /// Links are visited in ascending id order; closed links and links whose
    /// pair state has no rule get no event. Once the queue is seeded this is
    /// a no-op: committed waiting times are never redrawn.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.queue.clear();
        let scheduled = self.schedule_all();
        self.initialized = true;
        debug!(
            links = self.lattice.link_count(),
            scheduled,
            time = self.clock,
            "initialized event queue"
        );
    }

    /// Whether the event queue has been seeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Fire every event with time `<= target`, then set the clock to
    /// `target`.
    ///
    /// Events beyond `target` stay queued with their committed times, so
    /// splitting a run into several calls gives exactly the same trajectory
    /// as one call to the final target. A target equal to the clock is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NonFiniteTime`] for a NaN or infinite target and
    /// [`ContractViolation::TimeRegression`] for a target before the clock.
    /// Nothing is mutated in either case.
    pub fn advance_to(&mut self, target: f64) -> Result<AdvanceReport, ContractViolation> {
        if !target.is_finite() {
            return Err(ContractViolation::NonFiniteTime { value: target });
        }
        if target < self.clock {
            return Err(ContractViolation::TimeRegression {
                target,
                current: self.clock,
            });
        }
        let mut report = AdvanceReport {
            time: self.clock,
            ..AdvanceReport::default()
        };
        if target == self.clock {
            return Ok(report);
        }
        if !self.initialized {
            self.initialize();
        }

        while let Some(&event) = self.queue.peek() {
            if event.time > target {
                break;
            }
            self.queue.pop();

            let link = *self.lattice.link(event.link);
            let tail = self.states.get(link.tail);
            let head = self.states.get(link.head);
            let rule = match self.rules.lookup_pair(event.pair) {
                Some(rule) if tail == event.pair.tail && head == event.pair.head => rule,
                _ => {
                    report.stale_discarded += 1;
                    self.stats.stale_discarded += 1;
                    trace!(
                        link = %event.link,
                        time = event.time,
                        "discarded stale event"
                    );
                    continue;
                }
            };

            self.clock = event.time;
            self.states.set(link.tail, rule.to_tail);
            self.states.set(link.head, rule.to_head);
            self.stats.record_fire(&rule.label);
            report.fired += 1;
            trace!(
                link = %event.link,
                time = event.time,
                label = %rule.label,
                "fired transition"
            );
            if let Some(observer) = self.observer.as_mut() {
                observer.on_transition(&TransitionRecord {
                    time: event.time,
                    link: event.link,
                    tail: link.tail,
                    head: link.head,
                    from: event.pair,
                    to: PairState::new(rule.to_tail, rule.to_head, link.orientation),
                    label: &rule.label,
                });
            }

            report.rescheduled += self.reschedule_around(&link);
        }

        self.clock = target;
        report.time = target;
        debug!(
            time = target,
            fired = report.fired,
            stale = report.stale_discarded,
            pending = self.queue.len(),
            "advanced"
        );
        Ok(report)
    }

    // ── Injection ───────────────────────────────────────────────

    /// Force every node in `nodes` to `value` and reschedule the links
    /// touching them.
    ///
    /// Every id and the value are checked before anything changes. Each
    /// affected link is rescheduled once, in ascending id order. Before the
    /// queue is seeded only the states change.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::NodeOutOfRange`] or
    /// [`ContractViolation::StateOutOfRange`].
    pub fn set_states(
        &mut self,
        nodes: &[NodeId],
        value: NodeState,
    ) -> Result<(), ContractViolation> {
        self.rules.states().check_call(value)?;
        for &node in nodes {
            self.lattice.check_node(node)?;
        }

        for &node in nodes {
            self.states.set(node, value);
        }
        self.stats.injections += 1;

        let mut rescheduled = 0;
        if self.initialized {
            let mut affected: Vec<LinkId> = nodes
                .iter()
                .flat_map(|&node| self.lattice.links_of(node).iter().copied())
                .collect();
            affected.sort_unstable();
            affected.dedup();
            for id in affected {
                if self.schedule_link(id) {
                    rescheduled += 1;
                }
            }
        }
        debug!(
            nodes = nodes.len(),
            state = %value,
            rescheduled,
            time = self.clock,
            "injected states"
        );
        Ok(())
    }

    /// Replace the whole state vector and reschedule every link.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::StateLength`] or
    /// [`ContractViolation::StateOutOfRange`].
    pub fn reset_states(&mut self, states: Vec<NodeState>) -> Result<(), ContractViolation> {
        if states.len() != self.lattice.node_count() {
            return Err(ContractViolation::StateLength {
                expected: self.lattice.node_count(),
                got: states.len(),
            });
        }
        for &s in &states {
            self.rules.states().check_call(s)?;
        }

        self.states = NodeStates::new(states);
        self.stats.injections += 1;
        if self.initialized {
            let scheduled = self.schedule_all();
            debug!(scheduled, time = self.clock, "reset all states");
        }
        Ok(())
    }

    // ── Observation ─────────────────────────────────────────────

    /// Install `observer`, returning the previous one.
    pub fn set_observer(
        &mut self,
        observer: impl TransitionObserver + 'static,
    ) -> Option<Box<dyn TransitionObserver>> {
        self.observer.replace(Box::new(observer))
    }

    /// Remove and return the current observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn TransitionObserver>> {
        self.observer.take()
    }

    // ── Queries ─────────────────────────────────────────────────

    /// State of `node`.
    pub fn state(&self, node: NodeId) -> Result<NodeState, ContractViolation> {
        self.lattice.check_node(node)?;
        Ok(self.states.get(node))
    }

    /// Every node's state, in node order.
    pub fn states(&self) -> &[NodeState] {
        self.states.as_slice()
    }

    /// Number of nodes in each state of the dictionary, indexed by state.
    pub fn state_counts(&self) -> Vec<usize> {
        self.states.counts(self.rules.states().len())
    }

    /// Current simulated time.
    pub fn current_time(&self) -> f64 {
        self.clock
    }

    /// Fire time of the earliest pending event.
    ///
    /// The event may turn out stale when it is reached.
    pub fn next_event_time(&self) -> Option<f64> {
        self.queue.peek().map(|e| e.time)
    }

    /// Fire time of the pending event on `link`, if it has one.
    pub fn scheduled_time(&self, link: LinkId) -> Result<Option<f64>, ContractViolation> {
        self.lattice.check_link(link)?;
        Ok(self.queue.scheduled_time(link))
    }

    /// Number of pending events (at most one per link).
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// The lattice being simulated.
    pub fn lattice(&self) -> &dyn Lattice {
        self.lattice.as_ref()
    }

    /// The rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The state dictionary of the rule table.
    pub fn state_dict(&self) -> &StateDict {
        self.rules.states()
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters accumulated since construction.
    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    // ── Scheduling ──────────────────────────────────────────────

    /// Schedule (or unschedule) one link from the current states.
    ///
    /// Returns whether the link now holds an event.
    fn schedule_link(&mut self, id: LinkId) -> bool {
        if self.closed_links[id.index()] {
            self.queue.cancel(id);
            return false;
        }
        let link = self.lattice.link(id);
        let pair = PairState::new(
            self.states.get(link.tail),
            self.states.get(link.head),
            link.orientation,
        );
        let Some(rate) = self.rules.lookup_pair(pair).map(|r| r.rate) else {
            self.queue.cancel(id);
            return false;
        };
        let time = self.clock + exponential_wait(&mut self.rng, rate);
        self.queue.schedule(id, time, pair);
        self.stats.scheduled += 1;
        true
    }

    fn schedule_all(&mut self) -> u64 {
        let mut scheduled = 0;
        for i in 0..self.lattice.link_count() {
            if self.schedule_link(LinkId(i as u32)) {
                scheduled += 1;
            }
        }
        scheduled
    }

    /// Reschedule `fired`, then the other links of its tail, then those of
    /// its head, each in ascending order.
    fn reschedule_around(&mut self, fired: &Link) -> u64 {
        let mut count = u64::from(self.schedule_link(fired.id));
        for endpoint in [fired.tail, fired.head] {
            let incident: SmallVec<[LinkId; 4]> = self
                .lattice
                .links_of(endpoint)
                .iter()
                .copied()
                .filter(|&id| id != fired.id)
                .collect();
            for id in incident {
                count += u64::from(self.schedule_link(id));
            }
        }
        count
    }
}

impl fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("nodes", &self.lattice.node_count())
            .field("links", &self.lattice.link_count())
            .field("rules", &self.rules.len())
            .field("clock", &self.clock)
            .field("pending", &self.queue.len())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

// ── TransitionEngineBuilder ─────────────────────────────────────

/// Step-by-step construction of a [`TransitionEngine`].
///
/// A lattice is required. Rules come either from
/// [`rule_table`](Self::rule_table) or from [`state_dict`](Self::state_dict)
/// plus any number of [`rule`](Self::rule) / [`rules`](Self::rules) calls,
/// never both. Initial states default to state 0 everywhere.
#[derive(Default)]
pub struct TransitionEngineBuilder {
    lattice: Option<Box<dyn Lattice>>,
    state_dict: Option<StateDict>,
    specs: Vec<RuleSpec>,
    table: Option<RuleTable>,
    initial: Option<Vec<NodeState>>,
    config: EngineConfig,
    observer: Option<Box<dyn TransitionObserver>>,
}

impl TransitionEngineBuilder {
    /// Set the lattice.
    pub fn lattice(mut self, lattice: impl Lattice) -> Self {
        self.lattice = Some(Box::new(lattice));
        self
    }

    /// Set an already-boxed lattice.
    pub fn boxed_lattice(mut self, lattice: Box<dyn Lattice>) -> Self {
        self.lattice = Some(lattice);
        self
    }

    /// Set the state dictionary rules are validated against.
    pub fn state_dict(mut self, states: StateDict) -> Self {
        self.state_dict = Some(states);
        self
    }

    /// Add one rule.
    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Add several rules, keeping their order.
    pub fn rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Use a prebuilt rule table (and its state dictionary).
    pub fn rule_table(mut self, table: RuleTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the initial state of every node.
    pub fn initial_states(mut self, states: Vec<NodeState>) -> Self {
        self.initial = Some(states);
        self
    }

    /// Set the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the initial clock value.
    pub fn start_time(mut self, start_time: f64) -> Self {
        self.config.start_time = start_time;
        self
    }

    /// Install a transition observer.
    pub fn observer(mut self, observer: impl TransitionObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate every input and build the engine.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingInput`] without a lattice, or without either
    ///   a rule table or a state dictionary
    /// - [`ConfigError::ConflictingInput`] when a rule table is combined
    ///   with a state dictionary or loose rules
    /// - any error from [`RuleTable::new`] or [`TransitionEngine::new`]
    pub fn build(self) -> Result<TransitionEngine, ConfigError> {
        let lattice = self
            .lattice
            .ok_or(ConfigError::MissingInput { what: "lattice" })?;

        let rules = match (self.table, self.state_dict) {
            (Some(table), None) if self.specs.is_empty() => table,
            (Some(_), _) => {
                return Err(ConfigError::ConflictingInput {
                    what: "rule table given together with state dictionary or rules",
                })
            }
            (None, Some(states)) => RuleTable::new(states, self.specs)?,
            (None, None) => {
                return Err(ConfigError::MissingInput {
                    what: "rule table or state dictionary",
                })
            }
        };

        let initial = self
            .initial
            .unwrap_or_else(|| vec![NodeState::default(); lattice.node_count()]);

        let mut engine = TransitionEngine::new(lattice, rules, initial, self.config)?;
        engine.observer = self.observer;
        Ok(engine)
    }
}

impl fmt::Debug for TransitionEngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngineBuilder")
            .field("has_lattice", &self.lattice.is_some())
            .field("state_dict", &self.state_dict)
            .field("specs", &self.specs.len())
            .field("has_table", &self.table.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
