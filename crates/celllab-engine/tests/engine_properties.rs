//! Engine-level invariants on randomly populated river grids.

use celllab_core::{LinkId, NodeId, NodeState};
use celllab_engine::{EngineConfig, TransitionEngine, TransitionLog};
use celllab_lattice::{Lattice, OrientedRaster, Region};
use celllab_rules::RuleTable;
use celllab_test_utils::{
    random_states, river_grid, river_rule_table, river_state_dict, TestScenario, FLUID, PARTICLE,
};
use proptest::prelude::*;

fn river_engine(grid: OrientedRaster, states: Vec<NodeState>, seed: u64) -> TransitionEngine {
    TransitionEngine::builder()
        .lattice(grid)
        .rule_table(river_rule_table())
        .initial_states(states)
        .seed(seed)
        .build()
        .unwrap()
}

fn particles(engine: &TransitionEngine) -> usize {
    engine.state_counts()[PARTICLE.index()]
}

// ── Reproducibility ─────────────────────────────────────────────

#[test]
fn same_seed_same_trajectory() {
    let run = |seed| {
        let (grid, states) = TestScenario::new(10, 12).density(0.3).seed(1).build();
        let log = TransitionLog::new();
        let mut e = river_engine(grid, states, seed);
        e.set_observer(log.clone());
        e.advance_to(3.0).unwrap();
        (e.states().to_vec(), log.entries())
    };
    let (states_a, fired_a) = run(77);
    let (states_b, fired_b) = run(77);
    assert!(!fired_a.is_empty());
    assert_eq!(states_a, states_b);
    assert_eq!(fired_a, fired_b);

    let (_, fired_c) = run(78);
    assert_ne!(fired_a, fired_c);
}

// ── Boundaries ──────────────────────────────────────────────────

#[test]
fn closed_nodes_never_change() {
    // Closed nodes start with particles too; they must keep them.
    let grid = river_grid(8, 10);
    let closed = grid.closed_nodes();
    let states = random_states(grid.node_count(), 0.5, 3);
    let log = TransitionLog::new();
    let mut e = river_engine(grid, states.clone(), 9);
    e.set_observer(log.clone());
    e.advance_to(5.0).unwrap();

    for node in closed {
        assert_eq!(e.state(node).unwrap(), states[node.index()]);
    }
    for t in log.entries() {
        assert!(
            !e.lattice().is_link_closed(t.link),
            "closed link {} fired",
            t.link
        );
    }
}

#[test]
fn closed_links_are_never_scheduled() {
    let (grid, states) = TestScenario::new(6, 6).density(0.5).seed(4).build();
    let mut e = river_engine(grid, states, 1);
    e.initialize();
    for i in 0..e.lattice().link_count() {
        let id = LinkId(i as u32);
        if e.lattice().is_link_closed(id) {
            assert_eq!(e.scheduled_time(id).unwrap(), None);
        }
    }
}

// ── Conservation and injection ──────────────────────────────────

#[test]
fn swap_rules_conserve_particles_on_closed_box() {
    // With the right edge closed as well nothing leaves; swaps conserve.
    let grid = OrientedRaster::new(8, 8, celllab_lattice::ClosedEdges::closed()).unwrap();
    let states = random_states(64, 0.4, 12);
    let mut e = river_engine(grid, states, 5);
    let before = particles(&e);
    e.advance_to(10.0).unwrap();
    assert!(e.stats().fired > 0);
    assert_eq!(particles(&e), before);
}

#[test]
fn injection_adds_mass_and_reschedules() {
    let grid = river_grid(6, 20);
    let left = Region::Rect {
        rows: (1, 4),
        cols: (1, 2),
    }
    .compile(&grid)
    .unwrap();
    let mut e = river_engine(grid, vec![FLUID; 120], 2);
    e.initialize();
    assert_eq!(e.pending_events(), 0);

    e.set_states(&left, PARTICLE).unwrap();
    assert_eq!(particles(&e), left.len());
    assert!(e.pending_events() > 0);

    e.advance_to(1.0).unwrap();
    assert!(e.stats().fired > 0);
    assert_eq!(e.stats().injections, 1);
}

// ── Empty table ─────────────────────────────────────────────────

#[test]
fn empty_rule_table_only_moves_clock() {
    let (grid, states) = TestScenario::new(5, 5).density(0.5).seed(8).build();
    let mut e = TransitionEngine::builder()
        .lattice(grid)
        .rule_table(RuleTable::empty(river_state_dict()))
        .initial_states(states.clone())
        .build()
        .unwrap();
    let report = e.advance_to(123.5).unwrap();
    assert_eq!(report.fired, 0);
    assert_eq!(report.stale_discarded, 0);
    assert_eq!(e.current_time(), 123.5);
    assert_eq!(e.states(), states.as_slice());
    assert_eq!(e.pending_events(), 0);
}

// ── Threads ─────────────────────────────────────────────────────

#[test]
fn engines_run_on_separate_threads() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let (grid, states) = TestScenario::new(8, 8).density(0.3).seed(seed).build();
            let mut e = river_engine(grid, states, seed);
            std::thread::spawn(move || {
                e.advance_to(2.0).unwrap();
                e.states().to_vec()
            })
        })
        .collect();
    let results: Vec<Vec<NodeState>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Same work on this thread gives the same answers.
    for (seed, result) in results.iter().enumerate() {
        let seed = seed as u64;
        let (grid, states) = TestScenario::new(8, 8).density(0.3).seed(seed).build();
        let mut e = river_engine(grid, states, seed);
        e.advance_to(2.0).unwrap();
        assert_eq!(e.states(), result.as_slice());
    }
}

// ── Properties ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn splitting_advance_is_transparent(
        seed in any::<u64>(),
        cuts in proptest::collection::vec(0.0f64..2.0, 0..6),
    ) {
        let (grid, states) = TestScenario::new(6, 8).density(0.3).seed(seed).build();

        let whole_log = TransitionLog::new();
        let mut whole = river_engine(grid.clone(), states.clone(), seed);
        whole.set_observer(whole_log.clone());
        whole.advance_to(2.0).unwrap();

        let split_log = TransitionLog::new();
        let mut split = river_engine(grid, states, seed);
        split.set_observer(split_log.clone());
        let mut cuts = cuts;
        cuts.sort_by(f64::total_cmp);
        for t in cuts {
            split.advance_to(t).unwrap();
        }
        split.advance_to(2.0).unwrap();

        prop_assert_eq!(whole.states(), split.states());
        prop_assert_eq!(whole_log.entries(), split_log.entries());
    }

    #[test]
    fn clock_is_monotonic_and_events_ordered(
        seed in any::<u64>(),
        targets in proptest::collection::vec(0.0f64..0.5, 1..8),
    ) {
        let (grid, states) = TestScenario::new(5, 7).density(0.4).seed(seed).build();
        let log = TransitionLog::new();
        let mut e = river_engine(grid, states, seed);
        e.set_observer(log.clone());

        let mut t = 0.0;
        for dt in targets {
            t += dt;
            let report = e.advance_to(t).unwrap();
            prop_assert_eq!(report.time, t);
            prop_assert_eq!(e.current_time(), t);
            if let Some(next) = e.next_event_time() {
                prop_assert!(next > t);
            }
        }
        let fired = log.entries();
        prop_assert!(fired.windows(2).all(|w| w[0].time <= w[1].time));
        prop_assert!(fired.iter().all(|f| f.time <= t));
    }

    #[test]
    fn injection_ignores_node_order_and_repeats(
        seed in any::<u64>(),
        inject in proptest::collection::vec(0u32..48, 1..10),
    ) {
        let (grid, states) = TestScenario::new(6, 8).density(0.3).seed(seed).build();
        let link_count = grid.link_count();
        let nodes: Vec<NodeId> = inject.into_iter().map(NodeId).collect();
        let mut shuffled: Vec<NodeId> = nodes.iter().rev().copied().collect();
        shuffled.extend_from_slice(&nodes);

        let log_a = TransitionLog::new();
        let mut a = river_engine(grid.clone(), states.clone(), seed);
        a.set_observer(log_a.clone());
        let log_b = TransitionLog::new();
        let mut b = river_engine(grid, states, seed);
        b.set_observer(log_b.clone());

        a.advance_to(0.5).unwrap();
        b.advance_to(0.5).unwrap();
        a.set_states(&nodes, PARTICLE).unwrap();
        b.set_states(&shuffled, PARTICLE).unwrap();

        prop_assert_eq!(a.stats().scheduled, b.stats().scheduled);
        for i in 0..link_count {
            let id = LinkId(i as u32);
            prop_assert_eq!(a.scheduled_time(id).unwrap(), b.scheduled_time(id).unwrap());
        }

        a.advance_to(1.5).unwrap();
        b.advance_to(1.5).unwrap();
        prop_assert_eq!(a.states(), b.states());
        prop_assert_eq!(log_a.entries(), log_b.entries());
    }

    #[test]
    fn splitting_is_transparent_with_feeding(
        seed in any::<u64>(),
        extra_cuts in proptest::collection::vec(0.0f64..1.0, 0..4),
    ) {
        // Both runs refill the left column at t = 0, 1, 2; the second one
        // also stops at extra times inside each interval.
        let (grid, states) = TestScenario::new(6, 10).density(0.2).seed(seed).build();
        let feed = Region::Rect {
            rows: (1, 4),
            cols: (1, 1),
        }
        .compile(&grid)
        .unwrap();

        let whole_log = TransitionLog::new();
        let mut whole = river_engine(grid.clone(), states.clone(), seed);
        whole.set_observer(whole_log.clone());
        let split_log = TransitionLog::new();
        let mut split = river_engine(grid, states, seed);
        split.set_observer(split_log.clone());

        let mut cuts = extra_cuts;
        cuts.sort_by(f64::total_cmp);
        for step in 0..3 {
            let start = f64::from(step);
            whole.set_states(&feed, PARTICLE).unwrap();
            whole.advance_to(start + 1.0).unwrap();

            split.set_states(&feed, PARTICLE).unwrap();
            for &cut in &cuts {
                split.advance_to(start + cut).unwrap();
            }
            split.advance_to(start + 1.0).unwrap();
        }

        prop_assert_eq!(whole.states(), split.states());
        prop_assert_eq!(whole_log.entries(), split_log.entries());
        prop_assert_eq!(whole.stats().scheduled, split.stats().scheduled);
    }

    #[test]
    fn config_seed_equals_builder_seed(seed in any::<u64>()) {
        let (grid, states) = TestScenario::new(4, 6).density(0.5).seed(seed).build();
        let mut a = river_engine(grid.clone(), states.clone(), seed);
        let mut b = TransitionEngine::builder()
            .lattice(grid)
            .rule_table(river_rule_table())
            .initial_states(states)
            .config(EngineConfig::with_seed(seed))
            .build()
            .unwrap();
        a.advance_to(1.0).unwrap();
        b.advance_to(1.0).unwrap();
        prop_assert_eq!(a.states(), b.states());
    }
}
