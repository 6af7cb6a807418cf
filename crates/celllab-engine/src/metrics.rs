//! Per-call and cumulative engine counters.
//!
//! [`AdvanceReport`] describes one [`advance_to`](crate::TransitionEngine::advance_to)
//! call; [`EngineStats`] accumulates over the engine's lifetime and keeps
//! the per-label transition counts a driver prints at the end of a run.

use indexmap::IndexMap;

/// What a single `advance_to` call did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceReport {
    /// Clock after the call (equal to the requested target).
    pub time: f64,
    /// Transitions fired.
    pub fired: u64,
    /// Stale events popped and discarded.
    pub stale_discarded: u64,
    /// Links given a fresh event after a firing.
    pub rescheduled: u64,
}

/// Counters accumulated since the engine was built.
#[derive(Clone, Debug, Default)]
pub struct EngineStats {
    /// Total transitions fired.
    pub fired: u64,
    /// Total stale events discarded.
    pub stale_discarded: u64,
    /// Total waiting times drawn (events pushed onto the queue).
    pub scheduled: u64,
    /// Number of `set_states` / `reset_states` calls.
    pub injections: u64,
    by_label: IndexMap<String, u64>,
}

impl EngineStats {
    /// Count one firing of the rule labelled `label`.
    pub(crate) fn record_fire(&mut self, label: &str) {
        self.fired += 1;
        if let Some(n) = self.by_label.get_mut(label) {
            *n += 1;
        } else {
            self.by_label.insert(label.to_string(), 1);
        }
    }

    /// Number of firings of `label` so far.
    pub fn count(&self, label: &str) -> u64 {
        self.by_label.get(label).copied().unwrap_or(0)
    }

    /// Per-label firing counts, in the order labels first fired.
    pub fn by_label(&self) -> &IndexMap<String, u64> {
        &self.by_label
    }
}
