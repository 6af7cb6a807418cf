//! Per-transition observation hook.

use celllab_core::{LinkId, NodeId, PairState};
use std::sync::{Arc, Mutex, PoisonError};

/// One fired transition, as seen by a [`TransitionObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRecord<'a> {
    /// Simulated time of the firing.
    pub time: f64,
    /// Link that fired.
    pub link: LinkId,
    /// Tail endpoint of the link.
    pub tail: NodeId,
    /// Head endpoint of the link.
    pub head: NodeId,
    /// Pair state before the firing.
    pub from: PairState,
    /// Pair state after the firing.
    pub to: PairState,
    /// Process label of the rule that fired.
    pub label: &'a str,
}

impl TransitionRecord<'_> {
    /// Copy into an owned [`FiredTransition`].
    pub fn to_fired(&self) -> FiredTransition {
        FiredTransition {
            time: self.time,
            link: self.link,
            tail: self.tail,
            head: self.head,
            from: self.from,
            to: self.to,
            label: self.label.to_string(),
        }
    }
}

/// Owned copy of a [`TransitionRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct FiredTransition {
    /// Simulated time of the firing.
    pub time: f64,
    /// Link that fired.
    pub link: LinkId,
    /// Tail endpoint of the link.
    pub tail: NodeId,
    /// Head endpoint of the link.
    pub head: NodeId,
    /// Pair state before the firing.
    pub from: PairState,
    /// Pair state after the firing.
    pub to: PairState,
    /// Process label of the rule that fired.
    pub label: String,
}

/// Callback invoked synchronously once per fired transition.
///
/// Stale events never reach the observer. Observers must be `Send` so an
/// engine carrying one can move to another thread.
pub trait TransitionObserver: Send {
    /// Called after the transition's new states have been written and
    /// before any link is rescheduled.
    fn on_transition(&mut self, record: &TransitionRecord<'_>);
}

impl<F> TransitionObserver for F
where
    F: FnMut(&TransitionRecord<'_>) + Send,
{
    fn on_transition(&mut self, record: &TransitionRecord<'_>) {
        self(record)
    }
}

/// An observer that keeps every transition in memory.
///
/// Clones share the same buffer, so keep one clone and hand the other to
/// the engine:
///
/// ```
/// use celllab_engine::TransitionLog;
///
/// let log = TransitionLog::new();
/// let for_engine = log.clone();
/// # drop(for_engine);
/// assert!(log.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionLog {
    entries: Arc<Mutex<Vec<FiredTransition>>>,
}

impl TransitionLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of every recorded transition, in firing order.
    pub fn entries(&self) -> Vec<FiredTransition> {
        self.lock().clone()
    }

    /// Remove and return every recorded transition.
    pub fn drain(&self) -> Vec<FiredTransition> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FiredTransition>> {
        // A panicking observer cannot leave the Vec half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TransitionObserver for TransitionLog {
    fn on_transition(&mut self, record: &TransitionRecord<'_>) {
        self.lock().push(record.to_fired());
    }
}
