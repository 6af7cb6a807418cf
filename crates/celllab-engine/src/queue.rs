//! Link-keyed event queue.
//!
//! A `BinaryHeap` with reversed `Ord` on [`ScheduledEvent`] acts as a
//! min-heap keyed by `(time, seq)`. Sequence numbers are strictly
//! increasing, so equal fire times pop in insertion order and two runs with
//! the same schedule calls pop in the same order.
//!
//! Each link owns at most one live entry. Rescheduling or cancelling a link
//! does not search the heap; it only bumps the link's live sequence number,
//! turning the old entry into a tombstone that is discarded once it reaches
//! the top. Every mutating call leaves a live entry (or nothing) on top, so
//! [`peek`](EventQueue::peek) is a plain read.

use celllab_core::{LinkId, PairState};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A pending transition on one link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    /// Absolute simulated time at which the event fires.
    pub time: f64,
    /// The link that transitions.
    pub link: LinkId,
    /// Endpoint states when the event was scheduled.
    pub pair: PairState,
    /// Insertion sequence number (tie-breaker).
    pub seq: u64,
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: earliest time (then lowest seq) is the heap maximum.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, Debug)]
struct LiveSlot {
    seq: u64,
    time: f64,
}

/// Priority queue of per-link events with O(1) invalidation.
#[derive(Clone, Debug)]
pub struct EventQueue {
    heap: BinaryHeap<ScheduledEvent>,
    live: Vec<Option<LiveSlot>>,
    live_count: usize,
    next_seq: u64,
}

impl EventQueue {
    /// Heap entries tolerated beyond twice the live count before compaction.
    const COMPACT_SLACK: usize = 1024;

    /// An empty queue for links `0..link_count`.
    pub fn new(link_count: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(link_count),
            live: vec![None; link_count],
            live_count: 0,
            next_seq: 0,
        }
    }

    /// Number of links this queue can hold events for.
    pub fn link_count(&self) -> usize {
        self.live.len()
    }

    /// Schedule `link` to fire at `time`, replacing any live event it has.
    ///
    /// Returns `true` if an earlier event for the link was replaced.
    ///
    /// # Panics
    ///
    /// Panics if `link` is outside `0..link_count`.
    pub fn schedule(&mut self, link: LinkId, time: f64, pair: PairState) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self.live[link.index()]
            .replace(LiveSlot { seq, time })
            .is_some();
        if !replaced {
            self.live_count += 1;
        }
        self.heap.push(ScheduledEvent {
            time,
            link,
            pair,
            seq,
        });
        self.purge_top();
        self.maybe_compact();
        replaced
    }

    /// Drop the live event of `link`, if any. Returns whether one existed.
    pub fn cancel(&mut self, link: LinkId) -> bool {
        let had = self.live[link.index()].take().is_some();
        if had {
            self.live_count -= 1;
            self.purge_top();
        }
        had
    }

    /// The earliest live event, without removing it.
    pub fn peek(&self) -> Option<&ScheduledEvent> {
        self.heap.peek()
    }

    /// Remove and return the earliest live event.
    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        let ev = self.heap.pop()?;
        self.live[ev.link.index()] = None;
        self.live_count -= 1;
        self.purge_top();
        Some(ev)
    }

    /// Fire time of the live event of `link`, if any.
    pub fn scheduled_time(&self, link: LinkId) -> Option<f64> {
        self.live
            .get(link.index())
            .copied()
            .flatten()
            .map(|slot| slot.time)
    }

    /// Whether `link` has a live event.
    pub fn contains(&self, link: LinkId) -> bool {
        matches!(self.live.get(link.index()), Some(Some(_)))
    }

    /// Number of live events (at most one per link).
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Whether no live events remain.
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Heap entries including tombstones not yet discarded.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every event. Sequence numbers keep increasing.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.iter_mut().for_each(|slot| *slot = None);
        self.live_count = 0;
    }

    fn is_live(&self, ev: &ScheduledEvent) -> bool {
        matches!(self.live[ev.link.index()], Some(slot) if slot.seq == ev.seq)
    }

    fn purge_top(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }

    fn maybe_compact(&mut self) {
        if self.heap.len() <= 2 * self.live_count + Self::COMPACT_SLACK {
            return;
        }
        let live = &self.live;
        self.heap.retain(|ev| {
            matches!(live[ev.link.index()], Some(slot) if slot.seq == ev.seq)
        });
    }
}
