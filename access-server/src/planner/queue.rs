//! Priority queue for label-constrained search.
//!
//! A binary min-heap over frontier entries, ordered by accumulated cost.
//! Entries of equal cost come out in insertion order, which keeps the
//! exploration deterministic. There is no decrease-key: callers push a
//! fresh entry when they improve a state and skip stale ones on pop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::{LineId, StationId};

/// A candidate state: at `station`, riding `line`, after `transfers`
/// line changes and `cost` minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry {
    pub station: StationId,
    pub line: LineId,
    pub transfers: u32,
    pub cost: f64,
}

/// Heap slot. `BinaryHeap` is a max-heap, so the ordering is reversed:
/// lower cost first, then lower sequence number.
#[derive(Debug)]
struct Slot {
    entry: FrontierEntry,
    seq: u64,
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .cost
            .total_cmp(&self.entry.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of frontier entries keyed by accumulated cost.
#[derive(Debug, Default)]
pub struct FrontierQueue {
    heap: BinaryHeap<Slot>,
    next_seq: u64,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. O(log n).
    pub fn push(&mut self, entry: FrontierEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Slot { entry, seq });
    }

    /// Remove and return the cheapest entry. O(log n).
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|slot| slot.entry)
    }

    /// Cost of the cheapest entry, without removing it.
    pub fn peek_cost(&self) -> Option<f64> {
        self.heap.peek().map(|slot| slot.entry.cost)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
