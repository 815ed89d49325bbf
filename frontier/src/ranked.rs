//! Best-first frontier ranked by a caller-supplied key.
//!
//! Ties between equal keys are broken by insertion order, so a ranked
//! frontier with a constant key behaves exactly like a FIFO frontier.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::contract::Frontier;

/// The ordering key: `(rank, sequence)`.
///
/// Lower rank first, then older sequence number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey<K> {
    rank: K,
    sequence: u64,
}

/// A frontier entry wrapping an item with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<RankKey>` to get
/// min-heap behavior (lowest rank first).
#[derive(Debug)]
struct RankedEntry<T, K> {
    key: Reverse<RankKey<K>>,
    item: T,
}

impl<T, K: Ord> PartialEq for RankedEntry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T, K: Ord> Eq for RankedEntry<T, K> {}

impl<T, K: Ord> PartialOrd for RankedEntry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for RankedEntry<T, K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) removal of the best item
/// - A monotonic insertion counter for deterministic tie-breaking
/// - A high-water mark of the pending count since the last `clear`
pub struct RankedFrontier<T, K, F> {
    heap: BinaryHeap<RankedEntry<T, K>>,
    rank: F,
    next_sequence: u64,
    high_water: usize,
}

impl<T, K, F> RankedFrontier<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// Create a new empty frontier ranking items by `rank` (lower is better).
    #[must_use]
    pub fn new(rank: F) -> Self {
        Self {
            heap: BinaryHeap::new(),
            rank,
            next_sequence: 0,
            high_water: 0,
        }
    }

    /// The best pending item, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|e| &e.item)
    }

    /// High-water mark of the pending count.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<T, K, F> Frontier<T> for RankedFrontier<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    fn add_all(&mut self, items: Vec<T>) {
        self.heap.reserve(items.len());
        for item in items {
            let key = RankKey {
                rank: (self.rank)(&item),
                sequence: self.next_sequence,
            };
            self.next_sequence += 1;
            self.heap.push(RankedEntry {
                key: Reverse(key),
                item,
            });
        }
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn select(&mut self, n: usize) -> Vec<T> {
        let mut selected = Vec::with_capacity(n.min(self.heap.len()));
        while selected.len() < n {
            let Some(entry) = self.heap.pop() else {
                break;
            };
            selected.push(entry.item);
        }
        selected
    }

    fn truncate(&mut self, max: usize) -> usize {
        if self.heap.len() <= max {
            return 0;
        }

        // Drain all entries, sort by key, keep the best `max`. The heap holds
        // Reverse keys, so sorting ascending by the raw key puts the best first.
        let mut entries: Vec<RankedEntry<T, K>> = self.heap.drain().collect();
        entries.sort_by(|a, b| a.key.0.cmp(&b.key.0));

        let dropped = entries.len() - max;
        entries.truncate(max);
        self.heap = entries.into_iter().collect();

        dropped
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
        self.high_water = 0;
    }
}
