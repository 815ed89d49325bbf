//! First-in, first-out frontier (breadth-first exploration).

use std::collections::VecDeque;

use crate::contract::Frontier;

/// Breadth-first frontier backed by a `VecDeque`.
///
/// Service order is insertion order. Truncation drops the newest items.
#[derive(Debug, Clone)]
pub struct FifoFrontier<T> {
    items: VecDeque<T>,
}

impl<T> FifoFrontier<T> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Iterate pending items in service order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for FifoFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for FifoFrontier<T> {
    fn add_all(&mut self, items: Vec<T>) {
        self.items.extend(items);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn select(&mut self, n: usize) -> Vec<T> {
        let n = n.min(self.items.len());
        self.items.drain(..n).collect()
    }

    fn truncate(&mut self, max: usize) -> usize {
        let dropped = self.items.len().saturating_sub(max);
        self.items.truncate(max);
        dropped
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
