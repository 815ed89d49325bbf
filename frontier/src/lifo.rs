//! Last-in, first-out frontier (depth-first exploration).

use crate::contract::Frontier;

/// Depth-first frontier backed by a `Vec` used as a stack.
///
/// Service order is reverse insertion order: the most recently added item
/// is selected first. Truncation drops the oldest items.
#[derive(Debug, Clone)]
pub struct LifoFrontier<T> {
    stack: Vec<T>,
}

impl<T> LifoFrontier<T> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<T> Default for LifoFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T> for LifoFrontier<T> {
    fn add_all(&mut self, items: Vec<T>) {
        self.stack.extend(items);
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn select(&mut self, n: usize) -> Vec<T> {
        let keep = self.stack.len().saturating_sub(n);
        let mut taken = self.stack.split_off(keep);
        taken.reverse();
        taken
    }

    fn truncate(&mut self, max: usize) -> usize {
        let dropped = self.stack.len().saturating_sub(max);
        self.stack.drain(..dropped);
        dropped
    }

    fn clear(&mut self) {
        self.stack.clear();
    }
}
