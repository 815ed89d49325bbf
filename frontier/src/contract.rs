//! Frontier capability trait.

/// A mutable container of pending candidates.
///
/// The frontier alone owns the ordering policy. Callers constrain only how
/// many items they take at once and how many may stay pending.
///
/// # Contract
///
/// - `select(a)` followed by `select(b)` returns the same items, in the same
///   order, as a single `select(a + b)` would have.
/// - `truncate(max)` retains exactly the items `select` would hand out first,
///   without reordering them.
/// - No method blocks or suspends. Engines treat every call as instantaneous
///   and never call into the frontier while expansions are in flight.
///
/// The trait is object safe; engines hold a `Box<dyn Frontier<T> + Send>`.
pub trait Frontier<T> {
    /// Insert every item, in the given order.
    fn add_all(&mut self, items: Vec<T>);

    /// Number of pending items.
    fn len(&self) -> usize;

    /// Whether no items are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return up to `n` items in service order.
    ///
    /// Returns fewer than `n` items only when fewer are pending.
    fn select(&mut self, n: usize) -> Vec<T>;

    /// Shrink to at most `max` items, keeping those served first.
    ///
    /// Returns the number of items dropped.
    fn truncate(&mut self, max: usize) -> usize;

    /// Drop every pending item.
    fn clear(&mut self);
}

impl<T, F: Frontier<T> + ?Sized> Frontier<T> for Box<F> {
    fn add_all(&mut self, items: Vec<T>) {
        (**self).add_all(items);
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn select(&mut self, n: usize) -> Vec<T> {
        (**self).select(n)
    }

    fn truncate(&mut self, max: usize) -> usize {
        (**self).truncate(max)
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
