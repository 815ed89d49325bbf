//! Sequential search: one candidate per step, synchronous expansion.
//!
//! Same fluent surface and frontier discipline as [`crate::batch`], without
//! batching or async. With a FIFO frontier and no binding cap, the iterator
//! yields exactly the sequence the batched engine flattens to.

use fathom_frontier::contract::Frontier;

use crate::error::ConfigError;

type Expand<T> = Box<dyn Fn(&T) -> Vec<T>>;

/// Fluent builder for a sequential search.
pub struct Search<T> {
    start: Vec<T>,
    space: Option<Expand<T>>,
    frontier: Option<Box<dyn Frontier<T>>>,
    max: Option<usize>,
}

impl<T: 'static> Search<T> {
    /// Create a builder with no start, rule, or frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Vec::new(),
            space: None,
            frontier: None,
            max: None,
        }
    }

    /// Set the starting candidates.
    #[must_use]
    pub fn from<I: IntoIterator<Item = T>>(mut self, starts: I) -> Self {
        self.start = starts.into_iter().collect();
        self
    }

    /// Set the expansion rule.
    #[must_use]
    pub fn through<F, I>(mut self, space: F) -> Self
    where
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
    {
        self.space = Some(Box::new(move |candidate: &T| space(candidate).into_iter().collect()));
        self
    }

    /// Set the frontier and, when `max` is `Some`, the frontier cap.
    #[must_use]
    pub fn via<F: Frontier<T> + 'static>(mut self, frontier: F, max: Option<usize>) -> Self {
        self.frontier = Some(Box::new(frontier));
        if max.is_some() {
            self.max = max;
        }
        self
    }

    /// Freeze the configuration into an iterator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the frontier or expansion rule is missing.
    pub fn iterate(self) -> Result<SearchIter<T>, ConfigError> {
        Ok(SearchIter {
            start: Some(self.start),
            frontier: self.frontier.ok_or(ConfigError::MissingFrontier)?,
            space: self.space.ok_or(ConfigError::MissingSpace)?,
            max: self.max,
        })
    }
}

impl<T: 'static> Default for Search<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy iterator over a sequential search.
pub struct SearchIter<T> {
    start: Option<Vec<T>>,
    space: Expand<T>,
    frontier: Box<dyn Frontier<T>>,
    max: Option<usize>,
}

impl<T> SearchIter<T> {
    /// Current number of pending candidates.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

impl<T> Iterator for SearchIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(starts) = self.start.take() {
            self.frontier.clear();
            self.frontier.add_all(starts);
        }

        let candidate = self.frontier.select(1).pop()?;
        let successors = (self.space)(&candidate);
        self.frontier.add_all(successors);
        if let Some(max) = self.max {
            self.frontier.truncate(max);
        }
        Some(candidate)
    }
}
