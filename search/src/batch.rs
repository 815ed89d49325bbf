//! Batched concurrent search: rounds of select → expand → merge → cap → emit.
//!
//! # Round
//!
//! ```text
//! frontier.select(cores)            (batch, frontier-defined order)
//!   → expand every candidate        (all in flight together, join-all)
//!   → concatenate successors        (batch order, not completion order)
//!   → frontier.add_all(successors)
//!   → frontier.truncate(max)        (only when a cap is set)
//!   → yield batch
//! ```
//!
//! Rounds are strictly sequential. Expansions run concurrently inside the
//! consumer's task; no runtime or thread pool is required. The frontier is
//! only touched between rounds, so it needs no locking.
//!
//! A failed expansion rejects the whole batch: nothing from it is merged,
//! the consumer observes one [`SearchError::Expansion`], and the stream ends.

use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;

use fathom_frontier::contract::Frontier;
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{self, Stream, TryStreamExt};

use crate::error::{ConfigError, SearchError};
use crate::expansion::{expand_guarded, settle, ExpandFailure, IntoSuccessors, Space};
use crate::policy::{SearchPolicy, DEFAULT_CORES};

/// Counters accumulated across the rounds of one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchStats {
    /// Rounds completed (batches emitted).
    pub rounds: u64,
    /// Candidates handed to the expansion rule in completed rounds.
    pub candidates_expanded: u64,
    /// Successors merged into the frontier.
    pub successors_merged: u64,
    /// Candidates dropped by cap enforcement.
    pub pruned: u64,
    /// Largest frontier size observed (after seeding or merging, before capping).
    pub frontier_high_water: u64,
}

/// Source of the starting candidates, resolved exactly once.
enum Start<T> {
    Ready(Vec<T>),
    Pending(BoxFuture<'static, Result<Vec<T>, ExpandFailure>>),
}

/// Fluent builder for a batched search.
///
/// Every setter consumes and returns the builder, so calls chain in any
/// order. Nothing runs until the frozen [`Rounds`] (or one of its streams)
/// is polled.
///
/// ```no_run
/// use fathom_frontier::fifo::FifoFrontier;
/// use fathom_search::batch::BatchSearch;
/// use futures::TryStreamExt;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let found: Vec<u32> = BatchSearch::new()
///     .from([1])
///     .through(|n: u32| async move { if n < 4 { vec![n + 1, n + 2] } else { vec![] } })
///     .via(FifoFrontier::new(), Some(20))
///     .in_parallel(2)
///     .candidates()?
///     .try_collect()
///     .await?;
/// # let _ = found;
/// # Ok(())
/// # }
/// ```
pub struct BatchSearch<T> {
    start: Start<T>,
    space: Option<Box<dyn Space<T>>>,
    frontier: Option<Box<dyn Frontier<T> + Send>>,
    max: Option<usize>,
    cores: usize,
}

impl<T> BatchSearch<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    /// Create a builder with no start, rule, or frontier and
    /// [`DEFAULT_CORES`] concurrency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Start::Ready(Vec::new()),
            space: None,
            frontier: None,
            max: None,
            cores: DEFAULT_CORES,
        }
    }

    /// Set the starting candidates from a fixed collection.
    #[must_use]
    pub fn from<I: IntoIterator<Item = T>>(mut self, starts: I) -> Self {
        self.start = Start::Ready(starts.into_iter().collect());
        self
    }

    /// Set the starting candidates from a future, resolved once when the
    /// first batch is requested.
    #[must_use]
    pub fn from_future<Fut, R>(mut self, starts: Fut) -> Self
    where
        Fut: Future<Output = R> + Send + 'static,
        R: IntoSuccessors<T> + Send + 'static,
    {
        self.start = Start::Pending(
            async move { starts.await.into_successors()?.resolve().await }.boxed(),
        );
        self
    }

    /// Set the expansion rule.
    #[must_use]
    pub fn through<S: Space<T> + 'static>(mut self, space: S) -> Self {
        self.space = Some(Box::new(space));
        self
    }

    /// Set the frontier and, when `max` is `Some`, the frontier cap.
    ///
    /// A `None` cap leaves any previously configured cap in place.
    #[must_use]
    pub fn via<F>(mut self, frontier: F, max: Option<usize>) -> Self
    where
        F: Frontier<T> + Send + 'static,
    {
        self.frontier = Some(Box::new(frontier));
        if max.is_some() {
            self.max = max;
        }
        self
    }

    /// Set the per-round concurrency limit.
    #[must_use]
    pub fn in_parallel(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    /// Apply `cores` and, when set, `max_frontier` from a policy.
    #[must_use]
    pub fn with_policy(mut self, policy: &SearchPolicy) -> Self {
        self.cores = policy.cores;
        if policy.max_frontier.is_some() {
            self.max = policy.max_frontier;
        }
        self
    }

    /// Freeze the configuration into a round driver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the frontier or expansion rule is missing,
    /// or if the concurrency limit is zero.
    pub fn rounds(self) -> Result<Rounds<T>, ConfigError> {
        let frontier = self.frontier.ok_or(ConfigError::MissingFrontier)?;
        let space = self.space.ok_or(ConfigError::MissingSpace)?;
        let cores = NonZeroUsize::new(self.cores).ok_or(ConfigError::ZeroCores)?;
        if self.max.is_none() {
            tracing::debug!(cores = cores.get(), "frontier cap unset; growth is unbounded");
        }
        Ok(Rounds {
            start: Some(self.start),
            space,
            frontier,
            max: self.max,
            cores,
            stats: SearchStats::default(),
            halted: false,
            in_round: None,
        })
    }

    /// Freeze and return the lazy stream of batches.
    ///
    /// # Errors
    ///
    /// See [`BatchSearch::rounds`].
    pub fn batches(
        self,
    ) -> Result<impl Stream<Item = Result<Vec<T>, SearchError<T>>> + Send, ConfigError> {
        Ok(self.rounds()?.into_batches())
    }

    /// Freeze and return the lazy stream of individual candidates.
    ///
    /// # Errors
    ///
    /// See [`BatchSearch::rounds`].
    pub fn candidates(
        self,
    ) -> Result<impl Stream<Item = Result<T, SearchError<T>>> + Send, ConfigError> {
        Ok(self.rounds()?.into_candidates())
    }
}

impl<T> Default for BatchSearch<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen round driver for one search invocation.
///
/// Owns the frontier for the lifetime of the search. Single-pass: once it
/// has returned `None` (exhaustion or failure) it never yields again.
pub struct Rounds<T> {
    start: Option<Start<T>>,
    space: Box<dyn Space<T>>,
    frontier: Box<dyn Frontier<T> + Send>,
    max: Option<usize>,
    cores: NonZeroUsize,
    stats: SearchStats,
    halted: bool,
    /// Candidates taken off the frontier by a round that has not committed.
    /// Still `Some` on entry only if the previous `next_batch` was dropped.
    in_round: Option<Vec<T>>,
}

impl<T> Rounds<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    /// Run one round and return its batch.
    ///
    /// The first call clears the frontier and seeds it with the resolved
    /// starting candidates. Returns `None` once the frontier is empty after
    /// a round, or after a failure has been reported.
    ///
    /// # Cancel safety
    ///
    /// Not cancel safe. Dropping the returned future mid-round abandons the
    /// candidates already selected for that round. The next call reports
    /// them in [`SearchError::Interrupted`] and the search halts; it never
    /// continues from a frontier that has lost candidates.
    pub async fn next_batch(&mut self) -> Option<Result<Vec<T>, SearchError<T>>> {
        if let Some(batch) = self.in_round.take() {
            self.halted = true;
            let round = self.stats.rounds;
            tracing::warn!(
                round,
                batch_len = batch.len(),
                "previous round was cancelled; search halted"
            );
            return Some(Err(SearchError::Interrupted { round, batch }));
        }
        if self.halted {
            return None;
        }

        if let Some(start) = self.start.take() {
            self.in_round = Some(Vec::new());
            let seeded = self.seed(start).await;
            self.in_round = None;
            if let Err(err) = seeded {
                self.halted = true;
                tracing::warn!(error = %err, "search halted before the first round");
                return Some(Err(err));
            }
        }

        let pending = self.frontier.len();
        let round = self.stats.rounds;
        if pending == 0 {
            self.halted = true;
            tracing::info!(
                rounds = round,
                expanded = self.stats.candidates_expanded,
                pruned = self.stats.pruned,
                "frontier exhausted"
            );
            return None;
        }

        let batch = self.frontier.select(self.cores.get());
        if batch.is_empty() {
            self.halted = true;
            return Some(Err(SearchError::FrontierInvariant {
                round,
                len: pending,
            }));
        }

        let in_flight: Vec<_> = batch
            .iter()
            .cloned()
            .map(|candidate| expand_guarded(self.space.as_ref(), candidate))
            .collect();
        self.in_round = Some(batch.clone());
        let settled = future::join_all(in_flight).await;
        self.in_round = None;

        // Concatenate in batch order; any failure rejects the whole batch.
        let mut successors = Vec::new();
        for outcome in settled {
            match outcome {
                Ok(items) => successors.extend(items),
                Err(source) => {
                    self.halted = true;
                    tracing::warn!(
                        round,
                        batch_len = batch.len(),
                        error = %source,
                        "expansion failed; batch rejected"
                    );
                    return Some(Err(SearchError::Expansion {
                        round,
                        batch,
                        source,
                    }));
                }
            }
        }

        let merged = successors.len();
        self.frontier.add_all(successors);
        self.observe_frontier();
        let pruned = self.max.map_or(0, |max| self.frontier.truncate(max));

        self.stats.rounds += 1;
        self.stats.candidates_expanded += batch.len() as u64;
        self.stats.successors_merged += merged as u64;
        self.stats.pruned += pruned as u64;

        tracing::debug!(
            round,
            batch_len = batch.len(),
            merged,
            pruned,
            frontier_len = self.frontier.len(),
            "round complete"
        );

        Some(Ok(batch))
    }

    async fn seed(&mut self, start: Start<T>) -> Result<(), SearchError<T>> {
        self.frontier.clear();
        let starts = match start {
            Start::Ready(items) => items,
            Start::Pending(pending) => settle(pending)
                .await
                .map_err(|source| SearchError::Start { source })?,
        };
        tracing::info!(
            starts = starts.len(),
            cores = self.cores.get(),
            max = ?self.max,
            "search seeded"
        );
        self.frontier.add_all(starts);
        self.observe_frontier();
        Ok(())
    }

    fn observe_frontier(&mut self) {
        let len = self.frontier.len() as u64;
        self.stats.frontier_high_water = self.stats.frontier_high_water.max(len);
    }

    /// Current number of pending candidates.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The configured per-round concurrency limit.
    #[must_use]
    pub fn cores(&self) -> usize {
        self.cores.get()
    }

    /// The configured frontier cap.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Lazy stream of batches, one per round, in round order.
    pub fn into_batches(self) -> impl Stream<Item = Result<Vec<T>, SearchError<T>>> + Send {
        stream::unfold(self, |mut rounds| async move {
            let batch = rounds.next_batch().await?;
            Some((batch, rounds))
        })
    }

    /// Lazy stream of individual candidates.
    ///
    /// Defined purely as the flattening of [`Rounds::into_batches`]: a round
    /// runs only when the previous batch has been fully consumed.
    pub fn into_candidates(self) -> impl Stream<Item = Result<T, SearchError<T>>> + Send {
        self.into_batches()
            .map_ok(|batch| stream::iter(batch.into_iter().map(Ok::<T, SearchError<T>>)))
            .try_flatten()
    }
}

impl<T> fmt::Debug for Rounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rounds")
            .field("frontier_len", &self.frontier.len())
            .field("max", &self.max)
            .field("cores", &self.cores)
            .field("stats", &self.stats)
            .field("halted", &self.halted)
            .field("in_round", &self.in_round.is_some())
            .finish_non_exhaustive()
    }
}
