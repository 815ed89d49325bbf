//! Typed search errors.
//!
//! [`ConfigError`] represents pre-flight failures: no round has run and the
//! frontier has not been touched. [`SearchError`] represents runtime failures
//! observed by the consumer of a batch or candidate stream. A runtime failure
//! always halts the search; the stream ends after yielding it.

use crate::expansion::ExpandFailure;

/// Typed failure for pre-flight configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No frontier was supplied via `via`.
    #[error("no frontier configured; call `via` before iterating")]
    MissingFrontier,
    /// No expansion rule was supplied via `through`.
    #[error("no expansion rule configured; call `through` before iterating")]
    MissingSpace,
    /// The per-round concurrency limit was zero.
    #[error("concurrency limit must be at least 1")]
    ZeroCores,
    /// A serialized search policy could not be parsed.
    #[error("invalid search policy: {detail}")]
    Policy { detail: String },
}

/// Runtime failure of a search.
///
/// Batch-level failures carry the full candidate list of the failing batch.
/// No successor of that batch was merged into the frontier.
#[derive(Debug, thiserror::Error)]
pub enum SearchError<T> {
    /// The starting-candidates source failed to resolve.
    #[error("resolving starting candidates failed: {source}")]
    Start {
        #[source]
        source: ExpandFailure,
    },
    /// At least one expansion in a batch failed; the whole batch is rejected.
    #[error("expansion failed at round {round}, batch {batch:?}: {source}")]
    Expansion {
        /// Zero-based index of the failing round.
        round: u64,
        /// Every candidate of the failing batch, in selection order.
        batch: Vec<T>,
        #[source]
        source: ExpandFailure,
    },
    /// A previous `next_batch` future was dropped before its round committed.
    ///
    /// Carries the candidates that round had already taken off the frontier;
    /// none of their successors were merged.
    #[error("round {round} was cancelled mid-expansion; batch {batch:?} was not committed")]
    Interrupted { round: u64, batch: Vec<T> },
    /// The frontier reported pending items but selected none.
    #[error("frontier reported {len} pending candidates but selected none at round {round}")]
    FrontierInvariant { round: u64, len: usize },
}

impl<T> SearchError<T> {
    /// The uncommitted batch, for expansion failures and interrupted rounds.
    #[must_use]
    pub fn batch(&self) -> Option<&[T]> {
        match self {
            Self::Expansion { batch, .. } | Self::Interrupted { batch, .. } => Some(batch),
            Self::Start { .. } | Self::FrontierInvariant { .. } => None,
        }
    }

    /// The underlying expansion failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ExpandFailure> {
        match self {
            Self::Start { source } | Self::Expansion { source, .. } => Some(source),
            Self::Interrupted { .. } | Self::FrontierInvariant { .. } => None,
        }
    }
}
