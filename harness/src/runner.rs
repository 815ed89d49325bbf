//! Harness runner: drives a [`SearchWorld`] through the batched engine and
//! records every emitted batch into a [`Transcript`].
//!
//! # Pipeline
//!
//! ```text
//! RunSpec.policy.validate()
//!   → build frontier (fifo | lifo | ranked by world.rank)
//!   → BatchSearch::from(world.start()).through(world.expand).with_policy(..)
//!   → [next_batch() × N] until exhausted, failed, or candidate_limit reached
//!   → Transcript { batches, stats, outcome }
//! ```
//!
//! An expansion failure is not a runner error: it is part of what the run
//! observed and is recorded as [`Outcome::Failed`]. Only configuration
//! problems abort the run.

use std::sync::Arc;

use fathom_frontier::fifo::FifoFrontier;
use fathom_frontier::lifo::LifoFrontier;
use fathom_frontier::ranked::RankedFrontier;
use fathom_search::batch::{BatchSearch, Rounds};
use fathom_search::error::{ConfigError, SearchError};
use fathom_search::policy::SearchPolicy;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;

use crate::contract::SearchWorld;
use crate::transcript::{Outcome, Transcript};

/// Frontier discipline selected for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierKind {
    /// Breadth-first.
    #[default]
    Fifo,
    /// Depth-first.
    Lifo,
    /// Best-first by [`SearchWorld::rank`].
    Ranked,
}

/// Everything a run needs besides the world itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunSpec {
    pub frontier: FrontierKind,
    pub policy: SearchPolicy,
    /// Stop consuming once this many candidates have been emitted.
    #[serde(default)]
    pub candidate_limit: Option<usize>,
}

/// Error that prevents a run from producing a transcript.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The policy or builder configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A candidate could not be converted to JSON for the transcript.
    #[error("candidate serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The tokio runtime for a blocking run could not be built.
    #[error("runtime construction failed: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Run `world` under `spec` and record the transcript.
///
/// # Errors
///
/// Returns [`RunError`] if the configuration is invalid or a candidate
/// cannot be serialized. Search failures are recorded in the transcript.
pub async fn run_search<W: SearchWorld>(
    world: Arc<W>,
    spec: &RunSpec,
) -> Result<Transcript, RunError> {
    spec.policy.validate()?;

    let span = tracing::info_span!(
        "run_search",
        world = world.world_id(),
        frontier = ?spec.frontier,
        cores = spec.policy.cores,
    );
    let rounds = build_rounds(&world, spec)?;
    record(world.world_id(), spec, rounds).instrument(span).await
}

/// Blocking wrapper around [`run_search`] on a current-thread runtime.
///
/// # Errors
///
/// See [`run_search`]; additionally fails if the runtime cannot be built.
pub fn run_search_blocking<W: SearchWorld>(
    world: Arc<W>,
    spec: &RunSpec,
) -> Result<Transcript, RunError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run_search(world, spec))
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_rounds<W: SearchWorld>(
    world: &Arc<W>,
    spec: &RunSpec,
) -> Result<Rounds<W::Candidate>, ConfigError> {
    let expander = Arc::clone(world);
    let search = BatchSearch::new()
        .from(world.start())
        .through(move |candidate: W::Candidate| expander.expand(&candidate))
        .with_policy(&spec.policy);

    let search = match spec.frontier {
        FrontierKind::Fifo => search.via(FifoFrontier::new(), None),
        FrontierKind::Lifo => search.via(LifoFrontier::new(), None),
        FrontierKind::Ranked => {
            let ranker = Arc::clone(world);
            search.via(
                RankedFrontier::new(move |candidate: &W::Candidate| ranker.rank(candidate)),
                None,
            )
        }
    };
    search.rounds()
}

async fn record<T>(
    world_id: &str,
    spec: &RunSpec,
    mut rounds: Rounds<T>,
) -> Result<Transcript, RunError>
where
    T: Clone + std::fmt::Debug + serde::Serialize + Send + 'static,
{
    let mut batches: Vec<Vec<serde_json::Value>> = Vec::new();
    let mut emitted = 0usize;

    let outcome = loop {
        if spec.candidate_limit.is_some_and(|limit| emitted >= limit) {
            tracing::info!(emitted, "candidate limit reached");
            break Outcome::LimitReached;
        }
        match rounds.next_batch().await {
            None => break Outcome::Exhausted,
            Some(Ok(batch)) => {
                emitted += batch.len();
                let values = batch
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?;
                batches.push(values);
            }
            Some(Err(err)) => {
                tracing::warn!(error = %err, "search halted");
                break failed_outcome(&err);
            }
        }
    };

    Ok(Transcript {
        world_id: world_id.to_string(),
        frontier: spec.frontier,
        cores: spec.policy.cores,
        max_frontier: spec.policy.max_frontier,
        candidate_limit: spec.candidate_limit,
        batches,
        stats: *rounds.stats(),
        outcome,
    })
}

fn failed_outcome<T: std::fmt::Debug>(err: &SearchError<T>) -> Outcome {
    let round = match err {
        SearchError::Expansion { round, .. }
        | SearchError::Interrupted { round, .. }
        | SearchError::FrontierInvariant { round, .. } => Some(*round),
        SearchError::Start { .. } => None,
    };
    Outcome::Failed {
        round,
        batch_len: err.batch().map_or(0, <[T]>::len),
        detail: err.to_string(),
    }
}
