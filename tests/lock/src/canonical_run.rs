//! Single source of truth for the canonical determinism run.
//!
//! Used by both the `search_fixture` binary and the in-process lock tests,
//! so the cross-process harness and the in-process assertions can never
//! drift apart.
//!
//! World: binary counter from 1 with limit 8 (67 candidates in total),
//! with up to 3 ms of per-candidate latency so completion order differs
//! from batch order. Frontier: FIFO, no cap.

use fathom_harness::runner::{FrontierKind, RunSpec};
use fathom_harness::worlds::counter::Counter;
use fathom_harness::worlds::jitter::Jitter;
use fathom_search::policy::SearchPolicy;

/// Number of candidates the canonical run emits before exhaustion.
pub const CANONICAL_LEN: usize = 67;

/// The canonical world.
#[must_use]
pub fn canonical_world() -> Jitter {
    Jitter::new(Counter::binary(8), 3)
}

/// The canonical run spec at a given concurrency limit.
#[must_use]
pub fn canonical_spec(cores: usize) -> RunSpec {
    RunSpec {
        frontier: FrontierKind::Fifo,
        policy: SearchPolicy {
            cores,
            max_frontier: None,
        },
        candidate_limit: None,
    }
}
