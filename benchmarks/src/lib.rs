//! Shared helpers for fathom benchmark suites.

use fathom_frontier::fifo::FifoFrontier;
use fathom_harness::worlds::counter::Counter;
use fathom_search::batch::BatchSearch;

/// Width of the synthetic counter used by the engine benchmarks.
pub const BRANCHING: u32 = 3;

/// A counter world that branches `BRANCHING` ways up to `limit`.
#[must_use]
pub fn wide_counter(limit: u32) -> Counter {
    Counter {
        start: 0,
        limit,
        branching: BRANCHING,
    }
}

/// Drive the batched engine over `world` to exhaustion on the calling
/// thread and return the number of candidates emitted.
///
/// Expansions are immediately ready, so this times the engine's own
/// select/merge/cap overhead rather than any rule latency.
///
/// # Panics
///
/// Panics if the search fails. Benchmark setup failures are fatal.
#[must_use]
pub fn drain_engine(world: &Counter, cores: usize, max: Option<usize>) -> usize {
    let rule = world.clone();
    let mut rounds = BatchSearch::new()
        .from([world.start])
        .through(move |n: u32| {
            let next = rule.successors(n);
            async move { next }
        })
        .via(FifoFrontier::new(), max)
        .in_parallel(cores)
        .rounds()
        .expect("benchmark search configuration");

    futures::executor::block_on(async move {
        let mut emitted = 0;
        while let Some(batch) = rounds.next_batch().await {
            emitted += batch.expect("benchmark search failed").len();
        }
        emitted
    })
}
