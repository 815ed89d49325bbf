//! `Jitter`: the counter world with a deterministic per-candidate delay.
//!
//! Expansions finish in an order unrelated to batch order, which is what the
//! order-preservation checks need. The delay is a pure function of the
//! candidate so runs stay reproducible.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};

use crate::contract::SearchWorld;
use crate::worlds::counter::Counter;

/// Counter world whose expansions sleep before answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Jitter {
    pub counter: Counter,
    /// Upper bound on the per-candidate delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Jitter {
    #[must_use]
    pub fn new(counter: Counter, max_delay_ms: u64) -> Self {
        Self {
            counter,
            max_delay_ms,
        }
    }

    /// Delay applied before expanding `n`.
    #[must_use]
    pub fn delay(&self, n: u32) -> Duration {
        let scrambled = u64::from(n).wrapping_mul(7919);
        Duration::from_millis(scrambled % self.max_delay_ms.saturating_add(1))
    }
}

impl SearchWorld for Jitter {
    type Candidate = u32;

    fn world_id(&self) -> &str {
        "jitter"
    }

    fn start(&self) -> Vec<u32> {
        self.counter.start()
    }

    fn expand(&self, candidate: &u32) -> BoxFuture<'static, anyhow::Result<Vec<u32>>> {
        let delay = self.delay(*candidate);
        let successors = self.counter.successors(*candidate);
        async move {
            tokio::time::sleep(delay).await;
            Ok(successors)
        }
        .boxed()
    }

    fn rank(&self, candidate: &u32) -> i64 {
        self.counter.rank(candidate)
    }
}
