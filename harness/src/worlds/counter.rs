//! `Counter`: integer world where each value below a limit branches to the
//! next few integers.
//!
//! `Counter::binary(4)` is the two-way branching counter (n → n+1, n+2 while
//! n < 4) and `Counter::chain(5)` is the single successor chain.

use futures::future::{self, BoxFuture, FutureExt};

use crate::contract::SearchWorld;

/// Integer counter world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    /// Single starting value.
    pub start: u32,
    /// Values `>= limit` have no successors.
    pub limit: u32,
    /// Number of successors per expandable value: `n+1 ..= n+branching`.
    pub branching: u32,
}

impl Counter {
    /// Two-way branching from 1: n → [n+1, n+2] while n < `limit`.
    #[must_use]
    pub fn binary(limit: u32) -> Self {
        Self {
            start: 1,
            limit,
            branching: 2,
        }
    }

    /// Single chain from 1: n → [n+1] while n < `limit`.
    #[must_use]
    pub fn chain(limit: u32) -> Self {
        Self {
            start: 1,
            limit,
            branching: 1,
        }
    }

    /// Synchronous successor rule shared with the derived worlds.
    #[must_use]
    pub fn successors(&self, n: u32) -> Vec<u32> {
        if n >= self.limit {
            return Vec::new();
        }
        (1..=self.branching).map(|step| n + step).collect()
    }
}

impl SearchWorld for Counter {
    type Candidate = u32;

    fn world_id(&self) -> &str {
        "counter"
    }

    fn start(&self) -> Vec<u32> {
        vec![self.start]
    }

    fn expand(&self, candidate: &u32) -> BoxFuture<'static, anyhow::Result<Vec<u32>>> {
        future::ready(Ok(self.successors(*candidate))).boxed()
    }

    fn rank(&self, candidate: &u32) -> i64 {
        i64::from(*candidate)
    }
}
