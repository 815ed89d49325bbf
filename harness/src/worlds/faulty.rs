//! `Faulty`: the counter world with one candidate whose expansion fails.

use futures::future::{self, BoxFuture, FutureExt};

use crate::contract::SearchWorld;
use crate::worlds::counter::Counter;

/// Counter world that errors when asked to expand `fail_on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faulty {
    pub counter: Counter,
    pub fail_on: u32,
}

impl SearchWorld for Faulty {
    type Candidate = u32;

    fn world_id(&self) -> &str {
        "faulty"
    }

    fn start(&self) -> Vec<u32> {
        self.counter.start()
    }

    fn expand(&self, candidate: &u32) -> BoxFuture<'static, anyhow::Result<Vec<u32>>> {
        let outcome = if *candidate == self.fail_on {
            Err(anyhow::anyhow!("refusing to expand {candidate}"))
        } else {
            Ok(self.counter.successors(*candidate))
        };
        future::ready(outcome).boxed()
    }

    fn rank(&self, candidate: &u32) -> i64 {
        self.counter.rank(candidate)
    }
}
