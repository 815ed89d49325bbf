//! Search world contract trait.

use std::fmt;

use futures::future::BoxFuture;

/// A search space the harness can drive.
///
/// # Contract
///
/// - `start` is deterministic: same world → same starting candidates in the
///   same order.
/// - `expand` must not depend on the order in which sibling expansions
///   complete; the engine may run several at once.
/// - `rank` is only consulted by ranked frontiers (lower is served first).
pub trait SearchWorld: Send + Sync + 'static {
    /// The candidate type explored by this world.
    type Candidate: Clone + fmt::Debug + serde::Serialize + Send + Sync + 'static;

    /// Unique world identifier recorded in transcripts.
    fn world_id(&self) -> &str;

    /// Starting candidates.
    fn start(&self) -> Vec<Self::Candidate>;

    /// Compute the successors of `candidate`.
    fn expand(
        &self,
        candidate: &Self::Candidate,
    ) -> BoxFuture<'static, anyhow::Result<Vec<Self::Candidate>>>;

    /// Rank used by best-first frontiers.
    fn rank(&self, _candidate: &Self::Candidate) -> i64 {
        0
    }
}
