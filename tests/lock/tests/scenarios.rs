//! Reference scenarios: exact outputs for the binary counter and the chain.

use std::sync::Arc;

use fathom_frontier::fifo::FifoFrontier;
use fathom_harness::runner::{run_search, FrontierKind, RunSpec};
use fathom_harness::transcript::Outcome;
use fathom_harness::worlds::counter::Counter;
use fathom_search::batch::BatchSearch;
use fathom_search::policy::SearchPolicy;
use futures::{StreamExt, TryStreamExt};
use serde_json::json;

fn binary_rule(n: u32) -> impl std::future::Future<Output = Vec<u32>> {
    async move { if n < 4 { vec![n + 1, n + 2] } else { vec![] } }
}

#[tokio::test]
async fn binary_counter_first_seven() {
    let first_seven: Vec<u32> = BatchSearch::new()
        .from([1])
        .through(binary_rule)
        .via(FifoFrontier::new(), Some(20))
        .in_parallel(2)
        .candidates()
        .unwrap()
        .take(7)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first_seven, vec![1, 2, 3, 3, 4, 4, 5]);
}

#[tokio::test]
async fn binary_counter_batches() {
    let batches: Vec<Vec<u32>> = BatchSearch::new()
        .from([1])
        .through(binary_rule)
        .via(FifoFrontier::new(), Some(20))
        .in_parallel(2)
        .batches()
        .unwrap()
        .take(4)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(batches[0], vec![1]);
    assert_eq!(batches[1], vec![2, 3]);
    assert_eq!(batches[2], vec![3, 4]);
    assert_eq!(batches[3], vec![4, 5]);
}

#[tokio::test]
async fn chain_ends_after_five() {
    let all: Vec<u32> = BatchSearch::new()
        .from([1])
        .through(|n: u32| async move { if n < 5 { vec![n + 1] } else { vec![] } })
        .via(FifoFrontier::new(), Some(10))
        .in_parallel(3)
        .candidates()
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(all, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn chain_through_harness_records_exhaustion() {
    let spec = RunSpec {
        frontier: FrontierKind::Fifo,
        policy: SearchPolicy {
            cores: 3,
            max_frontier: Some(10),
        },
        candidate_limit: None,
    };
    let transcript = run_search(Arc::new(Counter::chain(5)), &spec).await.unwrap();

    assert_eq!(transcript.outcome, Outcome::Exhausted);
    assert_eq!(
        transcript.sequence(),
        vec![json!(1), json!(2), json!(3), json!(4), json!(5)]
    );
    assert_eq!(transcript.stats.rounds, 5);
}

#[tokio::test]
async fn empty_start_yields_nothing() {
    let all: Vec<u32> = BatchSearch::new()
        .from(Vec::<u32>::new())
        .through(binary_rule)
        .via(FifoFrontier::new(), None)
        .candidates()
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert!(all.is_empty());
}

#[tokio::test]
async fn infinite_space_is_lazy() {
    // Unbounded growth, but only as many rounds run as are consumed.
    let taken: Vec<u64> = BatchSearch::new()
        .from([0u64])
        .through(|n: u64| async move { vec![n + 1, n + 1] })
        .via(FifoFrontier::new(), Some(1000))
        .in_parallel(8)
        .candidates()
        .unwrap()
        .take(3)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(taken, vec![0, 1, 1]);
}

#[tokio::test]
async fn no_round_runs_until_polled() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let expansions = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&expansions);
    let stream = BatchSearch::new()
        .from([1u32, 2, 3, 4])
        .through(move |n: u32| {
            seen.fetch_add(1, Ordering::SeqCst);
            async move { vec![n * 10] }
        })
        .via(FifoFrontier::new(), None)
        .in_parallel(2)
        .candidates()
        .unwrap();
    assert_eq!(expansions.load(Ordering::SeqCst), 0, "building the stream runs nothing");

    let first_two: Vec<u32> = stream.take(2).try_collect().await.unwrap();
    assert_eq!(first_two, vec![1, 2]);
    assert_eq!(expansions.load(Ordering::SeqCst), 2, "exactly one round ran");
}
