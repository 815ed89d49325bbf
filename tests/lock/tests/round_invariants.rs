//! Round-level invariants: batch size bound, cap after every round,
//! flattening law, and stats bookkeeping.

use fathom_frontier::fifo::FifoFrontier;
use fathom_frontier::lifo::LifoFrontier;
use fathom_frontier::ranked::RankedFrontier;
use fathom_search::batch::BatchSearch;
use futures::{StreamExt, TryStreamExt};

/// Infinite ternary growth: every candidate has three successors.
fn ternary(n: u64) -> impl std::future::Future<Output = Vec<u64>> {
    async move { vec![3 * n + 1, 3 * n + 2, 3 * n + 3] }
}

#[tokio::test]
async fn batch_never_exceeds_cores_and_is_never_empty() {
    for cores in [1, 2, 5, 16] {
        let batches: Vec<Vec<u64>> = BatchSearch::new()
            .from([0])
            .through(ternary)
            .via(FifoFrontier::new(), Some(50))
            .in_parallel(cores)
            .batches()
            .unwrap()
            .take(40)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(batches.len(), 40);
        for batch in &batches {
            assert!(!batch.is_empty());
            assert!(batch.len() <= cores, "batch {batch:?} exceeds cores={cores}");
        }
    }
}

#[tokio::test]
async fn cap_holds_after_every_round_for_each_frontier() {
    const MAX: usize = 7;

    let searches = [
        BatchSearch::<u64>::new().via(FifoFrontier::new(), Some(MAX)),
        BatchSearch::new().via(LifoFrontier::new(), Some(MAX)),
        BatchSearch::new().via(RankedFrontier::new(|n: &u64| *n), Some(MAX)),
    ];

    for search in searches {
        let mut rounds = search
            .from([0, 1, 2])
            .through(ternary)
            .in_parallel(3)
            .rounds()
            .unwrap();

        for _ in 0..30 {
            let batch = rounds.next_batch().await.unwrap().unwrap();
            assert!(batch.len() <= 3);
            assert!(rounds.frontier_len() <= MAX, "frontier {} > {MAX}", rounds.frontier_len());
        }
        assert!(rounds.stats().pruned > 0);
        assert!(rounds.stats().frontier_high_water > MAX as u64);
    }
}

#[tokio::test]
async fn flattened_stream_is_concatenation_of_batches() {
    let build = || {
        BatchSearch::new()
            .from([0])
            .through(ternary)
            .via(FifoFrontier::new(), Some(30))
            .in_parallel(4)
    };

    let batches: Vec<Vec<u64>> = build().batches().unwrap().take(12).try_collect().await.unwrap();
    let concatenated: Vec<u64> = batches.concat();

    let flattened: Vec<u64> = build()
        .candidates()
        .unwrap()
        .take(concatenated.len())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(flattened, concatenated);
}

#[tokio::test]
async fn stats_account_for_every_round() {
    let mut rounds = BatchSearch::new()
        .from([1u32])
        .through(|n: u32| async move { if n < 5 { vec![n + 1] } else { vec![] } })
        .via(FifoFrontier::new(), None)
        .in_parallel(3)
        .rounds()
        .unwrap();

    let mut emitted = 0;
    while let Some(batch) = rounds.next_batch().await {
        emitted += batch.unwrap().len();
    }

    let stats = rounds.stats();
    assert_eq!(emitted, 5);
    assert_eq!(stats.rounds, 5);
    assert_eq!(stats.candidates_expanded, 5);
    assert_eq!(stats.successors_merged, 4);
    assert_eq!(stats.pruned, 0);
    assert_eq!(rounds.frontier_len(), 0);
    assert!(rounds.next_batch().await.is_none(), "exhausted search stays exhausted");
}
