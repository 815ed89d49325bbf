//! Order-equivalence lock tests.
//!
//! Under FIFO selection with no binding cap, the flattened output is the
//! same element-for-element for every concurrency limit, and it matches the
//! sequential engine. Concurrency changes throughput, not logical order.

use std::sync::Arc;

use fathom_frontier::fifo::FifoFrontier;
use fathom_harness::contract::SearchWorld;
use fathom_harness::runner::run_search;
use fathom_harness::worlds::counter::Counter;
use fathom_harness::worlds::words::Words;
use fathom_search::batch::BatchSearch;
use fathom_search::sequential::Search;
use futures::TryStreamExt;
use lock_tests::canonical_run::{canonical_spec, canonical_world, CANONICAL_LEN};

const CORES: [usize; 4] = [1, 2, 3, 16];

async fn flattened_words(cores: usize) -> Vec<String> {
    let world = Words::new("abc", 3);
    BatchSearch::new()
        .from(world.start())
        .through(move |w: String| {
            let next = world.successors(&w);
            async move { next }
        })
        .via(FifoFrontier::new(), None)
        .in_parallel(cores)
        .candidates()
        .unwrap()
        .try_collect()
        .await
        .unwrap()
}

#[tokio::test]
async fn words_identical_for_every_core_count() {
    let baseline = flattened_words(1).await;
    // 1 + 3 + 9 + 27 words of length 0..=3.
    assert_eq!(baseline.len(), 40);

    for cores in CORES {
        assert_eq!(
            flattened_words(cores).await,
            baseline,
            "flattened order differs at cores={cores}"
        );
    }
}

#[tokio::test]
async fn jittered_transcripts_share_sequence_digest() {
    let world = Arc::new(canonical_world());
    let baseline = run_search(Arc::clone(&world), &canonical_spec(1)).await.unwrap();
    assert_eq!(baseline.sequence().len(), CANONICAL_LEN);
    let expected = baseline.sequence_digest().unwrap();

    for cores in CORES {
        let transcript = run_search(Arc::clone(&world), &canonical_spec(cores))
            .await
            .unwrap();
        assert_eq!(
            transcript.sequence_digest().unwrap(),
            expected,
            "sequence digest differs at cores={cores}"
        );
        assert!(transcript.batches.iter().all(|b| b.len() <= cores));
    }
}

#[tokio::test]
async fn sequential_engine_matches_batched_flattening() {
    let world = Counter::binary(7);
    let sequential: Vec<u32> = Search::new()
        .from(world.start())
        .through({
            let world = world.clone();
            move |n: &u32| world.successors(*n)
        })
        .via(FifoFrontier::new(), None)
        .iterate()
        .unwrap()
        .collect();

    for cores in CORES {
        let world = world.clone();
        let batched: Vec<u32> = BatchSearch::new()
            .from([1])
            .through(move |n: u32| {
                let next = world.successors(n);
                async move { next }
            })
            .via(FifoFrontier::new(), None)
            .in_parallel(cores)
            .candidates()
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(batched, sequential, "cores={cores}");
    }
}
