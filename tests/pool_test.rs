// SPDX-License-Identifier: MIT

use parsum::{sum_parallel, sum_serial, ChunkSplitter, Remainder, WorkerPool};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use test_utils::arrays::{digit_ramp, reference_sum, segmented};
use test_utils::tasks::{sorted_visits, ChunkVisitTask};

fn pool(workers: usize) -> WorkerPool {
    WorkerPool::new(NonZeroUsize::new(workers).unwrap()).unwrap()
}

#[test]
fn test_every_chunk_visited_once_across_batches() {
    let num_workers = 32;
    let total_chunks = 2048;
    let pool = pool(num_workers);
    let visits = Arc::new(Mutex::new(Vec::new()));

    // Hand the chunks out in 8 batches with barriers between each batch.
    let batches = ChunkSplitter::new(
        total_chunks,
        NonZeroUsize::new(8).unwrap(),
        Remainder::Spread,
    );
    for (start, end) in batches {
        for chunk in start..end {
            pool.add_task(Arc::new(ChunkVisitTask::new(chunk, visits.clone())));
        }
        pool.barrier();
        assert_eq!(visits.lock().unwrap().len(), end);
    }

    assert_eq!(sorted_visits(&visits), (0..total_chunks).collect::<Vec<_>>());
}

#[test]
fn test_parallel_sum_over_segments() {
    let num_workers: usize = 32; // 2^5
    let array_size: usize = 4194304; // 2^22
    let values = digit_ramp(array_size);

    // Segment boundaries deliberately out of step with the 32 chunks.
    let array = Arc::new(segmented(&values, &[1, 99_999, 1_000_000, 7]));
    assert_eq!(array.len(), array_size);

    let pool = pool(num_workers);
    let expected = reference_sum(&values);
    assert_eq!(sum_serial(&array), expected);
    assert_eq!(sum_parallel(&pool, &array, Remainder::Drop), expected);
    assert_eq!(sum_parallel(&pool, &array, Remainder::Spread), expected);
}

#[test]
fn test_pool_reused_across_phases() {
    let pool = pool(4);
    let visits = Arc::new(Mutex::new(Vec::new()));
    let array = Arc::new(segmented(&digit_ramp(1_000), &[]));

    pool.add_task(Arc::new(ChunkVisitTask::new(0, visits.clone())));
    pool.barrier();
    let first = sum_parallel(&pool, &array, Remainder::Spread);
    pool.add_task(Arc::new(ChunkVisitTask::new(1, visits.clone())));
    pool.barrier();
    let second = sum_parallel(&pool, &array, Remainder::Spread);

    assert_eq!(sorted_visits(&visits), vec![0, 1]);
    assert_eq!(first, 4_500);
    assert_eq!(first, second);
}
