// SPDX-License-Identifier: MIT

//! Serial and pool-parallel summation of a sample array.

use crate::array::SampleArray;
use crate::partition::{ChunkSplitter, Remainder};
use crate::pool::{Task, WorkerPool};
use std::sync::atomic::{AtomicI64, Ordering::SeqCst};
use std::sync::Arc;
use tracing::{debug, warn};

/// Wrapping sum of a slice.
pub fn sum_slice(values: &[i8]) -> i64 {
    values
        .iter()
        .fold(0i64, |acc, &value| acc.wrapping_add(i64::from(value)))
}

/// Sums every value of `array` on the calling thread, wrapping on overflow.
pub fn sum_serial(array: &SampleArray) -> i64 {
    array
        .segments()
        .iter()
        .fold(0i64, |acc, segment| acc.wrapping_add(sum_slice(segment)))
}

/// Task that sums one chunk of the shared array.
struct ChunkSumTask {
    input_array: Arc<SampleArray>,
    slice_start: usize,
    slice_end: usize,
    chunk_sum: AtomicI64,
}

impl ChunkSumTask {
    fn new(
        input_array: Arc<SampleArray>,
        slice_start: usize,
        slice_end: usize,
    ) -> Self {
        ChunkSumTask {
            input_array,
            slice_start,
            slice_end,
            chunk_sum: AtomicI64::new(0),
        }
    }
}

impl Task for ChunkSumTask {
    fn execute(&self) {
        let sum = self
            .input_array
            .slices(self.slice_start, self.slice_end)
            .fold(0i64, |acc, slice| acc.wrapping_add(sum_slice(slice)));
        self.chunk_sum.store(sum, SeqCst);
    }
}

/// Sums `array` with one chunk per worker of `pool` and folds the partial
/// sums once the pool is idle.
///
/// Under [`Remainder::Drop`] the trailing `len % workers` values belong to no
/// chunk and are left out of the total.
pub fn sum_parallel(
    pool: &WorkerPool,
    array: &Arc<SampleArray>,
    remainder: Remainder,
) -> i64 {
    let workers = pool.worker_count();
    let tasks: Vec<Arc<ChunkSumTask>> =
        ChunkSplitter::new(array.len(), workers, remainder)
            .map(|(start, end)| {
                Arc::new(ChunkSumTask::new(array.clone(), start, end))
            })
            .collect();

    let dropped = remainder.dropped(array.len(), workers);
    if dropped > 0 {
        warn!(dropped, "trailing values excluded from parallel sum");
    }
    debug!(len = array.len(), chunks = tasks.len(), "summing in parallel");

    for task in &tasks {
        pool.add_task(task.clone());
    }
    pool.barrier();

    tasks
        .iter()
        .map(|task| task.chunk_sum.load(SeqCst))
        .fold(0i64, i64::wrapping_add)
}
