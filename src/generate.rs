// SPDX-License-Identifier: MIT

//! Parallel generation of the sample array.

use crate::array::{try_zeroed, SampleArray};
use crate::error::{Result, SumError};
use crate::partition::{ChunkSplitter, Remainder};
use crate::pool::{Task, WorkerPool};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Default multiplier for the unit random draw: values land in `[0, 10)`.
pub const DEFAULT_SCALE: f64 = 10.0;

/// Parameters for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateParams {
    /// Number of values in the array.
    pub len: usize,
    /// Multiplier applied to a uniform `[0, 1)` draw.
    pub scale: f64,
    /// How indices that do not divide evenly among workers are handled.
    pub remainder: Remainder,
    /// Seed of worker 0; worker `i` uses `base_seed + i`.
    pub base_seed: u64,
}

impl GenerateParams {
    /// Parameters seeded from the wall clock, spreading the remainder.
    pub fn new(len: usize, scale: f64) -> Self {
        GenerateParams {
            len,
            scale,
            remainder: Remainder::default(),
            base_seed: wall_clock_seed(),
        }
    }
}

/// Seconds since the Unix epoch, or 0 if the clock is set before it.
pub fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Seed for `worker`, distinct from every other worker's for the same base.
pub fn worker_seed(base_seed: u64, worker: usize) -> u64 {
    base_seed.wrapping_add(worker as u64)
}

/// Draws one value: `floor(u * scale)` for uniform `u` in `[0, 1)`, saturated
/// to the `i8` range.
pub fn scaled_value<R: Rng>(rng: &mut R, scale: f64) -> i8 {
    (rng.gen::<f64>() * scale) as i8
}

/// Fills one worker's chunk. The chunk is allocated by the worker itself.
struct GenerateTask {
    worker: usize,
    len: usize,
    seed: u64,
    scale: f64,
    chunk: Mutex<Option<Result<Box<[i8]>>>>,
}

impl GenerateTask {
    fn new(worker: usize, len: usize, seed: u64, scale: f64) -> Self {
        GenerateTask {
            worker,
            len,
            seed,
            scale,
            chunk: Mutex::new(None),
        }
    }

    fn take_chunk(&self) -> Result<Box<[i8]>> {
        self.chunk
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or(Err(SumError::MissingChunk(self.worker)))
    }
}

impl Task for GenerateTask {
    fn execute(&self) {
        let result = try_zeroed(self.len).map(|mut buffer| {
            let mut rng = StdRng::seed_from_u64(self.seed);
            for value in buffer.iter_mut() {
                *value = scaled_value(&mut rng, self.scale);
            }
            buffer.into_boxed_slice()
        });
        *self.chunk.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
    }
}

/// Generates a sample array on `pool`, one chunk per worker.
///
/// Returns once every worker has finished. Under [`Remainder::Drop`] the
/// trailing `len % workers` values are never drawn and stay zero.
pub fn generate(
    pool: &WorkerPool,
    params: &GenerateParams,
) -> Result<SampleArray> {
    if !params.scale.is_finite() || params.scale < 0.0 {
        return Err(SumError::InvalidScale(params.scale));
    }

    let workers = pool.worker_count();
    let tasks: Vec<Arc<GenerateTask>> =
        ChunkSplitter::new(params.len, workers, params.remainder)
            .enumerate()
            .map(|(worker, (start, end))| {
                Arc::new(GenerateTask::new(
                    worker,
                    end - start,
                    worker_seed(params.base_seed, worker),
                    params.scale,
                ))
            })
            .collect();
    debug!(
        len = params.len,
        workers = workers.get(),
        base_seed = params.base_seed,
        "generating sample array"
    );

    for task in &tasks {
        pool.add_task(task.clone());
    }
    pool.barrier();

    let mut segments = Vec::with_capacity(tasks.len() + 1);
    for task in &tasks {
        segments.push(task.take_chunk()?);
    }

    let dropped = params.remainder.dropped(params.len, workers);
    if dropped > 0 {
        warn!(dropped, "trailing values not generated, left as zero");
        segments.push(try_zeroed(dropped)?.into_boxed_slice());
    }

    info!(len = params.len, "sample array generated");
    Ok(SampleArray::from_segments(segments))
}
