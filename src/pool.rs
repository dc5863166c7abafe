// SPDX-License-Identifier: MIT

use crate::error::{Result, SumError};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use tracing::{debug, error};

/// A unit of work run by one worker of the pool.
pub trait Task {
    fn execute(&self);
}

/// Task implementation that represents a barrier synchronization point.
/// Each worker thread must reach the barrier before any are allowed to proceed.
struct BarrierTask {
    /// Count of arrivals and barrier condition.
    sync_point: Arc<(Mutex<usize>, Condvar)>,
    /// Number of participants required to reach the barrier.
    total_workers: usize,
}

impl Task for BarrierTask {
    fn execute(&self) {
        let (ref arrival_count, ref barrier_condvar) = *self.sync_point;
        let mut count_guard = lock_recovering(arrival_count);

        *count_guard += 1;

        // Last one in releases everybody.
        if *count_guard == self.total_workers {
            barrier_condvar.notify_all();
            return;
        }

        while *count_guard != self.total_workers {
            count_guard = barrier_condvar
                .wait(count_guard)
                .unwrap_or_else(|e| e.into_inner());
        }
    }
}

/// Queue and shutdown flag shared between the pool handle and its workers.
struct PoolSharedData {
    /// Queue of tasks for worker threads.
    task_queue: VecDeque<Arc<dyn Task + Send + Sync>>,
    /// Flag to signal shutdown to worker threads.
    shutdown_flag: bool,
}

impl PoolSharedData {
    fn new() -> Self {
        PoolSharedData {
            task_queue: VecDeque::with_capacity(128),
            shutdown_flag: false,
        }
    }
}

/// Fixed-size pool of worker threads pulling tasks from a FIFO queue.
///
/// The same pool drives array generation and the parallel summation, so both
/// phases see the same worker count.
pub struct WorkerPool {
    /// Pool of worker threads.
    worker_threads: Vec<thread::JoinHandle<()>>,
    /// Shared data protected by a mutex.
    shared_data: Arc<Mutex<PoolSharedData>>,
    /// Condition variable to notify workers of new tasks or shutdown.
    task_available: Arc<Condvar>,
}

/// Locks `mutex`, taking the data back from a poisoned lock.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            mutex.clear_poison();
            poisoned.into_inner()
        }
    }
}

/// Worker count reported by the runtime, falling back to a single worker.
pub fn available_workers() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

impl WorkerPool {
    /// Creates a pool with `worker_count` worker threads.
    pub fn new(worker_count: NonZeroUsize) -> Result<Self> {
        let worker_count = worker_count.get();
        let mut pool = WorkerPool {
            worker_threads: Vec::with_capacity(worker_count),
            shared_data: Arc::new(Mutex::new(PoolSharedData::new())),
            task_available: Arc::new(Condvar::new()),
        };

        for index in 0..worker_count {
            let shared_data = pool.shared_data.clone();
            let task_condvar = pool.task_available.clone();
            let handle = thread::Builder::new()
                .name(format!("parsum-worker-{index}"))
                .spawn(move || worker_loop(index, &shared_data, &task_condvar))
                .map_err(|source| SumError::Spawn { index, source })?;
            pool.worker_threads.push(handle);
        }

        debug!(workers = worker_count, "worker pool started");
        Ok(pool)
    }

    /// Creates a pool sized to the runtime-reported available parallelism.
    pub fn with_available_parallelism() -> Result<Self> {
        Self::new(available_workers())
    }

    /// Number of worker threads in the pool.
    pub fn worker_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.worker_threads.len())
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Adds a task to the queue and wakes one waiting worker.
    pub fn add_task(&self, task: Arc<dyn Task + Send + Sync>) {
        let mut shared_data_guard = lock_recovering(&self.shared_data);
        shared_data_guard.task_queue.push_back(task);
        self.task_available.notify_one();
    }

    /// Blocks until every task queued before this call has finished.
    ///
    /// One barrier task is queued per worker and the caller joins as the last
    /// participant. Since the queue is FIFO, a worker can only pick up its
    /// barrier task once all earlier tasks have been taken, and it cannot
    /// leave the barrier before every other worker has finished its task.
    pub fn barrier(&self) {
        let shared_sync_point = Arc::new((Mutex::new(0), Condvar::new()));
        let total_workers = self.worker_threads.len() + 1;

        for _ in 0..total_workers - 1 {
            self.add_task(Arc::new(BarrierTask {
                sync_point: shared_sync_point.clone(),
                total_workers,
            }));
        }

        BarrierTask {
            sync_point: shared_sync_point,
            total_workers,
        }
        .execute();
    }
}

fn worker_loop(
    index: usize,
    shared_data: &Mutex<PoolSharedData>,
    task_condvar: &Condvar,
) {
    loop {
        let task = {
            let mut shared_data_guard = lock_recovering(shared_data);

            while shared_data_guard.task_queue.is_empty()
                && !shared_data_guard.shutdown_flag
            {
                shared_data_guard = task_condvar
                    .wait(shared_data_guard)
                    .unwrap_or_else(|e| e.into_inner());
            }

            match shared_data_guard.task_queue.pop_front() {
                Some(task) => task,
                // Queue drained and shutdown requested.
                None => break,
            }
        };

        // Execute outside the lock. A panicking task must not take the worker
        // down with it, or the next barrier would never fill up.
        if panic::catch_unwind(AssertUnwindSafe(|| task.execute())).is_err() {
            error!(worker = index, "task panicked");
        }
    }
    debug!(worker = index, "worker stopped");
}

impl Drop for WorkerPool {
    /// Sets the shutdown flag, wakes every worker and joins them.
    fn drop(&mut self) {
        {
            let mut shared_data_guard = lock_recovering(&self.shared_data);
            shared_data_guard.shutdown_flag = true;
            self.task_available.notify_all();
        }

        for handle in self.worker_threads.drain(..) {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};

    struct CountTask(Arc<AtomicUsize>);

    impl Task for CountTask {
        fn execute(&self) {
            self.0.fetch_add(1, SeqCst);
        }
    }

    struct PanicTask;

    impl Task for PanicTask {
        fn execute(&self) {
            panic!("boom");
        }
    }

    fn pool(workers: usize) -> WorkerPool {
        WorkerPool::new(NonZeroUsize::new(workers).unwrap()).unwrap()
    }

    #[test]
    fn test_barrier_waits_for_queued_tasks() {
        let pool = pool(8);
        let counter = Arc::new(AtomicUsize::new(0));

        for batch in 1..=4 {
            for _ in 0..256 {
                pool.add_task(Arc::new(CountTask(counter.clone())));
            }
            pool.barrier();
            assert_eq!(counter.load(SeqCst), batch * 256);
        }
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(pool(3).worker_count().get(), 3);
        assert!(WorkerPool::with_available_parallelism()
            .unwrap()
            .worker_count()
            .get()
            >= 1);
    }

    #[test]
    fn test_panicking_task_does_not_block_barrier() {
        let pool = pool(2);
        let counter = Arc::new(AtomicUsize::new(0));

        pool.add_task(Arc::new(PanicTask));
        pool.add_task(Arc::new(CountTask(counter.clone())));
        pool.barrier();

        pool.add_task(Arc::new(CountTask(counter.clone())));
        pool.barrier();
        assert_eq!(counter.load(SeqCst), 2);
    }

    #[test]
    fn test_barrier_on_idle_pool() {
        let pool = pool(1);
        pool.barrier();
        pool.barrier();
    }
}
