// SPDX-License-Identifier: MIT

use parsum::Task;
use std::sync::{Arc, Mutex};

/// Records which chunk of a partition a worker picked up.
pub struct ChunkVisitTask {
    chunk: usize,
    visits: Arc<Mutex<Vec<usize>>>,
}

impl ChunkVisitTask {
    pub fn new(chunk: usize, visits: Arc<Mutex<Vec<usize>>>) -> Self {
        ChunkVisitTask { chunk, visits }
    }
}

impl Task for ChunkVisitTask {
    fn execute(&self) {
        self.visits.lock().unwrap().push(self.chunk);
    }
}

/// Sorted copy of the recorded visits.
pub fn sorted_visits(visits: &Mutex<Vec<usize>>) -> Vec<usize> {
    let mut visits = visits.lock().unwrap().clone();
    visits.sort_unstable();
    visits
}
