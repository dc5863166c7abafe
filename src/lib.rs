// SPDX-License-Identifier: MIT

//! Times a serial and a thread-pool-parallel sum over a large array of
//! random bytes.

pub mod array;
pub mod error;
pub mod generate;
pub mod harness;
pub mod logging;
pub mod partition;
pub mod pool;
pub mod sum;
pub mod timing;

pub use array::SampleArray;
pub use error::{Result, SumError};
pub use generate::{generate, GenerateParams};
pub use harness::{run, Report, SumConfig};
pub use partition::{ChunkSplitter, Remainder};
pub use pool::{Task, WorkerPool};
pub use sum::{sum_parallel, sum_serial};
pub use timing::{time, Timed};
