// SPDX-License-Identifier: MIT

//! Error types for generation, summation and reporting.

use std::io;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SumError>;

/// Errors that can occur while running the summation harness.
#[derive(Debug, thiserror::Error)]
pub enum SumError {
    /// A chunk of the sample array could not be allocated.
    #[error("failed to allocate {bytes} bytes for the sample array")]
    Allocation { bytes: usize },

    /// The generator scale is not a usable multiplier.
    #[error("scale must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    /// A worker thread could not be started.
    #[error("failed to spawn worker thread {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },

    /// A generator task finished without handing back its chunk.
    #[error("generator worker {0} did not produce its chunk")]
    MissingChunk(usize),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}
