// SPDX-License-Identifier: MIT

//! Generate, sum twice, report.

use crate::error::Result;
use crate::generate::{
    generate, wall_clock_seed, GenerateParams, DEFAULT_SCALE,
};
use crate::partition::Remainder;
use crate::pool::{available_workers, WorkerPool};
use crate::sum::{sum_parallel, sum_serial};
use crate::timing::{time, Timed};
use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{error, info};

/// Number of values summed by the binary.
pub const DEFAULT_LEN: usize = 1_000_000_000;

/// Everything a harness run depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumConfig {
    /// Number of values in the sample array.
    pub len: usize,
    /// Generator multiplier; values fall in `[0, scale)`.
    pub scale: f64,
    /// Worker threads used for generation and the parallel sum.
    pub workers: NonZeroUsize,
    /// Remainder policy shared by generation and the parallel sum.
    pub remainder: Remainder,
}

impl Default for SumConfig {
    fn default() -> Self {
        SumConfig {
            len: DEFAULT_LEN,
            scale: DEFAULT_SCALE,
            workers: available_workers(),
            remainder: Remainder::default(),
        }
    }
}

/// Both sums with their timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub serial: Timed<i64>,
    pub parallel: Timed<i64>,
}

/// Runs generation, the serial sum and the parallel sum in that order,
/// writing progress and results to `out`.
pub fn run<W: Write>(config: &SumConfig, out: &mut W) -> Result<Report> {
    let pool = WorkerPool::new(config.workers)?;
    let params = GenerateParams {
        len: config.len,
        scale: config.scale,
        remainder: config.remainder,
        base_seed: wall_clock_seed(),
    };

    let generated = time(|| generate(&pool, &params));
    let seconds = generated.seconds();
    let array = Arc::new(generated.value?);
    info!(seconds, "generation finished");

    writeln!(out, "Timing sequential...")?;
    out.flush()?;
    let serial = time(|| sum_serial(&array));
    writeln!(out, "Took {:.6} seconds\n", serial.seconds())?;
    info!(
        seconds = serial.seconds(),
        sum = serial.value,
        "serial sum finished"
    );

    writeln!(out, "Timing parallel...")?;
    out.flush()?;
    let parallel = time(|| sum_parallel(&pool, &array, config.remainder));
    writeln!(out, "Took {:.6} seconds\n", parallel.seconds())?;
    info!(
        seconds = parallel.seconds(),
        sum = parallel.value,
        "parallel sum finished"
    );

    write!(
        out,
        "Sum serial: {}\nSum parallel: {}",
        serial.value, parallel.value
    )?;
    out.flush()?;

    Ok(Report { serial, parallel })
}

/// Process exit status for the outcome of [`run`]: 0 on success, 1 after
/// writing a one-line diagnostic to `diagnostics` on failure.
pub fn exit_status<W: Write>(
    result: &Result<Report>,
    diagnostics: &mut W,
) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            error!(error = %err, "run failed");
            let _ = writeln!(diagnostics, "parsum: {err}");
            1
        }
    }
}
