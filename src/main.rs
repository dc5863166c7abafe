// SPDX-License-Identifier: MIT

use parsum::harness::exit_status;
use parsum::{logging, run, SumConfig};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let config = SumConfig::default();
    let result = run(&config, &mut io::stdout().lock());
    ExitCode::from(exit_status(&result, &mut io::stderr().lock()))
}
