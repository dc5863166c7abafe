// SPDX-License-Identifier: MIT

use tracing_subscriber::EnvFilter;

/// Filter applied by the binary. Fixed: no environment variable is consulted.
pub const DEFAULT_DIRECTIVE: &str = "parsum=info";

/// Installs a fmt subscriber writing to stderr, leaving stdout to the report.
///
/// Does nothing if a global subscriber is already installed.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_DIRECTIVE))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .try_init()
        .ok();
}
