//! `strido-host`: bootstraps a headless Strido process and queues its
//! background work.

use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match strido_bootstrap::run_host() {
        Ok(_runtime) => ExitCode::SUCCESS,
        Err(error) => {
            // Telemetry may not be installed yet, so report directly. A closed
            // stderr leaves nothing else to report to.
            writeln!(io::stderr(), "strido-host: {error}").unwrap_or_default();
            ExitCode::FAILURE
        }
    }
}
