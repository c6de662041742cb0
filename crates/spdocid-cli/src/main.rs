use spdocid_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; the file log is optional.
    if let Err(err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("file logging unavailable, using stderr: {:#}", err),
            Err(fallback) => eprintln!("spdocid: logging disabled: {:#}; {:#}", err, fallback),
        }
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("spdocid error: {:#}", err);
        std::process::exit(1);
    }
}
