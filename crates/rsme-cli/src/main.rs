use rsme_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI (clap exits 0 itself for --help / --version) and run.
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("remote-source-map-explorer error: {:#}", err);
        std::process::exit(1);
    }
}
