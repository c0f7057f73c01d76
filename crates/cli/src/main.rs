//! splunk-search - run a Splunk search as a batch job and write the results to a file.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging and Ctrl+C handling.
//! - Run the search and translate the outcome into a process exit code.
//!
//! Does NOT handle:
//! - REST API details (see `crates/client`).
//! - Configuration file formats (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Everything that must be flushed is dropped before `std::process::exit`.

mod args;
mod cancellation;
mod commands;
mod error;
mod logging;
mod progress;
mod search;

use args::Cli;
use cancellation::{CancellationToken, install_ctrl_c_handler, print_cancelled_message};
use clap::Parser;
use error::{ExitCode, ExitCodeExt, is_cancelled_error};
use splunk_search_config::ConfigLoader;
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::from(&e).as_i32());
    }

    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level, cli.log_file.as_deref()) {
        eprintln!("{:#}", anyhow::Error::from(e));
        std::process::exit(ExitCode::FileError.as_i32());
    }

    let cancel = CancellationToken::new();
    install_ctrl_c_handler(&cancel);

    let exit_code = match commands::search::run(&cli, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            error!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
