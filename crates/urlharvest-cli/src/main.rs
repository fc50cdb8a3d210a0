mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Logging is initialized by the harvest itself, at the configured path.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("urlharvest error: {:#}", err);
        std::process::exit(1);
    }
}
