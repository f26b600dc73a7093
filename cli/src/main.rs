use clap::Parser;
use tracing::{debug, info};

mod cli;
mod commands;
mod error;
mod logging;

use cli::Cli;
use error::CliError;
use logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    info!("replydesk CLI starting");
    debug!("Config override: {:?}", cli.config);

    match cli.run().await {
        Ok(_) => {
            debug!("replydesk CLI completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::debug!("CLI error: {:?}", e);
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
