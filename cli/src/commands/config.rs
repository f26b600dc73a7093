//! Configuration management command implementations

use replydesk_client::config::default_config_path;
use replydesk_client::ClientConfig;

use crate::cli::{Cli, ConfigCommands, OutputFormat};
use crate::error::CliError;

use super::print_json;

/// Handle configuration management operations
pub async fn handle_config_command(action: &ConfigCommands, cli: &Cli) -> Result<(), CliError> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);

    match action {
        ConfigCommands::Show => {
            let config = cli.load_config()?;
            match cli.format {
                OutputFormat::Json => print_json(&config),
                OutputFormat::Text => {
                    println!("Config file:         {}", path.display());
                    println!("API base URL:        {}", config.api.base_url);
                    println!("Request timeout:     {}s", config.api.timeout_secs);
                    println!("Session file:        {}", config.session_path().display());
                    println!("Min password length: {}", config.auth.min_password_length);
                    Ok(())
                }
            }
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => {
            let existed = path.exists();
            let written = ClientConfig::write_default(&path)?;
            if existed {
                println!("Configuration already exists at {}", written.display());
            } else {
                println!("Wrote default configuration to {}", written.display());
            }
            Ok(())
        }
    }
}
