//! Command implementations for the replydesk CLI
//!
//! Each module maps a group of subcommands onto the client containers and
//! prints what the corresponding dashboard screen would show.

pub mod auth;
pub mod categories;
pub mod config;
pub mod documents;
pub mod inbox;
pub mod logs;
pub mod mailbox;
pub mod page;
pub mod rules;

use replydesk_client::ReplyDeskClient;
use serde::Serialize;

use crate::error::CliError;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn a container's `bool` result into a command result.
///
/// A failure that signed the user out is reported as an auth error so the
/// exit code tells scripts to log in again.
pub fn outcome(
    client: &ReplyDeskClient,
    succeeded: bool,
    error: Option<String>,
    action: &str,
) -> Result<(), CliError> {
    if succeeded {
        return Ok(());
    }

    let message = error.unwrap_or_else(|| format!("Failed to {action}"));
    if client.auth().is_authenticated() {
        Err(CliError::Command(message))
    } else {
        Err(CliError::Auth(message))
    }
}

/// Cut `text` to `max` characters for table columns
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
