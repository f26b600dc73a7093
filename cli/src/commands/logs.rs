//! Activity log commands

use replydesk_client::api::{LogQuery, LogsApi};
use replydesk_client::{Collection, ReplyDeskClient};
use shared_types::{confidence_label, LogEntry};
use std::sync::Arc;

use crate::cli::{LogCommands, OutputFormat};
use crate::error::CliError;

use super::{outcome, print_json, truncate};

pub async fn handle_log_command(
    client: &ReplyDeskClient,
    action: &LogCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    match action {
        LogCommands::List { kind, limit } => {
            let query = LogQuery {
                kind: *kind,
                limit: *limit,
            };
            let logs =
                Collection::new(LogsApi::new(Arc::clone(client.transport())).with_query(query));
            let loaded = logs.load().await;
            outcome(client, loaded, logs.error(), "load logs")?;
            render_logs(&logs.items(), format)
        }
        LogCommands::Export { output } => {
            let csv = client.workspace().logs.endpoint().export().await?;
            match output {
                Some(path) => {
                    std::fs::write(path, csv)?;
                    println!("Exported log to {}", path.display());
                }
                None => print!("{}", csv),
            }
            Ok(())
        }
    }
}

pub fn render_logs(entries: &[LogEntry], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(entries);
    }

    if entries.is_empty() {
        println!("No activity yet");
        return Ok(());
    }

    for entry in entries {
        println!(
            "{} {:<9} {:<28} {:<36} {:>4.0}% {:<6} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.kind.as_str(),
            truncate(&entry.email, 28),
            truncate(&entry.subject, 36),
            entry.confidence * 100.0,
            confidence_label(entry.confidence),
            entry.action
        );
    }
    Ok(())
}
