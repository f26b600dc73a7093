//! `replydesk page <name>`: load a screen's resources and print them

use replydesk_client::{Page, ReplyDeskClient, ResourceKind};
use serde_json::{Map, Value};
use shared_types::{confidence_label, DashboardStats, Secret};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::error::CliError;

use super::categories::render_categories;
use super::documents::render_documents;
use super::inbox::render_emails;
use super::logs::render_logs;
use super::mailbox::render_mailbox;
use super::print_json;
use super::rules::render_rules;

pub async fn open_page(
    client: &ReplyDeskClient,
    page: Page,
    format: OutputFormat,
) -> Result<(), CliError> {
    let results = client.pages().enter(page).wait().await;

    if !client.auth().is_authenticated() {
        return Err(CliError::Auth(
            "Your session has expired. Please sign in again.".to_string(),
        ));
    }

    match format {
        OutputFormat::Json => print_json(&page_json(client, &results)?),
        OutputFormat::Text => {
            for (kind, _) in &results {
                println!("== {} ==", kind);
                if let Some(error) = client.workspace().error(*kind) {
                    warn!("{} failed to load", kind);
                    println!("Error: {}", error);
                } else {
                    render_resource(client, *kind)?;
                }
                println!();
            }
            Ok(())
        }
    }
}

fn render_resource(client: &ReplyDeskClient, kind: ResourceKind) -> Result<(), CliError> {
    let workspace = client.workspace();
    let text = OutputFormat::Text;

    match kind {
        ResourceKind::Analytics => {
            render_stats(&workspace.analytics.stats().unwrap_or_default());
            Ok(())
        }
        ResourceKind::Categories => render_categories(&workspace.categories.items(), text),
        ResourceKind::Documents => render_documents(&workspace.documents.items(), text),
        ResourceKind::Emails => render_emails(&workspace.emails.items(), text),
        ResourceKind::Logs => render_logs(&workspace.logs.items(), text),
        ResourceKind::Mailbox => render_mailbox(workspace.mailbox.config().as_ref(), text),
        ResourceKind::Rules => render_rules(&workspace.rules.items(), text),
    }
}

fn render_stats(stats: &DashboardStats) {
    println!("Emails processed:   {}", stats.emails_processed);
    println!("Replies sent:       {}", stats.replies_sent);
    println!("Pending review:     {}", stats.pending_review);
    println!(
        "Average confidence: {:.0}% ({})",
        stats.average_confidence * 100.0,
        confidence_label(stats.average_confidence)
    );
    println!("Success rate:       {:.0}%", stats.success_rate * 100.0);
}

/// One key per resource: its data, or `{ "error": ... }` when it failed
fn page_json(client: &ReplyDeskClient, results: &[(ResourceKind, bool)]) -> Result<Value, CliError> {
    let workspace = client.workspace();
    let mut map = Map::new();

    for (kind, _) in results {
        let value = match workspace.error(*kind) {
            Some(error) => serde_json::json!({ "error": error }),
            None => match kind {
                ResourceKind::Analytics => serde_json::to_value(workspace.analytics.stats())?,
                ResourceKind::Categories => serde_json::to_value(workspace.categories.items())?,
                ResourceKind::Documents => serde_json::to_value(workspace.documents.items())?,
                ResourceKind::Emails => serde_json::to_value(workspace.emails.items())?,
                ResourceKind::Logs => serde_json::to_value(workspace.logs.items())?,
                ResourceKind::Mailbox => {
                    serde_json::to_value(workspace.mailbox.config().map(|mut config| {
                        config.app_password = Secret::default();
                        config
                    }))?
                }
                ResourceKind::Rules => serde_json::to_value(workspace.rules.items())?,
            },
        };
        map.insert(kind.to_string(), value);
    }

    Ok(Value::Object(map))
}
