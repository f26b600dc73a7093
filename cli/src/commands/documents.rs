//! Knowledge-base document commands

use replydesk_client::ReplyDeskClient;
use shared_types::CompanyDocument;

use crate::cli::{DocumentCommands, OutputFormat};
use crate::error::CliError;

use super::{outcome, print_json, truncate};

pub async fn handle_document_command(
    client: &ReplyDeskClient,
    action: &DocumentCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    let documents = &client.workspace().documents;

    match action {
        DocumentCommands::List => {
            let loaded = documents.load().await;
            outcome(client, loaded, documents.error(), "load documents")?;
            render_documents(&documents.items(), format)
        }
        DocumentCommands::Upload { path, categories } => {
            let uploaded = documents.upload_path(path, categories.clone()).await;
            outcome(client, uploaded, documents.error(), "upload document")?;

            if let Some(document) = documents.items().last() {
                println!(
                    "Uploaded {} ({}, {} bytes)",
                    document.filename,
                    document.id,
                    document.size
                );
            }
            Ok(())
        }
        DocumentCommands::Delete { id } => {
            let removed = documents.remove(id).await;
            outcome(client, removed, documents.error(), "delete document")?;
            println!("Deleted document {}", id);
            Ok(())
        }
    }
}

pub fn render_documents(documents: &[CompanyDocument], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(documents);
    }

    if documents.is_empty() {
        println!("No documents uploaded");
        return Ok(());
    }

    println!("{:<12} {:<30} {:<5} {:>10} {}", "ID", "FILE", "TYPE", "SIZE", "UPLOADED");
    for document in documents {
        println!(
            "{:<12} {:<30} {:<5} {:>10} {}",
            truncate(&document.id, 12),
            truncate(&document.filename, 30),
            format!("{:?}", document.kind).to_lowercase(),
            document.size,
            document.uploaded_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
