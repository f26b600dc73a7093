//! Inbox commands and AI reply drafting

use replydesk_client::{ReplyDeskClient, RequestOptions};
use shared_types::{confidence_label, Email, ForwardRequest, GenerateReplyRequest, ReplyRequest, Tone};

use crate::cli::{InboxCommands, OutputFormat};
use crate::error::CliError;

use super::{outcome, print_json, truncate};

pub async fn handle_inbox_command(
    client: &ReplyDeskClient,
    action: &InboxCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    let inbox = &client.workspace().emails;

    match action {
        InboxCommands::List { sent: false } => {
            let loaded = inbox.load().await;
            outcome(client, loaded, inbox.error(), "load inbox")?;
            render_emails(&inbox.items(), format)
        }
        InboxCommands::List { sent: true } => {
            let sent = inbox.endpoint().sent(RequestOptions::default()).await?;
            render_emails(&sent, format)
        }
        InboxCommands::Show { id } => {
            let email = inbox.endpoint().get(id).await?;
            match format {
                OutputFormat::Json => print_json(&email),
                OutputFormat::Text => {
                    println!("From:    {}", email.from);
                    println!("To:      {}", email.to);
                    println!("Date:    {}", email.timestamp.format("%Y-%m-%d %H:%M"));
                    println!("Subject: {}", email.subject);
                    if let Some(category) = &email.category {
                        println!("Category: {}", category);
                    }
                    println!();
                    println!("{}", email.body);
                    Ok(())
                }
            }
        }
        InboxCommands::Read { id } => {
            inbox.load().await;
            let done = inbox.mark_read(id).await;
            outcome(client, done, inbox.error(), "mark email as read")
        }
        InboxCommands::Star { id } => {
            inbox.load().await;
            let done = inbox.toggle_star(id).await;
            outcome(client, done, inbox.error(), "star email")?;
            let starred = inbox.get(id).map(|email| email.starred).unwrap_or(false);
            println!("{} {}", if starred { "Starred" } else { "Unstarred" }, id);
            Ok(())
        }
        InboxCommands::Archive { id } => {
            let done = inbox.archive(id).await;
            outcome(client, done, inbox.error(), "archive email")?;
            println!("Archived {}", id);
            Ok(())
        }
        InboxCommands::Delete { id } => {
            let done = inbox.remove(id).await;
            outcome(client, done, inbox.error(), "delete email")?;
            println!("Deleted {}", id);
            Ok(())
        }
        InboxCommands::Reply { id, body } => {
            let reply = ReplyRequest {
                body: body.clone(),
                html_body: None,
            };
            let done = inbox.reply(id, &reply).await;
            outcome(client, done, inbox.error(), "send reply")?;
            println!("Reply sent");
            Ok(())
        }
        InboxCommands::Forward { id, to, note } => {
            let forward = ForwardRequest {
                to: to.clone(),
                note: note.clone(),
            };
            let done = inbox.forward(id, &forward).await;
            outcome(client, done, inbox.error(), "forward email")?;
            println!("Forwarded to {}", to);
            Ok(())
        }
    }
}

pub async fn generate_reply(
    client: &ReplyDeskClient,
    email_id: &str,
    category_id: Option<String>,
    tone: Option<Tone>,
    custom_instructions: Option<String>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let request = GenerateReplyRequest {
        email_id: email_id.to_string(),
        category_id,
        tone,
        custom_instructions,
    };
    let reply = client.workspace().ai.generate_response(&request).await?;

    match format {
        OutputFormat::Json => print_json(&reply),
        OutputFormat::Text => {
            println!(
                "Confidence: {:.0}% ({})",
                reply.confidence * 100.0,
                confidence_label(reply.confidence)
            );
            println!();
            println!("{}", reply.content);
            Ok(())
        }
    }
}

pub fn render_emails(emails: &[Email], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(emails);
    }

    if emails.is_empty() {
        println!("No messages");
        return Ok(());
    }

    for email in emails {
        let flags = format!(
            "{}{}{}",
            if email.read { ' ' } else { '*' },
            if email.starred { 'S' } else { ' ' },
            if email.replied { 'R' } else { ' ' },
        );
        println!(
            "{} {:<12} {:<16} {:<28} {}",
            flags,
            truncate(&email.id, 12),
            email.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&email.from, 28),
            truncate(&email.subject, 50)
        );
    }
    Ok(())
}
