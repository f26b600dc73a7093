//! Mailbox account and monitor commands

use replydesk_client::ReplyDeskClient;
use shared_types::{ConnectionTest, MailboxConfig, MailboxPatch, MailboxSetup, Secret};

use crate::cli::{MailboxCommands, OutputFormat};
use crate::error::CliError;

use super::{outcome, print_json};

pub async fn handle_mailbox_command(
    client: &ReplyDeskClient,
    action: &MailboxCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mailbox = &client.workspace().mailbox;

    match action {
        MailboxCommands::Show => {
            let loaded = mailbox.load().await;
            outcome(client, loaded, mailbox.error(), "load mailbox")?;
            render_mailbox(mailbox.config().as_ref(), format)
        }
        MailboxCommands::Configure {
            email,
            app_password,
            threshold,
            auto_reply,
        } => {
            let setup = MailboxSetup {
                email: email.clone(),
                app_password: Secret::new(app_password.clone()),
                auto_reply_emails: auto_reply.clone(),
                confidence_threshold: *threshold,
            };
            let done = mailbox.configure(&setup).await;
            outcome(client, done, mailbox.error(), "configure mailbox")?;
            println!("Mailbox {} configured", email);
            Ok(())
        }
        MailboxCommands::Update { threshold, enabled } => {
            let patch = MailboxPatch {
                auto_reply_emails: None,
                confidence_threshold: *threshold,
                enabled: *enabled,
            };
            let done = mailbox.save(&patch).await;
            outcome(client, done, mailbox.error(), "update mailbox")?;
            render_mailbox(mailbox.config().as_ref(), format)
        }
        MailboxCommands::Test {
            email,
            app_password,
        } => {
            let test = ConnectionTest {
                email: email.clone(),
                app_password: Secret::new(app_password.clone()),
            };
            let result = mailbox.test_connection(&test).await;
            if format == OutputFormat::Json {
                return print_json(&result);
            }

            let detail = result.message.unwrap_or_default();
            if result.ok {
                println!("Connection OK {}", detail);
                Ok(())
            } else {
                Err(CliError::Command(format!("Connection failed: {}", detail)))
            }
        }
        MailboxCommands::Start | MailboxCommands::Stop => {
            let start = matches!(action, MailboxCommands::Start);
            mailbox.load().await;
            let done = mailbox.set_monitoring(start).await;
            outcome(client, done, mailbox.error(), "change monitoring")?;
            println!("Monitoring {}", if start { "started" } else { "stopped" });
            Ok(())
        }
        MailboxCommands::ToggleAutoReply => {
            mailbox.load().await;
            let done = mailbox.toggle_auto_reply().await;
            outcome(client, done, mailbox.error(), "toggle auto-reply")?;
            render_mailbox(mailbox.config().as_ref(), format)
        }
    }
}

pub fn render_mailbox(config: Option<&MailboxConfig>, format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        let redacted = config.cloned().map(|mut config| {
            config.app_password = Secret::default();
            config
        });
        return print_json(&redacted);
    }

    let Some(config) = config else {
        println!("No mailbox configured. Run 'replydesk mailbox configure'.");
        return Ok(());
    };

    println!("Mailbox:     {} (#{})", config.email, config.id);
    println!("Enabled:     {}", config.enabled);
    println!("Monitoring:  {}", config.monitoring);
    println!("Auto-reply:  {}", config.auto_reply_active);
    println!("Threshold:   {:.2}", config.confidence_threshold);
    if !config.auto_reply_emails.is_empty() {
        println!("Replies to:  {}", config.auto_reply_emails.join(", "));
    }
    Ok(())
}
