//! Auto-reply rule commands

use replydesk_client::ReplyDeskClient;
use shared_types::{AutoReplyRule, NewAutoReplyRule, ReplySchedule};

use crate::cli::{OutputFormat, RuleCommands};
use crate::error::CliError;

use super::{outcome, print_json, truncate};

pub async fn handle_rule_command(
    client: &ReplyDeskClient,
    action: &RuleCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    let rules = &client.workspace().rules;

    match action {
        RuleCommands::List => {
            let loaded = rules.load().await;
            outcome(client, loaded, rules.error(), "load rules")?;
            render_rules(&rules.items(), format)
        }
        RuleCommands::Create {
            email,
            categories,
            keywords,
            threshold,
            disabled,
        } => {
            let input = NewAutoReplyRule {
                email: email.clone(),
                enabled: !disabled,
                category_ids: categories.clone(),
                confidence_threshold: *threshold,
                keywords: keywords.clone(),
                schedule: ReplySchedule::default(),
            };
            let created = rules.create(&input).await;
            outcome(client, created, rules.error(), "create rule")?;
            if let Some(rule) = rules.items().last() {
                println!("Created rule {} for {}", rule.id, rule.email);
            }
            Ok(())
        }
        RuleCommands::Toggle { id } => {
            rules.load().await;
            let toggled = rules.toggle(id).await;
            outcome(client, toggled, rules.error(), "toggle rule")?;
            let enabled = rules.get(id).map(|rule| rule.enabled).unwrap_or(false);
            println!("Rule {} {}", id, if enabled { "enabled" } else { "disabled" });
            Ok(())
        }
        RuleCommands::Delete { id } => {
            let removed = rules.remove(id).await;
            outcome(client, removed, rules.error(), "delete rule")?;
            println!("Deleted rule {}", id);
            Ok(())
        }
    }
}

pub fn render_rules(rules: &[AutoReplyRule], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(rules);
    }

    if rules.is_empty() {
        println!("No auto-reply rules");
        return Ok(());
    }

    println!("{:<12} {:<8} {:<28} {:>9} {}", "ID", "ENABLED", "MAILBOX", "THRESHOLD", "HOURS");
    for rule in rules {
        println!(
            "{:<12} {:<8} {:<28} {:>9.2} {}-{} {}",
            truncate(&rule.id, 12),
            if rule.enabled { "yes" } else { "no" },
            truncate(&rule.email, 28),
            rule.confidence_threshold,
            rule.schedule.start_time,
            rule.schedule.end_time,
            rule.schedule.timezone
        );
    }
    Ok(())
}
