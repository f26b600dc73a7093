//! Category management commands

use replydesk_client::ReplyDeskClient;
use shared_types::{Category, CategoryPatch, NewCategory};

use crate::cli::{CategoryCommands, OutputFormat};
use crate::error::CliError;

use super::{outcome, print_json, truncate};

pub async fn handle_category_command(
    client: &ReplyDeskClient,
    action: &CategoryCommands,
    format: OutputFormat,
) -> Result<(), CliError> {
    let categories = &client.workspace().categories;

    match action {
        CategoryCommands::List => {
            let loaded = categories.load().await;
            outcome(client, loaded, categories.error(), "load categories")?;
            render_categories(&categories.items(), format)
        }
        CategoryCommands::Create {
            name,
            tone,
            template,
            description,
            color,
            instructions,
        } => {
            let input = NewCategory {
                name: name.clone(),
                description: description.clone(),
                tone: *tone,
                template: template.clone(),
                custom_instructions: instructions.clone(),
                color: color.clone(),
            };
            let created = categories.create(&input).await;
            outcome(client, created, categories.error(), "create category")?;

            if let Some(category) = categories.items().last() {
                println!("Created category {} ({})", category.name, category.id);
            }
            Ok(())
        }
        CategoryCommands::Update {
            id,
            name,
            tone,
            template,
            description,
            color,
            instructions,
        } => {
            let patch = CategoryPatch {
                name: name.clone(),
                description: description.clone(),
                tone: *tone,
                template: template.clone(),
                custom_instructions: instructions.clone(),
                color: color.clone(),
            };
            let updated = categories.update(id, &patch).await;
            outcome(client, updated, categories.error(), "update category")?;
            println!("Updated category {}", id);
            Ok(())
        }
        CategoryCommands::Delete { id } => {
            let removed = categories.remove(id).await;
            outcome(client, removed, categories.error(), "delete category")?;
            println!("Deleted category {}", id);
            Ok(())
        }
    }
}

pub fn render_categories(categories: &[Category], format: OutputFormat) -> Result<(), CliError> {
    if format == OutputFormat::Json {
        return print_json(categories);
    }

    if categories.is_empty() {
        println!("No categories yet");
        return Ok(());
    }

    println!("{:<12} {:<20} {:<13} {}", "ID", "NAME", "TONE", "TEMPLATE");
    for category in categories {
        println!(
            "{:<12} {:<20} {:<13} {}",
            truncate(&category.id, 12),
            truncate(&category.name, 20),
            category.tone.to_string(),
            truncate(&category.template, 40)
        );
    }
    Ok(())
}
