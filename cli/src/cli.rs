use clap::{Parser, Subcommand};
use replydesk_client::{Access, ClientConfig, Page, ReplyDeskClient};
use shared_types::{LogType, Tone};
use std::path::PathBuf;
use tracing::debug;

use crate::{commands, error::CliError};

#[derive(Debug, Parser)]
#[command(name = "replydesk")]
#[command(about = "Command-line dashboard for the ReplyDesk email auto-responder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding the configuration file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Company domain the account answers mail for
        #[arg(long)]
        domain: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Open a dashboard page and print what it shows
    Page {
        /// dashboard, configuration, upload, mailbox or logs
        page: Page,
    },

    /// Reply categories
    Categories {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Knowledge-base documents
    Documents {
        #[command(subcommand)]
        action: DocumentCommands,
    },

    /// Read and act on mail
    Inbox {
        #[command(subcommand)]
        action: InboxCommands,
    },

    /// Draft an AI reply for an email
    Generate {
        /// Email to reply to
        email_id: String,

        /// Category whose template to use
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        tone: Option<Tone>,

        /// Extra instructions for this reply
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Mailbox account and monitoring
    Mailbox {
        #[command(subcommand)]
        action: MailboxCommands,
    },

    /// Auto-reply rules
    Rules {
        #[command(subcommand)]
        action: RuleCommands,
    },

    /// Auto-responder activity log
    Logs {
        #[command(subcommand)]
        action: LogCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    List,

    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "professional")]
        tone: Tone,

        /// Reply template text
        #[arg(long)]
        template: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Display color tag
        #[arg(long, default_value = "bg-blue-500")]
        color: String,

        #[arg(long)]
        instructions: Option<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tone: Option<Tone>,

        #[arg(long)]
        template: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        instructions: Option<String>,
    },

    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum DocumentCommands {
    List,

    /// Upload a pdf, doc, docx or txt file
    Upload {
        path: PathBuf,

        /// Category the document applies to (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum InboxCommands {
    List {
        /// Show the sent folder instead of the inbox
        #[arg(long)]
        sent: bool,
    },

    Show {
        id: String,
    },

    Read {
        id: String,
    },

    Star {
        id: String,
    },

    Archive {
        id: String,
    },

    Delete {
        id: String,
    },

    Reply {
        id: String,

        #[arg(long)]
        body: String,
    },

    Forward {
        id: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum MailboxCommands {
    Show,

    /// Connect a mailbox account
    Configure {
        #[arg(long)]
        email: String,

        #[arg(long)]
        app_password: String,

        #[arg(long, default_value_t = 0.8)]
        threshold: f64,

        /// Address that may receive automatic replies (repeatable)
        #[arg(long = "auto-reply")]
        auto_reply: Vec<String>,
    },

    Update {
        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Check credentials without saving them
    Test {
        #[arg(long)]
        email: String,

        #[arg(long)]
        app_password: String,
    },

    /// Start the mailbox monitor
    Start,

    /// Stop the mailbox monitor
    Stop,

    ToggleAutoReply,
}

#[derive(Debug, Subcommand)]
pub enum RuleCommands {
    List,

    Create {
        /// Mailbox address the rule applies to
        #[arg(long)]
        email: String,

        #[arg(long = "category")]
        categories: Vec<String>,

        #[arg(long = "keyword")]
        keywords: Vec<String>,

        #[arg(long, default_value_t = 0.8)]
        threshold: f64,

        /// Create the rule disabled
        #[arg(long)]
        disabled: bool,
    },

    Toggle {
        id: String,
    },

    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum LogCommands {
    List {
        #[arg(long = "type")]
        kind: Option<LogType>,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Export the full log as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Initialize default configuration
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        let Some(command) = &self.command else {
            println!("replydesk - dashboard for the ReplyDesk email auto-responder");
            println!("Run 'replydesk --help' for usage information.");
            return Ok(());
        };

        match command {
            Commands::Config { action } => {
                return commands::config::handle_config_command(action, self).await
            }
            Commands::Version => return self.handle_version(),
            _ => {}
        }

        let client = self.connect()?;
        let format = self.format;

        match command {
            Commands::Login { email, password } => {
                commands::auth::login(&client, email, password).await
            }
            Commands::Register {
                email,
                password,
                name,
                domain,
            } => commands::auth::register(&client, email, password, name, domain).await,
            Commands::Logout => commands::auth::logout(&client).await,
            Commands::Whoami => commands::auth::whoami(&client, format),
            Commands::Page { page } => {
                require_access(&client, *page)?;
                commands::page::open_page(&client, *page, format).await
            }
            Commands::Categories { action } => {
                require_access(&client, Page::Configuration)?;
                commands::categories::handle_category_command(&client, action, format).await
            }
            Commands::Documents { action } => {
                require_access(&client, Page::Upload)?;
                commands::documents::handle_document_command(&client, action, format).await
            }
            Commands::Inbox { action } => {
                require_access(&client, Page::Mailbox)?;
                commands::inbox::handle_inbox_command(&client, action, format).await
            }
            Commands::Generate {
                email_id,
                category,
                tone,
                instructions,
            } => {
                require_access(&client, Page::Mailbox)?;
                commands::inbox::generate_reply(
                    &client,
                    email_id,
                    category.clone(),
                    *tone,
                    instructions.clone(),
                    format,
                )
                .await
            }
            Commands::Mailbox { action } => {
                require_access(&client, Page::Configuration)?;
                commands::mailbox::handle_mailbox_command(&client, action, format).await
            }
            Commands::Rules { action } => {
                require_access(&client, Page::Configuration)?;
                commands::rules::handle_rule_command(&client, action, format).await
            }
            Commands::Logs { action } => {
                require_access(&client, Page::Logs)?;
                commands::logs::handle_log_command(&client, action, format).await
            }
            Commands::Config { .. } | Commands::Version => Ok(()),
        }
    }

    /// Resolved configuration: file, environment, then command-line overrides
    pub fn load_config(&self) -> Result<ClientConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_from(path)?,
            None => ClientConfig::load()?,
        };
        if let Some(url) = &self.api_url {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    fn connect(&self) -> Result<ReplyDeskClient, CliError> {
        let config = self.load_config()?;
        debug!("Using API at {}", config.api.base_url);

        let client = ReplyDeskClient::from_config(config)?;
        client.auth().hydrate();
        Ok(client)
    }

    fn handle_version(&self) -> Result<(), CliError> {
        println!("replydesk CLI version: {}", env!("CARGO_PKG_VERSION"));
        println!("Author: {}", env!("CARGO_PKG_AUTHORS"));
        println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
        Ok(())
    }
}

/// Route guard for commands that read protected pages
fn require_access(client: &ReplyDeskClient, page: Page) -> Result<(), CliError> {
    match client.auth().guard(page) {
        Access::Allow => Ok(()),
        Access::Pending => Err(CliError::Auth("Session is still being restored".to_string())),
        Access::RedirectToLogin => Err(CliError::Auth(
            "Not signed in. Run 'replydesk login <email>' first.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::parse_from(["replydesk", "page", "dashboard", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Page { page }) => assert_eq!(page, Page::Dashboard),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_upload_with_categories() {
        let cli = Cli::parse_from([
            "replydesk",
            "documents",
            "upload",
            "faq.pdf",
            "--category",
            "c1",
            "--category",
            "c2",
        ]);
        match cli.command {
            Some(Commands::Documents {
                action: DocumentCommands::Upload { path, categories },
            }) => {
                assert_eq!(path, PathBuf::from("faq.pdf"));
                assert_eq!(categories, vec!["c1", "c2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_tone() {
        let result = Cli::try_parse_from([
            "replydesk",
            "categories",
            "create",
            "--name",
            "VIP",
            "--template",
            "Hi",
            "--tone",
            "sarcastic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("client.toml");
        let cli = Cli::parse_from([
            "replydesk",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "http://replies.internal:9000/api/",
            "whoami",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.api.base_url, "http://replies.internal:9000/api");
    }
}
