//! Wire models for the ReplyDesk API.
//!
//! Every type here mirrors a JSON payload exchanged with the server. The
//! server is the source of truth; these records carry no invariants beyond
//! field typing.

pub mod auth;
pub mod category;
pub mod document;
pub mod email;
pub mod envelope;
pub mod logs;
pub mod mailbox;
pub mod rules;

pub use auth::{
    AuthTokens, LoginRequest, RefreshRequest, RefreshedToken, RegisterRequest, UserProfile,
};
pub use category::{Category, CategoryPatch, NewCategory, Tone};
pub use document::{CompanyDocument, DocumentKind};
pub use email::{
    Email, ForwardRequest, GenerateReplyRequest, GeneratedReply, Priority, ReplyRequest,
};
pub use envelope::{ApiEnvelope, ApiErrorBody};
pub use logs::{confidence_label, DashboardStats, LogEntry, LogType};
pub use mailbox::{
    ConnectionTest, ConnectionTestResult, MailboxConfig, MailboxPatch, MailboxSetup, Secret,
};
pub use rules::{AutoReplyRule, AutoReplyRulePatch, NewAutoReplyRule, ReplySchedule, Weekday};

/// Anything the client keeps in an id-addressed collection.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for CompanyDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Email {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for LogEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for AutoReplyRule {
    fn id(&self) -> &str {
        &self.id
    }
}
