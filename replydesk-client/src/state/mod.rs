//! Client-side copies of server state.
//!
//! Each resource is tracked independently: one failing or loading does not
//! touch another. Containers swallow errors into their state and report
//! success as a `bool`; screens read `data()`, `is_loading()` and `error()`.

pub mod analytics;
pub mod auth;
pub mod collection;
pub mod documents;
pub mod emails;
pub mod mailbox;
pub mod resource;
pub mod rules;

pub use analytics::AnalyticsContainer;
pub use auth::{Access, AuthSession, AuthState};
pub use collection::Collection;
pub use mailbox::MailboxContainer;
pub use resource::{Resource, ResourceState};

use std::fmt;
use std::sync::Arc;

use crate::api::{
    AiApi, AnalyticsApi, CategoriesApi, DocumentsApi, EmailsApi, LogsApi, MailboxApi, RulesApi,
};
use crate::cancel::CancelToken;
use crate::transport::Transport;

/// Names a loadable resource so pages can declare what they need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Analytics,
    Categories,
    Documents,
    Emails,
    Logs,
    Mailbox,
    Rules,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Analytics => "analytics",
            ResourceKind::Categories => "categories",
            ResourceKind::Documents => "documents",
            ResourceKind::Emails => "emails",
            ResourceKind::Logs => "logs",
            ResourceKind::Mailbox => "mailbox",
            ResourceKind::Rules => "rules",
        };
        f.write_str(name)
    }
}

/// Every container, all sharing one transport. Clones share state.
#[derive(Clone, Debug)]
pub struct Workspace {
    pub categories: Collection<CategoriesApi>,
    pub documents: Collection<DocumentsApi>,
    pub emails: Collection<EmailsApi>,
    pub rules: Collection<RulesApi>,
    pub logs: Collection<LogsApi>,
    pub mailbox: MailboxContainer,
    pub analytics: AnalyticsContainer,
    pub ai: AiApi,
}

impl Workspace {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            categories: Collection::new(CategoriesApi::new(Arc::clone(&transport))),
            documents: Collection::new(DocumentsApi::new(Arc::clone(&transport))),
            emails: Collection::new(EmailsApi::new(Arc::clone(&transport))),
            rules: Collection::new(RulesApi::new(Arc::clone(&transport))),
            logs: Collection::new(LogsApi::new(Arc::clone(&transport))),
            mailbox: MailboxContainer::new(MailboxApi::new(Arc::clone(&transport))),
            analytics: AnalyticsContainer::new(AnalyticsApi::new(Arc::clone(&transport))),
            ai: AiApi::new(transport),
        }
    }

    /// Load one resource, optionally abandoning it when `cancel` fires
    pub async fn load(&self, kind: ResourceKind, cancel: Option<CancelToken>) -> bool {
        match (kind, cancel) {
            (ResourceKind::Analytics, Some(token)) => self.analytics.load_cancellable(token).await,
            (ResourceKind::Analytics, None) => self.analytics.load().await,
            (ResourceKind::Categories, Some(token)) => {
                self.categories.load_cancellable(token).await
            }
            (ResourceKind::Categories, None) => self.categories.load().await,
            (ResourceKind::Documents, Some(token)) => self.documents.load_cancellable(token).await,
            (ResourceKind::Documents, None) => self.documents.load().await,
            (ResourceKind::Emails, Some(token)) => self.emails.load_cancellable(token).await,
            (ResourceKind::Emails, None) => self.emails.load().await,
            (ResourceKind::Logs, Some(token)) => self.logs.load_cancellable(token).await,
            (ResourceKind::Logs, None) => self.logs.load().await,
            (ResourceKind::Mailbox, Some(token)) => self.mailbox.load_cancellable(token).await,
            (ResourceKind::Mailbox, None) => self.mailbox.load().await,
            (ResourceKind::Rules, Some(token)) => self.rules.load_cancellable(token).await,
            (ResourceKind::Rules, None) => self.rules.load().await,
        }
    }

    pub fn is_loading(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Analytics => self.analytics.resource().is_loading(),
            ResourceKind::Categories => self.categories.is_loading(),
            ResourceKind::Documents => self.documents.is_loading(),
            ResourceKind::Emails => self.emails.is_loading(),
            ResourceKind::Logs => self.logs.is_loading(),
            ResourceKind::Mailbox => self.mailbox.is_loading(),
            ResourceKind::Rules => self.rules.is_loading(),
        }
    }

    pub fn error(&self, kind: ResourceKind) -> Option<String> {
        match kind {
            ResourceKind::Analytics => self.analytics.resource().error(),
            ResourceKind::Categories => self.categories.error(),
            ResourceKind::Documents => self.documents.error(),
            ResourceKind::Emails => self.emails.error(),
            ResourceKind::Logs => self.logs.error(),
            ResourceKind::Mailbox => self.mailbox.error(),
            ResourceKind::Rules => self.rules.error(),
        }
    }
}
