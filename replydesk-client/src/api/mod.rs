//! Typed wrappers over the ReplyDesk HTTP API.
//!
//! Collection endpoints implement the capability traits below so the
//! generic [`Collection`](crate::state::Collection) container can drive them.

use async_trait::async_trait;
use shared_types::Entity;

use crate::error::ApiError;
use crate::transport::RequestOptions;

pub mod ai;
pub mod analytics;
pub mod auth;
pub mod categories;
pub mod documents;
pub mod emails;
pub mod logs;
pub mod mailbox;
pub mod rules;

pub use ai::AiApi;
pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use categories::CategoriesApi;
pub use documents::{DocumentUpload, DocumentsApi};
pub use emails::EmailsApi;
pub use logs::{LogQuery, LogsApi};
pub use mailbox::MailboxApi;
pub use rules::RulesApi;

#[async_trait]
pub trait ListEndpoint: Send + Sync + 'static {
    type Item: Entity;

    /// Human-readable resource name for logs and error banners
    fn resource_name(&self) -> &'static str;

    async fn list(&self, options: RequestOptions) -> Result<Vec<Self::Item>, ApiError>;
}

#[async_trait]
pub trait CreateEndpoint: ListEndpoint {
    type Input: Send + Sync;

    async fn create(&self, input: &Self::Input) -> Result<Self::Item, ApiError>;
}

#[async_trait]
pub trait UpdateEndpoint: ListEndpoint {
    type Patch: Send + Sync;

    async fn update(&self, id: &str, patch: &Self::Patch) -> Result<Self::Item, ApiError>;
}

#[async_trait]
pub trait DeleteEndpoint: ListEndpoint {
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}
