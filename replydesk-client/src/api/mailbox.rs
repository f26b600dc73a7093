use reqwest::Method;
use shared_types::{ConnectionTest, ConnectionTestResult, MailboxConfig, MailboxPatch, MailboxSetup};
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

/// Mailbox account and monitor control
#[derive(Clone, Debug)]
pub struct MailboxApi {
    transport: Arc<Transport>,
}

impl MailboxApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `None` until a mailbox has been configured
    pub async fn configuration(
        &self,
        options: RequestOptions,
    ) -> Result<Option<MailboxConfig>, ApiError> {
        self.transport
            .send(
                Method::GET,
                "/mailbox/configuration",
                RequestBody::Empty,
                options,
            )
            .await
    }

    pub async fn update(&self, patch: &MailboxPatch) -> Result<MailboxConfig, ApiError> {
        self.transport.put("/mailbox/configuration", patch).await
    }

    pub async fn configure(&self, setup: &MailboxSetup) -> Result<MailboxConfig, ApiError> {
        self.transport.post("/mailbox/configure", setup).await
    }

    pub async fn test_connection(
        &self,
        test: &ConnectionTest,
    ) -> Result<ConnectionTestResult, ApiError> {
        self.transport.post("/mailbox/test-connection", test).await
    }

    pub async fn start_monitoring(&self, id: i64) -> Result<(), ApiError> {
        self.monitor("start", id).await
    }

    pub async fn stop_monitoring(&self, id: i64) -> Result<(), ApiError> {
        self.monitor("stop", id).await
    }

    async fn monitor(&self, action: &str, id: i64) -> Result<(), ApiError> {
        self.transport
            .send(
                Method::POST,
                &format!("/monitor/{}/{}", action, id),
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }

    pub async fn toggle_auto_reply(&self, id: i64) -> Result<MailboxConfig, ApiError> {
        self.transport
            .send(
                Method::PATCH,
                &format!("/mailbox/{}/toggle-auto-reply", id),
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }
}
