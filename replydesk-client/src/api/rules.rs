use async_trait::async_trait;
use reqwest::Method;
use shared_types::{AutoReplyRule, AutoReplyRulePatch, NewAutoReplyRule};
use std::sync::Arc;

use super::{CreateEndpoint, DeleteEndpoint, ListEndpoint, UpdateEndpoint};
use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

#[derive(Clone, Debug)]
pub struct RulesApi {
    transport: Arc<Transport>,
}

impl RulesApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Flip `enabled` server-side and return the rule as stored
    pub async fn toggle(&self, id: &str) -> Result<AutoReplyRule, ApiError> {
        self.transport
            .send(
                Method::PATCH,
                &format!("/auto-reply/rules/{}/toggle", id),
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }
}

#[async_trait]
impl ListEndpoint for RulesApi {
    type Item = AutoReplyRule;

    fn resource_name(&self) -> &'static str {
        "rules"
    }

    async fn list(&self, options: RequestOptions) -> Result<Vec<AutoReplyRule>, ApiError> {
        self.transport
            .send(Method::GET, "/auto-reply/rules", RequestBody::Empty, options)
            .await
    }
}

#[async_trait]
impl CreateEndpoint for RulesApi {
    type Input = NewAutoReplyRule;

    async fn create(&self, input: &NewAutoReplyRule) -> Result<AutoReplyRule, ApiError> {
        self.transport.post("/auto-reply/rules", input).await
    }
}

#[async_trait]
impl UpdateEndpoint for RulesApi {
    type Patch = AutoReplyRulePatch;

    async fn update(
        &self,
        id: &str,
        patch: &AutoReplyRulePatch,
    ) -> Result<AutoReplyRule, ApiError> {
        self.transport
            .put(&format!("/auto-reply/rules/{}", id), patch)
            .await
    }
}

#[async_trait]
impl DeleteEndpoint for RulesApi {
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .delete(&format!("/auto-reply/rules/{}", id))
            .await
    }
}
