use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use shared_types::{Email, ForwardRequest, ReplyRequest};
use std::sync::Arc;

use super::{DeleteEndpoint, ListEndpoint};
use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

/// `/emails/*`. Listing goes to the inbox; [`EmailsApi::sent`] reads the sent folder.
#[derive(Clone, Debug)]
pub struct EmailsApi {
    transport: Arc<Transport>,
}

impl EmailsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn inbox(&self, options: RequestOptions) -> Result<Vec<Email>, ApiError> {
        self.transport
            .send(Method::GET, "/emails/inbox", RequestBody::Empty, options)
            .await
    }

    pub async fn sent(&self, options: RequestOptions) -> Result<Vec<Email>, ApiError> {
        self.transport
            .send(Method::GET, "/emails/sent", RequestBody::Empty, options)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Email, ApiError> {
        self.transport.get(&format!("/emails/{}", id)).await
    }

    pub async fn set_read(&self, id: &str, read: bool) -> Result<(), ApiError> {
        self.transport
            .patch(&format!("/emails/{}/read-status", id), &json!({ "read": read }))
            .await
    }

    pub async fn set_starred(&self, id: &str, starred: bool) -> Result<(), ApiError> {
        self.transport
            .patch(
                &format!("/emails/{}/star-status", id),
                &json!({ "starred": starred }),
            )
            .await
    }

    pub async fn archive(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .send(
                Method::POST,
                &format!("/emails/{}/archive", id),
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }

    pub async fn reply(&self, id: &str, reply: &ReplyRequest) -> Result<(), ApiError> {
        self.transport
            .post(&format!("/emails/{}/reply", id), reply)
            .await
    }

    pub async fn forward(&self, id: &str, forward: &ForwardRequest) -> Result<(), ApiError> {
        self.transport
            .post(&format!("/emails/{}/forward", id), forward)
            .await
    }
}

#[async_trait]
impl ListEndpoint for EmailsApi {
    type Item = Email;

    fn resource_name(&self) -> &'static str {
        "emails"
    }

    async fn list(&self, options: RequestOptions) -> Result<Vec<Email>, ApiError> {
        self.inbox(options).await
    }
}

#[async_trait]
impl DeleteEndpoint for EmailsApi {
    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport.delete(&format!("/emails/{}", id)).await
    }
}
