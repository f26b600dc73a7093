use reqwest::Method;
use shared_types::{AuthTokens, LoginRequest, RegisterRequest};
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

/// `/auth/*`. `POST /auth/refresh` is issued by the transport when a call
/// comes back 401.
#[derive(Clone, Debug)]
pub struct AuthApi {
    transport: Arc<Transport>,
}

impl AuthApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.transport
            .send(
                Method::POST,
                "/auth/login",
                RequestBody::json(&request)?,
                RequestOptions::anonymous(),
            )
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthTokens, ApiError> {
        self.transport
            .send(
                Method::POST,
                "/auth/register",
                RequestBody::json(request)?,
                RequestOptions::anonymous(),
            )
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.transport
            .send(
                Method::POST,
                "/auth/logout",
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }
}
