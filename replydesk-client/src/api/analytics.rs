use reqwest::Method;
use shared_types::DashboardStats;
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

#[derive(Clone, Debug)]
pub struct AnalyticsApi {
    transport: Arc<Transport>,
}

impl AnalyticsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn dashboard(&self, options: RequestOptions) -> Result<DashboardStats, ApiError> {
        self.transport
            .send(
                Method::GET,
                "/analytics/dashboard",
                RequestBody::Empty,
                options,
            )
            .await
    }
}
