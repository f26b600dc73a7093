use async_trait::async_trait;
use reqwest::Method;
use shared_types::{LogEntry, LogType};
use std::sync::Arc;

use super::ListEndpoint;
use crate::error::ApiError;
use crate::transport::{RequestBody, RequestOptions, Transport};

/// Filter for `GET /logs`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub kind: Option<LogType>,
    pub limit: Option<u32>,
}

impl LogQuery {
    fn to_query_string(self) -> String {
        let mut params = Vec::new();
        if let Some(kind) = self.kind {
            params.push(format!("type={}", kind.as_str()));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Read-only activity log. Listing applies the query set with [`LogsApi::with_query`].
#[derive(Clone, Debug)]
pub struct LogsApi {
    transport: Arc<Transport>,
    query: LogQuery,
}

impl LogsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self {
            transport,
            query: LogQuery::default(),
        }
    }

    pub fn with_query(mut self, query: LogQuery) -> Self {
        self.query = query;
        self
    }

    pub async fn query(
        &self,
        query: LogQuery,
        options: RequestOptions,
    ) -> Result<Vec<LogEntry>, ApiError> {
        let path = format!("/logs{}", query.to_query_string());
        self.transport
            .send(Method::GET, &path, RequestBody::Empty, options)
            .await
    }

    /// CSV export of the full log
    pub async fn export(&self) -> Result<String, ApiError> {
        self.transport
            .send_text(
                Method::GET,
                "/logs/export",
                RequestBody::Empty,
                RequestOptions::default(),
            )
            .await
    }
}

#[async_trait]
impl ListEndpoint for LogsApi {
    type Item = LogEntry;

    fn resource_name(&self) -> &'static str {
        "logs"
    }

    async fn list(&self, options: RequestOptions) -> Result<Vec<LogEntry>, ApiError> {
        self.query(self.query, options).await
    }
}
