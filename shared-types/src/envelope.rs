use serde::{Deserialize, Serialize};

/// Error block of a failed response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Every API response is wrapped in this envelope:
/// `{ success, data?, error?: { code, message, details? } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
        }
    }

    /// Split into data or error body. A `success: false` envelope without an
    /// error block yields a generic `UNKNOWN` error.
    pub fn into_result(self) -> Result<Option<T>, ApiErrorBody> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or_else(|| ApiErrorBody {
                code: "UNKNOWN".to_string(),
                message: "Request failed".to_string(),
                details: None,
            }))
        }
    }
}
