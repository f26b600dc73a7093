use thiserror::Error;

/// Shown when no response was received at all
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Errors surfaced by the transport and the endpoint wrappers
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response received (connection refused, DNS, timeout)
    #[error("{message}")]
    Network { message: String },

    /// HTTP 401 that survived the refresh-and-retry, or no session to refresh
    #[error("Authentication required: {message}")]
    Unauthorized { message: String },

    /// 2xx response wrapped in `success: false`
    #[error("{message}")]
    Rejected {
        code: String,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Non-2xx response other than 401
    #[error("{message} (status {status})")]
    Http { status: u16, message: String },

    /// Body could not be decoded
    #[error("Failed to parse response: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// The caller's cancel token fired before the response was applied
    #[error("Request cancelled")]
    Cancelled,

    /// Local problem preparing the request (unreadable upload, bad header)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl ApiError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn rejected<C: Into<String>, S: Into<String>>(code: C, message: S) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Check if this error means the session is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
            || matches!(self, ApiError::Http { status, .. } if *status == 401)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Human-readable message for an error banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network { message }
            | ApiError::Rejected { message, .. }
            | ApiError::Http { message, .. } => message.clone(),
            ApiError::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("Transport failure: {}", err);
        ApiError::network(NETWORK_ERROR_MESSAGE)
    }
}
