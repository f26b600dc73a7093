use replydesk_client::ApiError;
use std::fmt;

/// Main error type for the replydesk CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration-related errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// Not signed in, or the session was rejected
    Auth(String),
    /// A command reached the server and failed
    Command(String),
    /// Transport or API errors surfaced directly
    Api(ApiError),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Auth(msg) => write!(f, "Authentication error: {msg}"),
            CliError::Command(msg) => write!(f, "Command error: {msg}"),
            CliError::Api(err) => write!(f, "API error: {}", err.user_message()),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Api(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Auth(_) => 4,
            CliError::Command(_) => 5,
            CliError::Api(err) if err.is_unauthorized() => 4,
            CliError::Api(_) => 6,
            CliError::Other(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        CliError::Api(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("bad".into()).exit_code(), 2);
        assert_eq!(CliError::Auth("signed out".into()).exit_code(), 4);
        assert_eq!(
            CliError::from(ApiError::unauthorized("expired")).exit_code(),
            4
        );
        assert_eq!(CliError::from(ApiError::network("down")).exit_code(), 6);
    }

    #[test]
    fn test_api_error_display_is_user_facing() {
        let err = CliError::from(ApiError::network("Network error. Please check your connection."));
        assert_eq!(
            err.to_string(),
            "API error: Network error. Please check your connection."
        );
    }
}
