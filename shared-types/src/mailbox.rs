use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque credential. Serializes as-is, never prints its content.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(********)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("********")
    }
}

/// The connected mailbox account; one per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxConfig {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub app_password: Secret,
    #[serde(default)]
    pub auto_reply_emails: Vec<String>,
    pub confidence_threshold: f64,
    pub enabled: bool,
    #[serde(default)]
    pub monitoring: bool,
    #[serde(default)]
    pub auto_reply_active: bool,
}

/// Input for `POST /mailbox/configure`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxSetup {
    pub email: String,
    pub app_password: Secret,
    #[serde(default)]
    pub auto_reply_emails: Vec<String>,
    pub confidence_threshold: f64,
}

/// Input for `PUT /mailbox/configuration`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailboxPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_reply_emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTest {
    pub email: String,
    pub app_password: Secret,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}
