use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Sent,
    Failed,
    Pending,
    Approved,
    Rejected,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Sent => "sent",
            LogType::Failed => "failed",
            LogType::Pending => "pending",
            LogType::Approved => "approved",
            LogType::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sent" => Ok(LogType::Sent),
            "failed" => Ok(LogType::Failed),
            "pending" => Ok(LogType::Pending),
            "approved" => Ok(LogType::Approved),
            "rejected" => Ok(LogType::Rejected),
            other => Err(format!("unknown log type: {other}")),
        }
    }
}

/// One auto-responder activity record. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: LogType,
    pub email: String,
    pub subject: String,
    pub confidence: f64,
    pub action: String,
}

/// Aggregates for the dashboard page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub emails_processed: u64,
    pub replies_sent: u64,
    pub pending_review: u64,
    pub average_confidence: f64,
    pub success_rate: f64,
}

/// Display band for a confidence score
pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "high"
    } else if confidence >= 0.5 {
        "medium"
    } else {
        "low"
    }
}
