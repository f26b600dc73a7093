use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Business-hours window during which automatic replies may go out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplySchedule {
    pub timezone: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub active_days: Vec<Weekday>,
}

impl Default for ReplySchedule {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            active_days: vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReplyRule {
    pub id: String,
    pub email: String,
    pub enabled: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub confidence_threshold: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub schedule: ReplySchedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAutoReplyRule {
    pub email: String,
    pub enabled: bool,
    pub category_ids: Vec<String>,
    pub confidence_threshold: f64,
    pub keywords: Vec<String>,
    pub schedule: ReplySchedule,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoReplyRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ReplySchedule>,
}
