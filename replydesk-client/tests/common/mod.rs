#![allow(dead_code)]

use replydesk_client::{MemorySessionPersistence, SessionStore, StoredSession, Transport};
use serde_json::{json, Value};
use shared_types::UserProfile;
use std::sync::Arc;

pub fn user() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        email: "owner@acme.com".to_string(),
        name: "Ada Owner".to_string(),
        domain: Some("acme.com".to_string()),
    }
}

pub fn stored_session(access_token: &str, refresh_token: Option<&str>) -> StoredSession {
    StoredSession {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.map(str::to_string),
        user: user(),
    }
}

/// A hydrated in-memory session store holding the given tokens
pub fn signed_in_store(access_token: &str, refresh_token: Option<&str>) -> Arc<SessionStore> {
    let store = SessionStore::new(MemorySessionPersistence::with_session(stored_session(
        access_token,
        refresh_token,
    )));
    store.hydrate();
    Arc::new(store)
}

pub fn signed_out_store() -> Arc<SessionStore> {
    let store = SessionStore::in_memory();
    store.hydrate();
    Arc::new(store)
}

pub fn transport(base_url: &str, session: Arc<SessionStore>) -> Arc<Transport> {
    Arc::new(Transport::new(base_url, session).expect("failed to build transport"))
}

/// `{ "success": true, "data": ... }`
pub fn ok(data: Value) -> String {
    json!({ "success": true, "data": data }).to_string()
}

pub fn failure(code: &str, message: &str) -> String {
    json!({ "success": false, "error": { "code": code, "message": message } }).to_string()
}

pub fn category(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "tone": "professional",
        "template": "Hello {{name}},",
        "color": "bg-blue-500"
    })
}

pub fn rule(id: &str, enabled: bool) -> Value {
    json!({
        "id": id,
        "email": "support@acme.com",
        "enabled": enabled,
        "categoryIds": ["c1"],
        "confidenceThreshold": 0.8,
        "keywords": ["refund"],
        "schedule": {
            "timezone": "UTC",
            "startTime": "09:00",
            "endTime": "17:00",
            "activeDays": ["monday", "friday"]
        }
    })
}

pub fn email(id: &str, read: bool) -> Value {
    json!({
        "id": id,
        "from": "customer@example.com",
        "to": "support@acme.com",
        "subject": "Where is my order?",
        "body": "It has been two weeks.",
        "timestamp": "2024-05-01T10:00:00Z",
        "read": read,
        "starred": false,
        "hasAttachments": false,
        "priority": "high"
    })
}

pub fn log_entry(id: &str) -> Value {
    json!({
        "id": id,
        "timestamp": "2024-05-01T10:05:00Z",
        "type": "sent",
        "email": "customer@example.com",
        "subject": "Re: Where is my order?",
        "confidence": 0.92,
        "action": "Auto-reply sent"
    })
}

pub fn mailbox(id: i64, monitoring: bool) -> Value {
    json!({
        "id": id,
        "email": "support@acme.com",
        "autoReplyEmails": [],
        "confidenceThreshold": 0.8,
        "enabled": true,
        "monitoring": monitoring,
        "autoReplyActive": false
    })
}

pub fn stats() -> Value {
    json!({
        "emailsProcessed": 120,
        "repliesSent": 96,
        "pendingReview": 4,
        "averageConfidence": 0.87,
        "successRate": 0.8
    })
}
