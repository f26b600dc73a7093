use shared_types::{ForwardRequest, ReplyRequest};
use tracing::info;

use super::Collection;
use crate::api::EmailsApi;

/// Inbox actions. Each calls the server first and patches the local list
/// only once the call succeeded.
impl Collection<EmailsApi> {
    pub async fn mark_read(&self, id: &str) -> bool {
        match self.endpoint().set_read(id, true).await {
            Ok(()) => {
                self.edit_item(id, |email| email.read = true);
                true
            }
            Err(e) => {
                self.record_failure("mark read", &e);
                false
            }
        }
    }

    pub async fn toggle_star(&self, id: &str) -> bool {
        let starred = self.get(id).map(|email| email.starred).unwrap_or(false);
        match self.endpoint().set_starred(id, !starred).await {
            Ok(()) => {
                self.edit_item(id, |email| email.starred = !starred);
                true
            }
            Err(e) => {
                self.record_failure("star", &e);
                false
            }
        }
    }

    /// Archived mail leaves the inbox
    pub async fn archive(&self, id: &str) -> bool {
        match self.endpoint().archive(id).await {
            Ok(()) => {
                self.remove_local(id);
                true
            }
            Err(e) => {
                self.record_failure("archive", &e);
                false
            }
        }
    }

    pub async fn reply(&self, id: &str, reply: &ReplyRequest) -> bool {
        match self.endpoint().reply(id, reply).await {
            Ok(()) => {
                info!("Replied to email {}", id);
                self.edit_item(id, |email| email.replied = true);
                true
            }
            Err(e) => {
                self.record_failure("reply to", &e);
                false
            }
        }
    }

    pub async fn forward(&self, id: &str, forward: &ForwardRequest) -> bool {
        match self.endpoint().forward(id, forward).await {
            Ok(()) => {
                info!("Forwarded email {} to {}", id, forward.to);
                true
            }
            Err(e) => {
                self.record_failure("forward", &e);
                false
            }
        }
    }
}
