use super::Collection;
use crate::api::RulesApi;

impl Collection<RulesApi> {
    /// Flip a rule's `enabled` flag and keep whatever the server reports back
    pub async fn toggle(&self, id: &str) -> bool {
        match self.endpoint().toggle(id).await {
            Ok(updated) => {
                self.edit_item(id, |rule| *rule = updated);
                true
            }
            Err(e) => {
                self.record_failure("toggle", &e);
                false
            }
        }
    }
}
