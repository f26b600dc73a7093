use shared_types::{GenerateReplyRequest, GeneratedReply};
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::Transport;

#[derive(Clone, Debug)]
pub struct AiApi {
    transport: Arc<Transport>,
}

impl AiApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Draft a reply for an email. The server picks the category when none is given.
    pub async fn generate_response(
        &self,
        request: &GenerateReplyRequest,
    ) -> Result<GeneratedReply, ApiError> {
        self.transport.post("/ai/generate-response", request).await
    }
}
