use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ConversationId;

/// Remote chat backend.
///
/// Every call is scoped to `user_id`. Replies come back as raw JSON because
/// the backend has shipped several envelope shapes over time; turning them
/// into domain values is the stores' job.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn submit_message(
        &self,
        user_id: &str,
        prompt: &str,
        chat_id: Option<&ConversationId>,
    ) -> Result<Value, GatewayError>;

    async fn fetch_transcript(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError>;

    async fn fetch_chats(&self, user_id: &str) -> Result<Value, GatewayError>;

    async fn delete_chat(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("endpoint not configured: {0}")]
    EndpointNotConfigured(&'static str),
}
