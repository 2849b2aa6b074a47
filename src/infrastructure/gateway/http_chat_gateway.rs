use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ChatGateway, GatewayError};
use crate::config::GatewaySettings;
use crate::domain::ConversationId;
use crate::infrastructure::observability::sanitize_prompt;

/// [`ChatGateway`] over the backend's JSON-over-POST function endpoints.
pub struct HttpChatGateway {
    client: Client,
    submit_url: String,
    transcript_url: String,
    list_url: String,
    delete_url: Option<String>,
}

#[derive(Serialize)]
struct SubmitMessageRequest<'a> {
    user_prompt: &'a str,
    user_id: &'a str,
    chat_id: Option<&'a str>,
}

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    chat_id: &'a str,
    user_id: &'a str,
}

#[derive(Serialize)]
struct ChatListRequest<'a> {
    user_id: &'a str,
}

#[derive(Serialize)]
struct DeleteChatRequest<'a> {
    #[serde(rename = "userID")]
    user_id: &'a str,
    #[serde(rename = "chatID")]
    chat_id: &'a str,
}

impl HttpChatGateway {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            submit_url: settings.submit_url.clone(),
            transcript_url: settings.transcript_url.clone(),
            list_url: settings.list_url.clone(),
            delete_url: settings.delete_url.clone(),
        })
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, GatewayError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(decode_body(&text))
    }
}

/// Parses a reply body. Non-JSON text comes back as a JSON string, and a
/// proxied `{statusCode, body}` envelope is unwrapped.
pub fn decode_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }

    let value = serde_json::from_str::<Value>(trimmed)
        .unwrap_or_else(|_| Value::String(text.to_string()));

    match (value.get("statusCode"), value.get("body").and_then(Value::as_str)) {
        (Some(_), Some(inner)) => decode_body(inner),
        _ => value,
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    #[tracing::instrument(
        skip(self, prompt, chat_id),
        fields(prompt = %sanitize_prompt(prompt), chat_id = ?chat_id.map(ConversationId::as_str))
    )]
    async fn submit_message(
        &self,
        user_id: &str,
        prompt: &str,
        chat_id: Option<&ConversationId>,
    ) -> Result<Value, GatewayError> {
        let request = SubmitMessageRequest {
            user_prompt: prompt,
            user_id,
            chat_id: chat_id.map(ConversationId::as_str),
        };
        self.post(&self.submit_url, &request).await
    }

    #[tracing::instrument(skip(self, chat_id), fields(chat_id = %chat_id))]
    async fn fetch_transcript(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError> {
        let request = TranscriptRequest {
            chat_id: chat_id.as_str(),
            user_id,
        };
        self.post(&self.transcript_url, &request).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_chats(&self, user_id: &str) -> Result<Value, GatewayError> {
        self.post(&self.list_url, &ChatListRequest { user_id }).await
    }

    #[tracing::instrument(skip(self, chat_id), fields(chat_id = %chat_id))]
    async fn delete_chat(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError> {
        let url = self
            .delete_url
            .as_deref()
            .ok_or(GatewayError::EndpointNotConfigured("delete_url"))?;
        let request = DeleteChatRequest {
            user_id,
            chat_id: chat_id.as_str(),
        };
        self.post(url, &request).await
    }
}
