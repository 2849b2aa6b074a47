use std::sync::Mutex;

use serde_json::Value;

use crate::application::ports::{ChatGateway, GatewayError};
use crate::domain::ConversationId;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Submit {
        user_id: String,
        prompt: String,
        chat_id: Option<ConversationId>,
    },
    Transcript {
        user_id: String,
        chat_id: ConversationId,
    },
    Chats {
        user_id: String,
    },
    Delete {
        user_id: String,
        chat_id: ConversationId,
    },
}

#[derive(Debug, Clone)]
enum Canned {
    Reply(Value),
    Failure(String),
}

impl Canned {
    fn produce(&self) -> Result<Value, GatewayError> {
        match self {
            Canned::Reply(value) => Ok(value.clone()),
            Canned::Failure(reason) => Err(GatewayError::RequestFailed(reason.clone())),
        }
    }
}

/// In-memory gateway with one canned reply per operation. Records every call.
pub struct MockChatGateway {
    submit: Canned,
    transcript: Canned,
    chats: Canned,
    delete: Canned,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MockChatGateway {
    pub fn new() -> Self {
        Self {
            submit: Canned::Reply(Value::Null),
            transcript: Canned::Reply(Value::Null),
            chats: Canned::Reply(Value::Null),
            delete: Canned::Reply(Value::Null),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_submit_reply(mut self, reply: Value) -> Self {
        self.submit = Canned::Reply(reply);
        self
    }

    pub fn with_submit_failure(mut self, reason: &str) -> Self {
        self.submit = Canned::Failure(reason.to_string());
        self
    }

    pub fn with_transcript(mut self, reply: Value) -> Self {
        self.transcript = Canned::Reply(reply);
        self
    }

    pub fn with_transcript_failure(mut self, reason: &str) -> Self {
        self.transcript = Canned::Failure(reason.to_string());
        self
    }

    pub fn with_chats(mut self, reply: Value) -> Self {
        self.chats = Canned::Reply(reply);
        self
    }

    pub fn with_chats_failure(mut self, reason: &str) -> Self {
        self.chats = Canned::Failure(reason.to_string());
        self
    }

    pub fn with_delete_reply(mut self, reply: Value) -> Self {
        self.delete = Canned::Reply(reply);
        self
    }

    pub fn with_delete_failure(mut self, reason: &str) -> Self {
        self.delete = Canned::Failure(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: GatewayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockChatGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ChatGateway for MockChatGateway {
    async fn submit_message(
        &self,
        user_id: &str,
        prompt: &str,
        chat_id: Option<&ConversationId>,
    ) -> Result<Value, GatewayError> {
        self.record(GatewayCall::Submit {
            user_id: user_id.to_string(),
            prompt: prompt.to_string(),
            chat_id: chat_id.cloned(),
        });
        self.submit.produce()
    }

    async fn fetch_transcript(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError> {
        self.record(GatewayCall::Transcript {
            user_id: user_id.to_string(),
            chat_id: chat_id.clone(),
        });
        self.transcript.produce()
    }

    async fn fetch_chats(&self, user_id: &str) -> Result<Value, GatewayError> {
        self.record(GatewayCall::Chats {
            user_id: user_id.to_string(),
        });
        self.chats.produce()
    }

    async fn delete_chat(
        &self,
        user_id: &str,
        chat_id: &ConversationId,
    ) -> Result<Value, GatewayError> {
        self.record(GatewayCall::Delete {
            user_id: user_id.to_string(),
            chat_id: chat_id.clone(),
        });
        self.delete.produce()
    }
}
