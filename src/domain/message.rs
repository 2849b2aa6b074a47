use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ConversationId, MessageId, Sender};

pub const DEFAULT_MESSAGE_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: Option<ConversationId>,
    pub sender: Sender,
    pub content: String,
    pub message_type: String,
    pub metadata: MessageMetadata,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(conversation_id: Option<ConversationId>, sender: Sender, content: String) -> Self {
        Self {
            id: MessageId::generate(),
            conversation_id,
            sender,
            content,
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
            metadata: MessageMetadata::default(),
            created_at: Utc::now(),
        }
    }

    pub fn from_draft(draft: MessageDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_else(MessageId::generate),
            conversation_id: draft.conversation_id,
            sender: draft.sender,
            content: draft.content,
            message_type: draft
                .message_type
                .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string()),
            metadata: draft.metadata,
            created_at: Utc::now(),
        }
    }
}

/// Caller-supplied fields for a new message.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub id: Option<MessageId>,
    pub conversation_id: Option<ConversationId>,
    pub sender: Sender,
    pub content: String,
    pub message_type: Option<String>,
    pub metadata: MessageMetadata,
}

impl MessageDraft {
    pub fn user(content: impl Into<String>, conversation_id: Option<ConversationId>) -> Self {
        Self {
            id: None,
            conversation_id,
            sender: Sender::User,
            content: content.into(),
            message_type: None,
            metadata: MessageMetadata::default(),
        }
    }

    pub fn assistant(content: impl Into<String>, conversation_id: Option<ConversationId>) -> Self {
        Self {
            sender: Sender::Assistant,
            ..Self::user(content, conversation_id)
        }
    }
}

/// Open key/value bag attached to a message.
///
/// Assistant replies use it to carry recommended flight and hotel offer ids
/// and, on the first reply of a conversation, the title the backend chose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageMetadata(Map<String, Value>);

impl MessageMetadata {
    pub const FLIGHT_IDS: &'static str = "flight_ids";
    pub const HOTEL_IDS: &'static str = "hotel_ids";
    pub const TITLE: &'static str = "title";
    pub const CHAT_ID: &'static str = "chat_id";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn flight_ids(&self) -> Vec<Value> {
        self.array(Self::FLIGHT_IDS)
    }

    pub fn hotel_ids(&self) -> Vec<Value> {
        self.array(Self::HOTEL_IDS)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get(Self::TITLE).and_then(Value::as_str)
    }

    pub fn chat_id(&self) -> Option<ConversationId> {
        match self.0.get(Self::CHAT_ID)? {
            Value::String(s) if !s.is_empty() => Some(ConversationId::new(s.as_str())),
            Value::Number(n) => Some(ConversationId::new(n.to_string())),
            _ => None,
        }
    }

    fn array(&self, key: &str) -> Vec<Value> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}
