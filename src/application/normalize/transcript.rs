use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::lenient::{first_match, opt_id, opt_object, opt_string, timestamp_from_value};
use crate::domain::{
    ConversationId, DEFAULT_MESSAGE_TYPE, Message, MessageId, MessageMetadata, Sender,
};

/// One transcript entry. Older records use `text`/`role`/`timestamp`, newer
/// ones `content`/`sender`/`created_date`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMessage {
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub conversation_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub chat_id: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub content: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub text: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub sender: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub role: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub message_type: Option<String>,
    #[serde(deserialize_with = "opt_object")]
    pub metadata: Option<Map<String, Value>>,
    pub created_date: Option<Value>,
    pub timestamp: Option<Value>,
}

impl RawMessage {
    pub fn into_message(self, requested: &ConversationId) -> Message {
        let content = self
            .content
            .filter(|c| !c.is_empty())
            .or(self.text)
            .unwrap_or_default();
        let sender = self
            .sender
            .filter(|s| !s.is_empty())
            .or(self.role)
            .map(|s| sender_from_role(&s))
            .unwrap_or(Sender::User);
        let conversation_id = self
            .conversation_id
            .or(self.chat_id)
            .map(ConversationId::new)
            .unwrap_or_else(|| requested.clone());
        let created_at = self
            .created_date
            .as_ref()
            .and_then(timestamp_from_value)
            .or_else(|| self.timestamp.as_ref().and_then(timestamp_from_value))
            .unwrap_or_else(Utc::now);

        Message {
            id: self
                .id
                .map(MessageId::Server)
                .unwrap_or_else(MessageId::generate),
            conversation_id: Some(conversation_id),
            sender,
            content,
            message_type: self
                .message_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_MESSAGE_TYPE.to_string()),
            metadata: MessageMetadata::from_map(self.metadata.unwrap_or_default()),
            created_at,
        }
    }
}

// Anything that is not the user (assistant, system, ai) renders on the
// assistant side.
fn sender_from_role(role: &str) -> Sender {
    role.parse::<Sender>().unwrap_or_else(|_| {
        tracing::trace!(role = %role, "Treating unknown role as assistant");
        Sender::Assistant
    })
}

#[derive(Deserialize)]
struct MessagesArray {
    messages: Vec<Value>,
}

#[derive(Deserialize)]
struct ChatMessagesArray {
    chat_messages: Vec<Value>,
}

#[derive(Deserialize)]
struct DataArray {
    data: Vec<Value>,
}

fn bare_array(value: &Value) -> Option<Vec<Value>> {
    Vec::<Value>::deserialize(value).ok()
}

fn messages_array(value: &Value) -> Option<Vec<Value>> {
    MessagesArray::deserialize(value).ok().map(|e| e.messages)
}

fn chat_messages_array(value: &Value) -> Option<Vec<Value>> {
    ChatMessagesArray::deserialize(value)
        .ok()
        .map(|e| e.chat_messages)
}

fn data_array(value: &Value) -> Option<Vec<Value>> {
    DataArray::deserialize(value).ok().map(|e| e.data)
}

const TRANSCRIPT_SHAPES: [fn(&Value) -> Option<Vec<Value>>; 4] =
    [bare_array, messages_array, chat_messages_array, data_array];

/// `None` when the reply matches none of the known transcript shapes.
pub fn parse_transcript(response: &Value) -> Option<Vec<RawMessage>> {
    let items = first_match(response, &TRANSCRIPT_SHAPES)?;

    Some(
        items
            .into_iter()
            .filter_map(|item| match RawMessage::deserialize(&item) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable transcript entry");
                    None
                }
            })
            .collect(),
    )
}
