use serde::Deserialize;
use serde_json::{Map, Value};

use super::lenient::{first_match, is_truthy, non_empty_str, opt_id};
use crate::domain::ConversationId;

/// What a submit-message reply means, independent of its envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    /// Conversation id the backend filed the message under.
    pub conversation_id: Option<ConversationId>,
    /// `None` when no reply shape matched; `Some("")` when the backend
    /// reported success without any text.
    pub text: Option<String>,
    pub flight_ids: Value,
    pub hotel_ids: Value,
    pub metadata: Map<String, Value>,
    pub title: Option<String>,
}

impl ChatReply {
    /// Reply text worth showing as an assistant message.
    pub fn usable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ReplyIds {
    #[serde(deserialize_with = "opt_id")]
    chat_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    active_chat_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    conversation_id: Option<String>,
    #[serde(rename = "chatId", deserialize_with = "opt_id")]
    chat_id_camel: Option<String>,
}

impl ReplyIds {
    fn resolve(self) -> Option<ConversationId> {
        self.chat_id
            .or(self.active_chat_id)
            .or(self.conversation_id)
            .or(self.chat_id_camel)
            .map(ConversationId::new)
    }
}

fn explicit_success(value: &Value) -> Option<String> {
    if !value.get("success").is_some_and(is_truthy) {
        return None;
    }
    let text = non_empty_str(value, "ai_reply")
        .or_else(|| non_empty_str(value, "response"))
        .unwrap_or_default();
    Some(text.to_string())
}

fn bare_ai_reply(value: &Value) -> Option<String> {
    non_empty_str(value, "ai_reply").map(str::to_string)
}

fn bare_response(value: &Value) -> Option<String> {
    non_empty_str(value, "response").map(str::to_string)
}

fn plain_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

const REPLY_SHAPES: [fn(&Value) -> Option<String>; 4] =
    [explicit_success, bare_ai_reply, bare_response, plain_string];

/// First truthy value among `paths`, each a chain of object keys.
fn first_present(value: &Value, paths: &[&[&str]]) -> Value {
    paths
        .iter()
        .find_map(|path| {
            path.iter()
                .try_fold(value, |node, key| node.get(key))
                .filter(|v| is_truthy(v))
        })
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

pub fn parse_chat_reply(response: &Value) -> ChatReply {
    let conversation_id = if response.is_object() {
        ReplyIds::deserialize(response)
            .ok()
            .and_then(ReplyIds::resolve)
    } else {
        None
    };

    let text = first_match(response, &REPLY_SHAPES);

    let flight_ids = first_present(
        response,
        &[&["flight_ids"], &["flightIds"], &["metadata", "flight_ids"]],
    );
    let hotel_ids = first_present(
        response,
        &[&["hotel_ids"], &["hotelOfferIds"], &["metadata", "hotel_ids"]],
    );

    let metadata = response
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let title = response
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);

    ChatReply {
        conversation_id,
        text,
        flight_ids,
        hotel_ids,
        metadata,
        title,
    }
}
