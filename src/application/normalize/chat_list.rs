use serde::Deserialize;
use serde_json::{Map, Value};

use super::lenient::{count_from_value, first_match, opt_id, opt_object, opt_string};
use crate::domain::{ConversationId, ConversationSummary, DEFAULT_STATUS};

/// One conversation entry as the list endpoint sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawChat {
    #[serde(deserialize_with = "opt_id")]
    pub chat_id: Option<String>,
    #[serde(deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub destination: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "opt_object")]
    pub trip_dates: Option<Map<String, Value>>,
    #[serde(deserialize_with = "opt_object")]
    pub preferences: Option<Map<String, Value>>,
    #[serde(deserialize_with = "opt_string")]
    pub created_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub created_at: Option<String>,
    #[serde(rename = "createdAt", deserialize_with = "opt_string")]
    pub created_at_camel: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub updated_date: Option<String>,
    #[serde(deserialize_with = "opt_string")]
    pub updated_at: Option<String>,
    #[serde(rename = "updatedAt", deserialize_with = "opt_string")]
    pub updated_at_camel: Option<String>,
}

impl RawChat {
    pub fn server_id(&self) -> Option<ConversationId> {
        self.chat_id
            .as_deref()
            .or(self.id.as_deref())
            .map(ConversationId::new)
    }

    /// `None` when the entry carries no usable id.
    pub fn into_summary(self) -> Option<ConversationSummary> {
        let id = self.server_id()?;
        let created_at = self
            .created_date
            .or(self.created_at)
            .or(self.created_at_camel);
        let updated_at = self
            .updated_date
            .or(self.updated_at)
            .or(self.updated_at_camel)
            .or_else(|| created_at.clone());

        let mut summary = ConversationSummary::new(id, self.title);
        summary.destination = self.destination.unwrap_or_default();
        summary.status = self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        summary.trip_dates = self.trip_dates.unwrap_or_default();
        summary.preferences = self.preferences.unwrap_or_default();
        summary.created_at = created_at;
        summary.updated_at = updated_at;
        Some(summary)
    }
}

/// Normalized list endpoint reply.
#[derive(Debug, Clone, Default)]
pub struct ChatListing {
    pub chats: Vec<RawChat>,
    /// `number_of_chats`, when the backend sent a positive one.
    pub reported_count: Option<u64>,
}

#[derive(Deserialize)]
struct ChatsArray {
    chats: Vec<Value>,
}

#[derive(Deserialize)]
struct DataArray {
    data: Vec<Value>,
}

#[derive(Deserialize)]
struct ChatsMap {
    chats: Map<String, Value>,
}

fn bare_array(value: &Value) -> Option<Vec<Value>> {
    Vec::<Value>::deserialize(value).ok()
}

fn chats_array(value: &Value) -> Option<Vec<Value>> {
    ChatsArray::deserialize(value).ok().map(|e| e.chats)
}

fn data_array(value: &Value) -> Option<Vec<Value>> {
    DataArray::deserialize(value).ok().map(|e| e.data)
}

fn chats_map(value: &Value) -> Option<Vec<Value>> {
    ChatsMap::deserialize(value)
        .ok()
        .map(|e| e.chats.into_iter().map(|(_, v)| v).collect())
}

const LIST_SHAPES: [fn(&Value) -> Option<Vec<Value>>; 4] =
    [bare_array, chats_array, data_array, chats_map];

pub fn parse_chat_list(response: &Value) -> ChatListing {
    let items = first_match(response, &LIST_SHAPES).unwrap_or_else(|| {
        tracing::debug!("Chat list response matched no known shape");
        Vec::new()
    });

    let chats = items
        .into_iter()
        .filter_map(|item| match RawChat::deserialize(&item) {
            Ok(chat) => Some(chat),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable chat entry");
                None
            }
        })
        .collect();

    let reported_count = response.get("number_of_chats").and_then(count_from_value);

    ChatListing {
        chats,
        reported_count,
    }
}
