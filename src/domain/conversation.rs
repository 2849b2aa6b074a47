use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ConversationId, parse_timestamp};

/// Title the backend writes over a conversation when the user deletes it.
pub const DELETED_TITLE: &str = "DELETED";

pub const DEFAULT_STATUS: &str = "active";

pub fn placeholder_title(id: &ConversationId) -> String {
    format!("Trip {}", id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
    pub destination: String,
    pub status: String,
    pub trip_dates: Map<String, Value>,
    pub preferences: Map<String, Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Set on placeholders fabricated from a bare chat count.
    #[serde(skip)]
    pub synthesized: bool,
}

impl ConversationSummary {
    /// Blank or missing titles become `"Trip {id}"`.
    pub fn new(id: ConversationId, title: Option<String>) -> Self {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| placeholder_title(&id));

        Self {
            id,
            title,
            destination: String::new(),
            status: DEFAULT_STATUS.to_string(),
            trip_dates: Map::new(),
            preferences: Map::new(),
            created_at: None,
            updated_at: None,
            synthesized: false,
        }
    }

    pub fn placeholder(id: ConversationId) -> Self {
        Self {
            synthesized: true,
            ..Self::new(id, None)
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.title == DELETED_TITLE
    }

    pub fn updated_at_parsed(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }

    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }
}

/// Input for building a conversation summary locally.
#[derive(Debug, Clone, Default)]
pub struct ConversationDraft {
    pub id: Option<ConversationId>,
    pub title: Option<String>,
    pub destination: Option<String>,
    pub status: Option<String>,
    pub trip_dates: Map<String, Value>,
    pub preferences: Map<String, Value>,
}
