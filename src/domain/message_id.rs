use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier minted on the client for a message the backend has not named.
///
/// Transient: it lives only as long as the in-memory message and is never
/// sent to the backend or used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientTempId(Uuid);

impl ClientTempId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ClientTempId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageId {
    Client(ClientTempId),
    Server(String),
}

impl MessageId {
    pub fn generate() -> Self {
        MessageId::Client(ClientTempId::new())
    }

    pub fn is_client_generated(&self) -> bool {
        matches!(self, MessageId::Client(_))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Client(id) => write!(f, "tmp-{}", id.as_uuid()),
            MessageId::Server(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for MessageId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MessageId::Server(raw))
    }
}
