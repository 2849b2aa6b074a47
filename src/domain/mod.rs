mod conversation;
mod conversation_id;
mod message;
mod message_id;
mod sender;
mod timestamp;
mod user_identity;

pub use conversation::{
    ConversationDraft, ConversationSummary, DEFAULT_STATUS, DELETED_TITLE, placeholder_title,
};
pub use conversation_id::ConversationId;
pub use message::{DEFAULT_MESSAGE_TYPE, Message, MessageDraft, MessageMetadata};
pub use message_id::{ClientTempId, MessageId};
pub use sender::Sender;
pub use timestamp::{from_epoch, parse_timestamp};
pub use user_identity::{IdTokenError, UserIdentity};
