mod conversation_store;
mod message_store;
mod sort_key;

pub use conversation_store::{
    ConversationFilter, ConversationStore, MAX_SYNTHESIZED_CONVERSATIONS,
    generate_fallback_from_count, sort_conversations,
};
pub use message_store::{MessageFilter, MessageStore, SendOutcome};
pub use sort_key::SortKey;
