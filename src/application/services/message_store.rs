use std::sync::Arc;

use serde_json::Value;

use crate::application::normalize::{ChatReply, RawMessage, parse_chat_reply, parse_transcript};
use crate::application::ports::ChatGateway;
use crate::domain::{
    ConversationId, Message, MessageDraft, MessageMetadata, Sender, UserIdentity,
};

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub conversation_id: Option<ConversationId>,
}

impl MessageFilter {
    pub fn by_conversation(id: impl Into<ConversationId>) -> Self {
        Self {
            conversation_id: Some(id.into()),
        }
    }
}

/// Result of [`MessageStore::create`].
///
/// The user's message is always present. The assistant half is only there
/// when the backend produced a usable reply.
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub user: Message,
    pub assistant: Option<Message>,
}

impl SendOutcome {
    fn user_only(user: Message) -> Self {
        Self {
            user,
            assistant: None,
        }
    }

    pub fn has_reply(&self) -> bool {
        self.assistant.is_some()
    }

    /// `[user]` or `[user, assistant]`.
    pub fn into_messages(self) -> Vec<Message> {
        std::iter::once(self.user).chain(self.assistant).collect()
    }
}

pub struct MessageStore<G>
where
    G: ChatGateway + ?Sized,
{
    gateway: Arc<G>,
    identity: UserIdentity,
}

impl<G> MessageStore<G>
where
    G: ChatGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, identity: UserIdentity) -> Self {
        Self { gateway, identity }
    }

    /// Records a message and, for user messages, sends it to the assistant.
    ///
    /// The backend owns conversation identity: if it files the message under
    /// a different id (or assigns one to a brand-new conversation) the
    /// returned user message carries that id.
    #[tracing::instrument(
        skip(self, draft),
        fields(user_id = %self.identity.user_id(), sender = %draft.sender)
    )]
    pub async fn create(&self, draft: MessageDraft) -> SendOutcome {
        let mut message = Message::from_draft(draft);

        if message.sender != Sender::User {
            return SendOutcome::user_only(message);
        }

        let response = match self
            .gateway
            .submit_message(
                self.identity.user_id(),
                &message.content,
                message.conversation_id.as_ref(),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Failed to send message to backend");
                return SendOutcome::user_only(message);
            }
        };

        let reply = parse_chat_reply(&response);

        if let Some(backend_id) = &reply.conversation_id {
            if message.conversation_id.as_ref() != Some(backend_id) {
                tracing::debug!(
                    previous = ?message.conversation_id,
                    conversation_id = %backend_id,
                    "Adopting backend conversation id"
                );
                message.conversation_id = Some(backend_id.clone());
            }
        }

        match assistant_message(&reply, message.conversation_id.clone()) {
            Some(assistant) => SendOutcome {
                user: message,
                assistant: Some(assistant),
            },
            None => {
                tracing::warn!("No usable reply from backend, returning user message only");
                SendOutcome::user_only(message)
            }
        }
    }

    /// Transcript of a conversation, oldest first as the backend stores it.
    #[tracing::instrument(skip(self), fields(user_id = %self.identity.user_id()))]
    pub async fn filter(&self, filter: &MessageFilter) -> Vec<Message> {
        let Some(conversation_id) = &filter.conversation_id else {
            return Vec::new();
        };

        let response = match self
            .gateway
            .fetch_transcript(self.identity.user_id(), conversation_id)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch messages");
                return Vec::new();
            }
        };

        match parse_transcript(&response) {
            Some(raw) => raw
                .into_iter()
                .map(|m: RawMessage| m.into_message(conversation_id))
                .collect(),
            None => {
                tracing::warn!("Unexpected transcript format");
                Vec::new()
            }
        }
    }
}

fn assistant_message(
    reply: &ChatReply,
    conversation_id: Option<ConversationId>,
) -> Option<Message> {
    let text = reply.usable_text()?;

    let mut metadata = MessageMetadata::from_map(reply.metadata.clone());
    metadata.insert(MessageMetadata::FLIGHT_IDS, reply.flight_ids.clone());
    metadata.insert(MessageMetadata::HOTEL_IDS, reply.hotel_ids.clone());

    if let Some(title) = &reply.title {
        metadata.insert(MessageMetadata::TITLE, Value::String(title.clone()));
        metadata.insert(
            MessageMetadata::CHAT_ID,
            conversation_id
                .as_ref()
                .map(|id| Value::String(id.to_string()))
                .unwrap_or(Value::Null),
        );
    }

    let mut message = Message::new(conversation_id, Sender::Assistant, text.to_string());
    message.metadata = metadata;
    Some(message)
}
