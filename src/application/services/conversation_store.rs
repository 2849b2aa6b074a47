use std::cmp::Ordering;
use std::sync::Arc;

use super::SortKey;
use crate::application::normalize::{ChatListing, RawChat, is_truthy, parse_chat_list};
use crate::application::ports::{ChatGateway, GatewayError};
use crate::domain::{ConversationDraft, ConversationId, ConversationSummary, UserIdentity};

/// Upper bound on placeholders fabricated from a reported chat count.
pub const MAX_SYNTHESIZED_CONVERSATIONS: u64 = 1_000;

#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    pub id: Option<ConversationId>,
}

impl ConversationFilter {
    pub fn by_id(id: impl Into<ConversationId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// Read side of the user's conversation list.
///
/// Listing never fails: transport errors and unrecognised payloads both come
/// back as an empty list, so callers cannot tell "no trips yet" from "backend
/// down" and should not try.
pub struct ConversationStore<G>
where
    G: ChatGateway + ?Sized,
{
    gateway: Arc<G>,
    identity: UserIdentity,
}

impl<G> ConversationStore<G>
where
    G: ChatGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>, identity: UserIdentity) -> Self {
        Self { gateway, identity }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    #[tracing::instrument(skip(self), fields(user_id = %self.identity.user_id()))]
    pub async fn list(&self, sort_key: SortKey, limit: Option<usize>) -> Vec<ConversationSummary> {
        let Some(listing) = self.fetch_listing().await else {
            return Vec::new();
        };

        let mut conversations = if listing.chats.is_empty() {
            match listing.reported_count {
                Some(count) => {
                    tracing::warn!(
                        count = count,
                        "Chat list came back empty with a positive count, synthesizing placeholders"
                    );
                    generate_fallback_from_count(count)
                }
                None => {
                    tracing::debug!("No conversations in list response");
                    Vec::new()
                }
            }
        } else {
            let mut mapped: Vec<ConversationSummary> = listing
                .chats
                .into_iter()
                .filter_map(RawChat::into_summary)
                .filter(|c| !c.is_deleted())
                .collect();
            sort_conversations(&mut mapped, sort_key);
            mapped
        };

        if let Some(limit) = limit {
            conversations.truncate(limit);
        }

        tracing::debug!(count = conversations.len(), "Listed conversations");
        conversations
    }

    /// Entries matching `filter`, in backend order.
    #[tracing::instrument(skip(self), fields(user_id = %self.identity.user_id()))]
    pub async fn filter(&self, filter: &ConversationFilter) -> Vec<ConversationSummary> {
        let Some(listing) = self.fetch_listing().await else {
            return Vec::new();
        };

        if listing.chats.is_empty() {
            return match (&filter.id, listing.reported_count) {
                (Some(id), Some(count)) if id_within_count(id, count) => {
                    tracing::warn!(
                        conversation_id = %id,
                        count = count,
                        "Chat list came back empty, synthesizing placeholder for requested id"
                    );
                    vec![ConversationSummary::placeholder(id.clone())]
                }
                _ => Vec::new(),
            };
        }

        listing
            .chats
            .into_iter()
            .filter(|chat| {
                filter
                    .id
                    .as_ref()
                    .is_none_or(|wanted| chat.server_id().as_ref() == Some(wanted))
            })
            .filter_map(RawChat::into_summary)
            .filter(|c| !c.is_deleted())
            .collect()
    }

    /// Id the backend will hand the next new conversation.
    ///
    /// Falls back to `"1"` when the list cannot be fetched or the reported
    /// count has no successor.
    #[tracing::instrument(skip(self), fields(user_id = %self.identity.user_id()))]
    pub async fn next_id(&self) -> ConversationId {
        let count = match self.gateway.fetch_chats(self.identity.user_id()).await {
            Ok(response) => {
                let listing = parse_chat_list(&response);
                if response.get("number_of_chats").is_some() {
                    listing.reported_count.unwrap_or(0)
                } else {
                    listing.chats.len() as u64
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch conversations for next id");
                0
            }
        };
        match count.checked_add(1) {
            Some(next) => ConversationId::from(next),
            None => {
                tracing::warn!(count = count, "Reported chat count out of range for next id");
                ConversationId::from(1u64)
            }
        }
    }

    /// Builds a summary locally; nothing is sent to the backend until the
    /// first message is submitted.
    pub async fn create(&self, draft: ConversationDraft) -> ConversationSummary {
        let id = match draft.id {
            Some(id) => id,
            None => self.next_id().await,
        };

        let mut summary = ConversationSummary::new(id, draft.title);
        if let Some(destination) = draft.destination {
            summary.destination = destination;
        }
        if let Some(status) = draft.status {
            summary.status = status;
        }
        summary.trip_dates = draft.trip_dates;
        summary.preferences = draft.preferences;

        let now = chrono::Utc::now().to_rfc3339();
        summary.created_at = Some(now.clone());
        summary.updated_at = Some(now);
        summary
    }

    /// Returns the backend's `success` flag.
    #[tracing::instrument(skip(self), fields(user_id = %self.identity.user_id()))]
    pub async fn delete(&self, id: &ConversationId) -> Result<bool, GatewayError> {
        let response = self
            .gateway
            .delete_chat(self.identity.user_id(), id)
            .await?;

        let deleted = response.get("success").is_some_and(is_truthy);
        if !deleted {
            tracing::warn!(conversation_id = %id, response = %response, "Backend refused delete");
        }
        Ok(deleted)
    }

    async fn fetch_listing(&self) -> Option<ChatListing> {
        match self.gateway.fetch_chats(self.identity.user_id()).await {
            Ok(response) => Some(parse_chat_list(&response)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch conversations");
                None
            }
        }
    }
}

/// Placeholders `count, count-1, ..., 1` titled `"Trip {n}"`.
///
/// Degraded-mode output: the backend reported how many chats exist but not
/// what they are. Every entry is flagged `synthesized`.
pub fn generate_fallback_from_count(count: u64) -> Vec<ConversationSummary> {
    let count = if count > MAX_SYNTHESIZED_CONVERSATIONS {
        tracing::warn!(
            count = count,
            cap = MAX_SYNTHESIZED_CONVERSATIONS,
            "Capping synthesized conversations"
        );
        MAX_SYNTHESIZED_CONVERSATIONS
    } else {
        count
    };

    (1..=count)
        .rev()
        .map(|n| ConversationSummary::placeholder(ConversationId::from(n)))
        .collect()
}

fn id_within_count(id: &ConversationId, count: u64) -> bool {
    id.as_number()
        .is_some_and(|n| n >= 1.0 && n <= count as f64)
}

pub fn sort_conversations(conversations: &mut [ConversationSummary], sort_key: SortKey) {
    if !conversations.iter().any(|c| c.updated_at_parsed().is_some()) {
        conversations.sort_by(|a, b| b.id.compare(&a.id));
    }

    match sort_key {
        SortKey::UpdatedDesc => conversations.sort_by(|a, b| compare_updated(a, b, true)),
        SortKey::UpdatedAsc => conversations.sort_by(|a, b| compare_updated(a, b, false)),
        SortKey::Source => {}
    }
}

// Entries without a usable timestamp sink to the end in both directions.
fn compare_updated(a: &ConversationSummary, b: &ConversationSummary, descending: bool) -> Ordering {
    match (a.updated_at_parsed(), b.updated_at_parsed()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) if descending => b.id.compare(&a.id),
        (None, None) => a.id.compare(&b.id),
    }
}
