use std::sync::Arc;

use serde_json::{Value, json};

use tripchat::application::services::{
    ConversationFilter, ConversationStore, SortKey, generate_fallback_from_count,
};
use tripchat::domain::{ConversationDraft, ConversationId, ConversationSummary, UserIdentity};
use tripchat::infrastructure::gateway::{GatewayCall, MockChatGateway};

const TEST_USER: &str = "user-123";

fn store_with(gateway: MockChatGateway) -> (Arc<MockChatGateway>, ConversationStore<MockChatGateway>) {
    let gateway = Arc::new(gateway);
    let store = ConversationStore::new(Arc::clone(&gateway), UserIdentity::new(TEST_USER));
    (gateway, store)
}

fn store_listing(reply: Value) -> ConversationStore<MockChatGateway> {
    store_with(MockChatGateway::new().with_chats(reply)).1
}

fn ids(conversations: &[ConversationSummary]) -> Vec<&str> {
    conversations.iter().map(|c| c.id.as_str()).collect()
}

fn sample_chats() -> Value {
    json!([
        {"chat_id": "1", "title": "Lisbon", "updated_date": "2024-03-01T10:00:00Z"},
        {"chat_id": "2", "title": "Kyoto", "updated_date": "2024-05-01T10:00:00Z"},
        {"chat_id": "3", "title": "", "updated_date": "2024-04-01T10:00:00Z"}
    ])
}

#[tokio::test]
async fn given_bare_chats_and_data_shapes_when_listing_then_results_are_identical() {
    let bare = store_listing(sample_chats()).list(SortKey::UpdatedDesc, None).await;
    let chats = store_listing(json!({"chats": sample_chats()}))
        .list(SortKey::UpdatedDesc, None)
        .await;
    let data = store_listing(json!({"data": sample_chats()}))
        .list(SortKey::UpdatedDesc, None)
        .await;

    assert_eq!(ids(&bare), vec!["2", "3", "1"]);
    assert_eq!(bare, chats);
    assert_eq!(bare, data);
}

#[tokio::test]
async fn given_chats_mapping_when_listing_then_values_are_extracted() {
    let store = store_listing(json!({
        "chats": {
            "a": {"chat_id": "1", "title": "Oslo"},
            "b": {"chat_id": "2", "title": "Rome"}
        }
    }));

    let conversations = store.list(SortKey::UpdatedDesc, None).await;

    let mut found = ids(&conversations);
    found.sort();
    assert_eq!(found, vec!["1", "2"]);
}

#[tokio::test]
async fn given_deleted_sentinel_when_listing_with_any_sort_key_then_entry_is_hidden() {
    let reply = json!({"chats": [
        {"chat_id": "1", "title": "Oslo"},
        {"chat_id": "2", "title": "DELETED"},
        {"chat_id": "3", "title": "Rome", "updated_date": "2024-01-01"}
    ]});

    for sort_key in [SortKey::UpdatedDesc, SortKey::UpdatedAsc, SortKey::Source] {
        let conversations = store_listing(reply.clone()).list(sort_key, None).await;
        assert!(conversations.iter().all(|c| c.title != "DELETED"));
        assert_eq!(conversations.len(), 2);
    }
}

#[tokio::test]
async fn given_mixed_timestamps_when_sorting_newest_first_then_missing_timestamp_is_last() {
    let store = store_listing(json!([
        {"chat_id": "1", "updated_date": null},
        {"chat_id": "2", "updated_date": "2024-01-01"},
        {"chat_id": "3", "updated_date": "2024-06-01"}
    ]));

    let conversations = store.list(SortKey::UpdatedDesc, None).await;

    let order: Vec<Option<&str>> = conversations
        .iter()
        .map(|c| c.updated_at.as_deref())
        .collect();
    assert_eq!(order, vec![Some("2024-06-01"), Some("2024-01-01"), None]);
}

#[tokio::test]
async fn given_mixed_timestamps_when_sorting_oldest_first_then_missing_timestamp_is_still_last() {
    let store = store_listing(json!([
        {"chat_id": "1"},
        {"chat_id": "2", "updated_date": "2024-06-01"},
        {"chat_id": "3", "updated_date": "2024-01-01"}
    ]));

    let conversations = store.list(SortKey::UpdatedAsc, None).await;

    assert_eq!(ids(&conversations), vec!["3", "2", "1"]);
}

#[tokio::test]
async fn given_no_timestamps_when_listing_then_ordered_by_descending_numeric_id() {
    let store = store_listing(json!({"chats": [
        {"chat_id": "2"},
        {"chat_id": "10"},
        {"chat_id": "9"}
    ]}));

    let conversations = store.list(SortKey::Source, None).await;

    assert_eq!(ids(&conversations), vec!["10", "9", "2"]);
}

#[tokio::test]
async fn given_non_numeric_ids_without_timestamps_when_listing_then_ordered_lexicographically() {
    let store = store_listing(json!([{"id": "alpha"}, {"id": "gamma"}, {"id": "beta"}]));

    let conversations = store.list(SortKey::UpdatedDesc, None).await;

    assert_eq!(ids(&conversations), vec!["gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn given_limit_when_listing_then_sequence_is_truncated_after_sorting() {
    let conversations = store_listing(sample_chats())
        .list(SortKey::UpdatedDesc, Some(2))
        .await;

    assert_eq!(ids(&conversations), vec!["2", "3"]);
}

#[tokio::test]
async fn given_blank_title_when_listing_then_placeholder_title_is_used() {
    let conversations = store_listing(sample_chats())
        .list(SortKey::UpdatedDesc, None)
        .await;

    let third = conversations.iter().find(|c| c.id.as_str() == "3").unwrap();
    assert_eq!(third.title, "Trip 3");
}

#[test]
fn given_count_of_three_when_generating_fallback_then_ids_and_titles_descend() {
    let fallback = generate_fallback_from_count(3);

    assert_eq!(ids(&fallback), vec!["3", "2", "1"]);
    let titles: Vec<&str> = fallback.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Trip 3", "Trip 2", "Trip 1"]);
    assert!(fallback.iter().all(|c| c.synthesized));
}

// Degraded mode: the backend knows how many chats exist but did not send
// them. Placeholders stand in; they are flagged, not real data.
#[tokio::test]
async fn given_empty_list_with_positive_count_when_listing_then_placeholders_are_synthesized() {
    let store = store_listing(json!({"chats": [], "number_of_chats": "3"}));

    let conversations = store.list(SortKey::UpdatedDesc, Some(2)).await;

    assert_eq!(ids(&conversations), vec!["3", "2"]);
    assert!(conversations.iter().all(|c| c.synthesized));
}

#[tokio::test]
async fn given_empty_list_with_zero_count_when_listing_then_result_is_empty() {
    let store = store_listing(json!({"chats": [], "number_of_chats": 0}));

    assert!(store.list(SortKey::UpdatedDesc, None).await.is_empty());
}

#[tokio::test]
async fn given_unknown_shape_when_listing_then_result_is_empty() {
    let store = store_listing(json!({"items": [{"chat_id": "1"}]}));

    assert!(store.list(SortKey::UpdatedDesc, None).await.is_empty());
}

#[tokio::test]
async fn given_gateway_failure_when_listing_then_result_is_empty() {
    let (_, store) = store_with(MockChatGateway::new().with_chats_failure("connection reset"));

    assert!(store.list(SortKey::UpdatedDesc, None).await.is_empty());
}

#[tokio::test]
async fn given_store_when_listing_then_identity_is_sent_as_user_id() {
    let (gateway, store) = store_with(MockChatGateway::new().with_chats(json!([])));

    store.list(SortKey::UpdatedDesc, None).await;

    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::Chats {
            user_id: TEST_USER.to_string()
        }]
    );
}

#[tokio::test]
async fn given_matching_id_when_filtering_then_only_that_entry_is_returned_in_source_order() {
    let store = store_listing(json!({"chats": [
        {"chat_id": "2", "title": "Kyoto"},
        {"chat_id": "1", "title": "Lisbon"},
        {"chat_id": 2, "title": "Kyoto again"}
    ]}));

    let found = store.filter(&ConversationFilter::by_id("2")).await;

    let titles: Vec<&str> = found.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Kyoto", "Kyoto again"]);
}

#[tokio::test]
async fn given_no_id_when_filtering_then_all_entries_are_returned() {
    let store = store_listing(json!([{"chat_id": "1"}, {"chat_id": "2"}]));

    let found = store.filter(&ConversationFilter::default()).await;

    assert_eq!(ids(&found), vec!["1", "2"]);
}

#[tokio::test]
async fn given_empty_list_and_id_within_count_when_filtering_then_single_placeholder_is_returned() {
    let store = store_listing(json!({"number_of_chats": 4}));

    let found = store.filter(&ConversationFilter::by_id("3")).await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, ConversationId::new("3"));
    assert_eq!(found[0].title, "Trip 3");
    assert!(found[0].synthesized);
}

#[tokio::test]
async fn given_empty_list_and_id_outside_count_when_filtering_then_result_is_empty() {
    let store = store_listing(json!({"number_of_chats": 4}));

    assert!(store.filter(&ConversationFilter::by_id("5")).await.is_empty());
    assert!(store.filter(&ConversationFilter::by_id("abc")).await.is_empty());
}

#[tokio::test]
async fn given_reported_count_when_asking_next_id_then_count_plus_one() {
    let store = store_listing(json!({"chats": [], "number_of_chats": "4"}));

    assert_eq!(store.next_id().await, ConversationId::new("5"));
}

#[tokio::test]
async fn given_gateway_failure_when_asking_next_id_then_first_id() {
    let (_, store) = store_with(MockChatGateway::new().with_chats_failure("timeout"));

    assert_eq!(store.next_id().await, ConversationId::new("1"));
}

#[tokio::test]
async fn given_draft_without_id_when_creating_then_next_id_is_assigned() {
    let store = store_listing(json!({"chats": [{"chat_id": "1"}, {"chat_id": "2"}]}));

    let created = store
        .create(ConversationDraft {
            destination: Some("Reykjavik".to_string()),
            ..ConversationDraft::default()
        })
        .await;

    assert_eq!(created.id, ConversationId::new("3"));
    assert_eq!(created.title, "Trip 3");
    assert_eq!(created.destination, "Reykjavik");
    assert!(created.updated_at.is_some());
}

#[tokio::test]
async fn given_successful_backend_when_deleting_then_returns_true() {
    let (gateway, store) =
        store_with(MockChatGateway::new().with_delete_reply(json!({"success": true})));

    let deleted = store.delete(&ConversationId::new("2")).await.unwrap();

    assert!(deleted);
    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::Delete {
            user_id: TEST_USER.to_string(),
            chat_id: ConversationId::new("2"),
        }]
    );
}

#[tokio::test]
async fn given_transport_failure_when_deleting_then_error_is_surfaced() {
    let (_, store) = store_with(MockChatGateway::new().with_delete_failure("refused"));

    assert!(store.delete(&ConversationId::new("2")).await.is_err());
}

#[tokio::test]
async fn given_count_beyond_range_when_asking_next_id_then_first_id() {
    let store = store_listing(json!({"chats": [], "number_of_chats": 1e30}));

    assert_eq!(store.next_id().await, ConversationId::new("1"));
}

#[tokio::test]
async fn given_count_beyond_range_when_creating_then_first_id_is_assigned() {
    let store = store_listing(json!({"chats": [], "number_of_chats": "1e30"}));

    let summary = store.create(ConversationDraft::default()).await;

    assert_eq!(summary.id, ConversationId::new("1"));
}

#[tokio::test]
async fn given_count_beyond_range_when_listing_then_nothing_is_synthesized() {
    let store = store_listing(json!({"chats": [], "number_of_chats": 1e30}));

    assert!(store.list(SortKey::UpdatedDesc, None).await.is_empty());
}

#[tokio::test]
async fn given_out_of_range_update_times_when_listing_then_they_sort_last() {
    let store = store_listing(json!([
        {"chat_id": "1", "title": "Huge", "updated_date": "-1e30"},
        {"chat_id": "2", "title": "Huge epoch", "updated_date": -9223372036854775807i64},
        {"chat_id": "3", "title": "Real", "updated_date": "2024-05-01T10:00:00Z"}
    ]));

    let conversations = store.list(SortKey::UpdatedDesc, None).await;

    assert_eq!(ids(&conversations), vec!["3", "2", "1"]);
}
