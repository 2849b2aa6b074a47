use serde::Deserialize;
use serde_json::json;

use tripchat::application::normalize::{ChatListing, RawChat, parse_chat_list};

fn ids(listing: &ChatListing) -> Vec<String> {
    listing
        .chats
        .iter()
        .filter_map(|c| c.server_id().map(|id| id.to_string()))
        .collect()
}

#[test]
fn given_chats_and_data_arrays_when_parsing_then_chats_wins() {
    let listing = parse_chat_list(&json!({
        "chats": [{"chat_id": "1"}],
        "data": [{"chat_id": "2"}]
    }));
    assert_eq!(ids(&listing), vec!["1"]);
}

#[test]
fn given_data_array_and_chats_map_when_parsing_then_data_wins() {
    let listing = parse_chat_list(&json!({
        "chats": {"a": {"chat_id": "1"}},
        "data": [{"chat_id": "2"}]
    }));
    assert_eq!(ids(&listing), vec!["2"]);
}

#[test]
fn given_chat_id_and_id_when_parsing_then_chat_id_wins() {
    let listing = parse_chat_list(&json!([{"chat_id": 3, "id": "x"}]));
    assert_eq!(ids(&listing), vec!["3"]);
}

#[test]
fn given_blank_and_padded_ids_when_parsing_then_blank_is_absent_and_padding_trimmed() {
    let listing = parse_chat_list(&json!([{"chat_id": "", "id": " 7 "}, {"chat_id": {}}]));
    assert_eq!(ids(&listing), vec!["7"]);
}

#[test]
fn given_scalar_response_when_parsing_then_empty_listing() {
    let listing = parse_chat_list(&json!(17));
    assert!(listing.chats.is_empty());
    assert_eq!(listing.reported_count, None);
}

#[test]
fn given_numeric_string_count_when_parsing_then_count_is_read() {
    assert_eq!(parse_chat_list(&json!({"number_of_chats": "3"})).reported_count, Some(3));
    assert_eq!(parse_chat_list(&json!({"number_of_chats": 4.7})).reported_count, Some(4));
}

#[test]
fn given_zero_or_non_numeric_count_when_parsing_then_no_count() {
    assert_eq!(parse_chat_list(&json!({"number_of_chats": 0})).reported_count, None);
    assert_eq!(parse_chat_list(&json!({"number_of_chats": "abc"})).reported_count, None);
}

#[test]
fn given_count_beyond_u64_when_parsing_then_no_count() {
    assert_eq!(parse_chat_list(&json!({"number_of_chats": 1e30})).reported_count, None);
}

#[test]
fn given_only_created_date_when_mapping_then_updated_falls_back_to_created() {
    let summary = RawChat::deserialize(&json!({"id": "1", "created_date": "2024-01-01"}))
        .unwrap()
        .into_summary()
        .unwrap();
    assert_eq!(summary.updated_at.as_deref(), Some("2024-01-01"));
}

#[test]
fn given_entry_without_id_when_mapping_then_no_summary() {
    let raw = RawChat::deserialize(&json!({"title": "Orphan"})).unwrap();
    assert!(raw.into_summary().is_none());
}
