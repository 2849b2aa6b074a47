use tripchat::domain::{ConversationId, ConversationSummary};

#[test]
fn given_blank_title_when_creating_summary_then_placeholder_title_is_used() {
    let summary = ConversationSummary::new(ConversationId::new("7"), Some("   ".into()));
    assert_eq!(summary.title, "Trip 7");
}

#[test]
fn given_placeholder_when_created_then_marked_synthesized() {
    let summary = ConversationSummary::placeholder(ConversationId::new("2"));
    assert!(summary.synthesized);
    assert_eq!(summary.title, "Trip 2");
}

#[test]
fn given_deleted_sentinel_title_when_checking_then_is_deleted() {
    let summary = ConversationSummary::new(ConversationId::new("1"), Some("DELETED".into()));
    assert!(summary.is_deleted());
}

#[test]
fn given_unparseable_updated_at_when_reading_then_none() {
    let mut summary = ConversationSummary::new(ConversationId::new("1"), None);
    summary.updated_at = Some("-1e30".into());
    assert!(summary.updated_at_parsed().is_none());
}
