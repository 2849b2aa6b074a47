use tripchat::application::ports::{IdentityError, IdentityStore};
use tripchat::domain::UserIdentity;
use tripchat::infrastructure::identity::FileIdentityStore;

fn create_test_store() -> (tempfile::TempDir, FileIdentityStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = FileIdentityStore::new(dir.path().join("auth").join("userDetails.json"));
    (dir, store)
}

#[tokio::test]
async fn given_no_record_when_loading_then_not_authenticated() {
    let (_dir, store) = create_test_store();

    let result = store.load().await;

    assert!(matches!(result, Err(IdentityError::NotAuthenticated)));
    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn given_saved_identity_when_loading_then_claims_match() {
    let (_dir, store) = create_test_store();
    let mut identity = UserIdentity::new("sub-42");
    identity.email = Some("a@b.c".to_string());

    store.save(&identity).await.unwrap();
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded, identity);
    assert!(store.is_authenticated().await);
}

#[tokio::test]
async fn given_corrupt_record_when_loading_then_invalid() {
    let (_dir, store) = create_test_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    assert!(matches!(store.load().await, Err(IdentityError::Invalid(_))));
}

#[tokio::test]
async fn given_saved_identity_when_clearing_then_record_is_gone() {
    let (_dir, store) = create_test_store();
    store.save(&UserIdentity::new("sub-42")).await.unwrap();

    store.clear().await.unwrap();

    assert!(matches!(store.load().await, Err(IdentityError::NotAuthenticated)));
}

#[tokio::test]
async fn given_no_record_when_clearing_then_succeeds() {
    let (_dir, store) = create_test_store();

    assert!(store.clear().await.is_ok());
}
