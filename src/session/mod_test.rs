use super::*;
use serde_json::json;

/// Store whose every operation fails, to exercise fail-closed reads.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

fn user(value: serde_json::Value) -> UserInfo {
    UserInfo::from_json(value).unwrap()
}

#[test]
fn fresh_session_is_empty() {
    let session = SessionContext::in_memory();
    assert_eq!(session.load(), Session::default());
    assert!(!session.is_authenticated());
}

#[test]
fn save_token_authenticates() {
    let session = SessionContext::in_memory();
    session.save_token("t1").unwrap();
    assert_eq!(session.token().as_deref(), Some("t1"));
    assert!(session.is_authenticated());
}

#[test]
fn empty_token_is_not_authenticated() {
    let session = SessionContext::in_memory();
    session.save_token("").unwrap();
    assert_eq!(session.token(), None);
}

#[test]
fn save_user_round_trips_through_store() {
    let session = SessionContext::in_memory();
    let info = user(json!({ "_id": "u1", "firstName": "A", "lastName": "B" }));
    session.save_user(&info).unwrap();
    assert_eq!(session.user(), Some(info));
}

#[test]
fn malformed_user_reads_as_absent() {
    let store = Arc::new(MemoryStore::new());
    store.set(USER_KEY, "{oops").unwrap();
    let session = SessionContext::new(store);
    assert_eq!(session.user(), None);
}

#[test]
fn clear_removes_both_keys() {
    let session = SessionContext::in_memory();
    session.save_token("t1").unwrap();
    session.save_user(&user(json!({ "id": "u1" }))).unwrap();
    session.clear();
    assert_eq!(session.load(), Session::default());
}

#[test]
fn clear_twice_is_harmless() {
    let session = SessionContext::in_memory();
    session.save_token("t1").unwrap();
    session.clear();
    session.clear();
    assert!(!session.is_authenticated());
}

#[test]
fn clones_share_the_store() {
    let session = SessionContext::in_memory();
    let other = session.clone();
    session.save_token("t1").unwrap();
    assert_eq!(other.token().as_deref(), Some("t1"));
}

#[test]
fn broken_store_fails_closed() {
    let session = SessionContext::new(Arc::new(BrokenStore));
    assert_eq!(session.token(), None);
    assert_eq!(session.user(), None);
    session.clear();
    assert!(session.save_token("t1").is_err());
}
