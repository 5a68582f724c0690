use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_get_missing_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("auth_token").unwrap(), None);
}

#[test]
fn memory_set_then_get() {
    let store = MemoryStore::new();
    store.set("auth_token", "t1").unwrap();
    assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("t1"));
}

#[test]
fn memory_set_overwrites() {
    let store = MemoryStore::new();
    store.set("k", "a").unwrap();
    store.set("k", "b").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
}

#[test]
fn memory_remove_is_idempotent() {
    let store = MemoryStore::new();
    store.set("k", "a").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn file_missing_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    assert_eq!(store.get("auth_token").unwrap(), None);
}

#[test]
fn file_set_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");
    let store = FileStore::new(&path);
    store.set("auth_token", "t1").unwrap();
    assert!(path.exists());
}

#[test]
fn file_values_visible_to_second_instance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    FileStore::new(&path).set("auth_token", "t1").unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get("auth_token").unwrap().as_deref(), Some("t1"));
}

#[test]
fn file_remove_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("session.json"));
    store.set("auth_token", "t1").unwrap();
    store.set("user_info", "{}").unwrap();
    store.remove("auth_token").unwrap();
    assert_eq!(store.get("auth_token").unwrap(), None);
    assert_eq!(store.get("user_info").unwrap().as_deref(), Some("{}"));
}

#[test]
fn file_remove_missing_file_does_not_create_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = FileStore::new(&path);
    store.remove("auth_token").unwrap();
    assert!(!path.exists());
}

#[test]
fn file_corrupt_contents_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileStore::new(&path);
    assert!(matches!(store.get("auth_token"), Err(StoreError::Corrupt(_))));
}

#[test]
fn file_empty_contents_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "  \n").unwrap();
    let store = FileStore::new(&path);
    assert_eq!(store.get("auth_token").unwrap(), None);
}
