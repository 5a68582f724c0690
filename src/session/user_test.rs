use super::*;
use serde_json::json;

// =============================================================
// from_json
// =============================================================

#[test]
fn from_json_reads_id() {
    let user = UserInfo::from_json(json!({ "id": "u1", "firstName": "A", "lastName": "B" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("u1"));
    assert_eq!(user.first_name.as_deref(), Some("A"));
    assert_eq!(user.last_name.as_deref(), Some("B"));
    assert!(user.extra.is_empty());
}

#[test]
fn from_json_falls_back_to_underscore_id() {
    let user = UserInfo::from_json(json!({ "_id": "mongo-1" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("mongo-1"));
    assert!(!user.extra.contains_key("_id"));
}

#[test]
fn from_json_prefers_id_over_underscore_id() {
    let user = UserInfo::from_json(json!({ "id": "a", "_id": "b" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("a"));
}

#[test]
fn from_json_null_id_uses_underscore_id() {
    let user = UserInfo::from_json(json!({ "id": null, "_id": "b" })).unwrap();
    assert_eq!(user.id.as_deref(), Some("b"));
}

#[test]
fn from_json_numeric_id_is_stringified() {
    let user = UserInfo::from_json(json!({ "id": 42 })).unwrap();
    assert_eq!(user.id.as_deref(), Some("42"));
}

#[test]
fn from_json_keeps_unknown_fields() {
    let user = UserInfo::from_json(json!({ "id": "u1", "email": "a@b.com" })).unwrap();
    assert_eq!(user.extra.get("email"), Some(&json!("a@b.com")));
}

#[test]
fn from_json_non_string_name_stays_in_extra() {
    let user = UserInfo::from_json(json!({ "id": "u1", "firstName": 7 })).unwrap();
    assert_eq!(user.first_name, None);
    assert_eq!(user.extra.get("firstName"), Some(&json!(7)));
}

#[test]
fn from_json_rejects_non_object() {
    assert!(UserInfo::from_json(json!("u1")).is_none());
    assert!(UserInfo::from_json(json!([])).is_none());
}

// =============================================================
// parse / serialize
// =============================================================

#[test]
fn parse_malformed_is_none() {
    assert!(UserInfo::parse("{not json").is_none());
}

#[test]
fn serialized_form_uses_canonical_id() {
    let user = UserInfo::from_json(json!({ "_id": "u1", "firstName": "A", "role": "admin" })).unwrap();
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value, json!({ "id": "u1", "firstName": "A", "role": "admin" }));
}

#[test]
fn serialized_form_parses_back_to_same_user() {
    let user = UserInfo::from_json(json!({ "_id": "u1", "lastName": "B" })).unwrap();
    let text = serde_json::to_string(&user).unwrap();
    assert_eq!(UserInfo::parse(&text), Some(user));
}

// =============================================================
// display_name
// =============================================================

#[test]
fn display_name_joins_first_and_last() {
    let user = UserInfo::from_json(json!({ "firstName": "A", "lastName": "B" })).unwrap();
    assert_eq!(user.display_name().as_deref(), Some("A B"));
}

#[test]
fn display_name_single_part() {
    let user = UserInfo::from_json(json!({ "firstName": "Ada" })).unwrap();
    assert_eq!(user.display_name().as_deref(), Some("Ada"));
}

#[test]
fn display_name_none_without_names() {
    assert_eq!(UserInfo::default().display_name(), None);
}
