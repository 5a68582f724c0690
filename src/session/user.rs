//! Normalized user identity stored alongside the session token.
//!
//! The API hands back user objects keyed by either `id` or `_id`. They are
//! folded into one canonical `id` here, at the session boundary, so that
//! nothing downstream has to know about the two spellings.

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;

use serde::Serialize;
use serde_json::{Map, Value};

/// Current user as known to the client.
///
/// Only the identity and name fields are interpreted; every other field the
/// API returned is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserInfo {
    /// Normalize an API user object. Returns `None` for non-objects.
    ///
    /// `id` wins over `_id`; both keys are consumed either way.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let primary = fields.remove("id").and_then(id_string);
        let legacy = fields.remove("_id").and_then(id_string);
        let first_name = take_string(&mut fields, "firstName");
        let last_name = take_string(&mut fields, "lastName");

        Some(Self {
            id: primary.or(legacy),
            first_name,
            last_name,
            extra: fields,
        })
    }

    /// Parse a stored `user_info` value. Malformed JSON reads as `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str::<Value>(text).ok().and_then(Self::from_json)
    }

    /// Display name as the API renders bag creators: `"first last"`.
    ///
    /// With only one half present, that half alone; with neither, `None`.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_owned()),
            (None, None) => None,
        }
    }
}

/// Render an identifier value as a string. Numbers are accepted since some
/// backends emit numeric ids; anything else is not an identity.
pub(crate) fn id_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            fields.insert(key.to_owned(), other);
            None
        }
        None => None,
    }
}
