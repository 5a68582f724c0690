//! Deciding which bags belong to the signed-in user.
//!
//! TRADE-OFFS
//! ==========
//! The API has no "my bags" endpoint, so [`ClientSideFilter`] downloads the
//! whole list and filters it locally: O(n) per call and no pagination.
//! [`MyBagsSource`] is the seam where a server-side query can replace it.

#[cfg(test)]
#[path = "ownership_test.rs"]
mod tests;

use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::session::UserInfo;
use crate::session::user::id_string;

/// Source of the signed-in user's bags.
#[async_trait::async_trait]
pub trait MyBagsSource: Send + Sync {
    /// Bags owned by `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying request fails.
    async fn my_bags(&self, client: &ApiClient, user: &UserInfo) -> Result<Vec<Value>, ApiError>;
}

/// Fetch every bag and keep the ones [`match_owner`] accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientSideFilter;

#[async_trait::async_trait]
impl MyBagsSource for ClientSideFilter {
    async fn my_bags(&self, client: &ApiClient, user: &UserInfo) -> Result<Vec<Value>, ApiError> {
        let list = client.get_all_bags().await?;
        let Some(bags) = bag_items(list) else {
            tracing::warn!("bag list has an unrecognized shape; my bags is empty");
            return Ok(Vec::new());
        };
        Ok(bags
            .into_iter()
            .filter(|bag| match_owner(bag, user).is_some())
            .collect())
    }
}

/// Which creator reference tied a bag to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipMatch {
    /// `creatorId` equals the user id.
    CreatorId,
    /// `creator` equals the user's `"first last"` name.
    CreatorName,
    /// `user`, as an id or a nested object's `_id`/`id`, equals the user id.
    UserRef,
}

/// Check the creator references of `bag` against `user`, in precedence
/// order. The first that matches is returned.
#[must_use]
pub fn match_owner(bag: &Value, user: &UserInfo) -> Option<OwnershipMatch> {
    let user_id = user.id.as_deref();

    if let Some(id) = user_id {
        if ref_id(bag.get("creatorId")).as_deref() == Some(id) {
            return Some(OwnershipMatch::CreatorId);
        }
    }

    if let (Some(name), Some(Value::String(creator))) = (user.display_name(), bag.get("creator")) {
        if *creator == name {
            return Some(OwnershipMatch::CreatorName);
        }
    }

    if let Some(id) = user_id {
        let embedded = match bag.get("user") {
            Some(Value::Object(fields)) => ref_id(fields.get("_id")).or_else(|| ref_id(fields.get("id"))),
            other => ref_id(other),
        };
        if embedded.as_deref() == Some(id) {
            return Some(OwnershipMatch::UserRef);
        }
    }

    None
}

/// The bag sequence inside a list payload: the payload itself when it is an
/// array, or its `bags` array. `None` for any other shape.
fn bag_items(list: Value) -> Option<Vec<Value>> {
    match list {
        Value::Array(items) => Some(items),
        Value::Object(mut fields) => match fields.remove("bags") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

fn ref_id(value: Option<&Value>) -> Option<String> {
    value.cloned().and_then(id_string)
}
