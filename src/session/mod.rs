//! Session context shared by the API client and the navigation guard.
//!
//! ARCHITECTURE
//! ============
//! The session is two independent keys in a [`KeyValueStore`]: the bearer
//! token and the serialized [`UserInfo`]. Nothing reaches the store except
//! through [`SessionContext`], which owns the key names and the
//! fail-closed read policy.
//!
//! TRADE-OFFS
//! ==========
//! Token and user writes are separate; a failure between them leaves a
//! half-written session. Readers treat each key on its own, so a token
//! without a user still authenticates navigation but yields no "my bags".

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod store;
pub mod user;

use std::fmt;
use std::sync::Arc;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use user::UserInfo;

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Store key holding the JSON-encoded [`UserInfo`].
pub const USER_KEY: &str = "user_info";

/// Snapshot of both session keys at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

/// Handle to the session store. Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Stored bearer token. Read failures and empty values count as absent.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session token unreadable; treating as signed out");
                None
            }
        }
    }

    /// Stored user info. Read failures and malformed JSON count as absent.
    #[must_use]
    pub fn user(&self) -> Option<UserInfo> {
        match self.store.get(USER_KEY) {
            Ok(Some(raw)) => {
                let user = UserInfo::parse(&raw);
                if user.is_none() {
                    tracing::warn!("stored user info is malformed; ignoring");
                }
                user
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "session user unreadable; ignoring");
                None
            }
        }
    }

    #[must_use]
    pub fn load(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist the bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Persist the user info in its canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or the store rejects
    /// the write.
    pub fn save_user(&self, user: &UserInfo) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw)
    }

    /// Remove both keys. Each removal is attempted even if the other fails;
    /// failures are logged, never returned.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(error = %e, key, "failed to clear session key");
            }
        }
    }
}
