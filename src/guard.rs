//! Navigation guard evaluated before every route transition.
//!
//! DESIGN
//! ======
//! The decision depends only on whether a session token is present and on
//! the target route's metadata. Token validity (expiry, signature) is the
//! server's concern; a stale token still passes here and is rejected by the
//! API on the next authenticated request.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::routes::{self, DEFAULT_AUTHENTICATED_ROUTE, Location, RouteName, SIGN_IN_ROUTE};
use crate::session::SessionContext;

/// Outcome of a guarded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(RouteName),
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no route matches path `{0}`")]
    NotFound(String),
}

/// Decide a transition to `target` given whether a token is stored.
#[must_use]
pub fn decide(has_token: bool, target: RouteName) -> NavigationDecision {
    if target.requires_auth() && !has_token {
        NavigationDecision::Redirect(SIGN_IN_ROUTE)
    } else if target.is_auth_page() && has_token {
        NavigationDecision::Redirect(DEFAULT_AUTHENTICATED_ROUTE)
    } else {
        NavigationDecision::Proceed
    }
}

/// Guard bound to a session. Reads the token afresh on every transition.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: SessionContext,
}

impl NavigationGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Evaluate the transition `from -> to`.
    #[must_use]
    pub fn before_each(&self, to: &Location, from: Option<&Location>) -> NavigationDecision {
        let decision = decide(self.session.is_authenticated(), to.name);
        tracing::debug!(
            to = %to.name,
            from = from.map_or("-", |l| l.name.as_str()),
            ?decision,
            "navigation guard"
        );
        decision
    }

    /// Resolve `path`, run the guard, and return where the user ends up.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotFound`] if no route matches `path`.
    pub fn navigate(&self, path: &str, from: Option<&Location>) -> Result<Location, NavigationError> {
        let target = routes::resolve(path).ok_or_else(|| NavigationError::NotFound(path.to_owned()))?;
        match self.before_each(&target, from) {
            NavigationDecision::Proceed => Ok(target),
            NavigationDecision::Redirect(name) => Ok(Location::named(name)),
        }
    }
}
