//! Static route table for the bag configurator app.
//!
//! Routes are declared once in [`ROUTES`] and never mutated. Each carries
//! its access requirement so the navigation guard can decide transitions
//! without knowing anything about individual pages.

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

use std::fmt;

/// Named routes known to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    SignIn,
    SignUp,
    Configurator,
    Feed,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "signin",
            Self::SignUp => "signup",
            Self::Configurator => "configurator",
            Self::Feed => "feed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "signin" => Some(Self::SignIn),
            "signup" => Some(Self::SignUp),
            "configurator" => Some(Self::Configurator),
            "feed" => Some(Self::Feed),
            _ => None,
        }
    }

    /// Static descriptor for this route.
    #[must_use]
    pub fn descriptor(self) -> &'static RouteDescriptor {
        match self {
            Self::SignIn => &SIGN_IN,
            Self::SignUp => &SIGN_UP,
            Self::Configurator => &CONFIGURATOR,
            Self::Feed => &FEED,
        }
    }

    #[must_use]
    pub fn requires_auth(self) -> bool {
        self.descriptor().meta.requires_auth
    }

    /// Whether this is one of the credential entry pages.
    #[must_use]
    pub fn is_auth_page(self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; `:id?` marks an optional segment.
    pub path: &'static str,
    pub name: RouteName,
    pub meta: RouteMeta,
}

const SIGN_IN: RouteDescriptor = RouteDescriptor {
    path: "/signin",
    name: RouteName::SignIn,
    meta: RouteMeta { requires_auth: false },
};

const SIGN_UP: RouteDescriptor = RouteDescriptor {
    path: "/signup",
    name: RouteName::SignUp,
    meta: RouteMeta { requires_auth: false },
};

const CONFIGURATOR: RouteDescriptor = RouteDescriptor {
    path: "/configurator/:id?",
    name: RouteName::Configurator,
    meta: RouteMeta { requires_auth: true },
};

const FEED: RouteDescriptor = RouteDescriptor {
    path: "/feed",
    name: RouteName::Feed,
    meta: RouteMeta { requires_auth: true },
};

/// Every route in the app.
pub const ROUTES: &[RouteDescriptor] = &[SIGN_IN, SIGN_UP, CONFIGURATOR, FEED];

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_ROUTE: RouteName = RouteName::SignIn;

/// Where signed-in users land when they hit a credential page.
pub const DEFAULT_AUTHENTICATED_ROUTE: RouteName = RouteName::Configurator;

// =============================================================================
// RESOLUTION
// =============================================================================

/// A concrete navigation target: a route plus its parameter, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: RouteName,
    pub id: Option<String>,
}

impl Location {
    #[must_use]
    pub fn named(name: RouteName) -> Self {
        Self { name, id: None }
    }

    /// Render back to a URL path.
    #[must_use]
    pub fn path(&self) -> String {
        match (self.name, self.id.as_deref()) {
            (RouteName::Configurator, Some(id)) => format!("/configurator/{id}"),
            (RouteName::Configurator, None) => "/configurator".to_owned(),
            (name, _) => name.descriptor().path.to_owned(),
        }
    }
}

/// Match a URL path against the route table.
///
/// Query strings and fragments are ignored, as are repeated or trailing
/// slashes. `/` is an alias for the configurator.
#[must_use]
pub fn resolve(path: &str) -> Option<Location> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let location = match segments.as_slice() {
        [] | ["configurator"] => Location::named(RouteName::Configurator),
        ["configurator", id] => Location {
            name: RouteName::Configurator,
            id: Some((*id).to_owned()),
        },
        ["feed"] => Location::named(RouteName::Feed),
        ["signin"] => Location::named(RouteName::SignIn),
        ["signup"] => Location::named(RouteName::SignUp),
        _ => return None,
    };
    Some(location)
}
