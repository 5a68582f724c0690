//! REST client for the bag voting API.
//!
//! ARCHITECTURE
//! ============
//! [`ApiClient`] owns the HTTP client, the parsed API base and a handle to
//! the session. Operations are split by resource: `auth` (login, register,
//! logout) and `bags` (CRUD, votes, warm-up). "My bags" is delegated to a
//! [`MyBagsSource`] so the client-side filter can later be swapped for a
//! server query without touching callers.
//!
//! ERROR HANDLING
//! ==============
//! Every operation logs failures with `tracing` and returns them; nothing is
//! retried or swallowed except by `wake_up_api`.

pub mod auth;
pub mod bags;
pub mod error;
pub mod ownership;

#[cfg(test)]
pub(crate) mod test_server;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::session::SessionContext;

pub use auth::NewUser;
pub use error::ApiError;
pub use ownership::{ClientSideFilter, MyBagsSource, OwnershipMatch};

/// Whether a request may carry the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    Anonymous,
    Bearer,
}

/// Client for one API deployment, bound to one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
    my_bags: Arc<dyn MyBagsSource>,
}

impl ApiClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL cannot carry paths or
    /// the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| ApiError::Config(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{base_url} cannot be used as an API base")));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session,
            my_bags: Arc::new(ClientSideFilter),
        })
    }

    /// Replace the strategy used by `get_my_bags`.
    #[must_use]
    pub fn with_my_bags_source(mut self, source: Arc<dyn MyBagsSource>) -> Self {
        self.my_bags = source;
        self
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], credentials: Credentials) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!(%method, %url, "api request");
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if credentials == Credentials::Bearer {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }
        }
        request
    }
}

// =============================================================================
// RESPONSE HELPERS
// =============================================================================

async fn send(request: RequestBuilder, operation: &'static str) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| {
        tracing::error!(error = %e, operation, "api request failed");
        ApiError::Network(e.to_string())
    })
}

async fn decode(response: Response, operation: &'static str) -> Result<Value, ApiError> {
    response.json::<Value>().await.map_err(|e| {
        tracing::error!(error = %e, operation, "api response decode failed");
        ApiError::Decode(e.to_string())
    })
}

/// Reason phrase for `status`, e.g. `"Not Found"`; the numeric code when
/// the status has no registered phrase.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

/// The `message` field of a JSON error body, if there is a non-empty one.
async fn error_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    parse_error_message(&body)
}

fn parse_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// `data` when the body is an envelope with a truthy `data`, else the body.
fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut fields) if fields.get("data").is_some_and(is_truthy) => {
            fields.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
