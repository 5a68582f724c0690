//! Authentication endpoints: login, registration, logout.
//!
//! Login is the only operation that creates a session. Token and user are
//! written to the store independently; whichever the response lacks is
//! simply not written.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{ApiClient, ApiError, Credentials, decode, error_message, send};
use crate::session::UserInfo;

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Account creation payload for `POST /user`.
///
/// Fields in `extra` are sent alongside the named ones, as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiClient {
    /// Authenticate and persist the returned session.
    ///
    /// Returns the decoded response body as the API sent it.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] with the server's `message` (or `"Login failed"`)
    /// on a non-success status, [`ApiError::Network`] on transport failure,
    /// [`ApiError::Store`] if the session cannot be written.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, &["user", "auth"], Credentials::Anonymous)
            .json(&LoginRequest { email, password });
        let response = send(request, "login").await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| LOGIN_FALLBACK.to_owned());
            tracing::error!(status = status.as_u16(), %message, "login rejected");
            return Err(ApiError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        let data = decode(response, "login").await?;
        self.persist_session(&data)?;
        Ok(data)
    }

    /// Create an account. Does not sign in; call [`ApiClient::login`] next.
    ///
    /// # Errors
    ///
    /// [`ApiError::Auth`] with the server's `message` (or
    /// `"Registration failed"`) on a non-success status,
    /// [`ApiError::Network`] on transport failure.
    pub async fn register(&self, user: &NewUser) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, &["user"], Credentials::Anonymous)
            .json(user);
        let response = send(request, "register").await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response)
                .await
                .unwrap_or_else(|| REGISTER_FALLBACK.to_owned());
            tracing::error!(status = status.as_u16(), %message, "registration rejected");
            return Err(ApiError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        decode(response, "register").await
    }

    /// Forget the local session. No network call; always succeeds.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("session cleared");
    }

    fn persist_session(&self, data: &Value) -> Result<(), ApiError> {
        if let Some(token) = data.get("token").and_then(Value::as_str) {
            self.session.save_token(token).inspect_err(|e| {
                tracing::error!(error = %e, "failed to persist session token");
            })?;
        }

        let user = data.get("user").cloned().and_then(UserInfo::from_json);
        if let Some(user) = &user {
            self.session.save_user(user).inspect_err(|e| {
                tracing::error!(error = %e, "failed to persist session user");
            })?;
        }

        tracing::info!(
            user_id = user.as_ref().and_then(|u| u.id.as_deref()).unwrap_or("-"),
            "session created"
        );
        Ok(())
    }
}
