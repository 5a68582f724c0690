//! Bag endpoints: list, read, create, update, vote, and the warm-up ping.
//!
//! Bag bodies are opaque `serde_json::Value`s; the server owns their shape.
//! Votes go to `POST /bag/{id}/vote`, the only vote route this client knows.

#[cfg(test)]
#[path = "bags_test.rs"]
mod tests;

use reqwest::{Method, Response};
use serde_json::Value;

use super::{ApiClient, ApiError, Credentials, decode, error_message, send, status_text, unwrap_envelope};

impl ApiClient {
    /// List every bag, unwrapping a `data` envelope when present.
    ///
    /// # Errors
    ///
    /// [`ApiError::Fetch`] carrying the status text on a non-success status,
    /// [`ApiError::Network`] on transport failure.
    pub async fn get_all_bags(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &["bag"], Credentials::Bearer);
        let response = send(request, "get_all_bags").await?;
        let response = check_fetch(response, "bags").await?;
        decode(response, "get_all_bags").await.map(unwrap_envelope)
    }

    /// Read one bag, unwrapping a `data` envelope when present.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get_all_bags`].
    pub async fn get_bag_by_id(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, &["bag", id], Credentials::Bearer);
        let response = send(request, "get_bag_by_id").await?;
        let response = check_fetch(response, "bag").await?;
        decode(response, "get_bag_by_id").await.map(unwrap_envelope)
    }

    /// Create a bag from an opaque payload.
    ///
    /// # Errors
    ///
    /// [`ApiError::Create`] with the body's `message` or else the status
    /// text, [`ApiError::Network`] on transport failure.
    pub async fn create_bag(&self, payload: &Value) -> Result<Value, ApiError> {
        let request = self
            .request(Method::POST, &["bag"], Credentials::Bearer)
            .json(payload);
        let response = send(request, "create_bag").await?;

        let status = response.status();
        if !status.is_success() {
            let message = write_error_message(response).await;
            tracing::error!(status = status.as_u16(), %message, "create bag rejected");
            return Err(ApiError::Create {
                status: status.as_u16(),
                message,
            });
        }
        decode(response, "create_bag").await
    }

    /// Replace a bag's fields with an opaque payload.
    ///
    /// # Errors
    ///
    /// [`ApiError::Update`] with the body's `message` or else the status
    /// text, [`ApiError::Network`] on transport failure.
    pub async fn update_bag(&self, id: &str, payload: &Value) -> Result<Value, ApiError> {
        let request = self
            .request(Method::PUT, &["bag", id], Credentials::Bearer)
            .json(payload);
        let response = send(request, "update_bag").await?;

        let status = response.status();
        if !status.is_success() {
            let message = write_error_message(response).await;
            tracing::error!(status = status.as_u16(), bag_id = id, %message, "update bag rejected");
            return Err(ApiError::Update {
                status: status.as_u16(),
                message,
            });
        }
        decode(response, "update_bag").await
    }

    /// Cast a vote. Returns the decoded response body unmodified.
    ///
    /// # Errors
    ///
    /// [`ApiError::Vote`] carrying the status text on a non-success status,
    /// [`ApiError::Network`] on transport failure.
    pub async fn vote_for_bag(&self, id: &str) -> Result<Value, ApiError> {
        let request = self.request(Method::POST, &["bag", id, "vote"], Credentials::Bearer);
        let response = send(request, "vote_for_bag").await?;

        let status = response.status();
        if !status.is_success() {
            let message = status_text(status);
            tracing::error!(status = status.as_u16(), bag_id = id, %message, "vote rejected");
            return Err(ApiError::Vote {
                status: status.as_u16(),
                message,
            });
        }
        decode(response, "vote_for_bag").await
    }

    /// Bags created by the signed-in user. Empty when no user is stored.
    ///
    /// # Errors
    ///
    /// Whatever the configured [`super::MyBagsSource`] returns; for the
    /// default client-side filter, the errors of `get_all_bags`.
    pub async fn get_my_bags(&self) -> Result<Vec<Value>, ApiError> {
        let Some(user) = self.session.user() else {
            tracing::debug!("no stored user; my bags is empty");
            return Ok(Vec::new());
        };
        self.my_bags.my_bags(self, &user).await
    }

    /// Best-effort request to wake a sleeping backend. Never fails.
    pub async fn wake_up_api(&self) {
        let request = self.request(Method::GET, &[], Credentials::Anonymous);
        match request.send().await {
            Ok(response) => tracing::debug!(status = response.status().as_u16(), "api wake-up answered"),
            Err(e) => tracing::warn!(error = %e, "api wake-up failed"),
        }
    }
}

async fn check_fetch(response: Response, what: &'static str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = status_text(status);
    tracing::error!(status = status.as_u16(), what, %message, "fetch rejected");
    Err(ApiError::Fetch {
        what,
        status: status.as_u16(),
        message,
    })
}

/// Structured `message` from a write-endpoint error body, else status text.
async fn write_error_message(response: Response) -> String {
    let status = response.status();
    error_message(response).await.unwrap_or_else(|| status_text(status))
}
