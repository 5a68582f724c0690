//! In-process HTTP server standing in for the bag API in tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use super::ApiClient;
use crate::config::ClientConfig;
use crate::session::SessionContext;

pub(crate) const API_PREFIX: &str = "/api/v1/default";

/// Serve `api` under [`API_PREFIX`] on an ephemeral port and return the
/// resulting base URL.
pub(crate) async fn spawn(api: Router) -> String {
    let app = Router::new().nest(API_PREFIX, api);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{API_PREFIX}")
}

/// Base URL of a port nothing listens on.
pub(crate) async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}

pub(crate) fn client(base_url: &str, session: SessionContext) -> ApiClient {
    let config = ClientConfig::default().with_api_base_url(base_url).unwrap();
    ApiClient::new(&config, session).unwrap()
}

/// Authorization header values seen by a handler, in arrival order.
#[derive(Clone, Default)]
pub(crate) struct AuthLog(Arc<Mutex<Vec<Option<String>>>>);

impl AuthLog {
    pub(crate) fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.0.lock().unwrap().push(value);
    }

    pub(crate) fn seen(&self) -> Vec<Option<String>> {
        self.0.lock().unwrap().clone()
    }
}
