//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://laysapi-uyjc.onrender.com/api/v1/default";
pub const DEFAULT_SESSION_PATH: &str = ".bagvote/session.json";

pub const ENV_API_BASE_URL: &str = "BAGVOTE_API_BASE_URL";
pub const ENV_SESSION_PATH: &str = "BAGVOTE_SESSION_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "BAGVOTE_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute API base, e.g. `https://host/api/v1/default`. No trailing `/`.
    pub api_base_url: String,
    /// File backing the session store.
    pub session_path: PathBuf,
    /// Whole-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BAGVOTE_API_BASE_URL`: default [`DEFAULT_API_BASE_URL`]
    /// - `BAGVOTE_SESSION_PATH`: default [`DEFAULT_SESSION_PATH`]
    /// - `BAGVOTE_REQUEST_TIMEOUT_SECS`: unset or `0` disables the timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or
    /// the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match std::env::var(ENV_API_BASE_URL) {
            Ok(raw) => normalize_base_url(ENV_API_BASE_URL, &raw)?,
            Err(_) => DEFAULT_API_BASE_URL.to_owned(),
        };
        let session_path = std::env::var(ENV_SESSION_PATH)
            .map_or_else(|_| PathBuf::from(DEFAULT_SESSION_PATH), PathBuf::from);
        let request_timeout = parse_timeout(std::env::var(ENV_REQUEST_TIMEOUT_SECS).ok().as_deref())?;

        Ok(Self {
            api_base_url,
            session_path,
            request_timeout,
        })
    }

    /// Replace the API base URL, validating it the same way as `from_env`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an absolute http(s) URL.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(ENV_API_BASE_URL, raw)?;
        Ok(self)
    }
}

fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::Invalid {
        var,
        message: format!("{trimmed:?}: {e}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var,
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
        var: ENV_REQUEST_TIMEOUT_SECS,
        message: format!("{raw:?}: {e}"),
    })?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}
