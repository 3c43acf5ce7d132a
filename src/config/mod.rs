//! Configuration module for the POS client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,
    /// Path to the SQLite file holding the session tokens
    pub session_db_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Request timeout; `None` keeps the transport defaults
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = env::var("POS_API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let session_db_path = env::var("POS_SESSION_DB_PATH")
            .unwrap_or_else(|_| "./data/session.sqlite".to_string())
            .into();

        let log_level = env::var("POS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let request_timeout = env::var("POS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    tracing::warn!("Ignoring invalid POS_REQUEST_TIMEOUT_SECS {:?}: {}", v, e);
                    None
                }
            });

        Self {
            base_url,
            session_db_path,
            log_level,
            request_timeout,
        }
    }

    /// Configuration pointing at the given backend, with defaults elsewhere.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_db_path: "./data/session.sqlite".into(),
            log_level: "info".to_string(),
            request_timeout: None,
        }
    }
}
