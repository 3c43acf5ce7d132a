//! Authentication payloads.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by the backend.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// Tokens stay out of logs.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Refresh response; the refresh token is only present when the backend rotates it.
#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl RefreshResponse {
    /// Merge into a new pair, keeping the old refresh token when none was issued.
    pub fn into_pair(self, previous_refresh: String) -> TokenPair {
        TokenPair {
            access: self.access,
            refresh: self.refresh.unwrap_or(previous_refresh),
        }
    }
}
