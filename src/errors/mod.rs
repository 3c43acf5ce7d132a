//! Error handling module for the POS client.
//!
//! Provides one error type for every failure a screen can surface, with stable
//! error codes and a mapping from backend failure bodies.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Message shown when the backend gives no usable `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const EMPTY_ORDER: &str = "EMPTY_ORDER";
    pub const API_ERROR: &str = "API_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const NOT_AUTHENTICATED: &str = "NOT_AUTHENTICATED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
}

/// Coarse classification used by screens to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caught client-side before any network call.
    Validation,
    /// Transport failure or non-2xx response.
    Network,
    /// The user has to log in again.
    Session,
}

/// Client error type.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Input rejected before any request was made
    Validation(String),
    /// Submission attempted with no dish and no add-on selected
    EmptyOrder,
    /// Non-2xx response from the backend
    Api { status: u16, message: String },
    /// Connection, TLS or timeout failure
    Transport(String),
    /// Response body did not match the expected schema
    Decode(String),
    /// Token refresh failed; stored tokens were cleared
    SessionExpired,
    /// No token pair is stored
    NotAuthenticated,
    /// Token store failure
    Storage(String),
}

impl ClientError {
    /// Build an API error from a failed response, preferring the body's `error` field.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::EmptyOrder => codes::EMPTY_ORDER,
            ClientError::Api { .. } => codes::API_ERROR,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Decode(_) => codes::DECODE_ERROR,
            ClientError::SessionExpired => codes::SESSION_EXPIRED,
            ClientError::NotAuthenticated => codes::NOT_AUTHENTICATED,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::EmptyOrder => "Add at least one dish or add-on".to_string(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Decode(msg) => msg.clone(),
            ClientError::SessionExpired => "Session expired. Please log in again.".to_string(),
            ClientError::NotAuthenticated => "Not logged in".to_string(),
            ClientError::Storage(msg) => msg.clone(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) | ClientError::EmptyOrder => ErrorKind::Validation,
            ClientError::SessionExpired | ClientError::NotAuthenticated => ErrorKind::Session,
            ClientError::Api { .. }
            | ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Storage(_) => ErrorKind::Network,
        }
    }

    /// Text for the transient notification shown to the user.
    ///
    /// Internal details (decode and storage failures) collapse to the generic message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Decode(_) | ClientError::Storage(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            ClientError::Transport(_) => {
                "Could not reach the server. Check your connection.".to_string()
            }
            other => other.message(),
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Api { status, message } => {
                write!(f, "{} ({}): {}", self.error_code(), status, message)
            }
            _ => write!(f, "{}: {}", self.error_code(), self.message()),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP transport error: {:?}", err);
        if err.is_decode() {
            ClientError::Decode(format!("Response decode error: {}", err))
        } else {
            ClientError::Transport(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ClientError::Decode(format!("JSON error: {}", err))
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Token store error: {:?}", err);
        ClientError::Storage(format!("Token store error: {}", err))
    }
}

/// Failure body returned by the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_preferred() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            br#"{"error": "Dish is out of stock"}"#,
        );
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: "Dish is out of stock".to_string()
            }
        );
    }

    #[test]
    fn test_generic_fallback_for_unparseable_body() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, b"<html>502</html>");
        assert_eq!(err.message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_generic_fallback_for_blank_error() {
        let err = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error": " "}"#);
        assert_eq!(err.message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ClientError::EmptyOrder.kind(), ErrorKind::Validation);
        assert_eq!(ClientError::SessionExpired.kind(), ErrorKind::Session);
        assert_eq!(
            ClientError::Transport("refused".to_string()).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn test_user_message_hides_decode_details() {
        let err = ClientError::Decode("missing field `price`".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().starts_with(codes::DECODE_ERROR));
    }
}
