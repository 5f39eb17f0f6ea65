//! Error types for the Shoonya API client.
//!
//! Every failure falls into one of three groups:
//!
//! - **validation** ([`Error::InvalidInput`]): caller-supplied arguments were
//!   rejected before anything was sent
//! - **transport** ([`Error::Http`], [`Error::Json`], [`Error::Api`]): the
//!   round trip could not be completed or returned a non-success status
//! - **authentication** ([`Error::Authentication`]): the server answered a
//!   login attempt but refused it
//!
//! A `Not_Ok` reply to any other call arrives inside a normal response and
//! is data, not an error. [`Error::Rejected`] exists only for callers that
//! opt into treating it as one (see
//! [`ListResponse::into_result`](crate::models::ListResponse::into_result)).

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Shoonya operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Shoonya API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The server answered normally but reported `Not_Ok`
    #[error("Rejected by server: {message}")]
    Rejected {
        /// The server's `emsg`
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// The server refused a login attempt
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the arguments were rejected before any request
    /// was sent.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Returns `true` if the round trip itself failed.
    ///
    /// # Example
    ///
    /// ```
    /// use shoonya_rs::Error;
    ///
    /// fn report(err: &Error) {
    ///     if err.is_transport_error() {
    ///         eprintln!("network problem: {err}");
    ///     }
    /// }
    /// ```
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Json(_) | Error::Api { .. })
    }

    /// Returns `true` if the server answered but rejected the call.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::Config(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response body.
    ///
    /// Noren responses carry their message in `emsg`.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = body
            .get("emsg")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }

    /// Create a rejection from an in-band `Not_Ok` reply.
    pub(crate) fn rejected(body: Value) -> Self {
        let message = body
            .get("emsg")
            .and_then(|m| m.as_str())
            .unwrap_or("Request rejected")
            .to_string();

        Error::Rejected { message, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let invalid = Error::InvalidInput("bad".into());
        assert!(invalid.is_validation_error());
        assert!(!invalid.is_transport_error());
        assert!(!invalid.is_auth_error());

        let auth = Error::Authentication("bad creds".into());
        assert!(auth.is_auth_error());
        assert!(!auth.is_transport_error());

        let api = Error::from_api_response(502, Value::Null);
        assert!(api.is_transport_error());
        assert!(api.is_server_error());
        assert!(!api.is_client_error());
    }

    #[test]
    fn test_rejection_is_not_transport() {
        let err = Error::rejected(serde_json::json!({"stat": "Not_Ok", "emsg": "no data"}));
        assert!(err.is_rejected());
        assert!(!err.is_transport_error());
        assert!(!err.is_auth_error());
        assert!(!err.is_validation_error());
        assert_eq!(err.to_string(), "Rejected by server: no data");
    }

    #[test]
    fn test_from_api_response() {
        let body = serde_json::json!({
            "stat": "Not_Ok",
            "emsg": "Session Expired :  Invalid Session Key"
        });

        let err = Error::from_api_response(400, body);
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Session Expired :  Invalid Session Key");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_api_response_without_message() {
        let err = Error::from_api_response(500, serde_json::json!("oops"));
        assert!(err.to_string().contains("Unknown API error"));
    }
}
