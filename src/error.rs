//! Error types for the daraja library

use thiserror::Error;

/// Result type alias for daraja operations
pub type Result<T> = std::result::Result<T, DarajaError>;

/// Main error type for daraja operations
#[derive(Error, Debug)]
pub enum DarajaError {
    /// Consumer credentials rejected by the token endpoint
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Connection or timeout failure reaching the remote host
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status from the remote service
    #[error("Request failed with status {status}: {body}")]
    Response {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not valid JSON
    #[error("Malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Callback URL failed local validation
    #[error("Invalid URL: {value}")]
    InvalidUrl { value: String },

    /// Phone number is not a valid Safaricom number
    #[error("Invalid phone number: {value}")]
    InvalidPhoneNumber { value: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DarajaError {
    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a non-success response error
    pub fn response(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Response {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url(value: impl Into<String>) -> Self {
        Self::InvalidUrl {
            value: value.into(),
        }
    }

    /// Create an invalid phone number error
    pub fn invalid_phone_number(value: impl Into<String>) -> Self {
        Self::InvalidPhoneNumber {
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// Transport-level failures are network errors. Response bodies are decoded
// with serde_json directly, so parse failures never arrive through reqwest.
impl From<reqwest::Error> for DarajaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err)
    }
}
