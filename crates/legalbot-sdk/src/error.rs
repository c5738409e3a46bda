//! Error types for the LegalBot SDK.

use legalbot_domain::TransportError;
use thiserror::Error;

/// SDK construction errors
///
/// Submitting a query never fails; these only arise while wiring a client.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Backend base URL could not be parsed
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// HTTP client could not be built
    #[error("Client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::Client(e.to_string())
    }
}

/// Classify a reqwest failure for the session layer
pub(crate) fn transport_error(e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() {
        TransportError::Connection(e.to_string())
    } else if e.is_status() {
        TransportError::Status {
            status: e.status().map(|s| s.as_u16()).unwrap_or_default(),
            body: String::new(),
        }
    } else if e.is_decode() || e.is_body() {
        TransportError::Decode(e.to_string())
    } else if e.is_request() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}
