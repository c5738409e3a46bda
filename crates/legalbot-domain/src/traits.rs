//! Trait definitions for external interactions
//!
//! These traits define the boundary between session logic and the backend.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a parsed 2xx JSON body from the backend
///
/// Every variant is handled identically by the session layer (one fixed
/// fallback message); the distinction only feeds logs.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network-level failure (DNS, refused connection, reset, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Anything else
    #[error("Transport error: {0}")]
    Other(String),
}

/// Trait for posting a JSON request to the backend
///
/// Implemented by the infrastructure layer (legalbot-sdk)
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` and return the parsed JSON of a 2xx response
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Transport for Echo {
        async fn post_json(
            &self,
            path: &str,
            body: serde_json::Value,
        ) -> Result<serde_json::Value, TransportError> {
            if path == "/down" {
                return Err(TransportError::Connection("refused".to_string()));
            }
            Ok(serde_json::json!({ "path": path, "body": body }))
        }
    }

    #[tokio::test]
    async fn test_transport_is_object_safe() {
        let transport: Box<dyn Transport> = Box::new(Echo);
        let value = transport
            .post_json("/query/ipc", serde_json::json!({"query": "theft"}))
            .await
            .unwrap();
        assert_eq!(value["path"], "/query/ipc");
        assert_eq!(value["body"]["query"], "theft");

        let err = transport.post_json("/down", serde_json::Value::Null).await.unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
    }

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
