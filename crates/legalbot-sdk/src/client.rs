//! HTTP transport for the LegalBot backend.

use crate::error::{transport_error, SdkError};
use async_trait::async_trait;
use legalbot_domain::{Transport, TransportError};
use serde_json::Value;
use tracing::debug;

/// Posts JSON requests to a backend over HTTP
///
/// No request timeout and no retries: a hung backend leaves the caller
/// awaiting indefinitely and the controller stays busy.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `base_url`, e.g. `http://localhost:8080`
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| SdkError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder().build()?;
        Ok(Self { base_url, client })
    }

    /// Normalized base URL, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
