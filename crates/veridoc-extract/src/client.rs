//! HTTP client for the remote extraction service.
//!
//! The service is an opaque oracle: document bytes in, raw JSON payload out.
//! Callers adapt the payload into a [`veridoc_core::Snapshot`] with
//! [`crate::adapt::adapt_payload`] before committing it to the ledger, and
//! wrap the whole call in the recovery policy via
//! [`crate::extract_snapshot`].

use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed extraction payload: {0}")]
    Payload(String),
}

/// Client for the extraction service's `/api/extract` endpoint.
pub struct ExtractionClient {
    client: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    /// Create a client for the given service base URL.
    ///
    /// `base_url` should be like `http://localhost:5100` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit document bytes for extraction and return the raw JSON payload.
    ///
    /// `document_type_hint` narrows the service's field templates when the
    /// caller already knows what kind of document this is.
    pub async fn extract(
        &self,
        document: Vec<u8>,
        document_type_hint: Option<&str>,
    ) -> Result<Value, ExtractError> {
        let mut url = format!("{}/api/extract", self.base_url);
        if let Some(hint) = document_type_hint {
            url.push_str(&format!("?documentType={hint}"));
        }

        info!(url = %url, bytes = document.len(), "submitting document for extraction");
        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/octet-stream")
            .body(document)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExtractError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await?;
        info!("extraction payload received");
        Ok(payload)
    }
}
