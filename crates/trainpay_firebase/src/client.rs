//! Cloud Storage JSON API client.
//!
//! Only the simple media upload is needed: one request carrying the whole
//! object, overwriting whatever is stored under the same name.

use bytes::Bytes;
use reqwest::{header, Client};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::TokenSource;
use crate::error::StorageError;

/// Client for uploading objects to a single bucket
pub struct StorageClient {
    /// HTTP client for making requests to the Storage API
    http: Client,
    /// `https://storage.googleapis.com`, or `http://{emulator}`
    api_base: String,
    bucket: String,
    tokens: Arc<dyn TokenSource>,
}

impl StorageClient {
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        bucket: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            bucket: bucket.into(),
            tokens,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Uploads `data` as `name`, recording `content_type` as the object's metadata.
    pub async fn upload(
        &self,
        name: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o",
            self.api_base,
            urlencoding::encode(&self.bucket)
        );
        let token = self.tokens.access_token().await?;
        let size = data.len();

        debug!("[Storage] Uploading {} ({} bytes) to {}", name, size, url);

        let response = self
            .http
            .post(&url)
            .query(&[("uploadType", "media"), ("name", name)])
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("[Storage] Stored gs://{}/{} ({} bytes)", self.bucket, name, size);
            return Ok(());
        }

        let body_text = response.text().await?;
        let message = match serde_json::from_str::<Value>(&body_text) {
            Ok(json_body) => json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or(&body_text)
                .to_string(),
            Err(_) => body_text,
        };

        Err(StorageError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}
