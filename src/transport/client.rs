//! UploadClient - sends finished photos to the desktop receiver.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{Transport, TransportError};

/// The environment variable that overrides the receiver URL.
pub const SERVER_URL_ENV: &str = "SNAPPASTE_SERVER_URL";

/// Default receiver address (the desktop side listens on port 8080).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Upload endpoint path on the receiver.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Health check endpoint path on the receiver.
pub const PING_PATH: &str = "/api/ping";

/// Multipart field name the receiver reads the image from.
pub const IMAGE_FIELD: &str = "image";

/// Default filename hint for uploads.
pub const DEFAULT_FILENAME: &str = "photo.jpg";

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Confirmation returned by the receiver after an upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Size in bytes the receiver got
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response from the health check endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PingResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// HTTP client for the receiver's upload API.
#[derive(Debug, Clone)]
pub struct UploadClient {
    base_url: String,
    upload_path: String,
    ping_path: String,
    http_client: reqwest::Client,
}

impl UploadClient {
    /// Create a client for the receiver at `base_url` using the default paths.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_paths(base_url, UPLOAD_PATH, PING_PATH)
    }

    /// Create a client with custom endpoint paths.
    pub fn with_paths(
        base_url: impl Into<String>,
        upload_path: impl Into<String>,
        ping_path: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(TransportError::MissingServerUrl);
        }

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_path: upload_path.into(),
            ping_path: ping_path.into(),
            http_client,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_path)
    }

    /// Full URL of the health check endpoint.
    pub fn ping_url(&self) -> String {
        format!("{}{}", self.base_url, self.ping_path)
    }

    /// Upload one encoded image as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` with the body verbatim for any
    /// non-success status, `TransportError::Rejected` if the receiver
    /// answered but reported failure, or `TransportError::Http` if the
    /// request could not be completed.
    pub async fn upload(&self, jpeg: Vec<u8>, filename: &str) -> Result<UploadReceipt, TransportError> {
        let size = jpeg.len();
        let part = Part::bytes(jpeg)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = self.upload_url();
        log::debug!("Uploading {} bytes to {}", size, url);

        let response = self.http_client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("Upload rejected with status {}: {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let receipt: UploadReceipt = response.json().await?;
        if !receipt.success {
            let reason = receipt
                .error
                .clone()
                .unwrap_or_else(|| "receiver reported failure".to_string());
            log::warn!("Upload not accepted: {}", reason);
            return Err(TransportError::Rejected(reason));
        }

        log::info!(
            "Upload accepted ({} bytes{})",
            receipt.size.unwrap_or(size as u64),
            receipt
                .message
                .as_deref()
                .map(|m| format!(", {}", m))
                .unwrap_or_default()
        );
        Ok(receipt)
    }

    /// Check that the receiver is reachable.
    pub async fn ping(&self) -> Result<PingResponse, TransportError> {
        let response = self.http_client.get(self.ping_url()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

impl Transport for UploadClient {
    async fn send(&self, jpeg: Vec<u8>, filename: &str) -> Result<UploadReceipt, TransportError> {
        self.upload(jpeg, filename).await
    }
}
