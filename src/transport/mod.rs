//! Delivery of finished photos to the receiver.
//!
//! [`Transport`] is the seam: [`UploadClient`] uploads over HTTP and
//! [`FileSink`] writes locally. [`Dispatcher`] enforces a single send in
//! flight in front of either.

mod client;
mod dispatch;
mod file;

use std::future::Future;

pub use client::{
    PingResponse, UploadClient, UploadReceipt, DEFAULT_FILENAME, DEFAULT_SERVER_URL, IMAGE_FIELD,
    PING_PATH, SERVER_URL_ENV, UPLOAD_PATH,
};
pub use dispatch::{Dispatcher, SendGate, SendGuard, SendOutcome};
pub use file::FileSink;

/// Something that accepts one encoded image with a filename hint.
pub trait Transport {
    fn send(
        &self,
        jpeg: Vec<u8>,
        filename: &str,
    ) -> impl Future<Output = Result<UploadReceipt, TransportError>>;
}

/// Errors that can occur while delivering a photo.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Server URL not configured")]
    MissingServerUrl,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
