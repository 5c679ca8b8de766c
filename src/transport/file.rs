//! Local file sink, for rendering without a receiver.

use std::path::{Path, PathBuf};

use super::client::UploadReceipt;
use super::{Transport, TransportError};

/// Writes each sent image to a fixed path instead of uploading it.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for FileSink {
    async fn send(&self, jpeg: Vec<u8>, filename: &str) -> Result<UploadReceipt, TransportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let size = jpeg.len() as u64;
        tokio::fs::write(&self.path, jpeg).await?;
        log::info!("Wrote {} ({} bytes) to {}", filename, size, self.path.display());

        Ok(UploadReceipt {
            success: true,
            message: Some(format!("Saved to {}", self.path.display())),
            size: Some(size),
            error: None,
        })
    }
}
