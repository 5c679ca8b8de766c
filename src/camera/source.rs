//! Live frame sources.

use std::future::Future;
use std::path::Path;

use image::RgbImage;

use super::types::{CameraError, Frame};
use crate::zoom::ZoomCapabilities;

/// Anything that can hand out the current live frame.
///
/// Acquiring a frame and applying a zoom constraint are suspension points;
/// callers await them from the single interactive context.
pub trait FrameSource {
    /// Get the frame currently on screen.
    fn current_frame(&mut self) -> impl Future<Output = Result<Frame, CameraError>>;

    /// Native zoom range, if the device has one.
    fn zoom_capabilities(&self) -> Option<ZoomCapabilities> {
        None
    }

    /// Ask the device to zoom natively.
    fn apply_zoom(&mut self, factor: f64) -> impl Future<Output = Result<(), CameraError>> {
        let _ = factor;
        async { Err(CameraError::ZoomUnsupported) }
    }
}

/// A frame source backed by a single still image.
///
/// Used when no camera is available: the picked file stands in for the
/// live frame on every shutter press.
#[derive(Debug, Clone)]
pub struct StillFrameSource {
    image: RgbImage,
}

impl StillFrameSource {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decode an image file (JPEG or PNG) into a still source.
    pub fn open(path: &Path) -> Result<Self, CameraError> {
        let decoded = image::open(path).map_err(|e| CameraError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!(
            "Loaded still frame source {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Self::new(decoded.to_rgb8()))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl FrameSource for StillFrameSource {
    async fn current_frame(&mut self) -> Result<Frame, CameraError> {
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(CameraError::NoFrame("still image is empty".to_string()));
        }
        Ok(Frame::from_rgb_image(&self.image))
    }
}
