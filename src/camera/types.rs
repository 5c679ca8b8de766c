//! Camera frame types and data structures.

use std::time::Instant;

use image::RgbImage;

/// Pixel format of a live frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
}

/// A frame pulled from the live source.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data, row-major
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: FrameFormat,
    /// Timestamp when frame was acquired
    pub timestamp: Instant,
}

impl Frame {
    /// Build an RGB frame from an already decoded image.
    pub fn from_rgb_image(image: &RgbImage) -> Self {
        Self {
            data: image.as_raw().clone(),
            width: image.width(),
            height: image.height(),
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    /// Get the number of bytes per pixel (3 for RGB).
    pub fn bytes_per_pixel(&self) -> usize {
        match self.format {
            FrameFormat::Rgb => 3,
        }
    }

    /// True when the payload length matches the declared geometry.
    pub fn is_decodable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == self.width as usize * self.height as usize * self.bytes_per_pixel()
    }
}

/// The still raster produced by one shutter press.
///
/// Immutable once captured; the editor and compositor only read it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbImage,
}

impl SourceImage {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

/// Errors reported by a frame source.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// The source had no frame to hand out (e.g. device disconnected)
    #[error("No frame available: {0}")]
    NoFrame(String),
    /// The source refused a zoom constraint
    #[error("Zoom constraint rejected: {0}")]
    ZoomRejected(String),
    /// The source has no native zoom control
    #[error("Native zoom not supported")]
    ZoomUnsupported,
    /// Failed to load a still image used as a frame source
    #[error("Failed to open image '{path}': {message}")]
    OpenFailed { path: String, message: String },
}

/// Errors from a single capture.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The source yielded nothing at call time
    #[error("Capture failed: {0}")]
    NoFrame(#[from] CameraError),
    /// The frame payload does not match its declared size or format
    #[error("Capture failed: frame {width}x{height} has {len} bytes")]
    Undecodable { width: u32, height: u32, len: usize },
    /// The requested region does not intersect the frame
    #[error("Capture failed: empty capture region")]
    EmptyRegion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bytes_per_pixel() {
        let frame = Frame {
            data: vec![0; 6], // 2 RGB pixels
            width: 2,
            height: 1,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        };
        assert_eq!(frame.bytes_per_pixel(), 3);
        assert!(frame.is_decodable());
    }

    #[test]
    fn test_frame_truncated_payload_not_decodable() {
        let frame = Frame {
            data: vec![0; 5],
            width: 2,
            height: 1,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        };
        assert!(!frame.is_decodable());
    }

    #[test]
    fn test_frame_from_rgb_image() {
        let image = RgbImage::from_pixel(4, 3, image::Rgb([9, 8, 7]));
        let frame = Frame::from_rgb_image(&image);
        assert_eq!((frame.width, frame.height), (4, 3));
        assert_eq!(frame.data.len(), 36);
        assert_eq!(&frame.data[..3], &[9, 8, 7]);
    }

    #[test]
    fn test_camera_error_display() {
        assert_eq!(
            CameraError::NoFrame("unplugged".to_string()).to_string(),
            "No frame available: unplugged"
        );
        assert_eq!(
            CameraError::ZoomUnsupported.to_string(),
            "Native zoom not supported"
        );
    }

    #[test]
    fn test_capture_error_wraps_camera_error() {
        let err: CaptureError = CameraError::NoFrame("gone".to_string()).into();
        assert!(err.to_string().contains("gone"));
    }
}
