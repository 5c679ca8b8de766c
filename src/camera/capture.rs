//! Still capture from a live frame source.

use super::frame_utils::copy_region;
use super::source::FrameSource;
use super::types::{CaptureError, SourceImage};
use crate::geometry::{PixelRect, Size};
use crate::zoom::CaptureRegion;

/// Grab the current frame and copy the zoom region out of it.
///
/// With a centered (software zoom) region the result is sized to the region,
/// not the frame. Failures are reported once; nothing is retried here.
///
/// # Errors
/// * `CaptureError::NoFrame` - The source had no frame at call time
/// * `CaptureError::Undecodable` - The frame payload is malformed
/// * `CaptureError::EmptyRegion` - The region rounds to zero pixels
pub async fn capture<S: FrameSource>(
    source: &mut S,
    region: CaptureRegion,
) -> Result<SourceImage, CaptureError> {
    let frame = source.current_frame().await?;

    if !frame.is_decodable() {
        return Err(CaptureError::Undecodable {
            width: frame.width,
            height: frame.height,
            len: frame.data.len(),
        });
    }

    let frame_size = Size::new(frame.width as f64, frame.height as f64);
    let pixels = PixelRect::from_rect_clamped(&region.resolve(frame_size), frame.width, frame.height);
    if pixels.width == 0 || pixels.height == 0 {
        return Err(CaptureError::EmptyRegion);
    }

    let image = copy_region(&frame, pixels).ok_or(CaptureError::Undecodable {
        width: frame.width,
        height: frame.height,
        len: frame.data.len(),
    })?;

    log::debug!(
        "Captured {}x{} still from {}x{} frame (region {})",
        image.width(),
        image.height(),
        frame.width,
        frame.height,
        pixels
    );
    Ok(SourceImage::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraError, Frame, FrameFormat, StillFrameSource};
    use image::{Rgb, RgbImage};
    use std::time::Instant;

    struct BrokenSource;

    impl FrameSource for BrokenSource {
        async fn current_frame(&mut self) -> Result<Frame, CameraError> {
            Err(CameraError::NoFrame("device disconnected".to_string()))
        }
    }

    struct CorruptSource;

    impl FrameSource for CorruptSource {
        async fn current_frame(&mut self) -> Result<Frame, CameraError> {
            Ok(Frame {
                data: vec![0; 7],
                width: 4,
                height: 4,
                format: FrameFormat::Rgb,
                timestamp: Instant::now(),
            })
        }
    }

    /// 8x4 image whose red channel encodes x and green channel encodes y.
    fn coordinate_image() -> RgbImage {
        RgbImage::from_fn(8, 4, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[tokio::test]
    async fn test_capture_full_frame() {
        let mut source = StillFrameSource::new(coordinate_image());
        let still = capture(&mut source, CaptureRegion::FullFrame).await.unwrap();
        assert_eq!((still.width(), still.height()), (8, 4));
    }

    #[tokio::test]
    async fn test_capture_software_zoom_region() {
        let mut source = StillFrameSource::new(coordinate_image());
        let still = capture(&mut source, CaptureRegion::Centered { factor: 2.0 })
            .await
            .unwrap();
        // 8/2 x 4/2, offset (2, 1)
        assert_eq!((still.width(), still.height()), (4, 2));
        assert_eq!(still.image().get_pixel(0, 0), &Rgb([2, 1, 0]));
        assert_eq!(still.image().get_pixel(3, 1), &Rgb([5, 2, 0]));
    }

    #[tokio::test]
    async fn test_capture_reports_missing_frame() {
        let result = capture(&mut BrokenSource, CaptureRegion::FullFrame).await;
        assert!(matches!(result, Err(CaptureError::NoFrame(_))));
    }

    #[tokio::test]
    async fn test_capture_reports_corrupt_frame() {
        let result = capture(&mut CorruptSource, CaptureRegion::FullFrame).await;
        assert!(matches!(result, Err(CaptureError::Undecodable { len: 7, .. })));
    }
}
