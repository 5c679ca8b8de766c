//! Final raster composition and encoding.
//!
//! Extraction happens in source space first, then the extracted region is
//! rotated into place, so the output is exactly the cropped display region
//! at capture resolution.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};

use crate::camera::SourceImage;
use crate::editor::Rotation;
use crate::geometry::PixelRect;

/// JPEG quality used for uploads (0-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// The rendered image handed to transport.
#[derive(Debug, Clone)]
pub struct OutputRaster {
    image: RgbImage,
}

impl OutputRaster {
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

/// Errors from encoding the output raster.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
    #[error("Cannot encode an empty {width}x{height} raster")]
    Empty { width: u32, height: u32 },
}

/// Render the output raster.
///
/// Without a crop the whole source is rotated, giving `SH x SW` for 90/270
/// and `SW x SH` otherwise. With a crop only `source_rect` is extracted and
/// then rotated.
pub fn render(
    source: &SourceImage,
    rotation: Rotation,
    source_rect: Option<PixelRect>,
) -> OutputRaster {
    let image = match source_rect {
        Some(rect) => {
            let region =
                imageops::crop_imm(source.image(), rect.x, rect.y, rect.width, rect.height)
                    .to_image();
            rotate(&region, rotation)
        }
        None => rotate(source.image(), rotation),
    };

    log::debug!(
        "Rendered {}x{} output ({} rotation, crop: {})",
        image.width(),
        image.height(),
        rotation,
        source_rect.map_or_else(|| "none".to_string(), |r| r.to_string())
    );
    OutputRaster { image }
}

/// Rotate clockwise by `rotation`.
pub fn rotate(image: &RgbImage, rotation: Rotation) -> RgbImage {
    match rotation {
        Rotation::Deg0 => image.clone(),
        Rotation::Deg90 => imageops::rotate90(image),
        Rotation::Deg180 => imageops::rotate180(image),
        Rotation::Deg270 => imageops::rotate270(image),
    }
}

/// Encode the raster as a lossy JPEG at `quality` (clamped to 1-100).
pub fn encode_jpeg(raster: &OutputRaster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(EncodeError::Empty {
            width: raster.width(),
            height: raster.height(),
        });
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
        encoder.encode_image(&raster.image)?;
    }
    log::debug!("Encoded {} byte JPEG at quality {}", bytes.len(), quality);
    Ok(bytes)
}
