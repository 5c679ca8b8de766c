//! Frame copy utilities.

use image::RgbImage;

use super::types::Frame;
use crate::geometry::PixelRect;

/// Copy the pixels inside `region` out of an RGB frame.
///
/// The region must already be clamped to the frame. Returns `None` if the
/// frame payload is shorter than its geometry claims.
pub fn copy_region(frame: &Frame, region: PixelRect) -> Option<RgbImage> {
    let width = frame.width as usize;
    let bpp = frame.bytes_per_pixel();
    let row_len = region.width as usize * bpp;

    let mut data = Vec::with_capacity(row_len * region.height as usize);
    for y in region.y..region.y + region.height {
        let row_start = (y as usize * width + region.x as usize) * bpp;
        let row = frame.data.get(row_start..row_start + row_len)?;
        data.extend_from_slice(row);
    }

    RgbImage::from_raw(region.width, region.height, data)
}
