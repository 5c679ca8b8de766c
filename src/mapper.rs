//! Mapping a display-space crop rectangle back onto source pixels.
//!
//! The canvas shows the source rotated clockwise by the session rotation
//! and uniformly scaled. Mapping undoes the scale, then applies the inverse
//! of the rotation the compositor performs. The four rotation arms below
//! must stay in exact correspondence with `compositor::rotate`.

use crate::editor::{EditSession, Rotation};
use crate::geometry::{PixelRect, Rect, Size};

/// The crop maps to an empty source region.
///
/// Only a corrupted edit session can produce this.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("Crop maps to a degenerate source region ({width}x{height})")]
    DegenerateRegion { width: f64, height: f64 },
}

/// Map the session's current crop rectangle into source pixels.
///
/// Returns `Ok(None)` when crop mode is off.
pub fn map_session_crop(session: &EditSession) -> Result<Option<PixelRect>, MapError> {
    session
        .crop_rect()
        .map(|crop| {
            let source = session.source_size();
            map_to_source(
                source.width as u32,
                source.height as u32,
                session.rotation(),
                session.canvas_size(),
                &crop,
            )
        })
        .transpose()
}

/// Map a canvas-space crop into a clamped pixel rectangle of the source.
///
/// # Errors
/// * `MapError::DegenerateRegion` - The mapped width or height is not positive
pub fn map_to_source(
    source_width: u32,
    source_height: u32,
    rotation: Rotation,
    canvas: Size,
    crop: &Rect,
) -> Result<PixelRect, MapError> {
    let mapped = source_rect(source_width, source_height, rotation, canvas, crop);
    if !(mapped.width > 0.0 && mapped.height > 0.0) {
        return Err(MapError::DegenerateRegion {
            width: mapped.width,
            height: mapped.height,
        });
    }

    let pixels = PixelRect::from_rect_clamped(&mapped, source_width, source_height);
    if pixels.width == 0 || pixels.height == 0 {
        return Err(MapError::DegenerateRegion {
            width: pixels.width as f64,
            height: pixels.height as f64,
        });
    }
    Ok(pixels)
}

/// Unclamped source-space rectangle for a canvas-space crop.
pub fn source_rect(
    source_width: u32,
    source_height: u32,
    rotation: Rotation,
    canvas: Size,
    crop: &Rect,
) -> Rect {
    let sw = source_width as f64;
    let sh = source_height as f64;
    let display = if rotation.swaps_axes() {
        Size::new(sh, sw)
    } else {
        Size::new(sw, sh)
    };

    // canvas pixels -> rotated display pixels at capture resolution
    let c = crop.scaled(display.width / canvas.width, display.height / canvas.height);

    match rotation {
        Rotation::Deg0 => c,
        Rotation::Deg90 => Rect::new(c.y, sh - c.x - c.width, c.height, c.width),
        Rotation::Deg180 => Rect::new(sw - c.x - c.width, sh - c.y - c.height, c.width, c.height),
        Rotation::Deg270 => Rect::new(sw - c.y - c.height, c.x, c.height, c.width),
    }
}
