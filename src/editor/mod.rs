//! On-device editing step: rotation and crop box.

mod drag;
mod rotation;
mod session;

pub use drag::{DragKind, DragState};
pub use rotation::Rotation;
pub use session::{CropSettings, EditSession, DEFAULT_CROP_MARGIN, DEFAULT_MIN_CROP_SIZE};
