//! Frame capture: turning the live frame into a still source image.
//!
//! - Frame sources via the [`FrameSource`] trait ([`StillFrameSource`] for files)
//! - Still capture via [`capture`]

mod capture;
mod frame_utils;
mod source;
mod types;

pub use capture::capture;
pub use source::{FrameSource, StillFrameSource};
pub use types::{CameraError, CaptureError, Frame, FrameFormat, SourceImage};
