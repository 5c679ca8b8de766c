//! Zoom handling for the live preview.
//!
//! A zoom factor is either pushed to the device as a native constraint or,
//! when the device has no zoom control (or refused one), turned into a
//! centered software crop region that capture applies to each still.

use crate::camera::{CameraError, FrameSource};
use crate::geometry::{Rect, Size};

/// Zoom range advertised by a device, or the software fallback range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomCapabilities {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ZoomCapabilities {
    /// Software zoom range used when the device reports nothing.
    pub const SOFTWARE: ZoomCapabilities = ZoomCapabilities {
        min: 1.0,
        max: 5.0,
        step: 0.1,
    };

    /// Finite, `0 < min <= max`, and a positive step.
    pub fn is_usable(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min > 0.0
            && self.max >= self.min
            && self.step > 0.0
    }
}

impl Default for ZoomCapabilities {
    fn default() -> Self {
        Self::SOFTWARE
    }
}

/// Current zoom factor and the range it may move in.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    factor: f64,
    min_factor: f64,
    max_factor: f64,
    step: f64,
    native_supported: bool,
}

impl ZoomState {
    /// Build the state once device capabilities are known.
    ///
    /// A device range wins over the software range and marks zoom as native.
    pub fn new(native: Option<ZoomCapabilities>, software: ZoomCapabilities) -> Self {
        let software = if software.is_usable() {
            software
        } else {
            ZoomCapabilities::SOFTWARE
        };
        let (caps, native_supported) = match native {
            Some(caps) if caps.is_usable() && caps.max > caps.min => (caps, true),
            _ => (software, false),
        };
        Self {
            factor: caps.min,
            min_factor: caps.min,
            max_factor: caps.max,
            step: caps.step,
            native_supported,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn min_factor(&self) -> f64 {
        self.min_factor
    }

    pub fn max_factor(&self) -> f64 {
        self.max_factor
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn native_supported(&self) -> bool {
        self.native_supported
    }

    /// Clamp a user-chosen factor into `[min_factor, max_factor]`.
    ///
    /// Front ends call this before [`set_zoom`]; NaN maps to the minimum.
    pub fn clamp(&self, factor: f64) -> f64 {
        if factor.is_nan() {
            return self.min_factor;
        }
        factor.clamp(self.min_factor, self.max_factor)
    }

    /// The region capture should copy for the current factor.
    pub fn region(&self) -> CaptureRegion {
        if self.native_supported || self.factor <= 1.0 {
            CaptureRegion::FullFrame
        } else {
            CaptureRegion::Centered {
                factor: self.factor,
            }
        }
    }
}

/// Region descriptor handed from zoom to capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureRegion {
    /// Copy the whole frame (no zoom, or zoom applied by the device)
    FullFrame,
    /// Copy a centered window shrunk by `factor` on both axes
    Centered { factor: f64 },
}

impl CaptureRegion {
    /// Resolve the descriptor against a concrete frame size.
    pub fn resolve(&self, frame: Size) -> Rect {
        match *self {
            CaptureRegion::FullFrame => Rect::new(0.0, 0.0, frame.width, frame.height),
            CaptureRegion::Centered { factor } => software_region(frame, factor),
        }
    }
}

/// Centered crop of `frame` for software zoom `factor`.
///
/// At `factor <= 1` the full frame is returned unchanged.
pub fn software_region(frame: Size, factor: f64) -> Rect {
    if factor <= 1.0 {
        return Rect::new(0.0, 0.0, frame.width, frame.height);
    }
    let crop_w = frame.width / factor;
    let crop_h = frame.height / factor;
    Rect::new(
        (frame.width - crop_w) / 2.0,
        (frame.height - crop_h) / 2.0,
        crop_w,
        crop_h,
    )
}

/// A native zoom request the device refused.
#[derive(Debug, thiserror::Error)]
#[error("Zoom to {factor:.1}x failed: {source}")]
pub struct ZoomApplyError {
    pub factor: f64,
    #[source]
    pub source: CameraError,
}

/// How a zoom request ended up being applied.
#[derive(Debug)]
pub enum ZoomOutcome {
    /// The device accepted the constraint
    Native,
    /// Software framing is in effect
    Software(CaptureRegion),
    /// The device refused; software framing is in effect from now on
    FellBack {
        region: CaptureRegion,
        error: ZoomApplyError,
    },
}

/// Apply an already clamped zoom factor.
///
/// A refused native request permanently switches this state to software
/// framing; the error is returned inside the outcome rather than raised.
pub async fn set_zoom<S: FrameSource>(
    state: &mut ZoomState,
    source: &mut S,
    factor: f64,
) -> ZoomOutcome {
    state.factor = factor;

    if state.native_supported {
        match source.apply_zoom(factor).await {
            Ok(()) => {
                log::debug!("Native zoom set to {:.2}x", factor);
                return ZoomOutcome::Native;
            }
            Err(e) => {
                log::warn!(
                    "Native zoom rejected ({}), falling back to software zoom",
                    e
                );
                state.native_supported = false;
                return ZoomOutcome::FellBack {
                    region: state.region(),
                    error: ZoomApplyError { factor, source: e },
                };
            }
        }
    }

    log::debug!("Software zoom set to {:.2}x", factor);
    ZoomOutcome::Software(state.region())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_to_software_range() {
        let state = ZoomState::new(None, ZoomCapabilities::SOFTWARE);
        assert!(!state.native_supported());
        assert_eq!(state.factor(), 1.0);
        assert_eq!(state.min_factor(), 1.0);
        assert_eq!(state.max_factor(), 5.0);
        assert_eq!(state.region(), CaptureRegion::FullFrame);
    }

    #[test]
    fn test_state_prefers_native_range() {
        let native = ZoomCapabilities {
            min: 1.0,
            max: 10.0,
            step: 0.5,
        };
        let state = ZoomState::new(Some(native), ZoomCapabilities::SOFTWARE);
        assert!(state.native_supported());
        assert_eq!(state.max_factor(), 10.0);
        assert_eq!(state.step(), 0.5);
    }

    #[test]
    fn test_state_ignores_empty_native_range() {
        let native = ZoomCapabilities {
            min: 1.0,
            max: 1.0,
            step: 0.1,
        };
        let state = ZoomState::new(Some(native), ZoomCapabilities::SOFTWARE);
        assert!(!state.native_supported());
    }

    #[test]
    fn test_state_rejects_unusable_ranges() {
        let broken = ZoomCapabilities {
            min: f64::NAN,
            max: 5.0,
            step: 0.1,
        };
        let state = ZoomState::new(Some(broken), broken);
        assert!(!state.native_supported());
        assert_eq!(state.min_factor(), 1.0);
        assert_eq!(state.max_factor(), 5.0);
        assert_eq!(state.clamp(3.0), 3.0);
    }

    #[test]
    fn test_clamp() {
        let state = ZoomState::new(None, ZoomCapabilities::SOFTWARE);
        assert_eq!(state.clamp(0.2), 1.0);
        assert_eq!(state.clamp(2.5), 2.5);
        assert_eq!(state.clamp(99.0), 5.0);
        assert_eq!(state.clamp(f64::NAN), 1.0);
    }

    #[test]
    fn test_software_region_identity_at_one() {
        let frame = Size::new(1920.0, 1080.0);
        assert_eq!(
            software_region(frame, 1.0),
            Rect::new(0.0, 0.0, 1920.0, 1080.0)
        );
    }

    #[test]
    fn test_software_region_centered_at_two() {
        let region = software_region(Size::new(1920.0, 1080.0), 2.0);
        assert_eq!(region, Rect::new(480.0, 270.0, 960.0, 540.0));
    }

    #[test]
    fn test_software_region_area_law() {
        let frame = Size::new(1280.0, 720.0);
        let mut f = 1.0;
        while f <= 5.0 {
            let region = software_region(frame, f);
            let expected = frame.area() / (f * f);
            assert!((region.size().area() - expected).abs() < 1e-6, "factor {}", f);
            // centered: equal margins on both sides
            assert!((region.x - (frame.width - region.right())).abs() < 1e-9);
            assert!((region.y - (frame.height - region.bottom())).abs() < 1e-9);
            f += 0.1;
        }
    }

    #[test]
    fn test_region_full_frame_when_native() {
        let native = ZoomCapabilities {
            min: 1.0,
            max: 4.0,
            step: 0.1,
        };
        let mut state = ZoomState::new(Some(native), ZoomCapabilities::SOFTWARE);
        state.factor = 3.0;
        assert_eq!(state.region(), CaptureRegion::FullFrame);
        state.native_supported = false;
        assert_eq!(state.region(), CaptureRegion::Centered { factor: 3.0 });
    }
}
