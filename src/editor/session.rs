//! Edit session: rotation and crop rectangle for one captured still.

use super::drag::{DragKind, DragState};
use super::rotation::Rotation;
use crate::geometry::{Point, Rect, Size};

/// Default inset of a fresh crop rectangle from the display edges.
pub const DEFAULT_CROP_MARGIN: f64 = 40.0;

/// Default minimum crop side length, in display units.
pub const DEFAULT_MIN_CROP_SIZE: f64 = 50.0;

/// Crop box tuning, in display (canvas) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSettings {
    pub margin: f64,
    pub min_size: f64,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            margin: DEFAULT_CROP_MARGIN,
            min_size: DEFAULT_MIN_CROP_SIZE,
        }
    }
}

/// Mutable editing state for one source image.
///
/// The crop rectangle lives in canvas coordinates: the rotated source,
/// uniformly scaled to fit the viewport. It is only mapped back to source
/// pixels at export time.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: Size,
    viewport: Size,
    rotation: Rotation,
    canvas: Size,
    crop: Option<Rect>,
    settings: CropSettings,
}

impl EditSession {
    /// Start editing a `source_width x source_height` still shown inside `viewport`.
    pub fn new(source_width: u32, source_height: u32, viewport: Size, settings: CropSettings) -> Self {
        let source = Size::new(source_width as f64, source_height as f64);
        let mut session = Self {
            source,
            viewport,
            rotation: Rotation::Deg0,
            canvas: source,
            crop: None,
            settings,
        };
        session.canvas = session.display_size().fit_within(viewport);
        session
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Source image size (unrotated, in pixels).
    pub fn source_size(&self) -> Size {
        self.source
    }

    /// Rotated display footprint at capture resolution (`DW x DH`).
    pub fn display_size(&self) -> Size {
        if self.rotation.swaps_axes() {
            self.source.swapped()
        } else {
            self.source
        }
    }

    /// On-screen canvas size the crop rectangle is expressed in.
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn settings(&self) -> CropSettings {
        self.settings
    }

    pub fn crop_enabled(&self) -> bool {
        self.crop.is_some()
    }

    pub fn crop_rect(&self) -> Option<Rect> {
        self.crop
    }

    /// Advance rotation by 90 degrees.
    ///
    /// The canvas is refitted for the swapped footprint and an active crop
    /// is replaced by a fresh centered default.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.next();
        self.canvas = self.display_size().fit_within(self.viewport);
        if self.crop.is_some() {
            self.crop = Some(self.default_crop());
        }
        log::debug!(
            "Rotated to {}, canvas {}",
            self.rotation,
            self.canvas
        );
    }

    /// Enter or leave crop mode.
    pub fn set_crop_enabled(&mut self, enabled: bool) {
        match (enabled, self.crop.is_some()) {
            (true, false) => self.crop = Some(self.default_crop()),
            (false, true) => self.crop = None,
            _ => {}
        }
    }

    pub fn toggle_crop(&mut self) {
        self.set_crop_enabled(!self.crop_enabled());
    }

    /// Place the crop rectangle directly, entering crop mode if needed.
    ///
    /// The rectangle is grown to the minimum size and shifted or trimmed to
    /// fit inside the canvas.
    pub fn set_crop_rect(&mut self, rect: Rect) {
        self.crop = Some(self.clamp_to_canvas(rect));
    }

    /// Centered crop rectangle inset by the configured margin.
    pub fn default_crop(&self) -> Rect {
        let (x, width) = centered_span(self.canvas.width, self.settings.margin, self.settings.min_size);
        let (y, height) = centered_span(self.canvas.height, self.settings.margin, self.settings.min_size);
        Rect::new(x, y, width, height)
    }

    /// Snapshot the crop rectangle for a drag gesture.
    ///
    /// Returns `None` when crop mode is off.
    pub fn begin_drag(&self, kind: DragKind, pointer: Point) -> Option<DragState> {
        self.crop.map(|rect| DragState::new(kind, pointer, rect))
    }

    /// Apply one pointer move of an ongoing drag.
    pub fn drag_to(&mut self, drag: &DragState, pointer: Point) {
        if self.crop.is_none() {
            return;
        }
        self.crop = Some(drag.resolve(pointer, self.canvas, self.settings.min_size));
    }

    fn clamp_to_canvas(&self, rect: Rect) -> Rect {
        let min = self.settings.min_size;
        let width = rect.width.max(min).min(self.canvas.width);
        let height = rect.height.max(min).min(self.canvas.height);
        let x = rect.x.clamp(0.0, self.canvas.width - width);
        let y = rect.y.clamp(0.0, self.canvas.height - height);
        Rect::new(x, y, width, height)
    }
}

/// Offset and length of a span centered in `extent`, inset by `margin`.
///
/// The margin shrinks when honoring it would leave less than `min_size`.
fn centered_span(extent: f64, margin: f64, min_size: f64) -> (f64, f64) {
    let len = (extent - 2.0 * margin).max(min_size.min(extent));
    ((extent - len) / 2.0, len)
}
