//! Plain geometry types shared by the zoom, editor and mapping stages.
//!
//! Display-space values are `f64` because the on-screen canvas is a scaled
//! rendering of the capture. Source-space values are whole pixels.

use std::fmt;

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same size with the axes exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Largest size with this aspect ratio that fits inside `bounds`.
    pub fn fit_within(self, bounds: Size) -> Size {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Size::new(0.0, 0.0);
        }
        let scale = (bounds.width / self.width).min(bounds.height / self.height);
        Size::new(self.width * scale, self.height * scale)
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A pointer position in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the rectangle lies entirely inside `[0, bounds.width] x [0, bounds.height]`.
    pub fn is_within(&self, bounds: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.width && self.bottom() <= bounds.height
    }

    /// Multiply every component by the per-axis scale factors.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Rect {
        Rect::new(
            self.x * scale_x,
            self.y * scale_y,
            self.width * scale_x,
            self.height * scale_y,
        )
    }
}

/// Axis-aligned rectangle in whole source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round a display-space rectangle to pixel edges, clamped to `bounds_w x bounds_h`.
    ///
    /// Edges are rounded independently so adjacent rectangles share a boundary.
    pub fn from_rect_clamped(rect: &Rect, bounds_w: u32, bounds_h: u32) -> PixelRect {
        let clamp_x = |v: f64| v.round().clamp(0.0, bounds_w as f64) as u32;
        let clamp_y = |v: f64| v.round().clamp(0.0, bounds_h as f64) as u32;

        let left = clamp_x(rect.x);
        let top = clamp_y(rect.y);
        let right = clamp_x(rect.right()).max(left);
        let bottom = clamp_y(rect.bottom()).max(top);

        PixelRect::new(left, top, right - left, bottom - top)
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
