//! Pointer drag gestures on the crop rectangle.
//!
//! Every move event is resolved against the snapshot taken when the gesture
//! started, never against the rectangle's current value, so fractional
//! deltas cannot accumulate drift.

use crate::geometry::{Point, Rect, Size};

/// What part of the crop rectangle the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// The body: translate without resizing
    Move,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
}

impl DragKind {
    fn moves_left(self) -> bool {
        matches!(self, DragKind::ResizeTopLeft | DragKind::ResizeBottomLeft)
    }

    fn moves_top(self) -> bool {
        matches!(self, DragKind::ResizeTopLeft | DragKind::ResizeTopRight)
    }
}

/// State for one drag gesture, from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    anchor_pointer: Point,
    anchor_rect: Rect,
    kind: DragKind,
}

impl DragState {
    pub fn new(kind: DragKind, pointer: Point, rect: Rect) -> Self {
        Self {
            anchor_pointer: pointer,
            anchor_rect: rect,
            kind,
        }
    }

    /// Rectangle for the pointer now being at `pointer`.
    ///
    /// The result stays inside `bounds` and no side shrinks below `min_size`,
    /// or below the bounds extent on an axis narrower than `min_size`.
    pub fn resolve(&self, pointer: Point, bounds: Size, min_size: f64) -> Rect {
        let dx = pointer.x - self.anchor_pointer.x;
        let dy = pointer.y - self.anchor_pointer.y;
        let a = self.anchor_rect;

        if self.kind == DragKind::Move {
            let max_x = (bounds.width - a.width).max(0.0);
            let max_y = (bounds.height - a.height).max(0.0);
            return Rect::new(
                (a.x + dx).clamp(0.0, max_x),
                (a.y + dy).clamp(0.0, max_y),
                a.width,
                a.height,
            );
        }

        let min_w = min_size.min(bounds.width);
        let min_h = min_size.min(bounds.height);

        let (x, width) = if self.kind.moves_left() {
            drag_leading_edge(a.x, a.width, dx, min_w)
        } else {
            (a.x, drag_trailing_edge(a.x, a.width, dx, bounds.width, min_w))
        };
        let (y, height) = if self.kind.moves_top() {
            drag_leading_edge(a.y, a.height, dy, min_h)
        } else {
            (a.y, drag_trailing_edge(a.y, a.height, dy, bounds.height, min_h))
        };

        Rect::new(x, y, width, height)
    }
}

/// Move the left/top edge, keeping the opposite edge fixed.
fn drag_leading_edge(start: f64, len: f64, delta: f64, min_size: f64) -> (f64, f64) {
    let end = start + len;
    let new_start = (start + delta).min(end - min_size).max(0.0);
    (new_start, end - new_start)
}

/// Move the right/bottom edge, keeping the opposite edge fixed.
fn drag_trailing_edge(start: f64, len: f64, delta: f64, limit: f64, min_size: f64) -> f64 {
    let new_end = (start + len + delta).max(start + min_size).min(limit);
    new_end - start
}
