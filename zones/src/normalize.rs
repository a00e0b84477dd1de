//! Conversions between screen space and the normalized zone canvas.
//!
//! Screen space is pixel coordinates tied to the current window. Normalized
//! space is a fixed [`NORMALIZED_EXTENT`]-sided virtual canvas. The reference
//! extent (the fitted background image size) is the scaling basis between the
//! two. Axes scale independently, so the canvas is not aspect-locked.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

use serde::{Deserialize, Serialize};

use crate::consts::NORMALIZED_EXTENT;

/// A point in screen space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either side is zero or negative.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    #[must_use]
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Whether `pt` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, pt: ScreenPoint) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }
}

/// Axis-aligned rectangle on the normalized canvas.
///
/// Values outside `0..=10000` are legal: a rectangle drawn past the
/// background edge keeps its out-of-range coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl NormalizedRect {
    #[must_use]
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }
}

/// Convert a screen rectangle into normalized space against `reference`.
///
/// Each coordinate is scaled by `10000 / reference` on its own axis and
/// rounded to the nearest integer. Callers must not pass an empty reference.
#[must_use]
pub fn to_normalized(rect: ScreenRect, reference: Size) -> NormalizedRect {
    let scale_x = NORMALIZED_EXTENT / f64::from(reference.width);
    let scale_y = NORMALIZED_EXTENT / f64::from(reference.height);
    NormalizedRect {
        left: scale(rect.left, scale_x),
        top: scale(rect.top, scale_y),
        width: scale(rect.width, scale_x),
        height: scale(rect.height, scale_y),
    }
}

/// Convert a normalized rectangle back into screen space against `reference`.
#[must_use]
pub fn to_screen(rect: NormalizedRect, reference: Size) -> ScreenRect {
    let scale_x = f64::from(reference.width) / NORMALIZED_EXTENT;
    let scale_y = f64::from(reference.height) / NORMALIZED_EXTENT;
    ScreenRect {
        left: scale(rect.left, scale_x),
        top: scale(rect.top, scale_y),
        width: scale(rect.width, scale_x),
        height: scale(rect.height, scale_y),
    }
}

/// Smallest rectangle containing both corners, in either order.
#[must_use]
pub fn rect_from_corners(a: ScreenPoint, b: ScreenPoint) -> ScreenRect {
    ScreenRect {
        left: a.x.min(b.x),
        top: a.y.min(b.y),
        width: (a.x - b.x).abs(),
        height: (a.y - b.y).abs(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).round_ties_even() as i32
}
