//! Geometry-to-pixel algorithms
//!
//! Every function here writes through a [`PixelSink`](crate::rendering::PixelSink)
//! and keeps no state between calls. Inputs are device-space geometry unless
//! a function says otherwise.

pub mod arc;
pub mod circle;
pub mod line;
pub mod polygon;
pub mod rect;
pub mod rounded_rect;

use crate::rendering::PixelSink;

/// Rounds half up (`floor(v + 0.5)`), the rounding used for pixel snapping
/// of geometry.
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Half-open integer pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The sink's whole buffer, `[0, width) × [0, height)`.
    pub fn of_sink(sink: &dyn PixelSink) -> Self {
        Self::new(0, 0, sink.width(), sink.height())
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    #[must_use]
    pub fn expand(&self, by: i32) -> Self {
        Self::new(
            self.left.saturating_sub(by),
            self.top.saturating_sub(by),
            self.right.saturating_add(by),
            self.bottom.saturating_add(by),
        )
    }

    #[must_use]
    pub fn shrink(&self, by: i32) -> Self {
        self.expand(-by)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Intersection with the `[0, width) × [0, height)` buffer area.
    #[must_use]
    pub fn clamp_to(&self, width: i32, height: i32) -> Self {
        Self::new(
            self.left.max(0),
            self.top.max(0),
            self.right.min(width),
            self.bottom.min(height),
        )
    }
}
