//! Crisp axis-aligned rectangles and the rotated-rectangle fallback

use crate::color::Color;
use crate::geometry::Point;
use crate::rendering::raster::{line, polygon, round_half_up, PixelRect};
use crate::rendering::PixelSink;

/// Integer geometry of an axis-aligned rectangle.
///
/// The path occupies `[left, left + width) × [top, top + height)`. A stroke
/// of width `s` covers the ring between the path grown by `ceil(s / 2)` and
/// the path shrunk by `floor(s / 2)`; the fill covers exactly the shrunk
/// rectangle, so fill and stroke never overlap and never leave a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrispRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub stroke_width: i32,
}

impl CrispRect {
    /// Rounds center, size and stroke width to whole pixels; the path's
    /// top-left corner is `center - floor(size / 2)`.
    pub fn from_center(center: Point, width: f64, height: f64, stroke_width: f64) -> Self {
        let width = round_half_up(width.abs());
        let height = round_half_up(height.abs());
        Self {
            left: round_half_up(center.x).saturating_sub(width.div_euclid(2)),
            top: round_half_up(center.y).saturating_sub(height.div_euclid(2)),
            width,
            height,
            stroke_width: round_half_up(stroke_width).max(0),
        }
    }

    /// Rounds the top-left corner, size and stroke width to whole pixels.
    pub fn from_origin(origin: Point, width: f64, height: f64, stroke_width: f64) -> Self {
        Self {
            left: round_half_up(origin.x),
            top: round_half_up(origin.y),
            width: round_half_up(width.abs()),
            height: round_half_up(height.abs()),
            stroke_width: round_half_up(stroke_width).max(0),
        }
    }

    pub fn path(&self) -> PixelRect {
        PixelRect::new(
            self.left,
            self.top,
            self.left.saturating_add(self.width),
            self.top.saturating_add(self.height),
        )
    }

    /// Outer boundary of the stroke ring.
    pub fn outer(&self) -> PixelRect {
        self.path().expand(self.stroke_width / 2 + self.stroke_width % 2)
    }

    /// Inner boundary of the stroke ring and the fill area.
    pub fn inner(&self) -> PixelRect {
        self.path().shrink(self.stroke_width / 2)
    }

    pub fn fill(&self, sink: &mut dyn PixelSink, color: Color) {
        let area = self.inner().clamp_to(sink.width(), sink.height());
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                sink.set_pixel(x, y, color);
            }
        }
    }

    /// Scans the outer box and skips the inner box.
    pub fn stroke(&self, sink: &mut dyn PixelSink, color: Color) {
        if self.stroke_width == 0 {
            return;
        }
        let inner = self.inner();
        let outer = self.outer().clamp_to(sink.width(), sink.height());
        for y in outer.top..outer.bottom {
            for x in outer.left..outer.right {
                if !inner.contains(x, y) {
                    sink.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Corners of a `width × height` rectangle centered on the origin, in
/// drawing order.
pub fn centered_corners(width: f64, height: f64) -> [Point; 4] {
    let (hw, hh) = (width / 2., height / 2.);
    [
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
        Point::new(hw, hh),
        Point::new(-hw, hh),
    ]
}

/// Fills an arbitrary quadrilateral with the even-odd rule.
pub fn fill_quad(sink: &mut dyn PixelSink, corners: &[Point; 4], color: Color) {
    polygon::fill(sink, &[corners.to_vec()], color);
}

/// Strokes the four edges as thick lines. Edges 0 and 2 are extended by
/// half the stroke width at both ends and edges 1 and 3 are shortened by
/// the same amount, so the corner squares belong to exactly one edge.
pub fn stroke_quad(sink: &mut dyn PixelSink, corners: &[Point; 4], stroke_width: f64, color: Color) {
    let half = stroke_width / 2.;
    for edge in 0..4 {
        let (a, b) = (corners[edge], corners[(edge + 1) % 4]);
        let delta = if edge % 2 == 0 { half } else { -half };
        if let Some((a, b)) = adjust_segment(a, b, delta) {
            line::draw_line(sink, a, b, stroke_width, color);
        }
    }
}

/// Moves both endpoints outward along the segment by `delta` (inward when
/// negative). Returns `None` when the segment would vanish.
fn adjust_segment(a: Point, b: Point, delta: f64) -> Option<(Point, Point)> {
    let length = a.distance_to(b);
    if length + 2. * delta <= 0. || length == 0. {
        return None;
    }
    let (ux, uy) = ((b.x - a.x) / length, (b.y - a.y) / length);
    Some((
        Point::new(a.x - ux * delta, a.y - uy * delta),
        Point::new(b.x + ux * delta, b.y + uy * delta),
    ))
}
