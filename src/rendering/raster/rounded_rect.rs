//! Rounded rectangles: a crisp axis-aligned path and a generic fallback

use std::f64::consts::{FRAC_PI_2, PI};

use crate::color::Color;
use crate::geometry::{AffineTransform, Point};
use crate::rendering::raster::rect::CrispRect;
use crate::rendering::raster::{polygon, round_half_up, PixelRect};
use crate::rendering::PixelSink;

/// Axis-aligned rounded rectangle on the integer pixel grid.
///
/// Straight edges and corner boxes start and end on whole pixels, and fill
/// and stroke follow the same grow/shrink rule as [`CrispRect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrispRoundedRect {
    pub rect: CrispRect,
    pub radius: i32,
}

impl CrispRoundedRect {
    pub fn from_center(
        center: Point,
        width: f64,
        height: f64,
        stroke_width: f64,
        radius: f64,
    ) -> Self {
        Self::new(
            CrispRect::from_center(center, width, height, stroke_width),
            radius,
        )
    }

    /// The radius is clamped to half the shorter side, then rounded.
    pub fn new(rect: CrispRect, radius: f64) -> Self {
        let limit = rect.width.min(rect.height) as f64 / 2.;
        let radius = round_half_up(radius.max(0.).min(limit)).max(0);
        Self { rect, radius }
    }

    fn outer(&self) -> (PixelRect, i32) {
        let grow = self.rect.stroke_width / 2 + self.rect.stroke_width % 2;
        let radius = if self.radius > 0 { self.radius.saturating_add(grow) } else { 0 };
        (self.rect.outer(), radius)
    }

    fn inner(&self) -> (PixelRect, i32) {
        let shrink = self.rect.stroke_width / 2;
        (self.rect.inner(), (self.radius - shrink).max(0))
    }

    pub fn fill(&self, sink: &mut dyn PixelSink, color: Color) {
        let (bounds, radius) = self.inner();
        let area = bounds.clamp_to(sink.width(), sink.height());
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                if covers(&bounds, radius, x, y) {
                    sink.set_pixel(x, y, color);
                }
            }
        }
    }

    pub fn stroke(&self, sink: &mut dyn PixelSink, color: Color) {
        if self.rect.stroke_width == 0 {
            return;
        }
        let (outer, outer_radius) = self.outer();
        let (inner, inner_radius) = self.inner();
        let area = outer.clamp_to(sink.width(), sink.height());
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                if covers(&outer, outer_radius, x, y) && !covers(&inner, inner_radius, x, y) {
                    sink.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// Whether the pixel center lies inside `bounds` with corners rounded by
/// `radius`. Corner regions are the `radius × radius` boxes in each corner.
fn covers(bounds: &PixelRect, radius: i32, x: i32, y: i32) -> bool {
    if !bounds.contains(x, y) {
        return false;
    }
    let radius = radius.min(bounds.width() / 2).min(bounds.height() / 2);
    if radius <= 0 {
        return true;
    }
    let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
    let r = radius as f64;
    let corner = |v: f64, lo: i32, hi: i32| {
        if v < (lo + radius) as f64 {
            Some((lo + radius) as f64)
        } else if v > (hi - radius) as f64 {
            Some((hi - radius) as f64)
        } else {
            None
        }
    };
    match (
        corner(cx, bounds.left, bounds.right),
        corner(cy, bounds.top, bounds.bottom),
    ) {
        (Some(ox), Some(oy)) => (cx - ox).powi(2) + (cy - oy).powi(2) <= r * r,
        _ => true,
    }
}

/// Closed outline of a rounded rectangle centered on the origin, flattened
/// into line segments.
pub fn contour(width: f64, height: f64, radius: f64, segments_per_corner: usize) -> Vec<Point> {
    let (hw, hh) = (width / 2., height / 2.);
    let radius = radius.max(0.).min(hw.min(hh));
    if radius == 0. {
        return crate::rendering::raster::rect::centered_corners(width, height).to_vec();
    }
    let centers = [
        (hw - radius, -hh + radius, -FRAC_PI_2),
        (hw - radius, hh - radius, 0.),
        (-hw + radius, hh - radius, FRAC_PI_2),
        (-hw + radius, -hh + radius, PI),
    ];
    let steps = segments_per_corner.max(1);
    let mut points = Vec::with_capacity(4 * (steps + 1));
    for (ox, oy, start) in centers {
        for i in 0..=steps {
            let angle = start + FRAC_PI_2 * i as f64 / steps as f64;
            points.push(Point::new(ox + radius * angle.cos(), oy + radius * angle.sin()));
        }
    }
    points
}

/// Generic (non crisp) rounded rectangle drawn through `transform`, which
/// maps the shape's local frame (origin at the center) to device space.
pub struct TransformedRoundedRect {
    pub transform: AffineTransform,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub stroke_width: f64,
}

impl TransformedRoundedRect {
    fn segments(&self, radius: f64) -> usize {
        let device_radius = radius * self.transform.mean_scale();
        ((device_radius * FRAC_PI_2).ceil() as usize).clamp(2, 256)
    }

    fn device_contour(&self, grow: f64) -> Vec<Point> {
        let radius = if self.radius > 0. {
            (self.radius + grow).max(0.)
        } else {
            0.
        };
        let local = contour(
            (self.width + 2. * grow).max(0.),
            (self.height + 2. * grow).max(0.),
            radius,
            self.segments(radius),
        );
        local.into_iter().map(|p| self.transform.apply(p)).collect()
    }

    pub fn fill(&self, sink: &mut dyn PixelSink, color: Color) {
        let inner = self.device_contour(-self.stroke_width / 2.);
        polygon::fill(sink, &[inner], color);
    }

    pub fn stroke(&self, sink: &mut dyn PixelSink, color: Color) {
        if self.stroke_width <= 0. {
            return;
        }
        let half = self.stroke_width / 2.;
        let outer = self.device_contour(half);
        let inner = self.device_contour(-half);
        polygon::fill(sink, &[outer, inner], color);
    }
}
