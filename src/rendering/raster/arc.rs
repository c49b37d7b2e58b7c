//! Pie-slice fills and outer arc strokes

use std::f64::consts::TAU;

use crate::color::Color;
use crate::geometry::{AffineTransform, Point};
use crate::rendering::raster::polygon;
use crate::rendering::PixelSink;

/// Signed sweep from `start` to `end`: positive clockwise (canvas y-down),
/// negative anticlockwise. Differences of a full turn or more in the sweep
/// direction draw the whole circle; otherwise angles are taken modulo a
/// full turn.
pub fn normalize_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if !start.is_finite() || !end.is_finite() {
        return 0.;
    }
    if anticlockwise {
        if start - end >= TAU {
            -TAU
        } else {
            -(start - end).rem_euclid(TAU)
        }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

/// `segments + 1` points along the arc, both ends included.
pub fn arc_points(center: Point, radius: f64, start: f64, sweep: f64, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = start + sweep * i as f64 / segments as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Arc in user space, drawn through `transform`.
#[derive(Debug, Clone)]
pub struct Arc {
    pub transform: AffineTransform,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub anticlockwise: bool,
}

impl Arc {
    fn start(&self) -> f64 {
        self.start_angle.rem_euclid(TAU)
    }

    fn sweep(&self) -> f64 {
        normalize_sweep(self.start_angle, self.end_angle, self.anticlockwise)
    }

    fn is_drawable(&self) -> bool {
        self.radius.is_finite() && self.radius > 0. && self.center.is_finite() && self.sweep() != 0.
    }

    /// Roughly one segment per two device pixels of arc length.
    fn segments(&self) -> usize {
        let device_radius = self.radius * self.transform.mean_scale();
        ((self.sweep().abs() * device_radius / 2.).ceil() as usize).clamp(4, 2048)
    }

    fn device_arc(&self, radius: f64) -> Vec<Point> {
        arc_points(self.center, radius, self.start(), self.sweep(), self.segments())
            .into_iter()
            .map(|p| self.transform.apply(p))
            .collect()
    }

    /// center → arc start → sweep → arc end → center
    pub fn pie_contour(&self) -> Vec<Point> {
        let mut contour = vec![self.transform.apply(self.center)];
        contour.extend(self.device_arc(self.radius));
        contour
    }

    /// Band of `stroke_width` lying just outside the arc: the outer arc
    /// forward, then the arc itself backward.
    pub fn outer_ring_contour(&self, stroke_width: f64) -> Vec<Point> {
        let mut contour = self.device_arc(self.radius + stroke_width);
        contour.extend(self.device_arc(self.radius).into_iter().rev());
        contour
    }

    pub fn fill(&self, sink: &mut dyn PixelSink, color: Color) {
        if !self.is_drawable() {
            return;
        }
        polygon::fill(sink, &[self.pie_contour()], color);
    }

    pub fn outer_stroke(&self, sink: &mut dyn PixelSink, stroke_width: f64, color: Color) {
        if !self.is_drawable() || !stroke_width.is_finite() || stroke_width <= 0. {
            return;
        }
        polygon::fill(sink, &[self.outer_ring_contour(stroke_width)], color);
    }
}
