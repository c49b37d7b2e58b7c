//! Midpoint circles with deduplicated stroke pixels

use std::collections::BTreeSet;

use crate::color::Color;
use crate::geometry::Point;
use crate::rendering::raster::{round_half_up, PixelRect};
use crate::rendering::PixelSink;

/// Circle snapped to an integer device-space center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrispCircle {
    pub cx: i32,
    pub cy: i32,
    pub radius: f64,
}

impl CrispCircle {
    /// `offset` is added after rounding the center; see
    /// [`RasterTuning::circle_center_offset`](crate::RasterTuning::circle_center_offset).
    pub fn new(center: Point, radius: f64, offset: (i32, i32)) -> Self {
        Self {
            cx: round_half_up(center.x).saturating_add(offset.0),
            cy: round_half_up(center.y).saturating_add(offset.1),
            radius,
        }
    }

    fn is_drawable(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.
    }

    /// Offsets from the center that land inside `bounds`, as inclusive
    /// `(dx_min, dx_max, dy_min, dy_max)`, further limited to `±reach`.
    fn visible_offsets(&self, bounds: &PixelRect, reach: f64) -> (i64, i64, i64, i64) {
        let reach = reach as i64;
        let (cx, cy) = (self.cx as i64, self.cy as i64);
        (
            (bounds.left as i64 - cx).max(-reach),
            (bounds.right as i64 - 1 - cx).min(reach),
            (bounds.top as i64 - cy).max(-reach),
            (bounds.bottom as i64 - 1 - cy).min(reach),
        )
    }

    /// Every outline pixel inside `bounds`, each coordinate exactly once.
    ///
    /// Thicknesses up to 1px use the midpoint algorithm; wider strokes keep
    /// the integer offsets whose distance from the center lies within the
    /// band `radius ± thickness·scale / 2`.
    pub fn stroke_pixels(&self, thickness: f64, scale: f64, bounds: &PixelRect) -> BTreeSet<(i32, i32)> {
        let mut pixels = BTreeSet::new();
        if !self.is_drawable() || thickness.is_nan() || thickness <= 0. || bounds.is_empty() {
            return pixels;
        }
        if thickness <= 1. {
            self.midpoint(bounds, &mut pixels);
        } else {
            self.band(thickness * scale, bounds, &mut pixels);
        }
        pixels
    }

    /// Octant rows of the midpoint algorithm, visiting only rows with a
    /// reflection inside `bounds`.
    ///
    /// Starting from `x = r`, `err = 1 - r`, the algorithm keeps at row `y`
    /// the largest `x` with `x² - x + y² < r²`, and stops once `x < y`;
    /// [`midpoint_column`] computes that column directly.
    fn midpoint(&self, bounds: &PixelRect, pixels: &mut BTreeSet<(i32, i32)>) {
        let r = (self.radius + 0.5).floor() as i64;
        let (dx0, dx1, dy0, dy1) = self.visible_offsets(bounds, f64::INFINITY);
        for (lo, hi) in [magnitudes(dx0, dx1), magnitudes(dy0, dy1)].into_iter().flatten() {
            for y in lo..=hi.min(r) {
                match midpoint_column(r, y) {
                    Some(x) if x >= y => self.reflect(x, y, bounds, pixels),
                    _ => break,
                }
            }
        }
    }

    fn band(&self, thickness: f64, bounds: &PixelRect, pixels: &mut BTreeSet<(i32, i32)>) {
        let half = thickness / 2.;
        let inner = (self.radius - half).max(0.);
        let outer = self.radius + half;
        let (inner_sq, outer_sq) = (inner * inner, outer * outer);
        let (dx0, dx1, dy0, dy1) = self.visible_offsets(bounds, outer.ceil());
        for dy in dy0..=dy1 {
            for dx in dx0..=dx1 {
                let d = distance_sq(dx, dy);
                if d >= inner_sq && d <= outer_sq {
                    pixels.insert(self.pixel(dx, dy));
                }
            }
        }
    }

    /// Inserts the 8-way reflections of octant offset `(x, y)` that fall
    /// inside `bounds`.
    fn reflect(&self, x: i64, y: i64, bounds: &PixelRect, pixels: &mut BTreeSet<(i32, i32)>) {
        let (cx, cy) = (self.cx as i64, self.cy as i64);
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            let (px, py) = (cx + dx, cy + dy);
            if (bounds.left as i64..bounds.right as i64).contains(&px)
                && (bounds.top as i64..bounds.bottom as i64).contains(&py)
            {
                pixels.insert((px as i32, py as i32));
            }
        }
    }

    // callers keep `(dx, dy)` within a `PixelRect`, so the sum fits
    fn pixel(&self, dx: i64, dy: i64) -> (i32, i32) {
        ((self.cx as i64 + dx) as i32, (self.cy as i64 + dy) as i32)
    }

    /// Pixels inside `bounds` whose integer offset satisfies
    /// `dx² + dy² ≤ (radius − 0.5)²`.
    pub fn fill_pixels(&self, bounds: &PixelRect) -> Vec<(i32, i32)> {
        if !self.is_drawable() {
            return Vec::new();
        }
        let limit = (self.radius - 0.5).max(0.);
        let limit_sq = limit * limit;
        let (dx0, dx1, dy0, dy1) = self.visible_offsets(bounds, limit.ceil());
        let mut pixels = Vec::new();
        for dy in dy0..=dy1 {
            for dx in dx0..=dx1 {
                if distance_sq(dx, dy) <= limit_sq {
                    pixels.push(self.pixel(dx, dy));
                }
            }
        }
        pixels
    }

    pub fn fill(&self, sink: &mut dyn PixelSink, color: Color) {
        for (x, y) in self.fill_pixels(&PixelRect::of_sink(sink)) {
            sink.set_pixel(x, y, color);
        }
    }

    pub fn stroke(&self, sink: &mut dyn PixelSink, thickness: f64, scale: f64, color: Color) {
        for (x, y) in self.stroke_pixels(thickness, scale, &PixelRect::of_sink(sink)) {
            sink.set_pixel(x, y, color);
        }
    }

    /// Fill then stroke, skipping fill pixels the stroke repaints.
    pub fn fill_and_stroke(
        &self,
        sink: &mut dyn PixelSink,
        thickness: f64,
        scale: f64,
        fill: Color,
        stroke: Color,
    ) {
        let bounds = PixelRect::of_sink(sink);
        let outline = self.stroke_pixels(thickness, scale, &bounds);
        for (x, y) in self.fill_pixels(&bounds) {
            if !outline.contains(&(x, y)) {
                sink.set_pixel(x, y, fill);
            }
        }
        for (x, y) in outline {
            sink.set_pixel(x, y, stroke);
        }
    }
}

#[inline]
fn distance_sq(dx: i64, dy: i64) -> f64 {
    let (dx, dy) = (dx as i128, dy as i128);
    (dx * dx + dy * dy) as f64
}

/// Range of `|v|` over `v` in `lo..=hi`, `None` when empty.
fn magnitudes(lo: i64, hi: i64) -> Option<(i64, i64)> {
    if lo > hi {
        None
    } else if lo <= 0 && hi >= 0 {
        Some((0, (-lo).max(hi)))
    } else if hi < 0 {
        Some((-hi, -lo))
    } else {
        Some((lo, hi))
    }
}

/// Column the midpoint algorithm plots at row `y` of the first octant:
/// the largest `x` with `x² - x + y² < r²` (`r` itself on row 0).
fn midpoint_column(r: i64, y: i64) -> Option<i64> {
    if y == 0 {
        return Some(r);
    }
    let target = (r as i128) * (r as i128) - (y as i128) * (y as i128);
    if target <= 0 {
        return None;
    }
    let fits = |x: i128| x * x - x < target;
    let mut x = (0.5 + (target as f64).sqrt()).floor() as i128;
    while x > 0 && !fits(x) {
        x -= 1;
    }
    while fits(x + 1) {
        x += 1;
    }
    Some(x as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::raster::testing::RecordingSink;

    fn assert_symmetric(pixels: &BTreeSet<(i32, i32)>, cx: i32, cy: i32) {
        for &(x, y) in pixels {
            let (dx, dy) = (x - cx, y - cy);
            for (rx, ry) in [(-dx, dy), (dx, -dy), (dy, dx), (-dy, -dx)] {
                assert!(
                    pixels.contains(&(cx + rx, cy + ry)),
                    "({x}, {y}) has no reflection at offset ({rx}, {ry})"
                );
            }
        }
    }

    #[test]
    fn center_is_rounded_then_offset() {
        let c = CrispCircle::new(Point::new(10.5, 20.4), 5., (-1, -1));
        assert_eq!((c.cx, c.cy), (10, 19));
    }

    #[test]
    fn thin_stroke_paints_each_pixel_once() {
        let c = CrispCircle::new(Point::new(50., 50.), 20., (0, 0));
        let mut sink = RecordingSink::new(100, 100);
        c.stroke(&mut sink, 1., 0.75, Color::BLACK);
        assert_eq!(sink.max_writes(), 1);
        assert_eq!(sink.extent(), Some((30, 30, 70, 70)));
        let pixels = c.stroke_pixels(1., 0.75, &PixelRect::new(0, 0, 100, 100));
        assert_eq!(pixels.len(), sink.writes.len());
        assert_symmetric(&pixels, 50, 50);
    }

    #[test]
    fn thick_stroke_is_symmetric_band() {
        let c = CrispCircle::new(Point::new(40., 40.), 15., (0, 0));
        let pixels = c.stroke_pixels(4., 0.75, &PixelRect::new(0, 0, 80, 80));
        assert_symmetric(&pixels, 40, 40);
        for &(x, y) in &pixels {
            let d = (((x - 40).pow(2) + (y - 40).pow(2)) as f64).sqrt();
            assert!((13.5..=16.5).contains(&d), "({x}, {y}) at distance {d}");
        }
        assert!(!pixels.contains(&(40, 40)));
    }

    #[test]
    fn fill_stays_inside_half_pixel_inset() {
        let c = CrispCircle::new(Point::new(10., 10.), 3., (0, 0));
        let pixels = c.fill_pixels(&PixelRect::new(0, 0, 20, 20));
        // offsets with dx² + dy² <= 6.25
        assert_eq!(pixels.len(), 21);
        assert!(pixels.contains(&(12, 11)));
        assert!(!pixels.contains(&(12, 12)));
    }

    #[test]
    fn fill_and_stroke_blends_every_pixel_once() {
        let c = CrispCircle::new(Point::new(30., 30.), 10., (-1, -1));
        let mut sink = RecordingSink::new(60, 60);
        c.fill_and_stroke(&mut sink, 3., 0.75, Color::BLACK, Color::BLACK);
        assert_eq!(sink.max_writes(), 1);
        assert!(sink.writes.contains_key(&(29, 29)));
    }

    #[test]
    fn non_positive_radius_draws_nothing() {
        for r in [0., -3., f64::NAN] {
            let c = CrispCircle::new(Point::new(5., 5.), r, (0, 0));
            let bounds = PixelRect::new(0, 0, 10, 10);
            assert!(c.stroke_pixels(1., 0.75, &bounds).is_empty());
            assert!(c.fill_pixels(&bounds).is_empty());
        }
    }

    /// The loop form of the midpoint algorithm, for comparison.
    fn midpoint_loop(r: i64) -> Vec<(i64, i64)> {
        let (mut x, mut y, mut err) = (r, 0, 1 - r);
        let mut rows = Vec::new();
        while x >= y {
            rows.push((x, y));
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
        rows
    }

    #[test]
    fn midpoint_columns_match_incremental_loop() {
        for r in 0..200 {
            let direct: Vec<(i64, i64)> = (0..=r)
                .map_while(|y| midpoint_column(r, y).filter(|&x| x >= y).map(|x| (x, y)))
                .collect();
            assert_eq!(direct, midpoint_loop(r), "radius {r}");
        }
    }

    #[test]
    fn partially_visible_outline_keeps_its_shape() {
        let c = CrispCircle::new(Point::new(0., 50.), 30., (0, 0));
        let clipped = c.stroke_pixels(1., 0.75, &PixelRect::new(0, 0, 100, 100));
        let full = c.stroke_pixels(1., 0.75, &PixelRect::new(-100, -100, 200, 200));
        let visible: BTreeSet<_> = full.into_iter().filter(|&(x, _)| x >= 0).collect();
        assert_eq!(clipped, visible);
        assert!(clipped.contains(&(0, 20)) && clipped.contains(&(30, 50)));
    }

    #[test]
    fn huge_circles_only_touch_the_buffer() {
        let bounds = PixelRect::new(0, 0, 60, 60);
        let c = CrispCircle::new(Point::new(30., 30.), 1e6, (0, 0));
        assert_eq!(c.fill_pixels(&bounds).len(), 60 * 60);
        assert!(c.stroke_pixels(1., 0.75, &bounds).is_empty());
        assert!(c.stroke_pixels(4., 0.75, &bounds).is_empty());

        // the top of a far-away outline runs along row 0
        let far = CrispCircle::new(Point::new(30., 1e9), 1e9, (0, 0));
        let row = far.stroke_pixels(1., 0.75, &bounds);
        assert_eq!(row, (0..60).map(|x| (x, 0)).collect::<BTreeSet<_>>());
    }
}
