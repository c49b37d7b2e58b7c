//! Line rasterization: 1px Bresenham and thick segment coverage

use crate::color::Color;
use crate::geometry::Point;
use crate::rendering::PixelSink;

/// Snaps a hairline endpoint coordinate: shift by −0.5, then round with
/// ties going down, so a stroke along integer coordinates lands on the row
/// or column a browser canvas darkens first.
#[inline]
pub fn snap_hairline(v: f64) -> i32 {
    (v - 1.).ceil() as i32
}

/// Draws a line of the given device-space thickness.
///
/// Thicknesses up to one pixel use the snapped Bresenham path; anything
/// wider uses [`draw_thick`]. Zero-length and zero-width lines draw nothing.
pub fn draw_line(sink: &mut dyn PixelSink, from: Point, to: Point, thickness: f64, color: Color) {
    if thickness.is_nan() || thickness <= 0. || from == to || !from.is_finite() || !to.is_finite() {
        return;
    }
    if thickness <= 1. {
        draw_hairline(sink, from, to, color);
    } else {
        draw_thick(sink, from, to, thickness, color);
    }
}

/// One-pixel line: endpoints snapped with [`snap_hairline`], then integer
/// Bresenham with one write per step (both endpoints included).
///
/// The segment is first clipped to the buffer grown by a pixel on every
/// side, so the walk is bounded by the buffer size rather than the length
/// of the line.
pub fn draw_hairline(sink: &mut dyn PixelSink, from: Point, to: Point, color: Color) {
    let (w, h) = (sink.width() as f64, sink.height() as f64);
    let Some((from, to)) = clip_segment(from, to, Point::new(-1., -1.), Point::new(w + 1., h + 1.))
    else {
        return;
    };
    let (mut x, mut y) = (snap_hairline(from.x) as i64, snap_hairline(from.y) as i64);
    let (x1, y1) = (snap_hairline(to.x) as i64, snap_hairline(to.y) as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        // clipped endpoints keep every step within a pixel of the buffer
        sink.set_pixel(x as i32, y as i32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Liang–Barsky clip of `from`–`to` against the box `min..=max`.
///
/// Endpoints already inside the box are returned untouched. `None` when
/// the segment misses the box or its direction is not finite.
fn clip_segment(from: Point, to: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }
    let (mut t0, mut t1) = (0_f64, 1_f64);
    for (p, q) in [
        (-dx, from.x - min.x),
        (dx, max.x - from.x),
        (-dy, from.y - min.y),
        (dy, max.y - from.y),
    ] {
        if p == 0. {
            if q < 0. {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0. {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let at = |t: f64| Point::new(from.x + t * dx, from.y + t * dy);
    let start = if t0 > 0. { at(t0) } else { from };
    let end = if t1 < 1. { at(t1) } else { to };
    Some((start, end))
}

/// Paints every pixel whose center projects onto the segment (parameter in
/// `[0, length]`) within `thickness / 2` of it.
pub fn draw_thick(sink: &mut dyn PixelSink, from: Point, to: Point, thickness: f64, color: Color) {
    let length = from.distance_to(to);
    if length.is_nan() || length <= 0. {
        return;
    }
    let half = thickness / 2.;
    let (ux, uy) = ((to.x - from.x) / length, (to.y - from.y) / length);
    let (nx, ny) = (-uy, ux);

    let corners = [
        Point::new(from.x + nx * half, from.y + ny * half),
        Point::new(from.x - nx * half, from.y - ny * half),
        Point::new(to.x + nx * half, to.y + ny * half),
        Point::new(to.x - nx * half, to.y - ny * half),
    ];
    let (min_x, min_y, max_x, max_y) = corners.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    );

    let x_start = (min_x.floor() as i32).max(0);
    let y_start = (min_y.floor() as i32).max(0);
    let x_end = (max_x.ceil() as i32).min(sink.width() - 1);
    let y_end = (max_y.ceil() as i32).min(sink.height() - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let (dx, dy) = (x as f64 + 0.5 - from.x, y as f64 + 0.5 - from.y);
            let along = dx * ux + dy * uy;
            let across = (dx * nx + dy * ny).abs();
            if (0. ..=length).contains(&along) && across <= half {
                sink.set_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::raster::testing::RecordingSink;

    #[test]
    fn horizontal_hairline_is_shifted_up_and_left() {
        let mut sink = RecordingSink::new(600, 600);
        draw_line(&mut sink, Point::new(0., 0.), Point::new(10., 0.), 1., Color::BLACK);
        let expected: Vec<(i32, i32)> = (-1..=9).map(|x| (x, -1)).collect();
        assert_eq!(sink.writes.keys().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn pixel_center_hairline_stays_put() {
        let mut sink = RecordingSink::new(20, 20);
        draw_line(&mut sink, Point::new(2.5, 5.5), Point::new(2.5, 9.5), 1., Color::BLACK);
        let expected: Vec<(i32, i32)> = (5..=9).map(|y| (2, y)).collect();
        assert_eq!(sink.writes.keys().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn diagonal_hairline_writes_each_pixel_once() {
        let mut sink = RecordingSink::new(50, 50);
        draw_hairline(&mut sink, Point::new(1., 1.), Point::new(31., 11.), Color::BLACK);
        assert_eq!(sink.writes.len(), 31);
        assert_eq!(sink.max_writes(), 1);
        assert_eq!(sink.extent(), Some((0, 0, 30, 10)));
    }

    #[test]
    fn zero_length_lines_are_ignored() {
        let mut sink = RecordingSink::new(10, 10);
        draw_line(&mut sink, Point::new(3., 3.), Point::new(3., 3.), 1., Color::BLACK);
        draw_line(&mut sink, Point::new(3., 3.), Point::new(3., 3.), 4., Color::BLACK);
        draw_line(&mut sink, Point::new(1., 1.), Point::new(5., 5.), 0., Color::BLACK);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn thick_horizontal_line_covers_band() {
        let mut sink = RecordingSink::new(40, 40);
        draw_line(&mut sink, Point::new(5., 10.), Point::new(15., 10.), 2., Color::BLACK);
        assert_eq!(sink.writes.len(), 20);
        assert_eq!(sink.extent(), Some((5, 9, 14, 10)));
    }

    #[test]
    fn thick_diagonal_line_is_symmetric_about_its_axis() {
        let mut sink = RecordingSink::new(40, 40);
        draw_thick(&mut sink, Point::new(5., 5.), Point::new(25., 25.), 4., Color::BLACK);
        for &(x, y) in sink.writes.keys() {
            assert!(sink.writes.contains_key(&(y, x)), "missing mirror of ({x}, {y})");
        }
        assert_eq!(sink.max_writes(), 1);
    }

    #[test]
    fn very_long_hairline_walks_only_the_visible_span() {
        let mut sink = RecordingSink::new(600, 600);
        draw_line(&mut sink, Point::new(-7e8, 10.5), Point::new(7e8, 10.5), 1., Color::BLACK);
        assert!(sink.writes.keys().all(|&(x, y)| y == 10 && (-2..=600).contains(&x)));
        assert!(sink.writes.contains_key(&(0, 10)) && sink.writes.contains_key(&(599, 10)));
        assert_eq!(sink.max_writes(), 1);
    }

    #[test]
    fn hairline_outside_the_buffer_writes_nothing() {
        let mut sink = RecordingSink::new(50, 50);
        draw_line(&mut sink, Point::new(-1e9, -5.), Point::new(1e9, -5.), 1., Color::BLACK);
        draw_line(&mut sink, Point::new(80., -1e9), Point::new(80., 1e9), 1., Color::BLACK);
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn clipping_leaves_inside_endpoints_alone() {
        let (a, b) = (Point::new(2.25, 3.75), Point::new(7.5, 1.));
        let min = Point::new(-1., -1.);
        assert_eq!(clip_segment(a, b, min, Point::new(11., 11.)), Some((a, b)));

        let (start, end) = clip_segment(Point::new(-9., 5.), b, min, Point::new(11., 11.)).unwrap();
        assert!((start.x + 1.).abs() < 1e-12);
        assert_eq!(end, b);
    }
}
