//! Even-odd polygon coverage sampled at pixel centers

use crate::color::Color;
use crate::geometry::Point;
use crate::rendering::PixelSink;

/// Ray-casting parity test of `p` against every contour.
pub fn contains(contours: &[Vec<Point>], p: Point) -> bool {
    let mut inside = false;
    for contour in contours {
        let n = contour.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (contour[i], contour[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < crossing_x(a, b, p.y) {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

/// X coordinate where edge `a`–`b` crosses the horizontal line at `y`.
/// Endpoints are ordered first so an edge shared by two contours yields the
/// same value whichever way each contour traverses it.
#[inline]
fn crossing_x(a: Point, b: Point, y: f64) -> f64 {
    let (a, b) = if (a.y, a.x) <= (b.y, b.x) { (a, b) } else { (b, a) };
    (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x
}

/// Calls `visit(x, y)` once for every pixel in `[0, width) × [0, height)`
/// whose center lies inside the contours (even-odd rule).
///
/// Equivalent to running [`contains`] on each pixel center in the bounding
/// box, computed one scanline at a time.
pub fn for_each_covered(
    contours: &[Vec<Point>],
    width: i32,
    height: i32,
    mut visit: impl FnMut(i32, i32),
) {
    let points = || contours.iter().filter(|c| c.len() >= 3).flatten();
    let (min_y, max_y) = points().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    });
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    let y_start = (min_y.floor() as i32).max(0);
    let y_end = (max_y.ceil() as i32).min(height);
    let mut crossings: Vec<f64> = Vec::new();

    for y in y_start..y_end {
        let sample_y = y as f64 + 0.5;
        crossings.clear();
        for contour in contours.iter().filter(|c| c.len() >= 3) {
            let mut j = contour.len() - 1;
            for i in 0..contour.len() {
                let (a, b) = (contour[i], contour[j]);
                if (a.y > sample_y) != (b.y > sample_y) {
                    crossings.push(crossing_x(a, b, sample_y));
                }
                j = i;
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            // pixel centers in [pair[0], pair[1])
            let x0 = ((pair[0] - 0.5).ceil() as i32).max(0);
            let x1 = ((pair[1] - 0.5).ceil() as i32).min(width);
            for x in x0..x1 {
                visit(x, y);
            }
        }
    }
}

/// Paints every covered pixel once.
pub fn fill(sink: &mut dyn PixelSink, contours: &[Vec<Point>], color: Color) {
    let (width, height) = (sink.width(), sink.height());
    for_each_covered(contours, width, height, |x, y| sink.set_pixel(x, y, color));
}
