//! 2D affine transforms in homogeneous form

use std::f64::consts::{FRAC_PI_2, TAU};

use super::Point;

/// A 2D affine transform stored as a row-major 3×3 homogeneous matrix.
///
/// ```text
/// | m[0][0] m[0][1] m[0][2] |     | a  c  e |
/// | m[1][0] m[1][1] m[1][2] |  =  | b  d  f |
/// |    0       0       1    |     | 0  0  1 |
/// ```
///
/// Instances are only ever built from translate/rotate/scale primitives, so
/// every transform reachable through the public API is invertible (unless a
/// caller scales by zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    m: [[f64; 3]; 3],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub const fn identity() -> Self {
        Self {
            m: [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]],
        }
    }

    pub const fn translation_matrix(x: f64, y: f64) -> Self {
        Self {
            m: [[1., 0., x], [0., 1., y], [0., 0., 1.]],
        }
    }

    pub const fn scale_matrix(sx: f64, sy: f64) -> Self {
        Self {
            m: [[sx, 0., 0.], [0., sy, 0.], [0., 0., 1.]],
        }
    }

    /// Clockwise rotation on a y-down canvas
    pub fn rotation_matrix(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            m: [[cos, -sin, 0.], [sin, cos, 0.], [0., 0., 1.]],
        }
    }

    /// Matrix product `self · other`.
    ///
    /// Applying the result to a point applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &AffineTransform) -> Self {
        let mut out = [[0.; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[row][k] * other.m[k][col]).sum();
            }
        }
        Self { m: out }
    }

    /// Right-multiplies a translation, so it acts in the current local frame.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        *self = self.multiply(&Self::translation_matrix(x, y));
        self
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        *self = self.multiply(&Self::scale_matrix(sx, sy));
        self
    }

    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        *self = self.multiply(&Self::rotation_matrix(radians));
        self
    }

    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.m[0][0] * x + self.m[0][1] * y + self.m[0][2],
            y: self.m[1][0] * x + self.m[1][1] * y + self.m[1][2],
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        self.transform_point(p.x, p.y)
    }

    /// Lengths of the images of the unit x and unit y basis vectors.
    pub fn scale_factors(&self) -> (f64, f64) {
        let sx = self.m[0][0].hypot(self.m[1][0]);
        let sy = self.m[0][1].hypot(self.m[1][1]);
        (sx, sy)
    }

    /// Geometric mean of both scale factors; used to scale line widths and
    /// radii.
    pub fn mean_scale(&self) -> f64 {
        let (sx, sy) = self.scale_factors();
        (sx * sy).sqrt()
    }

    pub fn rotation_angle(&self) -> f64 {
        (-self.m[0][1]).atan2(self.m[0][0])
    }

    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    pub fn translation(&self) -> Point {
        Point::new(self.m[0][2], self.m[1][2])
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Number of quarter turns (0..=3) the transform's rotation snaps to.
    ///
    /// Both basis columns must lie within `tolerance` radians of a grid
    /// axis, and the two must stay perpendicular, so shears never snap.
    pub fn quarter_turns(&self, tolerance: f64) -> Option<u8> {
        let x_axis = self.m[1][0].atan2(self.m[0][0]);
        let y_axis = (-self.m[0][1]).atan2(self.m[1][1]);
        let turns = snap_quarter_turns(x_axis, tolerance)?;
        let y_turns = snap_quarter_turns(y_axis, tolerance)?;
        (turns % 2 == y_turns % 2).then_some(turns)
    }
}

/// Snaps `angle` to a multiple of 90° when it is within `tolerance` radians
/// of one, returning the number of quarter turns in `0..=3`.
pub fn snap_quarter_turns(angle: f64, tolerance: f64) -> Option<u8> {
    if !angle.is_finite() {
        return None;
    }
    let normalized = angle.rem_euclid(TAU);
    let turns = (normalized / FRAC_PI_2).round();
    if (normalized - turns * FRAC_PI_2).abs() <= tolerance {
        Some((turns as u8) % 4)
    } else {
        None
    }
}
