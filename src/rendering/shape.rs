//! Closed set of drawable shapes and their rasterizer dispatch

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::RasterTuning;
use crate::error::{Error, Result};
use crate::geometry::transform::snap_quarter_turns;
use crate::geometry::{AffineTransform, Point};
use crate::rendering::raster::arc::Arc;
use crate::rendering::raster::circle::CrispCircle;
use crate::rendering::raster::rect::{self, CrispRect};
use crate::rendering::raster::rounded_rect::{CrispRoundedRect, TransformedRoundedRect};
use crate::rendering::raster::line;
use crate::rendering::PixelSink;

fn default_thickness() -> f64 {
    1.
}

/// A drawable primitive in user space.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "circle", "center": [50, 50], "radius": 10, "fill_color": "red"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line {
        start: Point,
        end: Point,
        #[serde(default = "default_thickness")]
        thickness: f64,
        #[serde(default)]
        color: Color,
    },
    Rect {
        center: Point,
        width: f64,
        height: f64,
        #[serde(default)]
        rotation: f64,
        #[serde(default)]
        stroke_width: f64,
        #[serde(default)]
        stroke_color: Option<Color>,
        #[serde(default)]
        fill_color: Option<Color>,
    },
    RoundedRect {
        center: Point,
        width: f64,
        height: f64,
        radius: f64,
        #[serde(default)]
        rotation: f64,
        #[serde(default)]
        stroke_width: f64,
        #[serde(default)]
        stroke_color: Option<Color>,
        #[serde(default)]
        fill_color: Option<Color>,
    },
    Circle {
        center: Point,
        radius: f64,
        #[serde(default)]
        stroke_width: f64,
        #[serde(default)]
        stroke_color: Option<Color>,
        #[serde(default)]
        fill_color: Option<Color>,
    },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        #[serde(default)]
        anticlockwise: bool,
        #[serde(default)]
        stroke_width: f64,
        #[serde(default)]
        stroke_color: Option<Color>,
        #[serde(default)]
        fill_color: Option<Color>,
    },
}

fn check_finite(shape: &str, field: &str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(Error::validation(format!("{shape}: {field} must be finite, got {v}")))
    }
}

fn check_point(shape: &str, field: &str, p: Point) -> Result<()> {
    check_finite(shape, field, p.x)?;
    check_finite(shape, field, p.y)
}

/// Crisp rectangles snap their size to whole pixels, so fractional sizes
/// are rejected instead of silently rounded.
fn check_integer(shape: &str, field: &str, v: f64) -> Result<()> {
    check_finite(shape, field, v)?;
    if v.fract() != 0. {
        return Err(Error::validation(format!(
            "{shape}: {field} must be a whole number of pixels, got {v}"
        )));
    }
    Ok(())
}

/// Stroke width that actually takes part in the layout: a shape without a
/// stroke color fills its whole path.
fn effective_stroke(stroke_width: f64, stroke_color: Option<Color>) -> f64 {
    match stroke_color {
        Some(_) if stroke_width > 0. => stroke_width,
        _ => 0.,
    }
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "line",
            Shape::Rect { .. } => "rect",
            Shape::RoundedRect { .. } => "rounded_rect",
            Shape::Circle { .. } => "circle",
            Shape::Arc { .. } => "arc",
        }
    }

    /// Rejects non-finite numbers and fractional rectangle sizes.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind();
        match *self {
            Shape::Line {
                start,
                end,
                thickness,
                ..
            } => {
                check_point(kind, "start", start)?;
                check_point(kind, "end", end)?;
                check_finite(kind, "thickness", thickness)
            }
            Shape::Rect {
                center,
                width,
                height,
                rotation,
                stroke_width,
                ..
            } => {
                check_point(kind, "center", center)?;
                check_integer(kind, "width", width)?;
                check_integer(kind, "height", height)?;
                check_finite(kind, "rotation", rotation)?;
                check_finite(kind, "stroke_width", stroke_width)
            }
            Shape::RoundedRect {
                center,
                width,
                height,
                radius,
                rotation,
                stroke_width,
                ..
            } => {
                check_point(kind, "center", center)?;
                check_integer(kind, "width", width)?;
                check_integer(kind, "height", height)?;
                check_finite(kind, "radius", radius)?;
                check_finite(kind, "rotation", rotation)?;
                check_finite(kind, "stroke_width", stroke_width)
            }
            Shape::Circle {
                center,
                radius,
                stroke_width,
                ..
            } => {
                check_point(kind, "center", center)?;
                check_finite(kind, "radius", radius)?;
                check_finite(kind, "stroke_width", stroke_width)
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                stroke_width,
                ..
            } => {
                check_point(kind, "center", center)?;
                check_finite(kind, "radius", radius)?;
                check_finite(kind, "start_angle", start_angle)?;
                check_finite(kind, "end_angle", end_angle)?;
                check_finite(kind, "stroke_width", stroke_width)
            }
        }
    }

    /// Validates the shape, then paints it through `sink`, fill before
    /// stroke.
    pub fn rasterize(
        &self,
        sink: &mut dyn PixelSink,
        transform: &AffineTransform,
        tuning: &RasterTuning,
    ) -> Result<()> {
        self.validate()?;
        let scale = transform.mean_scale();
        match *self {
            Shape::Line {
                start,
                end,
                thickness,
                color,
            } => {
                line::draw_line(
                    sink,
                    transform.apply(start),
                    transform.apply(end),
                    thickness * scale,
                    color,
                );
            }
            Shape::Rect {
                center,
                width,
                height,
                rotation,
                stroke_width,
                stroke_color,
                fill_color,
            } => {
                let sw = effective_stroke(stroke_width, stroke_color);
                match crisp_size(transform, rotation, width, height, tuning) {
                    Some((w, h)) => {
                        let r = CrispRect::from_center(transform.apply(center), w, h, sw * scale);
                        if let Some(color) = fill_color {
                            r.fill(sink, color);
                        }
                        if let Some(color) = stroke_color {
                            r.stroke(sink, color);
                        }
                    }
                    None => {
                        let local = local_frame(transform, center, rotation);
                        if let Some(color) = fill_color {
                            let inner = rect::centered_corners(
                                (width.abs() - sw).max(0.),
                                (height.abs() - sw).max(0.),
                            )
                            .map(|p| local.apply(p));
                            rect::fill_quad(sink, &inner, color);
                        }
                        if let Some(color) = stroke_color {
                            let corners = rect::centered_corners(width.abs(), height.abs())
                                .map(|p| local.apply(p));
                            rect::stroke_quad(sink, &corners, sw * scale, color);
                        }
                    }
                }
            }
            Shape::RoundedRect {
                center,
                width,
                height,
                radius,
                rotation,
                stroke_width,
                stroke_color,
                fill_color,
            } => {
                let sw = effective_stroke(stroke_width, stroke_color);
                match crisp_size(transform, rotation, width, height, tuning) {
                    Some((w, h)) => {
                        let r = CrispRoundedRect::from_center(
                            transform.apply(center),
                            w,
                            h,
                            sw * scale,
                            radius * scale,
                        );
                        if let Some(color) = fill_color {
                            r.fill(sink, color);
                        }
                        if let Some(color) = stroke_color {
                            r.stroke(sink, color);
                        }
                    }
                    None => {
                        let r = TransformedRoundedRect {
                            transform: local_frame(transform, center, rotation),
                            width: width.abs(),
                            height: height.abs(),
                            radius,
                            stroke_width: sw,
                        };
                        if let Some(color) = fill_color {
                            r.fill(sink, color);
                        }
                        if let Some(color) = stroke_color {
                            r.stroke(sink, color);
                        }
                    }
                }
            }
            Shape::Circle {
                center,
                radius,
                stroke_width,
                stroke_color,
                fill_color,
            } => {
                let circle = CrispCircle::new(
                    transform.apply(center),
                    radius * scale,
                    tuning.circle_center_offset,
                );
                let thickness = stroke_width * scale;
                let stroke_scale = tuning.circle_stroke_scale;
                match (fill_color, stroke_color) {
                    (Some(fill), Some(stroke)) => {
                        circle.fill_and_stroke(sink, thickness, stroke_scale, fill, stroke)
                    }
                    (Some(fill), None) => circle.fill(sink, fill),
                    (None, Some(stroke)) => circle.stroke(sink, thickness, stroke_scale, stroke),
                    (None, None) => {}
                }
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                anticlockwise,
                stroke_width,
                stroke_color,
                fill_color,
            } => {
                let arc = Arc {
                    transform: *transform,
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    anticlockwise,
                };
                if let Some(color) = fill_color {
                    arc.fill(sink, color);
                }
                if let Some(color) = stroke_color {
                    arc.outer_stroke(sink, stroke_width, color);
                }
            }
        }
        Ok(())
    }
}

/// Device-space width and height when both the shape rotation and the
/// transform are within tolerance of a quarter turn, `None` otherwise.
pub(crate) fn crisp_size(
    transform: &AffineTransform,
    rotation: f64,
    width: f64,
    height: f64,
    tuning: &RasterTuning,
) -> Option<(f64, f64)> {
    let tolerance = tuning.axis_snap_tolerance;
    let shape_turns = snap_quarter_turns(rotation, tolerance)?;
    let transform_turns = transform.quarter_turns(tolerance)?;
    let (w, h) = if shape_turns % 2 == 1 {
        (height, width)
    } else {
        (width, height)
    };
    let (sx, sy) = transform.scale_factors();
    let (w, h) = (w.abs() * sx, h.abs() * sy);
    Some(if transform_turns % 2 == 1 { (h, w) } else { (w, h) })
}

/// Maps the shape's local frame (origin at its center, axes along its
/// rotation) to device space.
fn local_frame(transform: &AffineTransform, center: Point, rotation: f64) -> AffineTransform {
    let mut local = *transform;
    local.translate(center.x, center.y).rotate(rotation);
    local
}
