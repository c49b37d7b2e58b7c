//! JSON scene files replayed through the drawing API

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::{CanvasConfig, RasterTuning};
use crate::context::Context;
use crate::error::Result;
use crate::geometry::Point;
use crate::rendering::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectArgs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedRectArgs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleArgs {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcArgs {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    #[serde(default)]
    pub anticlockwise: bool,
}

/// One drawing-API call, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    Scale { sx: f64, sy: f64 },
    ResetTransform,
    LineWidth { width: f64 },
    StrokeStyle { color: String },
    FillStyle { color: String },
    GlobalAlpha { alpha: f64 },
    BeginPath,
    Rect(RectArgs),
    Clip,
    FillRect(RectArgs),
    StrokeRect(RectArgs),
    FillAndStrokeRect(RectArgs),
    ClearRect(RectArgs),
    StrokeLine { from: Point, to: Point },
    FillCircle(CircleArgs),
    StrokeCircle(CircleArgs),
    FillAndStrokeCircle(CircleArgs),
    FillArc(ArcArgs),
    OuterStrokeArc(ArcArgs),
    FillAndOuterStrokeArc(ArcArgs),
    FillRoundedRect(RoundedRectArgs),
    StrokeRoundedRect(RoundedRectArgs),
    FillAndStrokeRoundedRect(RoundedRectArgs),
    Shape { shape: Shape },
}

impl Command {
    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        match self {
            Command::Save => ctx.save(),
            Command::Restore => ctx.restore(),
            Command::Translate { x, y } => ctx.translate(*x, *y),
            Command::Rotate { radians } => ctx.rotate(*radians),
            Command::Scale { sx, sy } => ctx.scale(*sx, *sy),
            Command::ResetTransform => ctx.reset_transform(),
            Command::LineWidth { width } => ctx.set_line_width(*width),
            Command::StrokeStyle { color } => ctx.set_stroke_style(color)?,
            Command::FillStyle { color } => ctx.set_fill_style(color)?,
            Command::GlobalAlpha { alpha } => ctx.set_global_alpha(*alpha),
            Command::BeginPath => ctx.begin_path(),
            Command::Rect(r) => ctx.rect(r.x, r.y, r.width, r.height),
            Command::Clip => ctx.clip(),
            Command::FillRect(r) => ctx.fill_rect(r.x, r.y, r.width, r.height)?,
            Command::StrokeRect(r) => ctx.stroke_rect(r.x, r.y, r.width, r.height)?,
            Command::FillAndStrokeRect(r) => {
                ctx.fill_and_stroke_rect(r.x, r.y, r.width, r.height)?
            }
            Command::ClearRect(r) => ctx.clear_rect(r.x, r.y, r.width, r.height),
            Command::StrokeLine { from, to } => ctx.stroke_line(from.x, from.y, to.x, to.y)?,
            Command::FillCircle(c) => ctx.fill_circle(c.cx, c.cy, c.radius)?,
            Command::StrokeCircle(c) => ctx.stroke_circle(c.cx, c.cy, c.radius)?,
            Command::FillAndStrokeCircle(c) => {
                ctx.fill_and_stroke_circle(c.cx, c.cy, c.radius)?
            }
            Command::FillArc(a) => {
                ctx.fill_arc(a.cx, a.cy, a.radius, a.start_angle, a.end_angle, a.anticlockwise)?
            }
            Command::OuterStrokeArc(a) => ctx.outer_stroke_arc(
                a.cx,
                a.cy,
                a.radius,
                a.start_angle,
                a.end_angle,
                a.anticlockwise,
            )?,
            Command::FillAndOuterStrokeArc(a) => ctx.fill_and_outer_stroke_arc(
                a.cx,
                a.cy,
                a.radius,
                a.start_angle,
                a.end_angle,
                a.anticlockwise,
            )?,
            Command::FillRoundedRect(r) => {
                ctx.fill_rounded_rect(r.x, r.y, r.width, r.height, r.radius)?
            }
            Command::StrokeRoundedRect(r) => {
                ctx.stroke_rounded_rect(r.x, r.y, r.width, r.height, r.radius)?
            }
            Command::FillAndStrokeRoundedRect(r) => {
                ctx.fill_and_stroke_rounded_rect(r.x, r.y, r.width, r.height, r.radius)?
            }
            Command::Shape { shape } => ctx.draw_shape(shape)?,
        }
        Ok(())
    }
}

/// A canvas size plus an ordered list of commands.
///
/// ```
/// let scene = rfcanvas::Scene::from_json(r#"{
///     "width": 8, "height": 8,
///     "commands": [
///         {"op": "fill_style", "color": "rgb(0, 0, 255)"},
///         {"op": "fill_rect", "x": 0, "y": 0, "width": 2, "height": 2}
///     ]
/// }"#).unwrap();
/// let ctx = scene.render().unwrap();
/// assert_eq!(ctx.get_pixel(1, 1), Some([0, 0, 255, 255]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub tuning: RasterTuning,
    /// Painted over the whole canvas before the first command
    pub background: Option<Color>,
    pub commands: Vec<Command>,
}

impl Default for Scene {
    fn default() -> Self {
        let config = CanvasConfig::default();
        Self {
            width: config.width,
            height: config.height,
            tuning: config.tuning,
            background: None,
            commands: Vec::new(),
        }
    }
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn config(&self) -> CanvasConfig {
        CanvasConfig {
            width: self.width,
            height: self.height,
            tuning: self.tuning.clone(),
        }
    }

    /// Replays every command into a fresh context. Stops at the first
    /// command that fails validation.
    pub fn render(&self) -> Result<Context> {
        let mut ctx = Context::with_config(self.config())?;
        if let Some(background) = self.background {
            ctx.save();
            ctx.set_fill_color(background);
            ctx.fill_rect(0., 0., self.width as f64, self.height as f64)?;
            ctx.restore();
        }
        for (index, command) in self.commands.iter().enumerate() {
            debug!("replaying command {index}: {command:?}");
            command.apply(&mut ctx)?;
        }
        debug!(
            "replayed {} commands into a {}x{} canvas",
            self.commands.len(),
            self.width,
            self.height
        );
        Ok(ctx)
    }
}
