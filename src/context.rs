//! The drawing context: owns the frame buffer and the render-state stack

use log::{debug, trace};

use crate::color::Color;
use crate::config::{CanvasConfig, RasterTuning};
use crate::error::{Error, Result};
use crate::geometry::{AffineTransform, Point};
use crate::rendering::raster::polygon;
use crate::rendering::raster::rect::CrispRect;
use crate::rendering::raster::rounded_rect::CrispRoundedRect;
use crate::rendering::shape::{crisp_size, Shape};
use crate::rendering::{
    frame_digest, ClippingMask, FrameBuffer, PixelCompositor, RenderState, StateStack,
};

/// A 2D drawing context modeled on the canvas API.
///
/// Every draw call resolves to device-space pixels, passes through the
/// active clipping mask and is blended into the context's own RGBA buffer.
///
/// ```
/// let mut ctx = rfcanvas::Context::new(20, 20);
/// ctx.set_fill_style("#ff0000").unwrap();
/// ctx.fill_rect(2., 2., 4., 4.).unwrap();
/// assert_eq!(ctx.get_pixel(3, 3), Some([255, 0, 0, 255]));
/// assert_eq!(ctx.get_pixel(6, 3), Some([0, 0, 0, 0]));
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    buffer: FrameBuffer,
    states: StateStack,
    // device-space quads collected by rect() since the last begin_path()
    path: Vec<Vec<Point>>,
    tuning: RasterTuning,
}

/// Moves a negative extent onto the other side of its origin.
fn normalize_span(origin: f64, extent: f64) -> (f64, f64) {
    if extent < 0. {
        (origin + extent, -extent)
    } else {
        (origin, extent)
    }
}

fn check_rect_size(op: &str, width: f64, height: f64) -> Result<()> {
    for (name, v) in [("width", width), ("height", height)] {
        if !v.is_finite() || v.fract() != 0. {
            return Err(Error::validation(format!(
                "{op}: {name} must be a whole number of pixels, got {v}"
            )));
        }
    }
    Ok(())
}

fn check_finite(op: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::validation(format!("{op}: arguments must be finite")))
    }
}

impl Context {
    /// Creates a transparent `width × height` context with default tuning.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: FrameBuffer::new(width, height),
            states: StateStack::new(RenderState::new(width, height)),
            path: Vec::new(),
            tuning: RasterTuning::default(),
        }
    }

    pub fn with_config(config: CanvasConfig) -> Result<Self> {
        config.validate()?;
        let mut ctx = Self::new(config.width, config.height);
        ctx.tuning = config.tuning;
        Ok(ctx)
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn tuning(&self) -> &RasterTuning {
        &self.tuning
    }

    // --- state ---

    pub fn save(&mut self) {
        self.states.save();
    }

    /// Restoring with nothing saved leaves the state untouched.
    pub fn restore(&mut self) {
        if !self.states.restore() {
            debug!("restore() called with an empty state stack; ignoring");
        }
    }

    pub fn save_depth(&self) -> usize {
        self.states.depth()
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.states.current_mut().transform.translate(x, y);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.states.current_mut().transform.rotate(radians);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.states.current_mut().transform.scale(sx, sy);
    }

    pub fn reset_transform(&mut self) {
        self.states.current_mut().transform = AffineTransform::identity();
    }

    pub fn transform(&self) -> AffineTransform {
        self.states.current().transform
    }

    // --- style ---

    /// Negative and non-finite widths are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if !width.is_finite() || width < 0. {
            debug!("ignoring lineWidth {width}");
            return;
        }
        self.states.current_mut().line_width = width;
    }

    pub fn line_width(&self) -> f64 {
        self.states.current().line_width
    }

    /// Parses a CSS color; on error the current style is kept.
    pub fn set_stroke_style(&mut self, css: &str) -> Result<()> {
        self.states.current_mut().stroke_color = Color::parse(css)?;
        Ok(())
    }

    pub fn stroke_style(&self) -> Color {
        self.states.current().stroke_color
    }

    /// Parses a CSS color; on error the current style is kept.
    pub fn set_fill_style(&mut self, css: &str) -> Result<()> {
        self.states.current_mut().fill_color = Color::parse(css)?;
        Ok(())
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.states.current_mut().fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.states.current_mut().stroke_color = color;
    }

    pub fn fill_style(&self) -> Color {
        self.states.current().fill_color
    }

    /// Values outside `[0, 1]` (and NaN) are ignored.
    pub fn set_global_alpha(&mut self, alpha: f64) {
        if !(0. ..=1.).contains(&alpha) {
            debug!("ignoring globalAlpha {alpha}");
            return;
        }
        self.states.current_mut().global_alpha = alpha;
    }

    pub fn global_alpha(&self) -> f64 {
        self.states.current().global_alpha
    }

    // --- path & clip ---

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    /// Adds a rectangle to the path, transformed by the current matrix.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let t = self.states.current().transform;
        self.path.push(vec![
            t.transform_point(x, y),
            t.transform_point(x + width, y),
            t.transform_point(x + width, y + height),
            t.transform_point(x, y + height),
        ]);
    }

    /// Intersects the clipping mask with the union of the path's
    /// rectangles. Clipping to an empty path hides everything.
    pub fn clip(&mut self) {
        let (width, height) = (self.width(), self.height());
        let mut scratch = ClippingMask::empty(width, height);
        for quad in &self.path {
            polygon::for_each_covered(
                std::slice::from_ref(quad),
                width as i32,
                height as i32,
                |x, y| scratch.set_bit(x, y),
            );
        }
        let mask = &mut self.states.current_mut().mask;
        mask.intersect_with(&scratch);
        trace!(
            "clip to {} rect(s): {} visible pixels",
            self.path.len(),
            mask.visible_count()
        );
    }

    // --- drawing ---

    /// Paints a shape with its own colors under the current transform, clip
    /// and global alpha.
    pub fn draw_shape(&mut self, shape: &Shape) -> Result<()> {
        let state = self.states.current();
        let mut sink = PixelCompositor::new(&mut self.buffer, &state.mask, state.global_alpha);
        shape.rasterize(&mut sink, &state.transform, &self.tuning)
    }

    /// Crisp path for canvas-style `(x, y, w, h)` rectangles whose device
    /// image is axis-aligned; `None` when the transform rotates off-axis.
    fn device_rect(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke_width: f64,
    ) -> Option<CrispRect> {
        let t = self.states.current().transform;
        let (dw, dh) = crisp_size(&t, 0., width, height, &self.tuning)?;
        let a = t.transform_point(x, y);
        let b = t.transform_point(x + width, y + height);
        let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
        Some(CrispRect::from_origin(origin, dw, dh, stroke_width * t.mean_scale()))
    }

    fn paint_rect(
        &mut self,
        op: &str,
        (x, y, width, height): (f64, f64, f64, f64),
        fill: Option<Color>,
        stroke: Option<Color>,
    ) -> Result<()> {
        check_finite(op, &[x, y])?;
        check_rect_size(op, width, height)?;
        let (x, width) = normalize_span(x, width);
        let (y, height) = normalize_span(y, height);
        let stroke_width = if stroke.is_some() { self.line_width() } else { 0. };

        match self.device_rect(x, y, width, height, stroke_width) {
            Some(rect) => {
                let state = self.states.current();
                let mut sink =
                    PixelCompositor::new(&mut self.buffer, &state.mask, state.global_alpha);
                if let Some(color) = fill {
                    rect.fill(&mut sink, color);
                }
                if let Some(color) = stroke {
                    rect.stroke(&mut sink, color);
                }
                Ok(())
            }
            None => self.draw_shape(&Shape::Rect {
                center: Point::new(x + width / 2., y + height / 2.),
                width,
                height,
                rotation: 0.,
                stroke_width,
                stroke_color: stroke,
                fill_color: fill,
            }),
        }
    }

    /// Fills the rectangle with the fill style. Width and height must be
    /// whole numbers; negative sizes extend left or up from `(x, y)`.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let fill = self.fill_style();
        self.paint_rect("fillRect", (x, y, width, height), Some(fill), None)
    }

    /// Strokes the rectangle outline with the stroke style and line width.
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let stroke = self.stroke_style();
        self.paint_rect("strokeRect", (x, y, width, height), None, Some(stroke))
    }

    /// Fill and stroke in one pass; the fill stops where the stroke begins.
    pub fn fill_and_stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let (fill, stroke) = (self.fill_style(), self.stroke_style());
        let rect = (x, y, width, height);
        self.paint_rect("fillAndStrokeRect", rect, Some(fill), Some(stroke))
    }

    /// Zeroes every pixel whose center lies inside the transformed
    /// rectangle. Neither clipping nor global alpha apply.
    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let t = self.states.current().transform;
        let quad = vec![
            t.transform_point(x, y),
            t.transform_point(x + width, y),
            t.transform_point(x + width, y + height),
            t.transform_point(x, y + height),
        ];
        let (w, h) = (self.width() as i32, self.height() as i32);
        let buffer = &mut self.buffer;
        polygon::for_each_covered(&[quad], w, h, |px, py| buffer.clear_pixel(px, py));
    }

    /// Draws a segment with the stroke style and line width.
    pub fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let shape = Shape::Line {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
            thickness: self.line_width(),
            color: self.stroke_style(),
        };
        self.draw_shape(&shape)
    }

    fn circle(&self, cx: f64, cy: f64, radius: f64, fill: bool, stroke: bool) -> Shape {
        Shape::Circle {
            center: Point::new(cx, cy),
            radius,
            stroke_width: self.line_width(),
            stroke_color: stroke.then(|| self.stroke_style()),
            fill_color: fill.then(|| self.fill_style()),
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        let shape = self.circle(cx, cy, radius, true, false);
        self.draw_shape(&shape)
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        let shape = self.circle(cx, cy, radius, false, true);
        self.draw_shape(&shape)
    }

    /// Pixels shared by fill and outline are blended once, with the stroke
    /// color.
    pub fn fill_and_stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> Result<()> {
        let shape = self.circle(cx, cy, radius, true, true);
        self.draw_shape(&shape)
    }

    #[allow(clippy::too_many_arguments)]
    fn arc(
        &self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
        fill: bool,
        stroke: bool,
    ) -> Shape {
        Shape::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
            stroke_width: self.line_width(),
            stroke_color: stroke.then(|| self.stroke_style()),
            fill_color: fill.then(|| self.fill_style()),
        }
    }

    /// Fills the pie slice between the two angles.
    pub fn fill_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<()> {
        let center = Point::new(cx, cy);
        let shape = self.arc(center, radius, start_angle, end_angle, anticlockwise, true, false);
        self.draw_shape(&shape)
    }

    /// Strokes a band of `lineWidth` just outside the arc, so it never
    /// covers a pie slice filled with the same geometry.
    pub fn outer_stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<()> {
        let center = Point::new(cx, cy);
        let shape = self.arc(center, radius, start_angle, end_angle, anticlockwise, false, true);
        self.draw_shape(&shape)
    }

    pub fn fill_and_outer_stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> Result<()> {
        let center = Point::new(cx, cy);
        let shape = self.arc(center, radius, start_angle, end_angle, anticlockwise, true, true);
        self.draw_shape(&shape)
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_rounded_rect(
        &mut self,
        op: &str,
        (x, y, width, height): (f64, f64, f64, f64),
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
    ) -> Result<()> {
        check_finite(op, &[x, y, radius])?;
        check_rect_size(op, width, height)?;
        let (x, width) = normalize_span(x, width);
        let (y, height) = normalize_span(y, height);
        let stroke_width = if stroke.is_some() { self.line_width() } else { 0. };

        match self.device_rect(x, y, width, height, stroke_width) {
            Some(rect) => {
                let rounded = CrispRoundedRect::new(rect, radius * self.transform().mean_scale());
                let state = self.states.current();
                let mut sink =
                    PixelCompositor::new(&mut self.buffer, &state.mask, state.global_alpha);
                if let Some(color) = fill {
                    rounded.fill(&mut sink, color);
                }
                if let Some(color) = stroke {
                    rounded.stroke(&mut sink, color);
                }
                Ok(())
            }
            None => self.draw_shape(&Shape::RoundedRect {
                center: Point::new(x + width / 2., y + height / 2.),
                width,
                height,
                radius,
                rotation: 0.,
                stroke_width,
                stroke_color: stroke,
                fill_color: fill,
            }),
        }
    }

    pub fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<()> {
        let fill = self.fill_style();
        let rect = (x, y, width, height);
        self.paint_rounded_rect("fillRoundedRect", rect, radius, Some(fill), None)
    }

    pub fn stroke_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<()> {
        let stroke = self.stroke_style();
        let rect = (x, y, width, height);
        self.paint_rounded_rect("strokeRoundedRect", rect, radius, None, Some(stroke))
    }

    pub fn fill_and_stroke_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) -> Result<()> {
        let (fill, stroke) = (self.fill_style(), self.stroke_style());
        self.paint_rounded_rect(
            "fillAndStrokeRoundedRect",
            (x, y, width, height),
            radius,
            Some(fill),
            Some(stroke),
        )
    }

    // --- output ---

    /// Raw RGBA bytes, `width × height × 4`, row-major.
    pub fn image_data(&self) -> &[u8] {
        self.buffer.data()
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.buffer.get_pixel(x, y)
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Hex SHA-256 of [`image_data`](Self::image_data).
    pub fn digest(&self) -> String {
        frame_digest(self.buffer.data())
    }
}
