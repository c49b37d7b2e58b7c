//! Frame buffer storage and the single clip-aware blending entry point

use crate::color::{channel_to_byte, Color};
use crate::rendering::mask::ClippingMask;

/// Destination for rasterized pixels.
///
/// Every rasterizer writes through this trait. The production sink is
/// [`PixelCompositor`]; tests substitute recording sinks.
pub trait PixelSink {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// A fixed-size RGBA8 frame buffer (4 bytes per pixel, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Zeroes all four channels, bypassing blending and clipping.
    pub fn clear_pixel(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 4].fill(0);
        }
    }

    /// Source-over blend of `(r, g, b, a)` (with `a` on the 0–255 scale) into
    /// the pixel at `(x, y)`, scaled by `global_alpha`.
    ///
    /// Blending happens directly on the gamma-encoded channel values rather
    /// than in linear light.
    #[allow(clippy::too_many_arguments)]
    pub fn blend_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: f64, global_alpha: f64) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let src_alpha = (a / 255.) * global_alpha;
        if src_alpha.is_nan() || src_alpha <= 0. {
            return;
        }
        let dst_alpha = self.data[i + 3] as f64 / 255.;
        let new_alpha = src_alpha + dst_alpha * (1. - src_alpha);
        if new_alpha <= 0. {
            return;
        }
        let dst_weight = dst_alpha * (1. - src_alpha);
        for (offset, src) in [r, g, b].into_iter().enumerate() {
            let dst = self.data[i + offset] as f64;
            let value = (src as f64 * src_alpha + dst * dst_weight) / new_alpha;
            self.data[i + offset] = channel_to_byte(value);
        }
        self.data[i + 3] = channel_to_byte(new_alpha * 255.);
    }
}

/// Bounds-checked, clip-aware compositing writer for one draw call.
///
/// Borrows the frame buffer mutably and the active clipping mask immutably
/// for the duration of a single rasterization.
pub struct PixelCompositor<'a> {
    buffer: &'a mut FrameBuffer,
    mask: &'a ClippingMask,
    global_alpha: f64,
}

impl<'a> PixelCompositor<'a> {
    pub fn new(buffer: &'a mut FrameBuffer, mask: &'a ClippingMask, global_alpha: f64) -> Self {
        Self {
            buffer,
            mask,
            global_alpha,
        }
    }

    /// Pixels outside the buffer, or hidden by the mask, are ignored.
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: f64) {
        if !self.mask.is_unclipped() && !self.mask.test_pixel(x, y) {
            return;
        }
        self.buffer.blend_pixel(x, y, r, g, b, a, self.global_alpha);
    }

    pub fn clear_pixel(&mut self, x: i32, y: i32) {
        self.buffer.clear_pixel(x, y);
    }
}

impl PixelSink for PixelCompositor<'_> {
    fn width(&self) -> i32 {
        self.buffer.width() as i32
    }

    fn height(&self) -> i32 {
        self.buffer.height() as i32
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.set_pixel_rgba(x, y, color.r, color.g, color.b, color.a);
    }
}
