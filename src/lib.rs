//! RFox Canvas
//!
//! A software implementation of the 2D canvas drawing API that produces
//! crisp, pixel-predictable output: axis-aligned geometry lands on whole
//! pixels, fills and strokes never overlap, and every draw call is a pure
//! function of its inputs and the current render state.
//!
//! # Features
//!
//! - **Canvas-style state machine**: transform stack, rectangular clipping
//!   and style state with `save()`/`restore()`
//! - **Crisp rasterizers** for lines, rectangles, rounded rectangles,
//!   circles and arcs, with a generic polygon path for rotated shapes
//! - **Deterministic output**: raw RGBA access plus a SHA-256 frame digest
//!   for golden comparisons
//!
//! # Example
//!
//! ```
//! use rfcanvas::Context;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ctx = Context::new(200, 200);
//! ctx.set_stroke_style("rgb(255, 0, 0)")?;
//! ctx.stroke_rect(75., 85., 50., 30.)?;
//!
//! // a 1px stroke straddles the path edge on the outside
//! assert_eq!(ctx.get_pixel(74, 84), Some([255, 0, 0, 255]));
//! assert_eq!(ctx.get_pixel(100, 100), Some([0, 0, 0, 0]));
//! println!("frame digest: {}", ctx.digest());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod config;
pub mod geometry;

// State stack, clipping mask, compositor and rasterizers
pub mod rendering;

pub mod context;

// JSON scene replay used by the CLI and golden tests
pub mod scene;

pub use color::Color;
pub use config::{CanvasConfig, RasterTuning};
pub use context::Context;
pub use geometry::{AffineTransform, Point};
pub use rendering::{frame_digest, Shape};
pub use scene::{Command, Scene};

/// Creates a context from a validated configuration.
///
/// # Examples
///
/// ```
/// let ctx = rfcanvas::new_context(rfcanvas::CanvasConfig::new(32, 16)).unwrap();
/// assert_eq!(ctx.image_data().len(), 32 * 16 * 4);
/// ```
pub fn new_context(config: CanvasConfig) -> Result<Context> {
    Context::with_config(config)
}
