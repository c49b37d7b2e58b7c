//! Rendering core: state, clipping, compositing and rasterization
//!
//! Draw calls flow from [`Context`](crate::Context) through a [`Shape`] or a
//! raster routine in [`raster`], which writes pixels into a [`PixelSink`].
//! The production sink, [`PixelCompositor`], tests the active
//! [`ClippingMask`] and blends into the [`FrameBuffer`].

pub mod compositor;
pub mod digest;
pub mod mask;
pub mod raster;
pub mod shape;
pub mod state;

pub use compositor::{FrameBuffer, PixelCompositor, PixelSink};
pub use digest::frame_digest;
pub use mask::ClippingMask;
pub use shape::Shape;
pub use state::{RenderState, StateStack};
