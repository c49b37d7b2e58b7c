//! Geometry primitives shared by the state machine and the rasterizers

pub mod point;
pub mod transform;

pub use point::Point;
pub use transform::AffineTransform;
