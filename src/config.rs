//! Canvas configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration used when creating a [`Context`](crate::Context).
///
/// # Examples
///
/// ```
/// let cfg = rfcanvas::CanvasConfig::default();
/// assert_eq!((cfg.width, cfg.height), (600, 600));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Frame buffer width in pixels
    pub width: u32,
    /// Frame buffer height in pixels
    pub height: u32,
    /// Empirical constants used by the crisp rasterizers
    pub tuning: RasterTuning,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            tuning: RasterTuning::default(),
        }
    }
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ConfigError(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        self.tuning.validate()
    }
}

/// Constants tuned so output matches a browser canvas rasterizer.
///
/// These are visual-matching heuristics rather than geometric identities;
/// matching a different rasterizer may need different values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterTuning {
    /// Rotations within this many radians of a multiple of 90° are drawn
    /// through the axis-aligned path (default ≈ 0.057°)
    pub axis_snap_tolerance: f64,
    /// Offset applied to the rounded device-space center of circles
    pub circle_center_offset: (i32, i32),
    /// Factor applied to circle stroke thickness when it exceeds 1px
    pub circle_stroke_scale: f64,
}

impl Default for RasterTuning {
    fn default() -> Self {
        Self {
            axis_snap_tolerance: 0.001,
            circle_center_offset: (-1, -1),
            circle_stroke_scale: 0.75,
        }
    }
}

impl RasterTuning {
    pub fn validate(&self) -> Result<()> {
        if !self.axis_snap_tolerance.is_finite() || self.axis_snap_tolerance < 0. {
            return Err(Error::ConfigError(format!(
                "axis_snap_tolerance must be a non-negative number, got {}",
                self.axis_snap_tolerance
            )));
        }
        if !self.circle_stroke_scale.is_finite() || self.circle_stroke_scale <= 0. {
            return Err(Error::ConfigError(format!(
                "circle_stroke_scale must be positive, got {}",
                self.circle_stroke_scale
            )));
        }
        Ok(())
    }
}
