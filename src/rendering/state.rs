//! Render state snapshots and the save/restore stack

use crate::color::Color;
use crate::geometry::AffineTransform;
use crate::rendering::mask::ClippingMask;

/// One snapshot of everything `save()` captures.
///
/// `Clone` is a deep copy: the clipping mask is owned by exactly one state
/// and is never shared between snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub transform: AffineTransform,
    pub mask: ClippingMask,
    pub line_width: f64,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub global_alpha: f64,
}

impl RenderState {
    /// Identity transform, opaque black styles, full visibility.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            transform: AffineTransform::identity(),
            mask: ClippingMask::full(width, height),
            line_width: 1.,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            global_alpha: 1.,
        }
    }
}

/// The current state plus the stack of saved snapshots.
#[derive(Debug, Clone)]
pub struct StateStack {
    current: RenderState,
    saved: Vec<RenderState>,
}

impl StateStack {
    pub fn new(initial: RenderState) -> Self {
        Self {
            current: initial,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> &RenderState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut RenderState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pops the last snapshot into place. Returns false (and changes
    /// nothing) when the stack is empty.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(state) => {
                self.current = state;
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}
