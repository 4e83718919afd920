//! Drawing surface abstraction
//!
//! The field renders through this trait so the simulation can run against a
//! browser canvas or a headless recorder.

use glam::Vec2;

use super::color::Rgba;

/// Minimal 2D drawing contract used by the field renderer
pub trait Surface {
    /// Clear `size` logical pixels from the origin
    fn clear(&mut self, size: Vec2);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Fill a circle with a radial gradient; `stops` are `(offset, colour)` pairs
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { size: Vec2 },
    Line { from: Vec2, to: Vec2, color: Rgba, width: f32 },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Radial { center: Vec2, radius: f32, stops: Vec<(f32, Rgba)> },
}

/// Headless surface that records every call
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.ops.clear();
    }

    pub fn lines(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count()
    }

    pub fn circles(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. })).count()
    }

    pub fn radials(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Radial { .. })).count()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, size: Vec2) {
        self.ops.push(DrawOp::Clear { size });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ops.push(DrawOp::Line { from, to, color, width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle { center, radius, color });
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        self.ops.push(DrawOp::Radial {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}
