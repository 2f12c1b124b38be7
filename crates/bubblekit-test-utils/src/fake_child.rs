//! A bubble child with a fixed natural size.

use bubblekit_core::Size;
use bubblekit_layout::{LayoutConstraint, MeasureChild};
use glam::Vec2;

/// Measures to its natural size clamped by the constraint, and records every
/// constraint it was given.
#[derive(Debug, Clone, Default)]
pub struct FakeChild {
    pub natural: Size<f32>,
    pub frame_size: Size<f32>,
    pub frame_offset: Vec2,
    constraints: Vec<LayoutConstraint>,
}

impl FakeChild {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            natural: Size::new(width, height),
            ..Default::default()
        }
    }

    pub fn constraints(&self) -> &[LayoutConstraint] {
        &self.constraints
    }

    pub fn last_constraint(&self) -> Option<&LayoutConstraint> {
        self.constraints.last()
    }

    pub fn measure_count(&self) -> usize {
        self.constraints.len()
    }
}

impl MeasureChild for FakeChild {
    fn measure(&mut self, constraint: &LayoutConstraint) -> Size<f32> {
        self.constraints.push(*constraint);
        self.frame_size = constraint.constrain(self.natural);
        self.frame_size
    }

    fn frame_size(&self) -> Size<f32> {
        self.frame_size
    }

    fn set_frame_size(&mut self, size: Size<f32>) {
        self.frame_size = size;
    }

    fn set_frame_offset(&mut self, offset: Vec2) {
        self.frame_offset = offset;
    }
}
