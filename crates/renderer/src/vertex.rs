//! GPU buffer layouts for the point landscape.
//!
//! The CPU evaluator and a vertex-shader implementation read the same
//! inputs; these structs are those inputs in upload-ready form.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use ripple::{FieldState, PointSample, MAX_RIPPLES};

/// One evaluated point, ready for a point-list vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

impl PointVertex {
    /// Rest position with the sample's height applied.
    pub fn from_sample(rest: Vec3, sample: &PointSample) -> Self {
        Self {
            position: [rest.x, sample.height, rest.z],
            size: sample.size,
            color: sample.color.to_array(),
            alpha: sample.alpha,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Zip rest positions with their samples into `out`.
pub fn pack_points(rest: &[Vec3], samples: &[PointSample], out: &mut Vec<PointVertex>) {
    out.clear();
    out.extend(
        rest.iter()
            .zip(samples)
            .map(|(p, s)| PointVertex::from_sample(*p, s)),
    );
}

/// Per-frame field inputs in std140 layout.
///
/// Ripple slots are packed as `(x, age, z, strength)`; a zero strength marks
/// an unused slot.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RippleUniforms {
    pub ripples: [[f32; 4]; MAX_RIPPLES],
    pub color_from: [f32; 4],
    pub color_to: [f32; 4],
    pub ripple_color: [f32; 4],
    pub view: [[f32; 4]; 4],
    pub time: f32,
    pub color_time: f32,
    pub _pad: [f32; 2],
}

impl RippleUniforms {
    pub fn from_state(state: &FieldState) -> Self {
        let mut ripples = [[0.0; 4]; MAX_RIPPLES];
        for (slot, r) in ripples.iter_mut().zip(&state.ripples) {
            *slot = [r.x, r.age, r.z, r.strength];
        }
        Self {
            ripples,
            color_from: state.color.from().extend(1.0).to_array(),
            color_to: state.color.to().extend(1.0).to_array(),
            ripple_color: state.ripple_color.extend(1.0).to_array(),
            view: state.view.to_cols_array_2d(),
            time: state.time,
            color_time: state.color.elapsed(),
            _pad: [0.0; 2],
        }
    }

    pub fn active_ripples(&self) -> usize {
        self.ripples.iter().filter(|r| r[3] > 0.0).count()
    }
}
