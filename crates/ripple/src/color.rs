//! Radial cross-fade between the previous and current base colour.

use crate::constants::{
    BASE_BRIGHTNESS, COLOR_FRONT_SPEED, COLOR_FRONT_WIDTH, COLOR_TRANSITION_FINISHED,
};
use engine_core::{smoothstep, WHITE};
use glam::Vec3;

/// Base-colour state. A new target sends a circular wavefront outward from
/// the origin; points the front has passed show `to`, the rest still show
/// `from`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransition {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
}

impl Default for ColorTransition {
    fn default() -> Self {
        Self::settled(WHITE)
    }
}

impl ColorTransition {
    /// A transition that has already finished on `color`.
    pub fn settled(color: Vec3) -> Self {
        Self { from: color, to: color, elapsed: COLOR_TRANSITION_FINISHED }
    }

    /// Start fading towards `color`.
    ///
    /// The fade restarts from the previous target, not from whatever was on
    /// screen mid-transition.
    pub fn set_target(&mut self, color: Vec3) {
        self.from = self.to;
        self.to = color;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    pub fn from(&self) -> Vec3 {
        self.from
    }

    pub fn to(&self) -> Vec3 {
        self.to
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Radius of the colour wavefront.
    pub fn front_radius(&self) -> f32 {
        self.elapsed * COLOR_FRONT_SPEED
    }

    /// Blended colour at `distance` from the origin, before brightness.
    pub fn blend_at(&self, distance: f32) -> Vec3 {
        let front = self.front_radius();
        let old_weight = smoothstep(front - COLOR_FRONT_WIDTH, front, distance);
        self.to.lerp(self.from, old_weight)
    }

    /// Final base colour at `distance`, boosted for additive blending.
    pub fn color_at(&self, distance: f32) -> Vec3 {
        self.blend_at(distance) * BASE_BRIGHTNESS
    }
}
