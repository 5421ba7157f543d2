//! Per-point landscape field: height, colour, size and alpha.
//!
//! Everything in here is a pure function of the point's rest position and a
//! frozen [`FieldState`]. Nothing is cached between frames, so the same
//! inputs always give bit-identical output and points can be evaluated in
//! any order (or in parallel).

use crate::color::ColorTransition;
use crate::constants::*;
use crate::registry::{RippleEvent, RippleSnapshot};
use engine_core::{lerp, smoothstep, CYAN};
use glam::{Mat4, Vec2, Vec3};
use rayon::prelude::*;
use std::f32::consts::TAU;

/// Uniform-like inputs shared by every point in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    /// Simulation time in seconds.
    pub time: f32,
    pub ripples: RippleSnapshot,
    pub color: ColorTransition,
    pub ripple_color: Vec3,
    /// World → view transform, used for perspective point sizing.
    pub view: Mat4,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            time: 0.0,
            ripples: [RippleEvent::INACTIVE; MAX_RIPPLES],
            color: ColorTransition::default(),
            ripple_color: CYAN,
            view: Mat4::IDENTITY,
        }
    }
}

/// Renderable attributes of one point for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointSample {
    /// Final `position.y` (base wave + ripples).
    pub height: f32,
    /// Ripple-only part of `height`.
    pub ripple_height: f32,
    pub color: Vec3,
    pub alpha: f32,
    /// Point diameter in pixels.
    pub size: f32,
    /// Sparkle intensity in `0..=1`.
    pub sparkle: f32,
}

/// Shape parameters of a ripple, derived from its strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleProfile {
    pub wavelength: f32,
    /// Envelope decay per unit behind the front (smaller is wider).
    pub packet_decay: f32,
    pub amplitude: f32,
}

impl RippleProfile {
    pub fn for_strength(strength: f32) -> Self {
        let s = ((strength - MIN_STRENGTH) / (MAX_STRENGTH - MIN_STRENGTH)).clamp(0.0, 1.0);
        Self {
            wavelength: lerp(RIPPLE_WAVELENGTH_MIN, RIPPLE_WAVELENGTH_MAX, s),
            packet_decay: lerp(RIPPLE_PACKET_DECAY_MIN_STRENGTH, RIPPLE_PACKET_DECAY_MAX_STRENGTH, s),
            amplitude: lerp(RIPPLE_AMPLITUDE_MIN, RIPPLE_AMPLITUDE_MAX, s * s),
        }
    }
}

/// One ripple's effect on one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleSample {
    pub displacement: f32,
    /// Colour weight in `0..=1`; ignores the distance falloff so the tint
    /// outlives the height.
    pub intensity: f32,
}

/// Travelling-sine terrain, independent of any ripple.
pub fn base_height(x: f32, z: f32, time: f32) -> f32 {
    let wave1 = (x * BASE_WAVE1_FREQ + time * BASE_WAVE1_SPEED).sin()
        * (z * BASE_WAVE1_FREQ + time * BASE_WAVE1_SPEED).sin()
        * BASE_WAVE1_AMPLITUDE;
    let wave2 = (x * BASE_WAVE2_FREQ_X + time * BASE_WAVE2_SPEED).sin()
        * (z * BASE_WAVE2_FREQ_Z + time * BASE_WAVE2_SPEED).cos()
        * BASE_WAVE2_AMPLITUDE;
    wave1 + wave2
}

/// `None` for inactive slots and for points the wavefront has not reached.
pub fn ripple_sample(point: Vec2, ripple: &RippleEvent) -> Option<RippleSample> {
    if !ripple.is_active() {
        return None;
    }
    let dist = point.distance(ripple.center());
    let radius = ripple.age * RIPPLE_SPEED;
    if dist >= radius {
        return None;
    }

    let profile = RippleProfile::for_strength(ripple.strength);
    let from_front = dist - radius;

    let dist_damp = 1.0 / (1.0 + dist * RIPPLE_DISTANCE_FALLOFF);
    let time_damp = (-ripple.age * RIPPLE_TIME_DECAY).exp();
    let packet_damp = (-from_front.abs() * profile.packet_decay).exp();
    let wave = (TAU / profile.wavelength * from_front).sin();

    let packet = wave * profile.amplitude * time_damp * packet_damp;
    Some(RippleSample {
        displacement: packet * dist_damp,
        intensity: smoothstep(RIPPLE_COLOR_THRESHOLD_LOW, RIPPLE_COLOR_THRESHOLD_HIGH, packet.abs()),
    })
}

/// Deterministic high-frequency flicker in `0..=1`.
pub fn flicker(time: f32, x: f32, z: f32) -> f32 {
    0.5 + 0.5 * (time * FLICKER_TIME_FREQ + x * FLICKER_X_FREQ + z * FLICKER_Z_FREQ).sin()
}

/// Evaluates the landscape field for grid points.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldEvaluator;

impl FieldEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a single rest position `(x, 0, z)`.
    pub fn evaluate(&self, point: Vec3, state: &FieldState) -> PointSample {
        let (x, z) = (point.x, point.z);
        let ground = Vec2::new(x, z);
        let dist_center = ground.length();

        let mut ripple_height = 0.0_f32;
        let mut ripple_color = Vec3::ZERO;
        let mut color_weight = 0.0_f32;
        for ripple in &state.ripples {
            if let Some(sample) = ripple_sample(ground, ripple) {
                ripple_height += sample.displacement;
                if sample.intensity > 0.0 {
                    ripple_color += state.ripple_color * sample.intensity * RIPPLE_COLOR_BOOST;
                    color_weight += sample.intensity;
                }
            }
        }

        let height = base_height(x, z, state.time) + ripple_height;

        let mut color = state.color.color_at(dist_center);
        if color_weight > 0.0 {
            color = color.lerp(ripple_color / color_weight, color_weight.min(1.0));
        }

        let sparkle = smoothstep(SPARKLE_THRESHOLD, SPARKLE_THRESHOLD * 2.0, ripple_height.abs());
        let flick = if sparkle > 0.0 { flicker(state.time, x, z) } else { 0.0 };
        if sparkle > 0.0 {
            color += Vec3::from(SPARKLE_COLOR) * sparkle * flick;
        }

        let view_pos = state.view.transform_point3(Vec3::new(x, height, z));
        let depth = -view_pos.z;
        let mut size = if depth > MIN_VIEW_DEPTH {
            POINT_SIZE * (POINT_SIZE_REFERENCE_DEPTH / depth)
        } else {
            0.0
        };

        let alpha = if sparkle > 0.0 {
            size *= 1.0 + sparkle * SPARKLE_SIZE_BOOST * flick;
            1.0
        } else {
            1.0 - smoothstep(FADE_INNER_RADIUS, FADE_OUTER_RADIUS, dist_center)
        };

        PointSample { height, ripple_height, color, alpha, size, sparkle }
    }

    /// Evaluate every point into `out`, reusing its allocation.
    pub fn evaluate_all(&self, points: &[Vec3], state: &FieldState, out: &mut Vec<PointSample>) {
        points
            .par_iter()
            .map(|&p| self.evaluate(p, state))
            .collect_into_vec(out);
    }
}
