//! Tunable constants of the landscape field.
//!
//! These are look-and-feel values, not physical ones. Changing any of them
//! changes the rendered result, so tests reference them by name.

// ── Ripple registry ─────────────────────────────────────────────────────

/// Number of ripple slots handed to the evaluator each frame.
pub const MAX_RIPPLES: usize = 20;
/// Ripples at or past this age (seconds) are removed.
pub const RIPPLE_LIFETIME: f32 = 40.0;
pub const MIN_STRENGTH: f32 = 1.0;
pub const MAX_STRENGTH: f32 = 20.0;
pub const DEFAULT_STRENGTH: f32 = 5.0;

// ── Base terrain wave ───────────────────────────────────────────────────

pub const BASE_WAVE1_FREQ: f32 = 0.2;
pub const BASE_WAVE1_SPEED: f32 = 0.5;
pub const BASE_WAVE1_AMPLITUDE: f32 = 2.0;
pub const BASE_WAVE2_FREQ_X: f32 = 1.0;
pub const BASE_WAVE2_FREQ_Z: f32 = 0.8;
pub const BASE_WAVE2_SPEED: f32 = 1.0;
pub const BASE_WAVE2_AMPLITUDE: f32 = 0.5;

// ── Ripple wave packet ──────────────────────────────────────────────────

/// Wavefront expansion speed in world units per second.
pub const RIPPLE_SPEED: f32 = 15.0;
pub const RIPPLE_WAVELENGTH_MIN: f32 = 3.0;
pub const RIPPLE_WAVELENGTH_MAX: f32 = 8.0;
/// Envelope decay per unit behind the front. Larger strength uses the smaller
/// value, giving a wider packet.
pub const RIPPLE_PACKET_DECAY_MIN_STRENGTH: f32 = 0.12;
pub const RIPPLE_PACKET_DECAY_MAX_STRENGTH: f32 = 0.04;
pub const RIPPLE_AMPLITUDE_MIN: f32 = 2.0;
pub const RIPPLE_AMPLITUDE_MAX: f32 = 8.0;
/// Inverse-distance falloff: `1 / (1 + d * k)`.
pub const RIPPLE_DISTANCE_FALLOFF: f32 = 0.1;
/// Exponential age decay: `exp(-age * k)`.
pub const RIPPLE_TIME_DECAY: f32 = 0.05;

// ── Ripple colour ───────────────────────────────────────────────────────

pub const RIPPLE_COLOR_THRESHOLD_LOW: f32 = 0.05;
pub const RIPPLE_COLOR_THRESHOLD_HIGH: f32 = 1.0;
pub const RIPPLE_COLOR_BOOST: f32 = 5.0;

// ── Base colour transition ──────────────────────────────────────────────

/// Colour wavefront speed in world units per second.
pub const COLOR_FRONT_SPEED: f32 = 20.0;
/// Width of the smoothed band behind the colour wavefront.
pub const COLOR_FRONT_WIDTH: f32 = 5.0;
/// Compensates for additive-blend dimming.
pub const BASE_BRIGHTNESS: f32 = 2.5;
/// Elapsed value that counts as a finished transition at start-up.
pub const COLOR_TRANSITION_FINISHED: f32 = 1000.0;

// ── Sparkle ─────────────────────────────────────────────────────────────

pub const SPARKLE_THRESHOLD: f32 = 1.5;
pub const SPARKLE_COLOR: [f32; 3] = [10.0, 10.0, 8.0];
pub const SPARKLE_SIZE_BOOST: f32 = 6.0;
pub const FLICKER_TIME_FREQ: f32 = 30.0;
pub const FLICKER_X_FREQ: f32 = 137.0;
pub const FLICKER_Z_FREQ: f32 = 43.0;

// ── Point size / alpha ──────────────────────────────────────────────────

pub const POINT_SIZE: f32 = 3.0;
/// View depth at which a point is drawn at exactly `POINT_SIZE`.
pub const POINT_SIZE_REFERENCE_DEPTH: f32 = 10.0;
/// Points closer than this to the eye plane are culled (size 0).
pub const MIN_VIEW_DEPTH: f32 = 1e-3;
pub const FADE_INNER_RADIUS: f32 = 50.0;
pub const FADE_OUTER_RADIUS: f32 = 70.0;

// ── Grid ────────────────────────────────────────────────────────────────

pub const DEFAULT_GRID_ROWS: usize = 408;
pub const DEFAULT_GRID_COLS: usize = 408;
pub const DEFAULT_GRID_SPACING: f32 = 0.25;
