//! Per-frame orchestration of the landscape.

use crate::color::ColorTransition;
use crate::constants::{DEFAULT_STRENGTH, MAX_STRENGTH, MIN_STRENGTH};
use crate::field::{FieldEvaluator, FieldState, PointSample};
use crate::grid::PointGrid;
use crate::registry::RippleRegistry;
use crate::sink::RippleSink;
use engine_core::{sanitize_color, CYAN, WHITE};
use glam::{Mat4, Vec3};

/// Start-up values, also restored by [`FrameDriver::reset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverSettings {
    pub base_color: Vec3,
    pub ripple_color: Vec3,
    pub strength: u32,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self { base_color: WHITE, ripple_color: CYAN, strength: DEFAULT_STRENGTH as u32 }
    }
}

/// Owns all mutable landscape state and runs one tick per rendered frame.
///
/// Two clocks run side by side: simulation time (base wave and ripple ages)
/// and the colour-transition elapsed time, which restarts on every base
/// colour change.
#[derive(Debug)]
pub struct FrameDriver {
    settings: DriverSettings,
    time: f32,
    frame: u64,
    registry: RippleRegistry,
    color: ColorTransition,
    ripple_color: Vec3,
    strength: u32,
    grid: PointGrid,
    evaluator: FieldEvaluator,
    samples: Vec<PointSample>,
}

impl FrameDriver {
    pub fn new(grid: PointGrid, settings: DriverSettings) -> Self {
        let mut driver = Self {
            settings,
            time: 0.0,
            frame: 0,
            registry: RippleRegistry::new(),
            color: ColorTransition::default(),
            ripple_color: CYAN,
            strength: DEFAULT_STRENGTH as u32,
            samples: Vec::with_capacity(grid.len()),
            grid,
            evaluator: FieldEvaluator::new(),
        };
        driver.reset();
        driver
    }

    /// Back to start-up state: no ripples, time zero, colours settled.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.frame = 0;
        self.registry.clear();
        self.color = ColorTransition::settled(sanitize_color(self.settings.base_color));
        self.ripple_color = sanitize_color(self.settings.ripple_color);
        self.strength = clamp_strength(self.settings.strength);
        self.samples.clear();
    }

    /// Advance both clocks and age the ripples without evaluating points.
    pub fn advance(&mut self, delta: f32) {
        let delta = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            log::debug!("Ignoring invalid frame delta {delta}");
            0.0
        };
        self.time += delta;
        self.frame += 1;
        self.registry.advance(delta);
        self.color.advance(delta);
    }

    /// One full frame: advance state, then re-evaluate every grid point.
    pub fn tick(&mut self, delta: f32, view: Mat4) -> &[PointSample] {
        self.advance(delta);
        let state = self.field_state(view);
        self.evaluator.evaluate_all(self.grid.points(), &state, &mut self.samples);
        &self.samples
    }

    /// Snapshot of everything the evaluator reads this frame.
    pub fn field_state(&self, view: Mat4) -> FieldState {
        FieldState {
            time: self.time,
            ripples: self.registry.snapshot(),
            color: self.color,
            ripple_color: self.ripple_color,
            view,
        }
    }

    /// Start a cross-fade to a new base colour.
    pub fn set_base_color(&mut self, color: Vec3) {
        let color = sanitize_color(color);
        log::debug!("Base colour -> {color}");
        self.color.set_target(color);
    }

    /// Applies immediately, no transition.
    pub fn set_ripple_color(&mut self, color: Vec3) {
        self.ripple_color = sanitize_color(color);
    }

    /// Strength for ripples added from now on, clamped to `1..=20`.
    pub fn set_strength(&mut self, strength: u32) {
        self.strength = clamp_strength(strength);
    }

    pub fn strength(&self) -> u32 {
        self.strength
    }

    pub fn ripple_color(&self) -> Vec3 {
        self.ripple_color
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn registry(&self) -> &RippleRegistry {
        &self.registry
    }

    pub fn color_transition(&self) -> &ColorTransition {
        &self.color
    }

    pub fn grid(&self) -> &PointGrid {
        &self.grid
    }

    /// Results of the last [`tick`](Self::tick); empty before the first one.
    pub fn samples(&self) -> &[PointSample] {
        &self.samples
    }
}

impl RippleSink for FrameDriver {
    fn add_ripple(&mut self, x: f32, z: f32) {
        self.registry.add(x, z, self.strength as f32);
    }
}

fn clamp_strength(strength: u32) -> u32 {
    strength.clamp(MIN_STRENGTH as u32, MAX_STRENGTH as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_RIPPLES, RIPPLE_LIFETIME};

    fn small_driver() -> FrameDriver {
        FrameDriver::new(PointGrid::new(8, 8, 2.5), DriverSettings::default())
    }

    fn view() -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 20.0, 40.0), Vec3::ZERO, Vec3::Y)
    }

    #[test]
    fn tick_advances_clocks_and_evaluates_every_point() {
        let mut driver = small_driver();
        assert!(driver.samples().is_empty());
        let n = driver.tick(0.25, view()).len();
        assert_eq!(n, 64);
        assert_eq!(driver.time(), 0.25);
        assert_eq!(driver.frame(), 1);
    }

    #[test]
    fn ripple_ages_before_evaluation() {
        let mut driver = small_driver();
        driver.add_ripple(0.0, 0.0);
        driver.tick(1.0, view());
        let ripple = driver.registry().iter().next().copied().unwrap();
        assert_eq!(ripple.age, 1.0);
        assert_eq!(ripple.strength, DEFAULT_STRENGTH);

        // Row 4, column 6 sits at (0, 0, 5): inside the 15-unit front.
        let idx = 4 * 8 + 6;
        assert_eq!(driver.grid().points()[idx], Vec3::new(0.0, 0.0, 5.0));
        assert!(driver.samples()[idx].ripple_height != 0.0);
    }

    #[test]
    fn strength_is_clamped_and_applied_to_new_ripples() {
        let mut driver = small_driver();
        driver.set_strength(0);
        assert_eq!(driver.strength(), 1);
        driver.set_strength(99);
        assert_eq!(driver.strength(), 20);
        driver.add_ripple(1.0, 1.0);
        assert_eq!(driver.registry().iter().next().unwrap().strength, 20.0);
    }

    #[test]
    fn base_color_change_restarts_transition() {
        let mut driver = small_driver();
        driver.tick(3.0, view());
        let red = Vec3::new(1.0, 0.0, 0.0);
        driver.set_base_color(red);
        assert_eq!(driver.color_transition().from(), WHITE);
        assert_eq!(driver.color_transition().to(), red);
        assert_eq!(driver.color_transition().elapsed(), 0.0);
        driver.tick(0.5, view());
        assert_eq!(driver.color_transition().elapsed(), 0.5);
        // simulation clock is unaffected by the colour change
        assert_eq!(driver.time(), 3.5);
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut driver = small_driver();
        driver.add_ripple(0.0, 0.0);
        driver.advance(f32::NAN);
        driver.advance(-1.0);
        assert_eq!(driver.time(), 0.0);
        assert_eq!(driver.registry().iter().next().unwrap().age, 0.0);
    }

    #[test]
    fn ripples_expire_and_capacity_holds() {
        let mut driver = small_driver();
        for i in 0..(MAX_RIPPLES + 5) {
            driver.add_ripple(i as f32, 0.0);
        }
        assert_eq!(driver.registry().len(), MAX_RIPPLES);
        driver.advance(RIPPLE_LIFETIME);
        assert!(driver.registry().is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut driver = small_driver();
        driver.add_ripple(0.0, 0.0);
        driver.set_ripple_color(Vec3::new(1.0, 0.0, 1.0));
        driver.set_strength(12);
        driver.tick(1.0, view());
        driver.reset();
        assert_eq!(driver.time(), 0.0);
        assert!(driver.registry().is_empty());
        assert_eq!(driver.ripple_color(), CYAN);
        assert_eq!(driver.strength(), DEFAULT_STRENGTH as u32);
        assert!(driver.samples().is_empty());
    }
}
