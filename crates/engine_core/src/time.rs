//! Frame timing for the landscape loop.

use std::time::{Duration, Instant};

/// How the clock produces its per-frame delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Delta is measured from the wall clock between `update` calls.
    Realtime,
    /// Every `update` advances by exactly this many seconds.
    Fixed(f32),
}

/// Tracks frame delta, total elapsed time and frame count.
#[derive(Debug)]
pub struct Time {
    mode: ClockMode,
    /// Wall-clock instant of the last frame (realtime mode only).
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a wall-clock driven timer.
    pub fn new() -> Self {
        Self::with_mode(ClockMode::Realtime)
    }

    /// Create a timer that advances by `step` seconds every frame.
    pub fn fixed(step: f32) -> Self {
        Self::with_mode(ClockMode::Fixed(step))
    }

    pub fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let delta = match self.mode {
            ClockMode::Realtime => {
                let now = Instant::now();
                let delta = now - self.last_frame;
                self.last_frame = now;
                delta
            }
            ClockMode::Fixed(step) => duration_from_secs(step),
        };
        self.advance(delta);
    }

    /// Advance by an explicit duration, regardless of mode.
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed = self.elapsed.saturating_add(delta);
        self.frame_count += 1;
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

/// Negative, NaN, infinite and unrepresentably large steps collapse to zero.
fn duration_from_secs(secs: f32) -> Duration {
    match Duration::try_from_secs_f32(secs) {
        Ok(d) if secs > 0.0 => d,
        _ => {
            log::debug!("Ignoring invalid clock step {secs}");
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_accumulates_steps() {
        let mut time = Time::fixed(0.5);
        for _ in 0..4 {
            time.update();
        }
        assert_eq!(time.frame_count(), 4);
        assert!((time.elapsed_seconds() - 2.0).abs() < 1e-6);
        assert!((time.delta_seconds() - 0.5).abs() < 1e-6);
        assert!((time.fps() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_fixed_step_is_zero() {
        let mut time = Time::fixed(f32::NAN);
        time.update();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.fps(), 0.0);
        assert_eq!(time.frame_count(), 1);
    }

    #[test]
    fn oversized_fixed_step_is_zero() {
        let mut time = Time::fixed(1e20);
        time.update();
        assert_eq!(time.delta(), Duration::ZERO);
        assert_eq!(time.elapsed(), Duration::ZERO);
    }

    #[test]
    fn elapsed_saturates_instead_of_overflowing() {
        let mut time = Time::fixed(0.5);
        time.advance(Duration::MAX);
        time.update();
        assert_eq!(time.elapsed(), Duration::MAX);
        assert_eq!(time.frame_count(), 2);
    }
}
