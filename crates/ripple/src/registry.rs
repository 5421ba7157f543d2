//! Bounded FIFO set of live ripples.

use crate::constants::{MAX_RIPPLES, MAX_STRENGTH, MIN_STRENGTH, RIPPLE_LIFETIME};
use glam::Vec2;
use std::collections::VecDeque;

/// A single click-spawned ripple.
///
/// A zero `strength` marks an unused slot in a [`RippleSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleEvent {
    /// World-space centre on the ground plane.
    pub x: f32,
    pub z: f32,
    /// Seconds since creation.
    pub age: f32,
    pub strength: f32,
}

impl RippleEvent {
    pub const INACTIVE: Self = Self { x: 0.0, z: 0.0, age: 0.0, strength: 0.0 };

    pub fn new(x: f32, z: f32, strength: f32) -> Self {
        Self { x, z, age: 0.0, strength }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }

    pub fn is_active(&self) -> bool {
        self.strength > 0.0
    }
}

impl Default for RippleEvent {
    fn default() -> Self {
        Self::INACTIVE
    }
}

/// Fixed-size view of the registry, oldest first, padded with inactive slots.
pub type RippleSnapshot = [RippleEvent; MAX_RIPPLES];

/// Live ripples in insertion order (which is also age order).
#[derive(Debug, Clone, Default)]
pub struct RippleRegistry {
    ripples: VecDeque<RippleEvent>,
}

impl RippleRegistry {
    pub fn new() -> Self {
        Self { ripples: VecDeque::with_capacity(MAX_RIPPLES) }
    }

    /// Append a fresh ripple. At capacity the oldest ripple is evicted first
    /// and returned.
    ///
    /// Strength is clamped to `MIN_STRENGTH..=MAX_STRENGTH`. A non-finite
    /// centre is dropped so it can never reach the evaluator.
    pub fn add(&mut self, x: f32, z: f32, strength: f32) -> Option<RippleEvent> {
        if !x.is_finite() || !z.is_finite() {
            log::warn!("Dropping ripple with non-finite centre ({x}, {z})");
            return None;
        }
        let strength = if strength.is_finite() {
            strength.clamp(MIN_STRENGTH, MAX_STRENGTH)
        } else {
            MIN_STRENGTH
        };

        let evicted = if self.ripples.len() >= MAX_RIPPLES {
            self.ripples.pop_front()
        } else {
            None
        };
        self.ripples.push_back(RippleEvent::new(x, z, strength));
        log::debug!("Ripple added at ({x:.2}, {z:.2}) strength {strength}, {} live", self.ripples.len());
        evicted
    }

    /// Age every ripple by `delta` seconds, then drop the expired ones.
    pub fn advance(&mut self, delta: f32) {
        for ripple in &mut self.ripples {
            ripple.age += delta;
        }
        let before = self.ripples.len();
        self.ripples.retain(|r| r.age < RIPPLE_LIFETIME);
        let expired = before - self.ripples.len();
        if expired > 0 {
            log::debug!("{expired} ripple(s) expired");
        }
    }

    pub fn snapshot(&self) -> RippleSnapshot {
        let mut slots = [RippleEvent::INACTIVE; MAX_RIPPLES];
        for (slot, ripple) in slots.iter_mut().zip(&self.ripples) {
            *slot = *ripple;
        }
        slots
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RippleEvent> {
        self.ripples.iter()
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
    }
}
