//! Core types shared by every particle-landscape crate.
//!
//! This crate provides the foundational pieces used across the workspace:
//! - Frame timing (wall clock or fixed step)
//! - RGB colours with hex parsing
//! - Shader-style scalar helpers

pub mod color;
pub mod math;
pub mod time;

pub use color::*;
pub use math::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Mat4, Vec2, Vec3, Vec4};
