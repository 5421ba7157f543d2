//! Ray queries against the landscape's ground plane.

pub mod raycast;

pub use raycast::*;
