//! Pointer input for the landscape: frame state and click-to-ripple routing.

pub mod adapter;
pub mod state;

pub use adapter::*;
pub use state::*;
