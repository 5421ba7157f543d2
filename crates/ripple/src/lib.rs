//! Ripple field simulation for the particle landscape.
//!
//! The landscape is a flat lattice of points. Every frame each point is
//! displaced by a travelling base wave plus the sum of up to
//! [`MAX_RIPPLES`] expanding ripple wavefronts, and coloured by a radial
//! cross-fade between the previous and current base colour:
//! - [`RippleRegistry`] holds the bounded FIFO set of live ripples
//! - [`ColorTransition`] drives the base-colour wavefront
//! - [`FieldEvaluator`] is the pure per-point function
//! - [`FrameDriver`] owns all of it and runs one tick per rendered frame

pub mod color;
pub mod constants;
pub mod driver;
pub mod field;
pub mod grid;
pub mod registry;
pub mod sink;

pub use color::*;
pub use constants::*;
pub use driver::*;
pub use field::*;
pub use grid::*;
pub use registry::*;
pub use sink::*;
