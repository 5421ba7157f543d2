//! Camera, GPU buffer layouts and a CPU point splatter for the landscape.

pub mod camera;
pub mod splat;
pub mod vertex;

pub use camera::*;
pub use splat::*;
pub use vertex::*;
