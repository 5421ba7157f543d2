//! Seam between pointer handling and the simulation.

/// Anything that can accept a new ripple centred at `(x, z)` on the ground
/// plane. Strength is chosen by the sink.
pub trait RippleSink {
    fn add_ripple(&mut self, x: f32, z: f32);
}
