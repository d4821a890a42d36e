//! Spatial domain: physics layers, ray and overlap probes, and the pure
//! sensing helpers built on them.

mod layers;
mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use layers::{GameLayer, Terrain, trigger_zone};
pub use probe::{
    ProbeShape, StepGeometry, StepProbe, WorldProbe, facing_dir, sense_ground, sense_step,
    sense_wall,
};
