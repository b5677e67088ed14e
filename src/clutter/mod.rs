//! Procedural object scattering.
//!
//! Prototypes describe what can be placed and how often. The placement engine
//! tiles each prototype over a terrain and produces plain instance records;
//! spawning them into a scene is left to the caller.

pub mod placement;
pub mod profile;

pub use placement::{
    align_to_normal, passes_frequency_gate, yaw_rotation, ObjectPlacementEngine, PlacedInstance,
    PlacementSettings,
};
pub use profile::{default_catalog, ObjectCategory, ObjectPrototype};
