//! Procedural terrain: height field synthesis and the terrain sampling seam

pub mod heightfield;
pub use heightfield::{HeightField, HeightFieldGenerator, HeightParams, UnitNoise, DefaultNoise};

pub mod query;
pub use query::{TerrainCommit, TerrainMetrics, TerrainQuery};

pub mod surface;
pub use surface::HeightFieldTerrain;
