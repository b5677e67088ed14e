//! Terrain sampling seam between the generators and the host terrain.
//!
//! Placement and painting never own the terrain: they receive a
//! [`TerrainQuery`] explicitly. The pipeline additionally needs
//! [`TerrainCommit`] to push generated heights and splat layers back.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::core::{Error, Result};
use crate::splat::SplatGrid;
use crate::terrain::heightfield::HeightField;

/// Logical terrain size, independent of grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainMetrics {
    /// Extent along world X
    pub width: f32,
    /// World height of a normalized elevation of 1.0
    pub vertical_scale: f32,
    /// Extent along world Z
    pub length: f32,
}

impl TerrainMetrics {
    pub fn new(width: f32, vertical_scale: f32, length: f32) -> Self {
        Self { width, vertical_scale, length }
    }

    /// Fails unless every extent is finite and positive.
    pub fn validate(&self) -> Result<()> {
        let ok = [self.width, self.vertical_scale, self.length]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if ok {
            Ok(())
        } else {
            Err(Error::config(format!("invalid terrain size {:?}", self)))
        }
    }

    /// True if world (x, z) lies on the terrain, edges included.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.length).contains(&z)
    }

    /// Clamp world (x, z) onto the terrain extent.
    pub fn clamp(&self, x: f32, z: f32) -> (f32, f32) {
        (x.clamp(0.0, self.width), z.clamp(0.0, self.length))
    }

    /// World (x, z) to normalized (u, v).
    pub fn to_normalized(&self, x: f32, z: f32) -> (f32, f32) {
        (x / self.width, z / self.length)
    }

    /// Normalized (u, v) to world (x, z).
    pub fn to_world(&self, u: f32, v: f32) -> (f32, f32) {
        (u * self.width, v * self.length)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.vertical_scale, self.length)
    }
}

/// Read access to a terrain surface.
///
/// Out-of-range positions return [`Error::Bounds`] instead of extrapolating.
pub trait TerrainQuery: Sync {
    fn metrics(&self) -> TerrainMetrics;

    /// World height at world (x, z).
    fn sample_height(&self, x: f32, z: f32) -> Result<f32>;

    /// Angle between the surface normal and world up, in degrees, at
    /// normalized (u, v).
    fn sample_steepness(&self, u: f32, v: f32) -> Result<f32>;

    /// Interpolated unit surface normal at normalized (u, v).
    fn sample_normal(&self, u: f32, v: f32) -> Result<Vec3>;
}

/// Write access used by the pipeline.
pub trait TerrainCommit {
    /// Replace the terrain surface. The field is owned by the terrain from
    /// here on.
    fn commit_heights(&mut self, metrics: TerrainMetrics, field: HeightField) -> Result<()>;

    /// Store splat weights with their first texel at (origin_x, origin_y).
    fn commit_splat_layers(&mut self, origin_x: usize, origin_y: usize, grid: &SplatGrid) -> Result<()>;
}
