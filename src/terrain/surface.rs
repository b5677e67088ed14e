//! In-memory terrain surface over a committed height field.

use std::ops::{Add, Mul};

use crate::core::types::{Vec2, Vec3};
use crate::core::{Error, Result};
use crate::splat::SplatGrid;
use crate::terrain::heightfield::HeightField;
use crate::terrain::query::{TerrainCommit, TerrainMetrics, TerrainQuery};

/// Headless stand-in for a host terrain.
///
/// Grid samples are spread evenly over the metrics, so the first and last
/// column sit on x = 0 and x = width. Heights are bilinear; normals and
/// steepness come from bilinearly blended per-sample gradients.
#[derive(Clone, Debug)]
pub struct HeightFieldTerrain {
    metrics: TerrainMetrics,
    field: HeightField,
    /// World-space (dh/dx, dh/dz) per grid sample
    gradients: Vec<Vec2>,
    splat: Option<(usize, usize, SplatGrid)>,
}

impl HeightFieldTerrain {
    pub fn new(metrics: TerrainMetrics, field: HeightField) -> Result<Self> {
        metrics.validate()?;
        let gradients = compute_gradients(&metrics, &field);
        Ok(Self { metrics, field, gradients, splat: None })
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// Last committed splat grid with its origin texel.
    pub fn splat_layers(&self) -> Option<(usize, usize, &SplatGrid)> {
        self.splat.as_ref().map(|(x, y, grid)| (*x, *y, grid))
    }

    fn world_height(&self, ix: usize, iz: usize) -> f32 {
        self.field.get(ix, iz) * self.metrics.vertical_scale
    }

    fn bilinear<T>(&self, u: f32, v: f32, sample: impl Fn(usize, usize) -> T) -> T
    where
        T: Copy + Add<Output = T> + Mul<f32, Output = T>,
    {
        let (x0, x1, tx) = lerp_coords(u, self.field.width());
        let (z0, z1, tz) = lerp_coords(v, self.field.height());

        let a = sample(x0, z0) * (1.0 - tx) + sample(x1, z0) * tx;
        let b = sample(x0, z1) * (1.0 - tx) + sample(x1, z1) * tx;
        a * (1.0 - tz) + b * tz
    }

    fn check_normalized(&self, u: f32, v: f32) -> Result<()> {
        if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
            Ok(())
        } else {
            let (x, z) = self.metrics.to_world(u, v);
            Err(Error::Bounds { x, z })
        }
    }

    fn gradient(&self, u: f32, v: f32) -> Result<Vec2> {
        self.check_normalized(u, v)?;
        let w = self.field.width();
        Ok(self.bilinear(u, v, |ix, iz| self.gradients[iz * w + ix]))
    }
}

impl Default for HeightFieldTerrain {
    /// Flat 2x2 terrain, one unit on every side.
    fn default() -> Self {
        let metrics = TerrainMetrics::new(1.0, 1.0, 1.0);
        let field = HeightField::default();
        let gradients = compute_gradients(&metrics, &field);
        Self { metrics, field, gradients, splat: None }
    }
}

impl TerrainQuery for HeightFieldTerrain {
    fn metrics(&self) -> TerrainMetrics {
        self.metrics
    }

    fn sample_height(&self, x: f32, z: f32) -> Result<f32> {
        if !self.metrics.contains(x, z) {
            return Err(Error::Bounds { x, z });
        }
        let (u, v) = self.metrics.to_normalized(x, z);
        Ok(self.bilinear(u, v, |ix, iz| self.world_height(ix, iz)))
    }

    fn sample_steepness(&self, u: f32, v: f32) -> Result<f32> {
        let g = self.gradient(u, v)?;
        Ok(g.length().atan().to_degrees())
    }

    fn sample_normal(&self, u: f32, v: f32) -> Result<Vec3> {
        let g = self.gradient(u, v)?;
        Ok(Vec3::new(-g.x, 1.0, -g.y).normalize())
    }
}

impl TerrainCommit for HeightFieldTerrain {
    fn commit_heights(&mut self, metrics: TerrainMetrics, field: HeightField) -> Result<()> {
        metrics.validate()?;
        self.gradients = compute_gradients(&metrics, &field);
        self.metrics = metrics;
        self.field = field;
        self.splat = None;
        Ok(())
    }

    fn commit_splat_layers(&mut self, origin_x: usize, origin_y: usize, grid: &SplatGrid) -> Result<()> {
        self.splat = Some((origin_x, origin_y, grid.clone()));
        Ok(())
    }
}

/// Lower index, upper index and blend factor for normalized `t` over `n` samples.
fn lerp_coords(t: f32, n: usize) -> (usize, usize, f32) {
    if n < 2 {
        return (0, 0, 0.0);
    }
    let f = t.clamp(0.0, 1.0) * (n - 1) as f32;
    let i0 = (f.floor() as usize).min(n - 2);
    (i0, i0 + 1, f - i0 as f32)
}

/// Central differences in the interior, one-sided at the borders.
fn compute_gradients(metrics: &TerrainMetrics, field: &HeightField) -> Vec<Vec2> {
    let (w, h) = (field.width(), field.height());
    let dx = if w > 1 { metrics.width / (w - 1) as f32 } else { 1.0 };
    let dz = if h > 1 { metrics.length / (h - 1) as f32 } else { 1.0 };
    let scale = metrics.vertical_scale;

    let mut gradients = Vec::with_capacity(w * h);
    for iz in 0..h {
        for ix in 0..w {
            let (xa, xb) = (ix.saturating_sub(1), (ix + 1).min(w - 1));
            let (za, zb) = (iz.saturating_sub(1), (iz + 1).min(h - 1));

            let gx = if xb > xa {
                (field.get(xb, iz) - field.get(xa, iz)) * scale / ((xb - xa) as f32 * dx)
            } else {
                0.0
            };
            let gz = if zb > za {
                (field.get(ix, zb) - field.get(ix, za)) * scale / ((zb - za) as f32 * dz)
            } else {
                0.0
            };
            gradients.push(Vec2::new(gx, gz));
        }
    }
    gradients
}
