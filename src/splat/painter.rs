//! Texture splat painting: per-texel layer weights from terrain elevation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{CancelToken, Error, Result};
use crate::splat::bands::ElevationBandTable;
use crate::terrain::TerrainQuery;

/// Per-texel layer weights, row-major over texels with layers innermost.
#[derive(Clone, Debug, PartialEq)]
pub struct SplatGrid {
    width: usize,
    height: usize,
    layers: usize,
    weights: Vec<f32>,
}

impl SplatGrid {
    /// All-zero grid.
    pub fn zeroed(width: usize, height: usize, layers: usize) -> Self {
        Self { width, height, layers, weights: vec![0.0; width * height * layers] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weights of every layer at texel (x, y).
    pub fn texel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * self.width + x) * self.layers;
        &self.weights[start..start + self.layers]
    }

    pub fn weight(&self, x: usize, y: usize, layer: usize) -> f32 {
        self.texel(x, y)[layer]
    }

    /// Layer with the largest weight at texel (x, y); first wins on ties.
    pub fn dominant_layer(&self, x: usize, y: usize) -> usize {
        self.texel(x, y)
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, &w)| if w > best.1 { (i, w) } else { best })
            .0
    }
}

/// Splat configuration as stored in the generation config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplatSettings {
    /// Alphamap texels along X
    pub resolution_x: u32,
    /// Alphamap texels along Z
    pub resolution_y: u32,
    /// Texture layers on the terrain; must be one more than the thresholds
    pub layers: usize,
    /// Ascending world-space elevations separating the layers
    pub thresholds: Vec<f32>,
}

impl Default for SplatSettings {
    fn default() -> Self {
        Self {
            resolution_x: 128,
            resolution_y: 128,
            layers: 4,
            thresholds: vec![12.5, 14.0, 16.0],
        }
    }
}

/// Paints one-hot elevation band weights over a terrain.
pub struct TextureSplatPainter {
    bands: ElevationBandTable,
    resolution_x: usize,
    resolution_y: usize,
}

impl TextureSplatPainter {
    pub fn new(bands: ElevationBandTable, resolution_x: u32, resolution_y: u32) -> Result<Self> {
        if resolution_x == 0 || resolution_y == 0 {
            return Err(Error::config(format!(
                "splat resolution must be positive, got {}x{}", resolution_x, resolution_y
            )));
        }
        Ok(Self {
            bands,
            resolution_x: resolution_x as usize,
            resolution_y: resolution_y as usize,
        })
    }

    /// Build from settings, checking the layer count against the thresholds.
    pub fn from_settings(settings: &SplatSettings) -> Result<Self> {
        let bands = ElevationBandTable::new(settings.thresholds.clone())?;
        if settings.layers != bands.layer_count() {
            return Err(Error::config(format!(
                "{} splat layers need {} thresholds, got {}",
                settings.layers,
                settings.layers.saturating_sub(1),
                bands.thresholds().len()
            )));
        }
        Self::new(bands, settings.resolution_x, settings.resolution_y)
    }

    pub fn bands(&self) -> &ElevationBandTable {
        &self.bands
    }

    pub fn paint(&self, terrain: &dyn TerrainQuery) -> Result<SplatGrid> {
        self.paint_checked(terrain, &CancelToken::default())
    }

    /// Paint every texel, checking `cancel` once per row.
    ///
    /// Texel (x, y) samples the world height at
    /// `(x / res_x * metrics.width, y / res_y * metrics.length)`.
    pub fn paint_checked(&self, terrain: &dyn TerrainQuery, cancel: &CancelToken) -> Result<SplatGrid> {
        let metrics = terrain.metrics();
        let layers = self.bands.layer_count();
        let (res_x, res_y) = (self.resolution_x, self.resolution_y);
        let mut grid = SplatGrid::zeroed(res_x, res_y, layers);

        grid.weights
            .par_chunks_mut(res_x * layers)
            .enumerate()
            .try_for_each(|(y, row)| {
                cancel.check()?;
                let v = y as f32 / res_y as f32;
                for (x, texel) in row.chunks_mut(layers).enumerate() {
                    let u = x as f32 / res_x as f32;
                    let (wx, wz) = metrics.to_world(u, v);
                    let elevation = terrain.sample_height(wx, wz)?;

                    for (layer, w) in texel.iter_mut().enumerate() {
                        *w = if self.bands.is_active(layer, elevation) { 1.0 } else { 0.0 };
                    }
                    let sum: f32 = texel.iter().sum();
                    if sum <= 0.0 {
                        return Err(Error::config(format!(
                            "no splat layer claims elevation {} at texel ({}, {})", elevation, x, y
                        )));
                    }
                    texel.iter_mut().for_each(|w| *w /= sum);
                }
                Ok(())
            })?;

        Ok(grid)
    }
}
