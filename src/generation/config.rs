//! Generation configuration: every knob the pipeline reads, as one JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clutter::{default_catalog, ObjectPrototype, PlacementSettings};
use crate::core::{Error, Result};
use crate::splat::{SplatSettings, TextureSplatPainter};
use crate::terrain::{HeightParams, TerrainMetrics};

/// Configuration for the terrain generation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for object placement. Noise is seeded by `heights.seed`.
    pub seed: u64,
    /// Height field grid, noise and terrain size.
    pub heights: HeightParams,
    /// Object placement tunables.
    pub placement: PlacementSettings,
    /// Texture splat resolution and elevation bands.
    pub splat: SplatSettings,
    /// Objects to scatter, in placement order.
    pub prototypes: Vec<ObjectPrototype>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            heights: HeightParams::default(),
            placement: PlacementSettings::default(),
            splat: SplatSettings::default(),
            prototypes: default_catalog(),
        }
    }
}

impl GenerationConfig {
    /// Logical terrain size: grid width along X, depth vertically, grid
    /// height along Z.
    pub fn metrics(&self) -> TerrainMetrics {
        TerrainMetrics::new(
            self.heights.width as f32,
            self.heights.depth as f32,
            self.heights.height as f32,
        )
    }

    /// Check everything a generation pass needs before it touches any state.
    pub fn validate(&self) -> Result<()> {
        if self.heights.width == 0 || self.heights.height == 0 {
            return Err(Error::config(format!(
                "terrain grid must be at least 1x1, got {}x{}",
                self.heights.width, self.heights.height
            )));
        }
        self.metrics().validate()?;

        if self.prototypes.is_empty() {
            return Err(Error::config("prototype catalog is empty"));
        }
        for prototype in &self.prototypes {
            prototype.validate()?;
        }

        TextureSplatPainter::from_settings(&self.splat)?;
        Ok(())
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save as pretty-printed JSON, creating parent directories as needed.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }
}
