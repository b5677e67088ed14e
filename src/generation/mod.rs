//! Terrain scene generation pipeline.
//!
//! One pass runs, in order:
//! 1. Clear previously placed instances
//! 2. Height field synthesis and commit to the terrain
//! 3. Object placement over the committed terrain
//! 4. Texture splat painting and commit
//!
//! All configuration is validated before step 1, so a rejected pass leaves
//! the previous scene untouched.

pub mod config;
pub mod record;

pub use config::GenerationConfig;
pub use record::ParamRecord;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::clutter::{ObjectCategory, ObjectPlacementEngine, PlacedInstance};
use crate::core::{CancelToken, Result};
use crate::splat::{SplatGrid, TextureSplatPainter};
use crate::terrain::{HeightFieldGenerator, HeightFieldTerrain, TerrainCommit, TerrainQuery};

/// Upper bound (exclusive) for reseeded noise offsets.
pub const MAX_NOISE_OFFSET: f32 = 9999.0;

/// Summary of one generation pass.
#[derive(Clone, Debug)]
pub struct GenerationReport {
    /// (min, max) normalized elevation
    pub height_range: (f32, f32),
    pub cover_instances: usize,
    pub environment_instances: usize,
    pub splat_texels: usize,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn total_instances(&self) -> usize {
        self.cover_instances + self.environment_instances
    }
}

/// Owns the configuration, the host terrain and the generated scene data.
pub struct GenerationPipeline<T = HeightFieldTerrain> {
    config: GenerationConfig,
    terrain: T,
    instances: Vec<PlacedInstance>,
    splat: Option<SplatGrid>,
    instance_id: i64,
    cancel: CancelToken,
}

impl GenerationPipeline<HeightFieldTerrain> {
    /// Pipeline over an in-memory terrain. Nothing is generated until
    /// [`regenerate`](Self::regenerate) is called.
    pub fn new(config: GenerationConfig) -> Self {
        Self::with_terrain(config, HeightFieldTerrain::default())
    }
}

impl<T: TerrainQuery + TerrainCommit> GenerationPipeline<T> {
    pub fn with_terrain(config: GenerationConfig, terrain: T) -> Self {
        Self {
            config,
            terrain,
            instances: Vec::new(),
            splat: None,
            instance_id: 0,
            cancel: CancelToken::new(),
        }
    }

    /// Regenerate the whole scene from the current configuration.
    pub fn regenerate(&mut self) -> Result<GenerationReport> {
        let start = Instant::now();

        self.config.validate()?;
        let painter = TextureSplatPainter::from_settings(&self.config.splat)?;
        let engine = ObjectPlacementEngine::new(self.config.placement.clone());

        let cleared = self.clear_instances();
        if cleared > 0 {
            log::debug!("Cleared {} instances", cleared);
        }
        self.splat = None;

        let heights = &self.config.heights;
        let t0 = Instant::now();
        let field = HeightFieldGenerator::new(heights).generate_from(heights, &self.cancel)?;
        let height_range = field.range();
        self.terrain.commit_heights(self.config.metrics(), field)?;
        log::info!(
            "Height field {}x{} in {:.1}ms (range {:.3}..{:.3})",
            heights.width,
            heights.height,
            t0.elapsed().as_secs_f64() * 1000.0,
            height_range.0,
            height_range.1
        );

        let t1 = Instant::now();
        self.instances = engine.place_all(&self.config.prototypes, &self.terrain, self.config.seed, &self.cancel)?;
        let cover_instances = self
            .instances
            .iter()
            .filter(|i| i.category == ObjectCategory::Cover)
            .count();
        let environment_instances = self.instances.len() - cover_instances;
        log::info!(
            "Placed {} cover and {} environment instances in {:.1}ms",
            cover_instances,
            environment_instances,
            t1.elapsed().as_secs_f64() * 1000.0
        );

        let t2 = Instant::now();
        let grid = painter.paint_checked(&self.terrain, &self.cancel)?;
        self.terrain.commit_splat_layers(0, 0, &grid)?;
        let splat_texels = grid.width() * grid.height();
        log::info!(
            "Painted {}x{} splat texels over {} layers in {:.1}ms",
            grid.width(),
            grid.height(),
            grid.layers(),
            t2.elapsed().as_secs_f64() * 1000.0
        );
        self.splat = Some(grid);

        let elapsed = start.elapsed();
        log::info!("Generation complete in {:.1}ms", elapsed.as_secs_f64() * 1000.0);

        Ok(GenerationReport {
            height_range,
            cover_instances,
            environment_instances,
            splat_texels,
            elapsed,
        })
    }

    /// Draw new noise offsets from `seed` and regenerate. Other parameters
    /// are left as they are.
    pub fn reseed(&mut self, seed: u64) -> Result<GenerationReport> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.config.heights.offset_x = rng.gen_range(0.0..MAX_NOISE_OFFSET);
        self.config.heights.offset_y = rng.gen_range(0.0..MAX_NOISE_OFFSET);
        log::info!(
            "Reseeded with {}: offsets ({:.2}, {:.2})",
            seed,
            self.config.heights.offset_x,
            self.config.heights.offset_y
        );
        self.regenerate()
    }

    /// Reseed from OS entropy.
    pub fn randomize(&mut self) -> Result<GenerationReport> {
        self.reseed(rand::random::<u64>())
    }

    /// Write the current height parameters as a parameter record.
    pub fn save(&self, path: &Path) -> Result<()> {
        ParamRecord::from_params(self.instance_id, &self.config.heights).save(path)?;
        log::info!("Saved parameters to {}", path.display());
        Ok(())
    }

    /// Apply a parameter record and regenerate. An empty record keeps the
    /// current parameters.
    pub fn load(&mut self, path: &Path) -> Result<GenerationReport> {
        match ParamRecord::load(path)? {
            Some(record) => {
                record.apply(&mut self.config.heights);
                log::info!("Loaded parameters from {}", path.display());
            }
            None => log::warn!("{} is empty, keeping current parameters", path.display()),
        }
        self.regenerate()
    }

    /// Remove every placed Cover and Environment instance. Returns how many
    /// were removed.
    pub fn clear_instances(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| {
            !matches!(i.category, ObjectCategory::Cover | ObjectCategory::Environment)
        });
        before - self.instances.len()
    }

    /// `<temp dir>/<name>_<instance id>.keepTerrain.txt`
    pub fn default_record_path(&self, name: &str) -> PathBuf {
        ParamRecord::default_path(name, self.instance_id)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GenerationConfig {
        &mut self.config
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    pub fn instances(&self) -> &[PlacedInstance] {
        &self.instances
    }

    /// Splat weights from the last successful pass
    pub fn splat(&self) -> Option<&SplatGrid> {
        self.splat.as_ref()
    }

    pub fn instance_id(&self) -> i64 {
        self.instance_id
    }

    pub fn set_instance_id(&mut self, id: i64) {
        self.instance_id = id;
    }

    /// Handle for cancelling a pass from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}
