//! Noise-based height field synthesis

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{CancelToken, Error, Result};

/// Parameters controlling height field generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    pub seed: u32,
    pub width: u32,        // Grid columns, also terrain size along X
    pub height: u32,       // Grid rows, also terrain size along Z
    pub depth: u32,        // Vertical scale of the terrain
    pub scale: f32,        // Noise zoom (larger = busier)
    pub ground_level: f32, // One-sided floor applied to every cell
    pub offset_x: f32,
    pub offset_y: f32,
    pub octaves: u32,      // FBM octaves (1 = plain Perlin)
    pub persistence: f32,  // FBM persistence (0.5 typical)
    pub lacunarity: f32,   // FBM lacunarity (2.0 typical)
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 256,
            height: 256,
            depth: 20,
            scale: 20.0,
            ground_level: 0.6,
            offset_x: 100.0,
            offset_y: 100.0,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// 2D grid of normalized elevations, row-major. Columns run along world X,
/// rows along world Z.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl HeightField {
    /// Field with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self> {
        Self::from_cells(width, height, vec![value; width * height])
    }

    /// Wrap pre-computed cells. `cells.len()` must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::config(format!(
                "height field dimensions must be positive, got {}x{}", width, height
            )));
        }
        if cells.len() != width * height {
            return Err(Error::config(format!(
                "height field {}x{} needs {} cells, got {}",
                width, height, width * height, cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`. Panics when out of range.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(x < self.width && y < self.height, "cell ({}, {}) out of range", x, y);
        self.cells[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[f32] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// (min, max) over all cells
    pub fn range(&self) -> (f32, f32) {
        self.cells.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }
}

impl Default for HeightField {
    /// Flat 2x2 field at elevation zero.
    fn default() -> Self {
        Self { width: 2, height: 2, cells: vec![0.0; 4] }
    }
}

/// Remaps a [-1, 1] noise source onto [0, 1].
#[derive(Clone, Debug)]
pub struct UnitNoise<N> {
    source: N,
}

impl<N> UnitNoise<N> {
    pub fn new(source: N) -> Self {
        Self { source }
    }
}

impl<N: NoiseFn<f64, 2>> NoiseFn<f64, 2> for UnitNoise<N> {
    fn get(&self, point: [f64; 2]) -> f64 {
        (self.source.get(point) + 1.0) * 0.5
    }
}

/// Noise used by default: FBM Perlin remapped to [0, 1].
pub type DefaultNoise = UnitNoise<Fbm<Perlin>>;

/// Grid request shared by both entry points.
#[derive(Clone, Copy, Debug)]
struct GridRequest {
    width: u32,
    height: u32,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    floor: f32,
}

impl From<&HeightParams> for GridRequest {
    fn from(params: &HeightParams) -> Self {
        Self {
            width: params.width,
            height: params.height,
            scale: params.scale as f64,
            offset_x: params.offset_x as f64,
            offset_y: params.offset_y as f64,
            floor: params.ground_level,
        }
    }
}

/// Samples a coherent noise function into a [`HeightField`].
///
/// Any `NoiseFn<f64, 2>` producing roughly [0, 1] works; the default is
/// [`DefaultNoise`]. Generation is pure: the same inputs always give the same
/// grid.
pub struct HeightFieldGenerator<N = DefaultNoise> {
    noise: N,
}

impl HeightFieldGenerator<DefaultNoise> {
    /// Create a generator with FBM Perlin noise configured from `params`.
    pub fn new(params: &HeightParams) -> Self {
        let fbm = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves.max(1) as usize)
            .set_persistence(params.persistence as f64)
            .set_lacunarity(params.lacunarity as f64);

        Self { noise: UnitNoise::new(fbm) }
    }
}

impl<N: NoiseFn<f64, 2> + Sync> HeightFieldGenerator<N> {
    /// Create a generator over an arbitrary noise source.
    pub fn with_noise(noise: N) -> Self {
        Self { noise }
    }

    /// Sample the noise at `(x/gridWidth*scale + offsetX, y/gridHeight*scale + offsetY)`
    /// for every cell, raising anything below `floor` to `floor`.
    pub fn generate(
        &self,
        grid_width: u32,
        grid_height: u32,
        scale: f32,
        offset_x: f32,
        offset_y: f32,
        floor: f32,
    ) -> Result<HeightField> {
        let grid = GridRequest {
            width: grid_width,
            height: grid_height,
            scale: scale as f64,
            offset_x: offset_x as f64,
            offset_y: offset_y as f64,
            floor,
        };
        self.build(grid, &CancelToken::default())
    }

    /// Generate using the grid, scale, offsets and floor from `params`,
    /// checking `cancel` once per row.
    pub fn generate_from(&self, params: &HeightParams, cancel: &CancelToken) -> Result<HeightField> {
        self.build(GridRequest::from(params), cancel)
    }

    fn build(&self, grid: GridRequest, cancel: &CancelToken) -> Result<HeightField> {
        if grid.width == 0 || grid.height == 0 {
            return Err(Error::config(format!(
                "grid dimensions must be positive, got {}x{}", grid.width, grid.height
            )));
        }

        let width = grid.width as usize;
        let height = grid.height as usize;
        let mut cells = vec![0.0_f32; width * height];

        // Rows are independent; par_chunks_mut keeps the write-back ordered.
        cells
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, row)| {
                cancel.check()?;
                let ny = y as f64 / grid.height as f64 * grid.scale + grid.offset_y;
                for (x, cell) in row.iter_mut().enumerate() {
                    let nx = x as f64 / grid.width as f64 * grid.scale + grid.offset_x;
                    let value = self.noise.get([nx, ny]) as f32;
                    *cell = if value < grid.floor { grid.floor } else { value };
                }
                Ok::<(), Error>(())
            })?;

        HeightField::from_cells(width, height, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::Constant;

    #[test]
    fn test_height_params_default() {
        let params = HeightParams::default();
        assert_eq!(params.width, 256);
        assert_eq!(params.height, 256);
        assert_eq!(params.depth, 20);
        assert_eq!(params.scale, 20.0);
        assert_eq!(params.ground_level, 0.6);
        assert_eq!(params.offset_x, 100.0);
        assert_eq!(params.offset_y, 100.0);
    }

    #[test]
    fn test_constant_noise_below_floor() {
        let generator = HeightFieldGenerator::with_noise(Constant::new(0.3));
        let field = generator.generate(4, 4, 1.0, 0.0, 0.0, 0.6).unwrap();

        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 4);
        assert!(field.cells().iter().all(|&h| h == 0.6));
    }

    #[test]
    fn test_no_ceiling_clamp() {
        let generator = HeightFieldGenerator::with_noise(Constant::new(1.4));
        let field = generator.generate(3, 2, 1.0, 0.0, 0.0, 0.2).unwrap();
        assert!(field.cells().iter().all(|&h| (h - 1.4).abs() < 1e-6));
    }

    #[test]
    fn test_generate_deterministic() {
        let params = HeightParams { width: 32, height: 24, ..Default::default() };
        let a = HeightFieldGenerator::new(&params)
            .generate_from(&params, &CancelToken::default())
            .unwrap();
        let b = HeightFieldGenerator::new(&params)
            .generate_from(&params, &CancelToken::default())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_cell_above_floor() {
        let params = HeightParams { width: 48, height: 48, ground_level: 0.45, ..Default::default() };
        let field = HeightFieldGenerator::new(&params)
            .generate_from(&params, &CancelToken::default())
            .unwrap();

        let (min, max) = field.range();
        assert!(min >= 0.45);
        // Perlin varies across 20 noise units, so some cells rise above the floor
        assert!(max > 0.45);
    }

    #[test]
    fn test_offsets_change_the_field() {
        let generator = HeightFieldGenerator::new(&HeightParams::default());
        let a = generator.generate(16, 16, 5.0, 10.0, 10.0, 0.0).unwrap();
        let b = generator.generate(16, 16, 5.0, 512.3, 87.9, 0.0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let generator = HeightFieldGenerator::with_noise(Constant::new(0.5));
        assert!(matches!(
            generator.generate(0, 4, 1.0, 0.0, 0.0, 0.0),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            generator.generate(4, 0, 1.0, 0.0, 0.0, 0.0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_cancelled_generation() {
        let params = HeightParams { width: 8, height: 8, ..Default::default() };
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = HeightFieldGenerator::new(&params).generate_from(&params, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_height_field_accessors() {
        let field = HeightField::from_cells(3, 2, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(field.get(1, 0), 0.1);
        assert_eq!(field.get(0, 1), 0.3);
        assert_eq!(field.row(1), &[0.3, 0.4, 0.5]);
        assert_eq!(field.range(), (0.0, 0.5));
    }

    #[test]
    fn test_height_field_size_mismatch() {
        assert!(HeightField::from_cells(2, 2, vec![0.0; 3]).is_err());
        assert!(HeightField::filled(0, 2, 0.0).is_err());
    }
}
