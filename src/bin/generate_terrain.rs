//! Terrain scene generator binary.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Generation config JSON (default: built-in defaults)
//!   --load <PATH>     Apply a parameter record before generating
//!   --seed <SEED>     Reseed the noise offsets from SEED
//!   --randomize       Reseed the noise offsets from entropy
//!   --save <PATH>     Write the parameter record after generating
//!   --out <DIR>       Output directory (default: "terrain_out")
//!
//! Output structure:
//!   <out>/
//!     heightmap.png    # Grayscale, stretched over the height range
//!     splat.png        # Dominant texture layer per texel
//!     scene.json       # Config, report and placed instances

use std::error::Error;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Luma, Rgb, RgbImage};
use serde_json::json;

use terrascape::generation::{GenerationConfig, GenerationPipeline, GenerationReport};
use terrascape::splat::SplatGrid;
use terrascape::terrain::HeightField;

/// Layer colors for the splat preview, cycled when there are more layers.
const LAYER_COLORS: [[u8; 3]; 6] = [
    [194, 178, 128],
    [96, 140, 64],
    [60, 100, 48],
    [120, 112, 104],
    [236, 240, 244],
    [70, 90, 140],
];

fn main() {
    terrascape::core::logging::init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let load_path = parse_str_arg(&args, "--load").map(PathBuf::from);
    let save_path = parse_str_arg(&args, "--save").map(PathBuf::from);
    let seed = parse_u64_arg(&args, "--seed");
    let randomize = args.iter().any(|a| a == "--randomize");
    let output_dir = PathBuf::from(parse_str_arg(&args, "--out").unwrap_or_else(|| "terrain_out".to_string()));

    let config = match &config_path {
        Some(path) => GenerationConfig::load_json(path)?,
        None => GenerationConfig::default(),
    };

    println!("=== Terrascape Generator ===");
    println!("Config: {}", config_path.as_deref().map_or("defaults".into(), |p| p.display().to_string()));
    println!("Grid:   {} x {}", config.heights.width, config.heights.height);
    println!("Depth:  {}, Scale: {}", config.heights.depth, config.heights.scale);
    println!("Prototypes: {}", config.prototypes.len());
    println!("Output: {}", output_dir.display());
    println!();

    let mut pipeline = GenerationPipeline::new(config);

    let report = if let Some(path) = &load_path {
        pipeline.load(path)?
    } else if let Some(seed) = seed {
        pipeline.reseed(seed)?
    } else if randomize {
        pipeline.randomize()?
    } else {
        pipeline.regenerate()?
    };

    std::fs::create_dir_all(&output_dir)?;

    let heightmap_path = output_dir.join("heightmap.png");
    heightmap_image(pipeline.terrain().field()).save(&heightmap_path)?;

    let splat_path = output_dir.join("splat.png");
    if let Some(grid) = pipeline.splat() {
        splat_image(grid).save(&splat_path)?;
    }

    let scene_path = output_dir.join("scene.json");
    write_scene(&scene_path, &pipeline, &report)?;

    if let Some(path) = &save_path {
        pipeline.save(path)?;
    }

    println!("Heights: {:.3} .. {:.3}", report.height_range.0, report.height_range.1);
    println!("Cover:   {}", report.cover_instances);
    println!("Environment: {}", report.environment_instances);
    println!("Time:    {:.1}ms", report.elapsed.as_secs_f64() * 1000.0);
    println!();
    println!("Wrote {}", heightmap_path.display());
    println!("Wrote {}", splat_path.display());
    println!("Wrote {}", scene_path.display());

    Ok(())
}

fn heightmap_image(field: &HeightField) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let (lo, hi) = field.range();
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut img = ImageBuffer::new(field.width() as u32, field.height() as u32);
    for y in 0..field.height() {
        for x in 0..field.width() {
            let t = ((field.get(x, y) - lo) / span).clamp(0.0, 1.0);
            img.put_pixel(x as u32, y as u32, Luma([(t * 255.0).round() as u8]));
        }
    }
    img
}

fn splat_image(grid: &SplatGrid) -> RgbImage {
    let mut img = ImageBuffer::new(grid.width() as u32, grid.height() as u32);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = LAYER_COLORS[grid.dominant_layer(x, y) % LAYER_COLORS.len()];
            img.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }
    img
}

fn write_scene(path: &Path, pipeline: &GenerationPipeline, report: &GenerationReport) -> Result<(), Box<dyn Error>> {
    let scene = json!({
        "config": pipeline.config(),
        "report": {
            "height_min": report.height_range.0,
            "height_max": report.height_range.1,
            "cover_instances": report.cover_instances,
            "environment_instances": report.environment_instances,
            "splat_texels": report.splat_texels,
            "elapsed_ms": report.elapsed.as_secs_f64() * 1000.0,
        },
        "instances": pipeline.instances(),
    });
    std::fs::write(path, serde_json::to_string_pretty(&scene)?)?;
    Ok(())
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
