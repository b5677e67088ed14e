//! Object placement over a terrain.
//!
//! Each prototype is tiled over the terrain on a grid derived from its
//! category. Every candidate cell rolls against the prototype's frequency;
//! survivors become [`PlacedInstance`]s. Cover objects are additionally pushed
//! back from ledges and tilted onto moderate slopes, while steep slopes reject
//! them. Environment objects get neither treatment.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clutter::profile::{ObjectCategory, ObjectPrototype};
use crate::core::types::{Quat, Vec3};
use crate::core::{CancelToken, Error, Result};
use crate::terrain::{TerrainMetrics, TerrainQuery};

/// Tunables shared by every prototype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Steepest slope, in degrees, a cover object may stand on. Clamped to [0, 360].
    pub max_slope_angle: f32,
    /// Drop below the instance's ground height that counts as a ledge.
    pub ledge_margin: f32,
    /// Gap between neighbouring cover cells along X
    pub cover_x_offset: f32,
    /// Gap between neighbouring cover cells along Z
    pub cover_z_offset: f32,
    /// Grid step for environment objects
    pub environment_step: f32,
    /// Yaw choices in degrees for prototypes without their own list.
    /// Empty means any yaw in [0, 360).
    pub allowed_yaw_angles: Vec<f32>,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            max_slope_angle: 35.0,
            ledge_margin: 0.5,
            cover_x_offset: 0.5,
            cover_z_offset: 0.5,
            environment_step: 5.0,
            allowed_yaw_angles: vec![0.0, 45.0, 90.0],
        }
    }
}

/// One object put on the terrain. Plain data; instancing it into a live
/// scene is up to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstance {
    /// Index of the source prototype in the catalog
    pub prototype: usize,
    pub name: String,
    pub category: ObjectCategory,
    /// World position of the object's center
    pub position: Vec3,
    pub orientation: Quat,
    /// Yaw chosen before any slope alignment
    pub yaw_degrees: f32,
}

impl PlacedInstance {
    /// The object's local up axis in world space.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

/// Scatters prototypes over a terrain.
pub struct ObjectPlacementEngine {
    settings: PlacementSettings,
}

impl ObjectPlacementEngine {
    pub fn new(mut settings: PlacementSettings) -> Self {
        let requested = settings.max_slope_angle;
        let clamped = if requested.is_nan() { 0.0 } else { requested.clamp(0.0, 360.0) };
        if clamped != requested {
            log::warn!("max slope angle {} clamped to {}", requested, clamped);
        }
        settings.max_slope_angle = clamped;
        Self { settings }
    }

    pub fn settings(&self) -> &PlacementSettings {
        &self.settings
    }

    /// Place every prototype of `catalog`.
    ///
    /// Prototypes run in parallel, each with its own RNG derived from `seed`
    /// and its catalog index. Output is grouped by prototype in catalog order,
    /// so the result only depends on the inputs.
    pub fn place_all(
        &self,
        catalog: &[ObjectPrototype],
        terrain: &dyn TerrainQuery,
        seed: u64,
        cancel: &CancelToken,
    ) -> Result<Vec<PlacedInstance>> {
        if catalog.is_empty() {
            return Err(Error::config("prototype catalog is empty"));
        }

        let per_prototype = catalog
            .par_iter()
            .enumerate()
            .map(|(index, prototype)| {
                cancel.check()?;
                let mut rng = ChaCha8Rng::seed_from_u64(prototype_seed(seed, index));
                let placed = self.place_prototype(index, prototype, terrain, &mut rng)?;
                log::debug!("{} ({:?}): {} instances", prototype.name, prototype.category, placed.len());
                Ok(placed)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(per_prototype.into_iter().flatten().collect())
    }

    /// Place a single prototype drawing from `rng`.
    pub fn place_prototype<R: Rng>(
        &self,
        index: usize,
        prototype: &ObjectPrototype,
        terrain: &dyn TerrainQuery,
        rng: &mut R,
    ) -> Result<Vec<PlacedInstance>> {
        prototype.validate()?;
        match prototype.category {
            ObjectCategory::Cover => self.place_cover(index, prototype, terrain, rng),
            ObjectCategory::Environment => self.place_environment(index, prototype, terrain, rng),
        }
    }

    fn place_cover<R: Rng>(
        &self,
        index: usize,
        prototype: &ObjectPrototype,
        terrain: &dyn TerrainQuery,
        rng: &mut R,
    ) -> Result<Vec<PlacedInstance>> {
        let metrics = terrain.metrics();
        let footprint = prototype.footprint();
        let extents = prototype.extents();
        let step_x = checked_step(footprint.x + self.settings.cover_x_offset, "cover X")?;
        let step_z = checked_step(footprint.y + self.settings.cover_z_offset, "cover Z")?;

        let radius = prototype.planar_radius();
        let z_limit = metrics.length - radius + extents.z;

        let mut placed = Vec::new();
        for x in tile(radius, metrics.width, step_x) {
            for z in tile(radius, z_limit, step_z) {
                if !passes_frequency_gate(prototype.frequency, rng) {
                    continue;
                }

                let yaw = self.choose_yaw(prototype, rng);
                let base = Vec3::new(x, terrain.sample_height(x, z)? + extents.y, z);
                let position = self.correct_overhang(base, extents, terrain)?;

                let Some(orientation) = self.orient_on_slope(position, yaw, &metrics, terrain)? else {
                    continue;
                };

                placed.push(PlacedInstance {
                    prototype: index,
                    name: prototype.name.clone(),
                    category: ObjectCategory::Cover,
                    position,
                    orientation,
                    yaw_degrees: yaw,
                });
            }
        }
        Ok(placed)
    }

    fn place_environment<R: Rng>(
        &self,
        index: usize,
        prototype: &ObjectPrototype,
        terrain: &dyn TerrainQuery,
        rng: &mut R,
    ) -> Result<Vec<PlacedInstance>> {
        let metrics = terrain.metrics();
        let footprint = prototype.footprint();
        let extents = prototype.extents();
        let step = checked_step(self.settings.environment_step, "environment")?;

        let mut placed = Vec::new();
        for x in tile(footprint.x, metrics.width, step) {
            for z in tile(footprint.y, metrics.length, step) {
                if !passes_frequency_gate(prototype.frequency, rng) {
                    continue;
                }

                // Sunk by its half-width below the resting height.
                let y = terrain.sample_height(x, z)? + extents.y - extents.x;
                placed.push(PlacedInstance {
                    prototype: index,
                    name: prototype.name.clone(),
                    category: ObjectCategory::Environment,
                    position: Vec3::new(x, y, z),
                    orientation: Quat::IDENTITY,
                    yaw_degrees: 0.0,
                });
            }
        }
        Ok(placed)
    }

    fn choose_yaw<R: Rng>(&self, prototype: &ObjectPrototype, rng: &mut R) -> f32 {
        let angles = prototype
            .allowed_yaw
            .as_deref()
            .unwrap_or(&self.settings.allowed_yaw_angles);
        if angles.is_empty() {
            rng.gen_range(0.0..360.0)
        } else {
            angles[rng.gen_range(0..angles.len())]
        }
    }

    /// Shift `position` inward along every axis whose probe looks over a
    /// ledge, then rest it on the ground at the corrected spot.
    ///
    /// Probes sit at the footprint's left, right, front and back edges. Probes
    /// past the terrain border read the border height.
    fn correct_overhang(&self, position: Vec3, extents: Vec3, terrain: &dyn TerrainQuery) -> Result<Vec3> {
        let metrics = terrain.metrics();
        let margin_height = terrain.sample_height(position.x, position.z)? - self.settings.ledge_margin;

        // (probe offset x, probe offset z, correction)
        let probes = [
            (-extents.x, 0.0, Vec3::new(extents.x, 0.0, 0.0)),
            (extents.x, 0.0, Vec3::new(-extents.x, 0.0, 0.0)),
            (0.0, extents.z, Vec3::new(0.0, 0.0, -extents.z)),
            (0.0, -extents.z, Vec3::new(0.0, 0.0, extents.z)),
        ];

        let mut shift = Vec3::ZERO;
        for (dx, dz, correction) in probes {
            let (px, pz) = metrics.clamp(position.x + dx, position.z + dz);
            if terrain.sample_height(px, pz)? < margin_height {
                shift += correction;
            }
        }

        let (x, z) = metrics.clamp(position.x + shift.x, position.z + shift.z);
        let y = terrain.sample_height(x, z)? + extents.y;
        Ok(Vec3::new(x, y, z))
    }

    /// Orientation for a cover object at `position`, or `None` when the slope
    /// is too steep to stand on.
    fn orient_on_slope(
        &self,
        position: Vec3,
        yaw: f32,
        metrics: &TerrainMetrics,
        terrain: &dyn TerrainQuery,
    ) -> Result<Option<Quat>> {
        let (u, v) = metrics.to_normalized(position.x, position.z);
        let steepness = terrain.sample_steepness(u, v)?;
        let max_slope = self.settings.max_slope_angle;

        if steepness > max_slope {
            return Ok(None);
        }
        if steepness > 0.0 && steepness < max_slope {
            let normal = terrain.sample_normal(u, v)?;
            return Ok(Some(align_to_normal(yaw, normal)));
        }
        Ok(Some(yaw_rotation(yaw)))
    }
}

/// Roll a uniform integer in [0, 100) and compare against `frequency`.
pub fn passes_frequency_gate<R: Rng>(frequency: i32, rng: &mut R) -> bool {
    rng.gen_range(0..100) < frequency
}

/// Rotation about world up by `yaw_degrees`.
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(yaw_degrees.to_radians())
}

/// Tilt world up onto `normal`, then apply the yaw in the tilted frame.
///
/// The tilt's Y component is dropped so it carries no twist about the up
/// axis; the object's heading comes from `yaw_degrees` alone.
pub fn align_to_normal(yaw_degrees: f32, normal: Vec3) -> Quat {
    let arc = Quat::from_rotation_arc(Vec3::Y, normal.normalize());
    let tilt = Quat::from_xyzw(arc.x, 0.0, arc.z, arc.w).normalize();
    tilt * yaw_rotation(yaw_degrees)
}

fn prototype_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn checked_step(step: f32, what: &str) -> Result<f32> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(Error::config(format!("{} tiling step must be positive, got {}", what, step)))
    }
}

/// `start, start + step, ...` while below `limit`. Stops early if adding the
/// step no longer moves the value.
fn tile(start: f32, limit: f32, step: f32) -> impl Iterator<Item = f32> {
    std::iter::successors(Some(start), move |&v| Some(v + step).filter(|&next| next > v))
        .take_while(move |&v| v < limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;

    /// Analytic terrain with fixed steepness and normal everywhere.
    struct MockTerrain {
        metrics: TerrainMetrics,
        height: fn(f32, f32) -> f32,
        steepness: f32,
        normal: Vec3,
    }

    impl MockTerrain {
        fn flat(size: f32) -> Self {
            Self {
                metrics: TerrainMetrics::new(size, 10.0, size),
                height: |_, _| 2.0,
                steepness: 0.0,
                normal: Vec3::Y,
            }
        }

        fn sloped(size: f32, steepness: f32, normal: Vec3) -> Self {
            Self { steepness, normal: normal.normalize(), ..Self::flat(size) }
        }
    }

    impl TerrainQuery for MockTerrain {
        fn metrics(&self) -> TerrainMetrics {
            self.metrics
        }

        fn sample_height(&self, x: f32, z: f32) -> Result<f32> {
            if !self.metrics.contains(x, z) {
                return Err(Error::Bounds { x, z });
            }
            Ok((self.height)(x, z))
        }

        fn sample_steepness(&self, u: f32, v: f32) -> Result<f32> {
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
            Ok(self.steepness)
        }

        fn sample_normal(&self, _u: f32, _v: f32) -> Result<Vec3> {
            Ok(self.normal)
        }
    }

    fn unit_cover(frequency: i32) -> ObjectPrototype {
        ObjectPrototype::new("unit", ObjectCategory::Cover, Aabb::from_size(Vec3::ONE))
            .with_frequency(frequency)
    }

    fn tight_settings() -> PlacementSettings {
        PlacementSettings {
            cover_x_offset: 0.0,
            cover_z_offset: 0.0,
            ..Default::default()
        }
    }

    fn place(engine: &ObjectPlacementEngine, proto: &ObjectPrototype, terrain: &MockTerrain, seed: u64) -> Vec<PlacedInstance> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        engine.place_prototype(0, proto, terrain, &mut rng).unwrap()
    }

    #[test]
    fn test_frequency_gate_rate() {
        // 100 x 100 candidate cells for a unit cube on a 100m terrain.
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(100.0);
        let placed = place(&engine, &unit_cover(30), &terrain, 7);

        let rate = placed.len() as f64 / 10_000.0;
        assert!((rate - 0.30).abs() < 0.02, "placement rate was {}", rate);
    }

    #[test]
    fn test_frequency_extremes() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(20.0);

        assert!(place(&engine, &unit_cover(0), &terrain, 1).is_empty());
        assert!(place(&engine, &unit_cover(-5), &terrain, 1).is_empty());
        assert_eq!(place(&engine, &unit_cover(100), &terrain, 1).len(), 400);
        assert_eq!(place(&engine, &unit_cover(250), &terrain, 1).len(), 400);
    }

    #[test]
    fn test_cover_tiling_positions() {
        let engine = ObjectPlacementEngine::new(PlacementSettings {
            cover_x_offset: 1.0,
            cover_z_offset: 0.0,
            ..Default::default()
        });
        let terrain = MockTerrain::flat(10.0);
        let proto = ObjectPrototype::new("box", ObjectCategory::Cover, Aabb::from_size(Vec3::new(2.0, 1.0, 2.0)))
            .with_frequency(100);
        let placed = place(&engine, &proto, &terrain, 3);

        // x: 1, 4, 7 (step 3); z: 1, 3, 5, 7, 9 (step 2, limit 10 - 1 + 1)
        assert_eq!(placed.len(), 15);
        assert_eq!(placed[0].position, Vec3::new(1.0, 2.5, 1.0));
        assert_eq!(placed.last().unwrap().position, Vec3::new(7.0, 2.5, 9.0));
    }

    #[test]
    fn test_yaw_from_allowed_set() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(10.0);
        let placed = place(&engine, &unit_cover(100), &terrain, 11);

        assert!(placed.iter().all(|p| [0.0, 45.0, 90.0].contains(&p.yaw_degrees)));
        assert!(placed.iter().any(|p| p.yaw_degrees == 45.0));
    }

    #[test]
    fn test_empty_yaw_set_is_uniform() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(20.0);
        let proto = unit_cover(100).with_allowed_yaw(vec![]);
        let placed = place(&engine, &proto, &terrain, 5);

        assert!(placed.iter().all(|p| (0.0..360.0).contains(&p.yaw_degrees)));
        assert!(placed.iter().any(|p| p.yaw_degrees > 180.0));
    }

    #[test]
    fn test_flat_ground_keeps_pure_yaw() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(10.0);
        for inst in place(&engine, &unit_cover(100), &terrain, 2) {
            assert_eq!(inst.orientation, yaw_rotation(inst.yaw_degrees));
        }
    }

    #[test]
    fn test_steep_slope_discards() {
        let engine = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: 30.0, ..tight_settings() });
        let terrain = MockTerrain::sloped(10.0, 30.5, Vec3::new(0.6, 1.0, 0.0));
        assert!(place(&engine, &unit_cover(100), &terrain, 4).is_empty());
    }

    #[test]
    fn test_moderate_slope_aligns_and_keeps_yaw() {
        let engine = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: 30.0, ..tight_settings() });
        let normal = Vec3::new(0.3, 1.0, 0.1).normalize();
        let terrain = MockTerrain::sloped(10.0, 18.0, normal);
        let placed = place(&engine, &unit_cover(100), &terrain, 9);
        assert!(!placed.is_empty());

        let tilt = Quat::from_rotation_arc(Vec3::Y, normal);
        for inst in &placed {
            assert!(inst.up().abs_diff_eq(normal, 1e-4), "up {:?} vs normal {:?}", inst.up(), normal);

            let heading = tilt.inverse() * inst.orientation;
            let yaw = yaw_rotation(inst.yaw_degrees);
            assert!(
                heading.abs_diff_eq(yaw, 1e-4) || heading.abs_diff_eq(-yaw, 1e-4),
                "heading {:?} vs yaw {}", heading, inst.yaw_degrees
            );
        }
    }

    #[test]
    fn test_slope_at_limit_is_kept_unaligned() {
        let engine = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: 30.0, ..tight_settings() });
        let terrain = MockTerrain::sloped(5.0, 30.0, Vec3::new(0.5, 1.0, 0.0));
        let placed = place(&engine, &unit_cover(100), &terrain, 6);
        assert_eq!(placed.len(), 25);
        for inst in &placed {
            assert_eq!(inst.orientation, yaw_rotation(inst.yaw_degrees));
        }
    }

    #[test]
    fn test_max_slope_clamped() {
        let high = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: 500.0, ..Default::default() });
        assert_eq!(high.settings().max_slope_angle, 360.0);
        let low = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: -10.0, ..Default::default() });
        assert_eq!(low.settings().max_slope_angle, 0.0);
        let nan = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: f32::NAN, ..Default::default() });
        assert_eq!(nan.settings().max_slope_angle, 0.0);
    }

    #[test]
    fn test_ledge_shifts_toward_high_side() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain {
            height: |x, _| if x < 3.5 { 10.0 } else { 0.0 },
            ..MockTerrain::flat(10.0)
        };
        let extents = Vec3::ONE;

        let corrected = engine
            .correct_overhang(Vec3::new(3.0, 11.0, 5.0), extents, &terrain)
            .unwrap();
        assert!(corrected.x < 3.5);
        assert_eq!(corrected, Vec3::new(2.0, 11.0, 5.0));
        assert_eq!(corrected.y, terrain.sample_height(corrected.x, corrected.z).unwrap() + extents.y);
    }

    #[test]
    fn test_ledge_corrections_compose() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain {
            height: |x, z| if x < 3.5 && z < 5.5 { 10.0 } else { 0.0 },
            ..MockTerrain::flat(10.0)
        };

        let corrected = engine
            .correct_overhang(Vec3::new(3.0, 11.0, 5.0), Vec3::ONE, &terrain)
            .unwrap();
        assert_eq!(corrected, Vec3::new(2.0, 11.0, 4.0));
    }

    #[test]
    fn test_ledge_margin_tolerates_small_drops() {
        let engine = ObjectPlacementEngine::new(PlacementSettings { ledge_margin: 2.0, ..tight_settings() });
        let terrain = MockTerrain {
            height: |x, _| if x < 3.5 { 10.0 } else { 9.0 },
            ..MockTerrain::flat(10.0)
        };

        let corrected = engine
            .correct_overhang(Vec3::new(3.0, 11.0, 5.0), Vec3::ONE, &terrain)
            .unwrap();
        assert_eq!(corrected.x, 3.0);
    }

    #[test]
    fn test_environment_placement_policy() {
        // Steepness above the limit and a cliff are both ignored for environment objects.
        let engine = ObjectPlacementEngine::new(PlacementSettings { max_slope_angle: 10.0, ..Default::default() });
        let terrain = MockTerrain {
            height: |x, _| if x < 8.0 { 2.0 } else { 0.0 },
            ..MockTerrain::sloped(20.0, 80.0, Vec3::new(1.0, 1.0, 0.0))
        };
        let proto = ObjectPrototype::new("rock", ObjectCategory::Environment, Aabb::from_size(Vec3::new(2.0, 4.0, 1.0)))
            .with_frequency(100);
        let placed = place(&engine, &proto, &terrain, 8);

        // x: 2, 7, 12, 17; z: 1, 6, 11, 16
        assert_eq!(placed.len(), 16);
        let first = &placed[0];
        assert_eq!(first.position, Vec3::new(2.0, 2.0 + 2.0 - 1.0, 1.0));
        assert_eq!(first.orientation, Quat::IDENTITY);
        let far = placed.iter().find(|p| p.position.x == 12.0).unwrap();
        assert_eq!(far.position.y, 0.0 + 2.0 - 1.0);
    }

    #[test]
    fn test_place_all_is_deterministic_and_ordered() {
        let engine = ObjectPlacementEngine::new(tight_settings());
        let terrain = MockTerrain::flat(30.0);
        let catalog = vec![
            unit_cover(40),
            ObjectPrototype::new("rock", ObjectCategory::Environment, Aabb::from_size(Vec3::ONE)).with_frequency(60),
        ];
        let cancel = CancelToken::new();

        let a = engine.place_all(&catalog, &terrain, 99, &cancel).unwrap();
        let b = engine.place_all(&catalog, &terrain, 99, &cancel).unwrap();
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].prototype <= w[1].prototype));
        assert!(a.iter().any(|p| p.category == ObjectCategory::Environment));

        let c = engine.place_all(&catalog, &terrain, 100, &cancel).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_place_all_rejects_empty_catalog() {
        let engine = ObjectPlacementEngine::new(PlacementSettings::default());
        let terrain = MockTerrain::flat(10.0);
        let result = engine.place_all(&[], &terrain, 1, &CancelToken::new());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_place_all_cancelled() {
        let engine = ObjectPlacementEngine::new(PlacementSettings::default());
        let terrain = MockTerrain::flat(10.0);
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = engine.place_all(&[unit_cover(50)], &terrain, 1, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let engine = ObjectPlacementEngine::new(PlacementSettings { cover_x_offset: -1.0, ..Default::default() });
        let terrain = MockTerrain::flat(10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = engine.place_prototype(0, &unit_cover(50), &terrain, &mut rng);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_align_to_normal_up_axis() {
        let normal = Vec3::new(-0.2, 1.0, 0.4).normalize();
        let q = align_to_normal(45.0, normal);
        assert!((q * Vec3::Y).abs_diff_eq(normal, 1e-5));
    }

    #[test]
    fn test_tile_stops_without_progress() {
        assert_eq!(tile(0.5, 3.0, 1.0).collect::<Vec<_>>(), vec![0.5, 1.5, 2.5]);
        assert_eq!(tile(1.0e9, 2.0e9, 1.0e-3).count(), 1);
    }
}
