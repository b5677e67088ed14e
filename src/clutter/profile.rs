//! Object prototypes: what can be scattered and how often.
//!
//! `ObjectCategory` selects the placement strategy. `ObjectPrototype` carries
//! the visual bounds the strategy spaces and lifts instances by, the per-cell
//! placement chance, and optional yaw restrictions.

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};
use crate::core::{Error, Result};
use crate::math::Aabb;

/// Placement strategy for a prototype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    /// Tiled by footprint, ledge-corrected and slope-aligned
    Cover,
    /// Tiled on a fixed step, partially embedded, never aligned
    Environment,
}

/// A scatterable object definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectPrototype {
    pub name: String,
    pub category: ObjectCategory,
    /// Visual bounding volume; only its size matters.
    pub bounds: Aabb,
    /// Percent chance (0-100) per candidate cell. Values outside the range
    /// mean never (< 1) or always (> 99).
    #[serde(default)]
    pub frequency: i32,
    /// Allowed yaw angles in degrees. `None` falls back to the placement
    /// settings; an empty list means any yaw in [0, 360).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_yaw: Option<Vec<f32>>,
}

impl ObjectPrototype {
    pub fn new(name: impl Into<String>, category: ObjectCategory, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            category,
            bounds,
            frequency: 50,
            allowed_yaw: None,
        }
    }

    pub fn with_frequency(mut self, frequency: i32) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_allowed_yaw(mut self, angles: Vec<f32>) -> Self {
        self.allowed_yaw = Some(angles);
        self
    }

    /// Planar (width, depth)
    pub fn footprint(&self) -> Vec2 {
        self.bounds.footprint()
    }

    /// Half-extents of the bounds
    pub fn extents(&self) -> Vec3 {
        self.bounds.half_extent()
    }

    /// Half of the larger planar dimension.
    pub fn planar_radius(&self) -> f32 {
        let footprint = self.footprint();
        footprint.x.max(footprint.y) * 0.5
    }

    pub fn validate(&self) -> Result<()> {
        if !self.bounds.has_footprint() {
            return Err(Error::config(format!(
                "prototype '{}' has no planar footprint ({:?})", self.name, self.bounds.size()
            )));
        }
        if let Some(angles) = &self.allowed_yaw {
            if angles.iter().any(|a| !a.is_finite()) {
                return Err(Error::config(format!(
                    "prototype '{}' has a non-finite yaw angle", self.name
                )));
            }
        }
        Ok(())
    }
}

/// Sample catalog used by the default configuration.
pub fn default_catalog() -> Vec<ObjectPrototype> {
    vec![
        ObjectPrototype::new("crate", ObjectCategory::Cover, Aabb::from_size(Vec3::new(2.0, 1.5, 2.0)))
            .with_frequency(20),
        ObjectPrototype::new("barricade", ObjectCategory::Cover, Aabb::from_size(Vec3::new(3.0, 1.2, 0.6)))
            .with_frequency(8),
        ObjectPrototype::new("boulder", ObjectCategory::Environment, Aabb::from_size(Vec3::new(2.5, 2.0, 2.5)))
            .with_frequency(12),
        ObjectPrototype::new("tree", ObjectCategory::Environment, Aabb::from_size(Vec3::new(1.0, 6.0, 1.0)))
            .with_frequency(25),
    ]
}
