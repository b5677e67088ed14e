//! Axis-aligned bounding box

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec2, Vec3};

/// Axis-aligned bounding box defined by min and max corners.
///
/// Object prototypes carry their visual bounds as an `Aabb`; placement only
/// needs its size (footprint) and half-extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create AABB from center and half-extents
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Box of the given size centered on the origin
    pub fn from_size(size: Vec3) -> Self {
        Self::from_center_half_extent(Vec3::ZERO, size * 0.5)
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get half-extents
    pub fn half_extent(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Planar (width along X, depth along Z) extent
    pub fn footprint(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(size.x, size.z)
    }

    /// True if every extent is finite and the box has positive width and depth
    pub fn has_footprint(&self) -> bool {
        let size = self.size();
        size.is_finite() && size.x > 0.0 && size.z > 0.0 && size.y >= 0.0
    }
}
