//! Elevation bands: ascending thresholds splitting the height range into layers.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// `n` ascending thresholds partition all elevations into `n + 1` layers:
///
/// - layer 0: `e <= t[0]`
/// - layer i: `t[i - 1] < e <= t[i]`
/// - last layer: `e > t[n - 1]`
///
/// Every finite elevation falls in exactly one layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct ElevationBandTable {
    thresholds: Vec<f32>,
}

impl ElevationBandTable {
    pub fn new(thresholds: Vec<f32>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(Error::config("elevation band table needs at least one threshold"));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(Error::config(format!("non-finite elevation threshold in {:?}", thresholds)));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::config(format!(
                "elevation thresholds must be strictly ascending, got {:?}", thresholds
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn layer_count(&self) -> usize {
        self.thresholds.len() + 1
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }

    /// Whether `layer` claims `elevation`.
    pub fn is_active(&self, layer: usize, elevation: f32) -> bool {
        let t = &self.thresholds;
        let last = t.len();
        if layer == 0 {
            elevation <= t[0]
        } else if layer < last {
            t[layer - 1] < elevation && elevation <= t[layer]
        } else if layer == last {
            elevation > t[last - 1]
        } else {
            false
        }
    }

    /// The single layer claiming `elevation`, or `None` for NaN.
    pub fn band_for(&self, elevation: f32) -> Option<usize> {
        if elevation.is_nan() {
            return None;
        }
        Some(self.thresholds.partition_point(|&t| t < elevation))
    }
}

impl TryFrom<Vec<f32>> for ElevationBandTable {
    type Error = Error;

    fn try_from(thresholds: Vec<f32>) -> Result<Self> {
        Self::new(thresholds)
    }
}

impl From<ElevationBandTable> for Vec<f32> {
    fn from(table: ElevationBandTable) -> Self {
        table.thresholds
    }
}
