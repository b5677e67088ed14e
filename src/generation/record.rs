//! Flat-file parameter record.
//!
//! Eight newline-separated values in fixed order, no header and no names:
//!
//! ```text
//! instanceId
//! depth
//! groundLevel
//! width
//! height
//! scale
//! offsetX
//! offsetY
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::{Error, Result};
use crate::terrain::HeightParams;

/// Number of lines in a complete record
pub const RECORD_FIELDS: usize = 8;

/// File name suffix for parameter records
pub const RECORD_SUFFIX: &str = "keepTerrain.txt";

/// The persisted subset of [`HeightParams`] plus the owning instance id.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamRecord {
    pub instance_id: i64,
    pub depth: u32,
    pub ground_level: f32,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ParamRecord {
    pub fn from_params(instance_id: i64, params: &HeightParams) -> Self {
        Self {
            instance_id,
            depth: params.depth,
            ground_level: params.ground_level,
            width: params.width,
            height: params.height,
            scale: params.scale,
            offset_x: params.offset_x,
            offset_y: params.offset_y,
        }
    }

    /// Copy the recorded values into `params`, leaving the noise knobs alone.
    pub fn apply(&self, params: &mut HeightParams) {
        params.depth = self.depth;
        params.ground_level = self.ground_level;
        params.width = self.width;
        params.height = self.height;
        params.scale = self.scale;
        params.offset_x = self.offset_x;
        params.offset_y = self.offset_y;
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            self.instance_id,
            self.depth,
            self.ground_level,
            self.width,
            self.height,
            self.scale,
            self.offset_x,
            self.offset_y,
        )
    }

    /// Parse record text. Blank text yields `Ok(None)`.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        if lines.len() < RECORD_FIELDS {
            return Err(Error::format(format!(
                "parameter record needs {} lines, found {}", RECORD_FIELDS, lines.len()
            )));
        }

        Ok(Some(Self {
            instance_id: parse_field(lines[0], "instanceId")?,
            depth: parse_count(lines[1], "depth", false)?,
            ground_level: parse_float(lines[2], "groundLevel")?,
            width: parse_count(lines[3], "width", true)?,
            height: parse_count(lines[4], "height", true)?,
            scale: parse_float(lines[5], "scale")?,
            offset_x: parse_float(lines[6], "offsetX")?,
            offset_y: parse_float(lines[7], "offsetY")?,
        }))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Read a record file. An empty file yields `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// `<temp dir>/<name>_<instance_id>.keepTerrain.txt`
    pub fn default_path(name: &str, instance_id: i64) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}.{}", name, instance_id, RECORD_SUFFIX))
    }
}

fn parse_field<T: FromStr>(text: &str, field: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::format(format!("invalid {} value '{}'", field, text)))
}

fn parse_float(text: &str, field: &str) -> Result<f32> {
    let value: f32 = parse_field(text, field)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::format(format!("{} must be finite, got '{}'", field, text)))
    }
}

/// Integer dimension. Negative values (and zero, when `positive`) are
/// configuration errors rather than format errors.
fn parse_count(text: &str, field: &str, positive: bool) -> Result<u32> {
    let value: i64 = parse_field(text, field)?;
    let min = if positive { 1 } else { 0 };
    if value < min {
        return Err(Error::config(format!("{} must be at least {}, got {}", field, min, value)));
    }
    u32::try_from(value).map_err(|_| Error::config(format!("{} {} is too large", field, value)))
}
