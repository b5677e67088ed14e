//! Elevation-banded texture splatting.

pub mod bands;
pub mod painter;

pub use bands::ElevationBandTable;
pub use painter::{SplatGrid, SplatSettings, TextureSplatPainter};
