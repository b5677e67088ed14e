//! Terrascape - procedural terrain scene generation
//!
//! Builds a noise height field, scatters object prototypes over it with
//! slope and ledge awareness, and paints elevation-banded texture weights.

pub mod core;
pub mod math;
pub mod terrain;
pub mod clutter;
pub mod splat;
pub mod generation;
