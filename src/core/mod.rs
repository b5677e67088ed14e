//! Core types and utilities

pub mod types;
pub mod error;
pub mod logging;
pub mod cancel;

pub use types::*;
pub use error::Error;
pub use cancel::CancelToken;
