//! Configuration errors raised while building world data.
//!
//! Ticks never fail: every error here is produced once, when zones, maps or
//! the asset catalog are constructed.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Invalid zone bounds: upper {upper} > lower {lower} or left {left} > right {right}")]
    InvalidZone {
        upper: i32,
        lower: i32,
        left: i32,
        right: i32,
    },

    #[error("Invalid door span: start {start} > end {end}")]
    InvalidDoorSpan { start: i32, end: i32 },

    #[error("Asset '{0}' requested before loading finished")]
    AssetsNotLoaded(String),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Image '{name}' has an empty size ({width}×{height})")]
    EmptyImage { name: String, width: i32, height: i32 },
}

pub type Result<T> = std::result::Result<T, WorldError>;
