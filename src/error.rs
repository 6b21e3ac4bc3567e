use std::fmt;

use crate::terrain::TerrainKind;

/// Errors reported by map operations.
///
/// Every variant leaves the map in the state it had before the failed call.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Requested size is outside `MIN_MAP_SIZE..=MAX_MAP_SIZE`.
    InvalidSize { width: u32, height: u32 },
    /// A size text field did not contain a whole number.
    UnparsableSize(String),
    /// Hiding this category would leave no visible terrain to substitute with.
    LastVisibleTerrain(TerrainKind),
    /// The host is missing a primitive the app needs (window, document, canvas).
    MissingHost(&'static str),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidSize { width, height } => write!(
                f,
                "Invalid map size {width}x{height}: both sides must be within {}..={}",
                crate::config::MIN_MAP_SIZE,
                crate::config::MAX_MAP_SIZE
            ),
            MapError::UnparsableSize(text) => write!(f, "Map size is not a number: {text:?}"),
            MapError::LastVisibleTerrain(kind) => {
                write!(f, "Cannot hide {kind}: at least one terrain type must stay visible")
            }
            MapError::MissingHost(what) => write!(f, "Missing host primitive: {what}"),
        }
    }
}

impl std::error::Error for MapError {}
