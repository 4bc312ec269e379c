//! Error types for the terrain crate

use blockwire_core::{ProtocolVersion, WireError};

/// Terrain decoding errors
///
/// Everything except [`TerrainError::RegistryMismatch`] is scoped to one
/// column: the column is dropped and decoding continues.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Cursor or inflation failure
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error("Invalid bits per entry: {0}")]
    InvalidBits(u8),

    #[error("Palette index {index} out of range ({len} entries)")]
    PaletteIndex { index: u32, len: usize },

    #[error("Packed array too short: {actual} longs, {expected} needed")]
    ShortPackedArray { expected: usize, actual: usize },

    #[error("Section {index} outside the dimension ({count} sections)")]
    SectionOutOfRange { index: usize, count: u32 },

    #[error("Column data overran its declared size ({declared} bytes, read {read})")]
    SizeOverrun { declared: usize, read: usize },

    #[error("Light array of {0} bytes (expected 2048)")]
    LightLength(usize),

    /// The registry's id encoding does not fit the negotiated version
    #[error("Registry for {registry} cannot decode terrain at {version}")]
    RegistryMismatch {
        registry: ProtocolVersion,
        version: ProtocolVersion,
    },
}

impl From<TerrainError> for WireError {
    fn from(err: TerrainError) -> Self {
        match err {
            TerrainError::Wire(wire) => wire,
            mismatch @ TerrainError::RegistryMismatch { .. } => {
                WireError::UnknownDefinition(mismatch.to_string())
            }
            other => WireError::Malformed(other.to_string()),
        }
    }
}

/// Result type for terrain operations
pub type Result<T> = std::result::Result<T, TerrainError>;
