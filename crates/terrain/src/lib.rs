//! # Blockwire Terrain
//!
//! Rebuilds 16x16x16 block volumes from chunk column payloads.
//!
//! ## Features
//! - 1.7 zlib columns with id, metadata and add nibble arrays
//! - 1.8 little endian `id << 4 | metadata` arrays
//! - 1.9+ paletted containers, spanning (before 1.16) and padded entries
//! - 1.18 single value containers, per-section biomes and trailing light
//! - Declared-size reseek so padding never desynchronises the message
//!
//! ## Cells
//! A [`TerrainSection`] holds 4096 `Option<StateRef>` cells indexed
//! `y << 8 | z << 4 | x`. Air is `None`; ids the registry does not know
//! resolve to `StateRef::UNKNOWN`.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use blockwire_blocks::RegistryStore;
//! use blockwire_config::DecoderConfig;
//! use blockwire_core::ProtocolVersion;
//! use blockwire_terrain::TerrainDecoder;
//! use bytes::Bytes;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DecoderConfig::load_default()?;
//! let store = RegistryStore::from_config(&config)?;
//! store.load_all()?;
//! let registry = store.require(ProtocolVersion::V1_16_5)?;
//!
//! let decoder = TerrainDecoder::from_config(registry, &config);
//! let payload = Bytes::new();
//! if let Some(column) = decoder.decode_column_payload(payload, ProtocolVersion::V1_16_5) {
//!     println!("{} sections", column.sections.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bits;
pub mod column;
pub mod dimension;
pub mod error;
pub mod legacy;
pub mod nibble;
pub mod palette;
pub mod paletted;
pub mod section;
pub mod transitional;

#[cfg(test)]
mod testing;

pub use bits::PackedLayout;
pub use column::{BlockEntityData, ChunkColumn, TerrainDecoder};
pub use dimension::Dimension;
pub use error::{Result, TerrainError};
pub use nibble::NibbleArray;
pub use palette::{ContainerKind, Palette};
pub use section::TerrainSection;
