//! # Blockwire Protocol Library
//!
//! Low-level reading of game protocol payloads across protocol revisions
//! 1.7 to 1.18.
//!
//! ## Architecture
//!
//! ### 1. Cursor ([`cursor`])
//! Position-addressable reader over one buffered message:
//! - Big endian primitives
//! - VarInt / VarLong
//! - Fixed and length-prefixed byte arrays, strings, UUIDs
//! - Checkpoint and reseek via `position` / `set_position`
//!
//! ### 2. NBT ([`nbt`])
//! Named binary tags read with `quartz_nbt`, including the gzip-wrapped
//! 1.7 item variant.
//!
//! ### 3. Entity Metadata ([`metadata`])
//! The self-describing `(key, type, value)` list and its per-version type
//! id tables. Produces an [`AttributeSet`] that entity decoders merge and
//! interpret.
//!
//! ### 4. Items and particles ([`items`])
//! Item slot and particle payloads as embedded in metadata.
//!
//! ### 5. Compression ([`compression`])
//! zlib and gzip streams embedded inside 1.7 payloads.
//!
//! ### 6. Packets ([`packets`])
//! Message-level decoding; [`decode_or_drop`] turns errors into
//! "drop this message" instead of propagating them to the connection.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use blockwire_core::ProtocolVersion;
//! use blockwire_protocol::{decode_or_drop, EntityMetadataPacket};
//! use bytes::Bytes;
//!
//! let payload = Bytes::from_static(&[0x2A, 0x00, 0x00, 0x01, 0xFF]);
//! if let Some(packet) = decode_or_drop("entity metadata", payload, ProtocolVersion::V1_12_2, |c| {
//!     EntityMetadataPacket::decode(c)
//! }) {
//!     println!("entity {} sent {} slots", packet.entity_id, packet.update.len());
//! }
//! ```

pub mod compression;
pub mod cursor;
pub mod items;
pub mod metadata;
pub mod nbt;
pub mod packets;

// Re-export commonly used items
pub use cursor::InCursor;
pub use items::{ItemSlot, ParticleData, ParticleExtra};
pub use metadata::{AttributeSet, AttributeType, AttributeValue, VillagerData};
pub use nbt::{CompoundExt, NbtCompound, NbtTag};
pub use packets::*;
