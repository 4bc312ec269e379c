//! Chunk column packet
//!
//! A column is a stack of [`TerrainSection`]s plus per-column extras
//! (biomes, heightmaps, block entities). The section layout is chosen by
//! protocol version alone:
//!
//! | Versions | Module |
//! |---|---|
//! | 1.7 | [`legacy`](crate::legacy) |
//! | 1.8 | [`transitional`](crate::transitional) |
//! | 1.9+ | [`paletted`](crate::paletted) |

use crate::dimension::Dimension;
use crate::error::{Result, TerrainError};
use crate::nibble::{NibbleArray, NIBBLE_ARRAY_BYTES};
use crate::section::TerrainSection;
use crate::{legacy, paletted, transitional};
use blockwire_blocks::{BlockRegistry, IdEncoding, StateRef};
use blockwire_config::DecoderConfig;
use blockwire_core::{BlockPosition, ChunkPosition, ProtocolVersion, WireError};
use blockwire_protocol::{decode_cursor_or_drop, CompoundExt, InCursor, NbtCompound};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Block entity sent with a column
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntityData {
    /// From the entry header (1.18+) or the `x`/`y`/`z` NBT keys
    pub position: Option<BlockPosition>,
    /// Block entity type id (1.18+)
    pub type_id: Option<i32>,
    pub nbt: Option<NbtCompound>,
}

impl BlockEntityData {
    pub(crate) fn from_nbt(nbt: Option<NbtCompound>) -> Self {
        let position = nbt.as_ref().and_then(|tag| {
            Some(BlockPosition::new(tag.int("x")?, tag.int("y")?, tag.int("z")?))
        });
        Self {
            position,
            type_id: None,
            nbt,
        }
    }
}

/// One decoded column
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkColumn {
    pub position: ChunkPosition,
    /// Replaces the whole column rather than the sent sections
    pub full: bool,
    /// Full column with no sections before 1.9: the client drops it
    pub unload: bool,
    /// Keyed by section y
    pub sections: BTreeMap<i32, TerrainSection>,
    /// Column biomes before 1.18: 256 x/z bytes or ints up to 1.14,
    /// 1024 4x4x4 cells from 1.15
    pub biomes: Option<Vec<i32>>,
    pub heightmaps: Option<NbtCompound>,
    pub block_entities: Vec<BlockEntityData>,
}

impl ChunkColumn {
    pub fn new(position: ChunkPosition, full: bool) -> Self {
        Self {
            position,
            full,
            unload: false,
            sections: BTreeMap::new(),
            biomes: None,
            heightmaps: None,
            block_entities: Vec::new(),
        }
    }

    pub fn section(&self, section_y: i32) -> Option<&TerrainSection> {
        self.sections.get(&section_y)
    }

    /// Block at column-relative `x`/`z` (0-15) and world `y`
    pub fn block_at(&self, x: usize, y: i32, z: usize) -> Option<StateRef> {
        self.section(y >> 4)?.get(x, (y & 0x0F) as usize, z)
    }

    /// Merge a later packet for the same column.
    ///
    /// A full update replaces everything; otherwise each sent section
    /// replaces the stored one and the extras that were sent win.
    pub fn apply(&mut self, update: ChunkColumn) {
        if update.full {
            *self = update;
            return;
        }
        self.sections.extend(update.sections);
        if update.biomes.is_some() {
            self.biomes = update.biomes;
        }
        if update.heightmaps.is_some() {
            self.heightmaps = update.heightmaps;
        }
        self.block_entities.extend(update.block_entities);
    }
}

/// Decodes chunk column payloads against one block table
pub struct TerrainDecoder {
    registry: Arc<BlockRegistry>,
    dimension: Dimension,
    ignore_server_light: bool,
    max_string_length: usize,
    max_array_length: usize,
}

impl TerrainDecoder {
    pub fn new(registry: Arc<BlockRegistry>, dimension: Dimension) -> Self {
        let defaults = DecoderConfig::default();
        Self {
            registry,
            dimension,
            ignore_server_light: defaults.ignore_server_light,
            max_string_length: defaults.max_string_length,
            max_array_length: defaults.max_array_length,
        }
    }

    pub fn from_config(registry: Arc<BlockRegistry>, config: &DecoderConfig) -> Self {
        Self {
            registry,
            dimension: Dimension::from_config(config),
            ignore_server_light: config.ignore_server_light,
            max_string_length: config.max_string_length,
            max_array_length: config.max_array_length,
        }
    }

    /// Skip light arrays instead of storing them
    pub fn with_ignore_server_light(mut self, ignore: bool) -> Self {
        self.ignore_server_light = ignore;
        self
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Switch dimension (respawn, world change)
    pub fn set_dimension(&mut self, dimension: Dimension) {
        self.dimension = dimension;
    }

    pub fn ignore_server_light(&self) -> bool {
        self.ignore_server_light
    }

    /// Decode one column from the cursor
    pub fn decode_column(&self, cursor: &mut InCursor) -> Result<ChunkColumn> {
        let version = cursor.version();
        let flattened = self.registry.encoding() == IdEncoding::Flattened;
        if version.is_flattened() != flattened {
            return Err(TerrainError::RegistryMismatch {
                registry: self.registry.version(),
                version,
            });
        }

        let column = if version < ProtocolVersion::V1_8 {
            legacy::decode(self, cursor)?
        } else if version < ProtocolVersion::V1_9 {
            transitional::decode(self, cursor)?
        } else {
            paletted::decode(self, cursor)?
        };

        tracing::debug!(
            x = column.position.x,
            z = column.position.z,
            full = column.full,
            sections = column.sections.len(),
            block_entities = column.block_entities.len(),
            "decoded column"
        );
        Ok(column)
    }

    /// Decode a whole column payload; malformed columns are logged and
    /// dropped
    pub fn decode_column_payload(&self, payload: Bytes, version: ProtocolVersion) -> Option<ChunkColumn> {
        let cursor = InCursor::new(payload, version)
            .with_max_string_length(self.max_string_length)
            .with_max_array_length(self.max_array_length);
        decode_cursor_or_drop("chunk column", cursor, |cursor| {
            self.decode_column(cursor).map_err(WireError::from)
        })
    }
}

// ===== Shared wire helpers =====

/// Read a VarInt size, run `read`, then move to exactly checkpoint + size
pub(crate) fn read_sized<T, F>(cursor: &mut InCursor, read: F) -> Result<T>
where
    F: FnOnce(&mut InCursor) -> Result<T>,
{
    let size = cursor.read_length(1)?;
    let checkpoint = cursor.position();
    let value = read(cursor)?;
    let consumed = cursor.position() - checkpoint;
    if consumed > size {
        return Err(TerrainError::SizeOverrun {
            declared: size,
            read: consumed,
        });
    }
    if consumed < size {
        tracing::trace!(padding = size - consumed, "skipping column padding");
    }
    cursor.set_position(checkpoint + size)?;
    Ok(value)
}

/// VarInt long count followed by the longs of a bit set
pub(crate) fn read_bit_set(cursor: &mut InCursor) -> Result<Vec<u64>> {
    let count = cursor.read_length(8)?;
    Ok(cursor.read_u64_array(count)?)
}

pub(crate) fn set_bits(longs: &[u64]) -> impl Iterator<Item = usize> + '_ {
    (0..longs.len() * 64).filter(move |bit| (longs[bit / 64] >> (bit % 64)) & 1 != 0)
}

/// Section indices present in `mask`, checked against the dimension
pub(crate) fn present_sections(mask: &[u64], dimension: Dimension) -> Result<Vec<usize>> {
    let present: Vec<usize> = set_bits(mask).collect();
    match present.last() {
        Some(&index) if index >= dimension.section_count as usize => {
            Err(TerrainError::SectionOutOfRange {
                index,
                count: dimension.section_count,
            })
        }
        _ => Ok(present),
    }
}

/// One 2048 byte light array, or skip it when light is ignored
pub(crate) fn read_light(cursor: &mut InCursor, ignore: bool) -> Result<Option<NibbleArray>> {
    if ignore {
        cursor.skip(NIBBLE_ARRAY_BYTES)?;
        return Ok(None);
    }
    NibbleArray::read(cursor).map(Some)
}

/// Biome bytes widened to ints
pub(crate) fn read_byte_biomes(cursor: &mut InCursor) -> Result<Vec<i32>> {
    let bytes = cursor.read_fixed_array(256)?;
    Ok(bytes.iter().map(|b| *b as i32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{flattened_registry, put_var_int};
    use blockwire_protocol::NbtTag;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn test_read_sized_reseeks_past_padding() {
        let mut buf = BytesMut::new();
        put_var_int(&mut buf, 5);
        buf.put_u16(0xBEEF);
        buf.put_slice(&[0, 0, 0]);
        buf.put_u8(0x2A);
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_16_5);

        let value = read_sized(&mut cursor, |c| Ok(c.read_u16()?)).unwrap();
        assert_eq!(value, 0xBEEF);
        assert_eq!(cursor.position(), 1 + 5);
        assert_eq!(cursor.read_u8().unwrap(), 0x2A);
    }

    #[test]
    fn test_read_sized_overrun() {
        let mut buf = BytesMut::new();
        put_var_int(&mut buf, 1);
        buf.put_u32(7);
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_16_5);
        assert!(matches!(
            read_sized(&mut cursor, |c| Ok(c.read_u32()?)),
            Err(TerrainError::SizeOverrun { declared: 1, read: 4 })
        ));
    }

    #[test]
    fn test_present_sections() {
        let dimension = Dimension::default();
        assert_eq!(present_sections(&[0b1010_0001], dimension).unwrap(), vec![0, 5, 7]);
        assert!(matches!(
            present_sections(&[1 << 16], dimension),
            Err(TerrainError::SectionOutOfRange { index: 16, count: 16 })
        ));
        assert_eq!(set_bits(&[0, 1]).collect::<Vec<_>>(), vec![64]);
    }

    #[test]
    fn test_block_entity_position_from_nbt() {
        let mut nbt = NbtCompound::new();
        nbt.insert("x", NbtTag::Int(-3));
        nbt.insert("y", NbtTag::Int(64));
        nbt.insert("z", NbtTag::Int(17));
        let entity = BlockEntityData::from_nbt(Some(nbt));
        assert_eq!(entity.position, Some(BlockPosition::new(-3, 64, 17)));
        assert_eq!(BlockEntityData::from_nbt(None).position, None);
    }

    #[test]
    fn test_partial_update_replaces_sent_sections() {
        let registry = flattened_registry(ProtocolVersion::V1_16_5);
        let mut stone = vec![0u32; 4096];
        stone[0] = 1;
        let stone = TerrainSection::from_global_ids(&registry, &stone);

        let mut column = ChunkColumn::new(ChunkPosition::new(0, 0), true);
        column.sections.insert(0, TerrainSection::empty());
        column.sections.insert(1, TerrainSection::empty());

        let mut update = ChunkColumn::new(ChunkPosition::new(0, 0), false);
        update.sections.insert(1, stone.clone());
        column.apply(update);
        assert_eq!(column.sections.len(), 2);
        assert_eq!(column.section(1), Some(&stone));
        assert!(column.block_at(0, 16, 0).is_some());
        assert_eq!(column.block_at(0, 0, 0), None);

        column.apply(ChunkColumn::new(ChunkPosition::new(0, 0), true));
        assert!(column.sections.is_empty());
    }

    #[test]
    fn test_registry_mismatch() {
        let decoder = TerrainDecoder::new(
            Arc::new(flattened_registry(ProtocolVersion::V1_16_5)),
            Dimension::default(),
        );
        let mut cursor = InCursor::new(vec![0u8; 16], ProtocolVersion::V1_12_2);
        assert!(matches!(
            decoder.decode_column(&mut cursor),
            Err(TerrainError::RegistryMismatch { .. })
        ));
        assert!(decoder
            .decode_column_payload(Bytes::from_static(&[0; 16]), ProtocolVersion::V1_12_2)
            .is_none());
    }

    #[test]
    fn test_from_config() {
        let config = DecoderConfig {
            ignore_server_light: true,
            dimension_section_count: 24,
            dimension_min_section: -4,
            ..DecoderConfig::default()
        };
        let decoder = TerrainDecoder::from_config(
            Arc::new(flattened_registry(ProtocolVersion::V1_18)),
            &config,
        );
        assert!(decoder.ignore_server_light());
        assert_eq!(decoder.dimension(), Dimension::new(true, -4, 24));
    }
}
