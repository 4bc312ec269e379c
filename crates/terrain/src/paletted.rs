//! 1.9+ columns
//!
//! # Packet Format
//! ```text
//! x: i32, z: i32
//! full: bool                          before 1.17
//! ignore old data: bool               1.16 - 1.16.1
//! mask: VarInt                        1.9 - 1.16.5
//!       VarInt count + longs          1.17 - 1.17.1
//! heightmaps: NBT                     1.14+
//! biomes: 1024 i32                    1.15 - 1.16.1, full columns
//!         VarInt count + VarInts      1.16.2 - 1.17.1, full columns
//! size: VarInt, then data:
//!   per present section:
//!     block count: i16                1.14+
//!     block state container
//!     biome container                 1.18+
//!     2048 block light                before 1.14
//!     2048 sky light                  before 1.14, dimensions with sky
//!   biomes: 256 bytes / 256 i32       1.9 - 1.12 / 1.13 - 1.14, full columns
//! block entities: VarInt count        1.9.4+
//!   1.18+: xz u8, y i16, type VarInt, NBT
//!   before: NBT
//! light                               1.18+
//! ```
//! From 1.18 every section of the dimension is present.

use crate::column::{
    present_sections, read_bit_set, read_byte_biomes, read_light, read_sized, set_bits, BlockEntityData, ChunkColumn,
    TerrainDecoder,
};
use crate::error::{Result, TerrainError};
use crate::nibble::{NibbleArray, NIBBLE_ARRAY_BYTES};
use crate::palette::{read_container, ContainerKind};
use crate::section::TerrainSection;
use blockwire_core::{BlockPosition, ChunkPosition, ProtocolVersion as V};
use blockwire_protocol::nbt::read_root;
use blockwire_protocol::InCursor;

pub(crate) fn decode(decoder: &TerrainDecoder, cursor: &mut InCursor) -> Result<ChunkColumn> {
    let version = cursor.version();
    let dimension = decoder.dimension();

    let position = ChunkPosition::new(cursor.read_i32()?, cursor.read_i32()?);
    let full = if version >= V::V1_17 { true } else { cursor.read_bool()? };
    if version >= V::V1_16 && version < V::V1_16_2 {
        let ignore_old_data = cursor.read_bool()?;
        tracing::trace!(ignore_old_data, "column flag");
    }

    let present = if version >= V::V1_18 {
        (0..dimension.section_count as usize).collect()
    } else if version >= V::V1_17 {
        present_sections(&read_bit_set(cursor)?, dimension)?
    } else {
        present_sections(&[cursor.read_var_int()? as u32 as u64], dimension)?
    };

    let mut column = ChunkColumn::new(position, full);
    if version >= V::V1_14 {
        column.heightmaps = read_root(cursor)?;
    }
    if version >= V::V1_15 && version < V::V1_18 && full {
        column.biomes = Some(if version >= V::V1_16_2 {
            cursor.read_var_int_array()?
        } else {
            cursor.read_i32_array(1024)?
        });
    }

    read_sized(cursor, |data| read_data(decoder, data, &present, &mut column))?;

    if version >= V::V1_9_4 {
        column.block_entities = read_block_entities(cursor, position)?;
    }
    if version >= V::V1_18 {
        read_light_data(decoder, cursor, &mut column)?;
    }
    Ok(column)
}

fn read_data(decoder: &TerrainDecoder, data: &mut InCursor, present: &[usize], column: &mut ChunkColumn) -> Result<()> {
    let version = data.version();
    let dimension = decoder.dimension();
    let ignore_light = decoder.ignore_server_light();

    for index in present {
        if version >= V::V1_14 {
            let block_count = data.read_i16()?;
            tracing::trace!(section = index, block_count, "section header");
        }
        let ids = read_container(data, ContainerKind::BlockStates)?;
        let mut section = TerrainSection::from_global_ids(decoder.registry(), &ids);
        if version >= V::V1_18 {
            section.biomes = Some(read_container(data, ContainerKind::Biomes)?.into_boxed_slice());
        }
        if version < V::V1_14 {
            section.block_light = read_light(data, ignore_light)?;
            if dimension.has_sky_light {
                section.sky_light = read_light(data, ignore_light)?;
            }
        }
        column.sections.insert(dimension.section_y(*index), section);
    }

    if column.full && version < V::V1_15 {
        column.biomes = Some(if version >= V::V1_13 {
            data.read_i32_array(256)?
        } else {
            read_byte_biomes(data)?
        });
    }
    Ok(())
}

fn read_block_entities(cursor: &mut InCursor, position: ChunkPosition) -> Result<Vec<BlockEntityData>> {
    let count = cursor.read_length(1)?;
    let mut entities = Vec::with_capacity(count);
    for _ in 0..count {
        if cursor.version() >= V::V1_18 {
            let xz = cursor.read_u8()?;
            let y = cursor.read_i16()?;
            let type_id = cursor.read_var_int()?;
            let nbt = read_root(cursor)?;
            entities.push(BlockEntityData {
                position: Some(BlockPosition::new(
                    (position.x << 4) | (xz >> 4) as i32,
                    y as i32,
                    (position.z << 4) | (xz & 0x0F) as i32,
                )),
                type_id: Some(type_id),
                nbt,
            });
        } else {
            entities.push(BlockEntityData::from_nbt(read_root(cursor)?));
        }
    }
    Ok(entities)
}

/// Light section that follows the column from 1.18.
///
/// Masks cover the dimension's sections plus one below and one above;
/// arrays are sent for set bits in ascending order.
fn read_light_data(decoder: &TerrainDecoder, cursor: &mut InCursor, column: &mut ChunkColumn) -> Result<()> {
    let ignore_light = decoder.ignore_server_light();
    let trust_edges = cursor.read_bool()?;
    let sky_mask = read_bit_set(cursor)?;
    let block_mask = read_bit_set(cursor)?;
    let _empty_sky_mask = read_bit_set(cursor)?;
    let _empty_block_mask = read_bit_set(cursor)?;
    let sky = read_light_arrays(cursor, ignore_light)?;
    let block = read_light_arrays(cursor, ignore_light)?;
    tracing::trace!(trust_edges, sky = sky.len(), block = block.len(), "column light");

    if ignore_light {
        return Ok(());
    }
    let below = decoder.dimension().min_section - 1;
    for (bit, light) in set_bits(&sky_mask).zip(sky) {
        if let Some(section) = column.sections.get_mut(&(below + bit as i32)) {
            section.sky_light = light;
        }
    }
    for (bit, light) in set_bits(&block_mask).zip(block) {
        if let Some(section) = column.sections.get_mut(&(below + bit as i32)) {
            section.block_light = light;
        }
    }
    Ok(())
}

fn read_light_arrays(cursor: &mut InCursor, ignore: bool) -> Result<Vec<Option<NibbleArray>>> {
    let count = cursor.read_length(NIBBLE_ARRAY_BYTES)?;
    let mut arrays = Vec::with_capacity(count);
    for _ in 0..count {
        let length = cursor.read_var_int()?;
        if length as usize != NIBBLE_ARRAY_BYTES {
            return Err(TerrainError::LightLength(length as usize));
        }
        arrays.push(read_light(cursor, ignore)?);
    }
    Ok(arrays)
}
