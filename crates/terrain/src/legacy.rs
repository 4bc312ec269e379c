//! 1.7 columns
//!
//! # Packet Format
//! ```text
//! x: i32, z: i32
//! full: bool
//! primary mask: u16    (sections with block data)
//! add mask: u16        (sections with an extra id nibble)
//! compressed size: i32
//! zlib data
//! ```
//!
//! # Inflated Data
//! Arrays are grouped by kind, each kind listing the sections in mask
//! order:
//! ```text
//! 4096 id bytes            per present section
//! 2048 metadata nibbles    per present section
//! 2048 block light         per present section
//! 2048 sky light           per present section, dimensions with sky only
//! 2048 add nibbles         per add section
//! 256 biome bytes          full columns only
//! ```
//! A block is `(id | add << 8, metadata)`.

use crate::column::{present_sections, read_byte_biomes, read_light, ChunkColumn, TerrainDecoder};
use crate::error::Result;
use crate::nibble::NibbleArray;
use crate::section::{CellResolver, TerrainSection};
use blockwire_core::{ChunkPosition, SECTION_CELLS};
use blockwire_protocol::compression::{decompress, PayloadCompression};
use blockwire_protocol::InCursor;
use std::collections::HashMap;

/// Largest inflated column: 16 full sections plus biomes
pub const MAX_INFLATED_COLUMN: usize = 16 * (SECTION_CELLS + 4 * SECTION_CELLS / 2) + 256;

pub(crate) fn decode(decoder: &TerrainDecoder, cursor: &mut InCursor) -> Result<ChunkColumn> {
    let position = ChunkPosition::new(cursor.read_i32()?, cursor.read_i32()?);
    let full = cursor.read_bool()?;
    let primary_mask = cursor.read_u16()?;
    let add_mask = cursor.read_u16()?;
    let compressed_size = cursor.read_i32()?;
    let compressed_size = cursor.check_length(compressed_size as i64, 1)?;
    let compressed = cursor.read_fixed_array(compressed_size)?;

    let mut column = ChunkColumn::new(position, full);
    if full && primary_mask == 0 {
        column.unload = true;
        return Ok(column);
    }

    let inflated = decompress(&compressed, PayloadCompression::Zlib, MAX_INFLATED_COLUMN)?;
    let mut data = cursor.nested(inflated);
    read_sections(decoder, &mut data, &mut column, primary_mask, add_mask)?;
    if data.remaining() > 0 {
        tracing::debug!(remaining = data.remaining(), "trailing bytes in inflated column");
    }
    Ok(column)
}

fn read_sections(
    decoder: &TerrainDecoder,
    data: &mut InCursor,
    column: &mut ChunkColumn,
    primary_mask: u16,
    add_mask: u16,
) -> Result<()> {
    let dimension = decoder.dimension();
    let ignore_light = decoder.ignore_server_light();
    let present = present_sections(&[primary_mask as u64], dimension)?;

    let mut ids = Vec::with_capacity(present.len());
    for _ in &present {
        ids.push(data.read_fixed_array(SECTION_CELLS)?);
    }
    let mut metadata = Vec::with_capacity(present.len());
    for _ in &present {
        metadata.push(NibbleArray::read(data)?);
    }
    let mut block_light = Vec::with_capacity(present.len());
    for _ in &present {
        block_light.push(read_light(data, ignore_light)?);
    }
    let mut sky_light = Vec::with_capacity(present.len());
    for _ in &present {
        if dimension.has_sky_light {
            sky_light.push(read_light(data, ignore_light)?);
        } else {
            sky_light.push(None);
        }
    }
    let mut add = HashMap::new();
    for index in present_sections(&[add_mask as u64], dimension)? {
        add.insert(index, NibbleArray::read(data)?);
    }
    if column.full {
        column.biomes = Some(read_byte_biomes(data)?);
    }

    let mut resolver = CellResolver::new(decoder.registry());
    let sections = present.iter().zip(ids).zip(metadata).zip(block_light).zip(sky_light);
    for ((((index, ids), metadata), block_light), sky_light) in sections {
        let add = add.get(index);
        let cells = (0..SECTION_CELLS)
            .map(|cell| {
                let id = ids[cell] as u32 | add.map_or(0, |add| add.get(cell) as u32) << 8;
                resolver.resolve(id << 4 | metadata.get(cell) as u32)
            })
            .collect();
        let mut section = TerrainSection::from_cells(cells);
        section.block_light = block_light;
        section.sky_light = sky_light;
        column.sections.insert(dimension.section_y(*index), section);
    }
    Ok(())
}
