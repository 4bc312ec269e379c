//! 1.8 columns
//!
//! # Packet Format
//! ```text
//! x: i32, z: i32
//! full: bool
//! mask: u16
//! size: VarInt, then data:
//!   4096 u16 LE (id << 4 | metadata)   per present section
//!   2048 block light                   per present section
//!   2048 sky light                     per present section, dimensions with sky only
//!   256 biome bytes                    full columns only
//! ```

use crate::column::{present_sections, read_byte_biomes, read_light, read_sized, ChunkColumn, TerrainDecoder};
use crate::error::Result;
use crate::section::{CellResolver, TerrainSection};
use blockwire_core::{ChunkPosition, SECTION_CELLS};
use blockwire_protocol::InCursor;

pub(crate) fn decode(decoder: &TerrainDecoder, cursor: &mut InCursor) -> Result<ChunkColumn> {
    let position = ChunkPosition::new(cursor.read_i32()?, cursor.read_i32()?);
    let full = cursor.read_bool()?;
    let mask = cursor.read_u16()?;

    let mut column = ChunkColumn::new(position, full);
    if full && mask == 0 {
        column.unload = true;
    }
    read_sized(cursor, |data| read_sections(decoder, data, &mut column, mask))?;
    Ok(column)
}

fn read_sections(decoder: &TerrainDecoder, data: &mut InCursor, column: &mut ChunkColumn, mask: u16) -> Result<()> {
    if column.unload {
        return Ok(());
    }
    let dimension = decoder.dimension();
    let ignore_light = decoder.ignore_server_light();
    let present = present_sections(&[mask as u64], dimension)?;

    let mut resolver = CellResolver::new(decoder.registry());
    let mut sections = Vec::with_capacity(present.len());
    for _ in &present {
        let raw = data.read_u16_le_array(SECTION_CELLS)?;
        let cells = raw.iter().map(|value| resolver.resolve(*value as u32)).collect();
        sections.push(TerrainSection::from_cells(cells));
    }
    for section in &mut sections {
        section.block_light = read_light(data, ignore_light)?;
    }
    if dimension.has_sky_light {
        for section in &mut sections {
            section.sky_light = read_light(data, ignore_light)?;
        }
    }
    if column.full {
        column.biomes = Some(read_byte_biomes(data)?);
    }

    for (index, section) in present.into_iter().zip(sections) {
        column.sections.insert(dimension.section_y(index), section);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::testing::put_var_int;
    use blockwire_blocks::build_legacy_registry;
    use blockwire_core::{cell_index, ProtocolVersion};
    use bytes::{BufMut, Bytes, BytesMut};
    use std::sync::Arc;

    fn decoder() -> TerrainDecoder {
        TerrainDecoder::new(
            Arc::new(build_legacy_registry(ProtocolVersion::V1_8).unwrap()),
            Dimension::default(),
        )
    }

    fn section_data(buf: &mut BytesMut, marker: u16) {
        for cell in 0..SECTION_CELLS {
            buf.put_u16_le(if cell == cell_index(4, 5, 6) { marker } else { 0 });
        }
    }

    fn packet(full: bool, mask: u16, padding: usize) -> Bytes {
        let sections = mask.count_ones() as usize;
        let mut data = BytesMut::new();
        for _ in 0..sections {
            section_data(&mut data, 35 << 4 | 14);
        }
        for _ in 0..sections * 2 {
            data.put_slice(&[0xF0; SECTION_CELLS / 2]);
        }
        if full {
            data.put_slice(&[1; 256]);
        }
        data.put_slice(&vec![0; padding]);

        let mut buf = BytesMut::new();
        buf.put_i32(-1);
        buf.put_i32(7);
        buf.put_u8(full as u8);
        buf.put_u16(mask);
        put_var_int(&mut buf, data.len() as i32);
        buf.put_slice(&data);
        buf.freeze()
    }

    #[test]
    fn test_decode_two_sections() {
        let decoder = decoder();
        let column = decoder
            .decode_column_payload(packet(true, 0b1001, 0), ProtocolVersion::V1_8)
            .unwrap();
        assert_eq!(column.sections.keys().copied().collect::<Vec<_>>(), vec![0, 3]);

        let section = column.section(3).unwrap();
        let wool = section.get(4, 5, 6).unwrap();
        assert_eq!(
            decoder.registry().state(wool).to_string(),
            "minecraft:wool[color=red]"
        );
        assert_eq!(section.block_count(), 1);
        assert_eq!(section.block_light_at(0, 0, 0), 0);
        assert_eq!(section.block_light_at(1, 0, 0), 15);
        assert_eq!(column.biomes, Some(vec![1; 256]));
    }

    #[test]
    fn test_same_payload_same_sections() {
        let decoder = decoder();
        let payload = packet(false, 0b10, 0);
        let first = decoder.decode_column_payload(payload.clone(), ProtocolVersion::V1_8).unwrap();
        let second = decoder.decode_column_payload(payload, ProtocolVersion::V1_8).unwrap();
        assert_eq!(first.sections, second.sections);
    }

    #[test]
    fn test_trailing_padding_skipped() {
        let mut cursor = InCursor::new(packet(false, 1, 9), ProtocolVersion::V1_8);
        decoder().decode_column(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_unload() {
        let column = decoder()
            .decode_column_payload(packet(true, 0, 0), ProtocolVersion::V1_8)
            .unwrap();
        assert!(column.unload);
        assert!(column.biomes.is_none());
    }
}
