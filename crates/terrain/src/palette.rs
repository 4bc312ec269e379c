//! Paletted containers (1.9+)
//!
//! # Wire Format
//! ```text
//! bits: u8
//! palette:
//!   bits == 0 (1.18+)      VarInt single value
//!   indirect               VarInt count, count * VarInt global id
//!   direct, before 1.13    VarInt 0 (unused length)
//!   direct                 nothing
//! data: VarInt long count, longs
//! ```

use crate::bits::{unpack, PackedLayout};
use crate::error::{Result, TerrainError};
use blockwire_core::{ProtocolVersion, SECTION_CELLS};
use blockwire_protocol::InCursor;

/// What a container holds; decides palette thresholds and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    BlockStates,
    /// 4x4x4 biome cells, 1.18+
    Biomes,
}

impl ContainerKind {
    pub const fn entries(self) -> usize {
        match self {
            ContainerKind::BlockStates => SECTION_CELLS,
            ContainerKind::Biomes => 64,
        }
    }

    const fn max_indirect_bits(self) -> u8 {
        match self {
            ContainerKind::BlockStates => 8,
            ContainerKind::Biomes => 3,
        }
    }

    const fn min_indirect_bits(self) -> u8 {
        match self {
            ContainerKind::BlockStates => 4,
            ContainerKind::Biomes => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// Every entry holds the same global id
    Single(u32),
    /// Entries index into a local list of global ids
    Indirect(Vec<u32>),
    /// Entries are global ids
    Direct,
}

impl Palette {
    /// Read the palette that follows a `bits` byte.
    ///
    /// Returns the palette and the bits per entry of the data array.
    pub fn read(cursor: &mut InCursor, bits: u8, kind: ContainerKind) -> Result<(Self, u8)> {
        if bits == 0 && cursor.version() >= ProtocolVersion::V1_18 {
            return Ok((Palette::Single(cursor.read_var_int()? as u32), 0));
        }

        if bits <= kind.max_indirect_bits() {
            let count = cursor.read_length(1)?;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                entries.push(cursor.read_var_int()? as u32);
            }
            return Ok((Palette::Indirect(entries), bits.max(kind.min_indirect_bits())));
        }

        if cursor.version() < ProtocolVersion::V1_13 {
            let unused = cursor.read_var_int()?;
            if unused != 0 {
                tracing::trace!(unused, "direct palette with a non-zero length");
            }
        }
        Ok((Palette::Direct, bits))
    }

    /// Map a packed entry to its global id
    #[inline]
    pub fn global_id(&self, entry: u32) -> Result<u32> {
        match self {
            Palette::Single(id) => Ok(*id),
            Palette::Indirect(entries) => {
                entries
                    .get(entry as usize)
                    .copied()
                    .ok_or(TerrainError::PaletteIndex {
                        index: entry,
                        len: entries.len(),
                    })
            }
            Palette::Direct => Ok(entry),
        }
    }
}

/// Read one container and return the global id of every entry
pub fn read_container(cursor: &mut InCursor, kind: ContainerKind) -> Result<Vec<u32>> {
    let wire_bits = cursor.read_u8()?;
    let (palette, bits) = Palette::read(cursor, wire_bits, kind)?;

    let count = cursor.read_length(8)?;
    let longs = cursor.read_u64_array(count)?;

    if let Palette::Single(id) = palette {
        if !longs.is_empty() {
            tracing::trace!(longs = longs.len(), "single value container with data");
        }
        return Ok(vec![id; kind.entries()]);
    }

    let layout = PackedLayout::for_version(cursor.version());
    unpack(&longs, bits, kind.entries(), layout)?
        .into_iter()
        .map(|entry| palette.global_id(entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    fn put_var_int(buf: &mut BytesMut, value: i32) {
        let mut value = value as u32;
        loop {
            if value & !0x7F == 0 {
                buf.put_u8(value as u8);
                return;
            }
            buf.put_u8((value & 0x7F) as u8 | 0x80);
            value >>= 7;
        }
    }

    #[test]
    fn test_indirect_minimum_bits() {
        let mut buf = BytesMut::new();
        put_var_int(&mut buf, 2);
        put_var_int(&mut buf, 0);
        put_var_int(&mut buf, 300);
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_12_2);
        let (palette, bits) = Palette::read(&mut cursor, 1, ContainerKind::BlockStates).unwrap();
        assert_eq!(palette, Palette::Indirect(vec![0, 300]));
        assert_eq!(bits, 4);
        assert_eq!(palette.global_id(1).unwrap(), 300);
        assert!(matches!(
            palette.global_id(2),
            Err(TerrainError::PaletteIndex { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_direct_length_before_1_13() {
        let mut cursor = InCursor::new(vec![0x00], ProtocolVersion::V1_12_2);
        let (palette, bits) = Palette::read(&mut cursor, 13, ContainerKind::BlockStates).unwrap();
        assert_eq!(palette, Palette::Direct);
        assert_eq!(bits, 13);
        assert_eq!(cursor.remaining(), 0);

        let mut cursor = InCursor::new(vec![0x00], ProtocolVersion::V1_13_2);
        Palette::read(&mut cursor, 14, ContainerKind::BlockStates).unwrap();
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_biome_thresholds() {
        let mut buf = BytesMut::new();
        put_var_int(&mut buf, 1);
        put_var_int(&mut buf, 39);
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_18);
        let (_, bits) = Palette::read(&mut cursor, 2, ContainerKind::Biomes).unwrap();
        assert_eq!(bits, 2);

        let mut cursor = InCursor::new(Vec::<u8>::new(), ProtocolVersion::V1_18);
        let (palette, _) = Palette::read(&mut cursor, 6, ContainerKind::Biomes).unwrap();
        assert_eq!(palette, Palette::Direct);
    }

    #[test]
    fn test_single_value_container() {
        let mut buf = BytesMut::new();
        buf.put_u8(0);
        put_var_int(&mut buf, 21);
        put_var_int(&mut buf, 0);
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_18_2);
        let ids = read_container(&mut cursor, ContainerKind::Biomes).unwrap();
        assert_eq!(ids, vec![21; 64]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_indirect_container() {
        let mut buf = BytesMut::new();
        buf.put_u8(4);
        put_var_int(&mut buf, 2);
        put_var_int(&mut buf, 0);
        put_var_int(&mut buf, 9);
        put_var_int(&mut buf, 256);
        buf.put_u64(0x10);
        for _ in 1..256 {
            buf.put_u64(0);
        }
        let mut cursor = InCursor::new(buf.freeze(), ProtocolVersion::V1_16_5);
        let ids = read_container(&mut cursor, ContainerKind::BlockStates).unwrap();
        assert_eq!(ids[0], 0);
        assert_eq!(ids[1], 9);
        assert_eq!(ids.iter().filter(|id| **id == 9).count(), 1);
    }
}
