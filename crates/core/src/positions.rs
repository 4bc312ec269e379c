//! Position types for blocks, chunks and section cells

use serde::{Deserialize, Serialize};

/// Number of cells along one edge of a section
pub const SECTION_WIDTH: usize = 16;
/// Number of cells in one section (16 * 16 * 16)
pub const SECTION_CELLS: usize = SECTION_WIDTH * SECTION_WIDTH * SECTION_WIDTH;

/// Absolute block position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Unpack the pre-1.14 long layout: `x:26 | y:12 | z:26`
    pub const fn from_packed_xyz(value: i64) -> Self {
        Self {
            x: (value >> 38) as i32,
            y: ((value << 26) >> 52) as i32,
            z: ((value << 38) >> 38) as i32,
        }
    }

    /// Unpack the 1.14+ long layout: `x:26 | z:26 | y:12`
    pub const fn from_packed_xzy(value: i64) -> Self {
        Self {
            x: (value >> 38) as i32,
            y: ((value << 52) >> 52) as i32,
            z: ((value << 26) >> 38) as i32,
        }
    }

    pub const fn chunk(self) -> ChunkPosition {
        ChunkPosition {
            x: self.x >> 4,
            z: self.z >> 4,
        }
    }
}

/// Column position (block position divided by 16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Cell index inside a section, `y << 8 | z << 4 | x`
#[inline]
pub const fn cell_index(x: usize, y: usize, z: usize) -> usize {
    (y << 8) | (z << 4) | x
}

/// Inverse of [`cell_index`], returns `(x, y, z)`
#[inline]
pub const fn cell_coordinates(index: usize) -> (usize, usize, usize) {
    (index & 0x0F, (index >> 8) & 0x0F, (index >> 4) & 0x0F)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_xyz(x: i64, y: i64, z: i64) -> i64 {
        ((x & 0x3FF_FFFF) << 38) | ((y & 0xFFF) << 26) | (z & 0x3FF_FFFF)
    }

    fn pack_xzy(x: i64, y: i64, z: i64) -> i64 {
        ((x & 0x3FF_FFFF) << 38) | ((z & 0x3FF_FFFF) << 12) | (y & 0xFFF)
    }

    #[test]
    fn test_packed_legacy_layout() {
        let pos = BlockPosition::from_packed_xyz(pack_xyz(-123, 64, 4567));
        assert_eq!(pos, BlockPosition::new(-123, 64, 4567));
    }

    #[test]
    fn test_packed_modern_layout_negative_y() {
        let pos = BlockPosition::from_packed_xzy(pack_xzy(30_000, -60, -1));
        assert_eq!(pos, BlockPosition::new(30_000, -60, -1));
    }

    #[test]
    fn test_chunk_of_negative_block() {
        let pos = BlockPosition::new(-1, 0, 17);
        assert_eq!(pos.chunk(), ChunkPosition::new(-1, 1));
    }

    #[test]
    fn test_cell_index_roundtrip() {
        let index = cell_index(3, 15, 9);
        assert_eq!(index, (15 << 8) | (9 << 4) | 3);
        assert_eq!(cell_coordinates(index), (3, 15, 9));
        assert_eq!(cell_index(15, 15, 15), SECTION_CELLS - 1);
    }
}
