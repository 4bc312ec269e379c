//! Bit-packed entry arrays
//!
//! # Layouts
//! ```text
//! Spanning (1.9 - 1.15):  entry i starts at bit i * bits and may continue
//!                         into the next long
//! Padded (1.16+):         64 / bits entries per long, high bits unused
//! ```
//! Entries fill each long from the least significant bit.

use crate::error::{Result, TerrainError};
use blockwire_core::ProtocolVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedLayout {
    Spanning,
    Padded,
}

impl PackedLayout {
    pub fn for_version(version: ProtocolVersion) -> Self {
        if version >= ProtocolVersion::V1_16 {
            PackedLayout::Padded
        } else {
            PackedLayout::Spanning
        }
    }

    /// Longs needed to hold `entries` values of `bits` each
    pub fn longs_needed(self, bits: u8, entries: usize) -> usize {
        let bits = bits as usize;
        match self {
            PackedLayout::Spanning => (entries * bits + 63) / 64,
            PackedLayout::Padded => {
                let per_long = 64 / bits;
                (entries + per_long - 1) / per_long
            }
        }
    }
}

/// Unpack `entries` values of `bits` each
pub fn unpack(longs: &[u64], bits: u8, entries: usize, layout: PackedLayout) -> Result<Vec<u32>> {
    if bits == 0 || bits > 32 {
        return Err(TerrainError::InvalidBits(bits));
    }
    let needed = layout.longs_needed(bits, entries);
    if longs.len() < needed {
        return Err(TerrainError::ShortPackedArray {
            expected: needed,
            actual: longs.len(),
        });
    }
    if longs.len() > needed {
        tracing::trace!(needed, sent = longs.len(), "ignoring extra packed longs");
    }

    let mask = (1u64 << bits) - 1;
    let bits = bits as usize;
    let mut values = Vec::with_capacity(entries);

    match layout {
        PackedLayout::Spanning => {
            for i in 0..entries {
                let bit = i * bits;
                let index = bit / 64;
                let offset = bit % 64;
                let mut value = longs[index] >> offset;
                if offset + bits > 64 {
                    value |= longs[index + 1] << (64 - offset);
                }
                values.push((value & mask) as u32);
            }
        }
        PackedLayout::Padded => {
            let per_long = 64 / bits;
            for i in 0..entries {
                let offset = (i % per_long) * bits;
                values.push(((longs[i / per_long] >> offset) & mask) as u32);
            }
        }
    }

    Ok(values)
}
