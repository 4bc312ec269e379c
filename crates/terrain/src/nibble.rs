//! Half-byte arrays for light and legacy metadata

use crate::error::Result;
use blockwire_core::SECTION_CELLS;
use blockwire_protocol::InCursor;

/// Bytes in one section-sized nibble array
pub const NIBBLE_ARRAY_BYTES: usize = SECTION_CELLS / 2;

/// 4096 four-bit values, two per byte.
///
/// Even cell indices live in the low nibble, odd ones in the high nibble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NibbleArray {
    data: Box<[u8]>,
}

impl NibbleArray {
    pub fn new() -> Self {
        Self::filled(0)
    }

    pub fn filled(value: u8) -> Self {
        let value = value & 0x0F;
        Self {
            data: vec![value | value << 4; NIBBLE_ARRAY_BYTES].into_boxed_slice(),
        }
    }

    /// Read one array from the cursor
    pub fn read(cursor: &mut InCursor) -> Result<Self> {
        let bytes = cursor.read_fixed_array(NIBBLE_ARRAY_BYTES)?;
        Ok(Self {
            data: bytes.to_vec().into_boxed_slice(),
        })
    }

    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        let byte = self.data[index >> 1];
        if index & 1 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: u8) {
        let byte = &mut self.data[index >> 1];
        if index & 1 == 0 {
            *byte = (*byte & 0xF0) | (value & 0x0F);
        } else {
            *byte = (*byte & 0x0F) | (value << 4);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for NibbleArray {
    fn default() -> Self {
        Self::new()
    }
}
