//! Position-addressable reader over a fully buffered message payload
//!
//! All multi-byte primitives are big endian unless the method name says
//! otherwise. Every read checks the remaining length first and fails with
//! [`WireError::EndOfBuffer`]; such errors are fatal for the current
//! message only.

use blockwire_core::{BlockPosition, ProtocolVersion, Result, WireError};
use bytes::{Buf, Bytes};

/// Longest string the protocol allows, in characters
pub const DEFAULT_MAX_STRING_LENGTH: usize = 32767;
/// Upper bound on any VarInt-declared element count
pub const DEFAULT_MAX_ARRAY_LENGTH: usize = 1 << 20;

/// Reader over one message payload
#[derive(Debug, Clone)]
pub struct InCursor {
    data: Bytes,
    position: usize,
    version: ProtocolVersion,
    max_string_length: usize,
    max_array_length: usize,
}

impl InCursor {
    pub fn new(data: impl Into<Bytes>, version: ProtocolVersion) -> Self {
        Self {
            data: data.into(),
            position: 0,
            version,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            max_array_length: DEFAULT_MAX_ARRAY_LENGTH,
        }
    }

    /// Cap protocol strings below the default
    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    /// Cap VarInt-declared lengths below the default
    pub fn with_max_array_length(mut self, max: usize) -> Self {
        self.max_array_length = max;
        self
    }

    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    #[inline]
    pub fn max_string_length(&self) -> usize {
        self.max_string_length
    }

    #[inline]
    pub fn max_array_length(&self) -> usize {
        self.max_array_length
    }

    /// Cursor over `data` (an inflated inner payload) with the same
    /// version and limits as this one
    pub fn nested(&self, data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
            version: self.version,
            max_string_length: self.max_string_length,
            max_array_length: self.max_array_length,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move to an absolute position.
    ///
    /// Used to resynchronise after a length-prefixed block: decoders
    /// checkpoint, read, then seek to `checkpoint + declared length`.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(WireError::Malformed(format!(
                "Cannot seek to {} in a payload of {} bytes",
                position,
                self.data.len()
            )));
        }
        self.position = position;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(WireError::EndOfBuffer {
                position: self.position,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.ensure(n)?;
        let start = self.position;
        self.position += n;
        Ok(&self.data[start..start + n])
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.position += n;
        Ok(())
    }

    // ===== Primitives =====

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Any non-zero byte reads as `true`
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = self.take(2)?;
        Ok(buf.get_u16())
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        let mut buf = self.take(2)?;
        Ok(buf.get_i16())
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let mut buf = self.take(4)?;
        Ok(buf.get_i32())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = self.take(4)?;
        Ok(buf.get_u32())
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        let mut buf = self.take(8)?;
        Ok(buf.get_i64())
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = self.take(8)?;
        Ok(buf.get_u64())
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let mut buf = self.take(4)?;
        Ok(buf.get_f32())
    }

    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        let mut buf = self.take(8)?;
        Ok(buf.get_f64())
    }

    // ===== Variable-length integers =====

    /// Read a VarInt
    ///
    /// # Format
    /// - 7 data bits per byte, least significant group first
    /// - High bit set means another byte follows
    /// - At most 5 bytes
    pub fn read_var_int(&mut self) -> Result<i32> {
        let mut value: u32 = 0;
        for i in 0..5 {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7F) as u32) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }
        Err(WireError::Malformed("VarInt is too big".into()))
    }

    /// Read a VarLong (same scheme as VarInt, at most 10 bytes)
    pub fn read_var_long(&mut self) -> Result<i64> {
        let mut value: u64 = 0;
        for i in 0..10 {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7F) as u64) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value as i64);
            }
        }
        Err(WireError::Malformed("VarLong is too big".into()))
    }

    /// Read a VarInt element count and check it against the remaining
    /// payload, given the smallest possible encoded size of one element.
    pub fn read_length(&mut self, min_element_size: usize) -> Result<usize> {
        let length = self.read_var_int()?;
        self.check_length(length as i64, min_element_size)
    }

    pub fn check_length(&self, length: i64, min_element_size: usize) -> Result<usize> {
        if length < 0 {
            return Err(WireError::Malformed(format!("Negative length {}", length)));
        }
        let length = length as usize;
        if length > self.max_array_length {
            return Err(WireError::Malformed(format!(
                "Length {} exceeds limit {}",
                length, self.max_array_length
            )));
        }
        self.ensure(length.saturating_mul(min_element_size))?;
        Ok(length)
    }

    // ===== Aggregates =====

    /// Read `n` raw bytes without copying
    pub fn read_fixed_array(&mut self, n: usize) -> Result<Bytes> {
        self.ensure(n)?;
        let slice = self.data.slice(self.position..self.position + n);
        self.position += n;
        Ok(slice)
    }

    /// Read a VarInt length followed by that many bytes
    pub fn read_length_prefixed(&mut self) -> Result<Bytes> {
        let length = self.read_length(1)?;
        self.read_fixed_array(length)
    }

    /// Everything from the current position to the end
    pub fn read_remaining(&mut self) -> Bytes {
        let slice = self.data.slice(self.position..);
        self.position = self.data.len();
        slice
    }

    /// Read a VarInt-prefixed UTF-8 string of at most `max_chars` characters
    pub fn read_string(&mut self, max_chars: usize) -> Result<String> {
        let length = self.read_var_int()?;
        if length < 0 || length as usize > max_chars.saturating_mul(4) {
            return Err(WireError::Malformed(format!(
                "String length {} out of range (max {} chars)",
                length, max_chars
            )));
        }
        let bytes = self.take(length as usize)?;
        let value = std::str::from_utf8(bytes)
            .map_err(|e| WireError::Malformed(format!("Invalid UTF-8 in string: {}", e)))?
            .to_owned();
        if value.chars().count() > max_chars {
            return Err(WireError::Malformed(format!(
                "String longer than {} chars",
                max_chars
            )));
        }
        Ok(value)
    }

    /// Two big endian longs, most significant first
    pub fn read_uuid(&mut self) -> Result<u128> {
        let most = self.read_u64()? as u128;
        let least = self.read_u64()? as u128;
        Ok((most << 64) | least)
    }

    pub fn read_u64_array(&mut self, n: usize) -> Result<Vec<u64>> {
        self.ensure(n.saturating_mul(8))?;
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(self.read_u64()?);
        }
        Ok(values)
    }

    pub fn read_i32_array(&mut self, n: usize) -> Result<Vec<i32>> {
        self.ensure(n.saturating_mul(4))?;
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(self.read_i32()?);
        }
        Ok(values)
    }

    /// `n` little endian u16 values
    pub fn read_u16_le_array(&mut self, n: usize) -> Result<Vec<u16>> {
        let mut buf = self.take(n.saturating_mul(2))?;
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(buf.get_u16_le());
        }
        Ok(values)
    }

    /// VarInt count followed by that many VarInts
    pub fn read_var_int_array(&mut self) -> Result<Vec<i32>> {
        let length = self.read_length(1)?;
        let mut values = Vec::with_capacity(length);
        for _ in 0..length {
            values.push(self.read_var_int()?);
        }
        Ok(values)
    }

    // ===== Version-dependent encodings =====

    /// Packed block position; the bit layout changed in 1.14
    pub fn read_block_position(&mut self) -> Result<BlockPosition> {
        let value = self.read_i64()?;
        if self.version >= ProtocolVersion::V1_14 {
            Ok(BlockPosition::from_packed_xzy(value))
        } else {
            Ok(BlockPosition::from_packed_xyz(value))
        }
    }

    /// Unpacked position as three ints, used by 1.7
    pub fn read_int_block_position(&mut self) -> Result<BlockPosition> {
        let x = self.read_i32()?;
        let y = self.read_i32()?;
        let z = self.read_i32()?;
        Ok(BlockPosition::new(x, y, z))
    }

    /// Entity ids are plain ints before 1.8 and VarInts after
    pub fn read_entity_id(&mut self) -> Result<i32> {
        if self.version < ProtocolVersion::V1_8 {
            self.read_i32()
        } else {
            self.read_var_int()
        }
    }
}
