//! Named binary tag payloads embedded in messages
//!
//! Item stacks, heightmaps, block entities and player shoulders carry a
//! named root compound. 1.7 item slots wrap theirs in a gzip stream with
//! an i16 length prefix.
//!
//! Tag decoding, including the modified UTF-8 used for names and strings,
//! is done by `quartz_nbt`; this module only positions the cursor around it.

use crate::compression::{decompress, PayloadCompression};
use crate::cursor::InCursor;
use blockwire_core::{Result, WireError};
use quartz_nbt::io::{read_nbt, Flavor};
use std::io::Cursor;

pub use quartz_nbt::{NbtCompound, NbtList, NbtTag};

const TAG_END: u8 = 0;
const MAX_INFLATED_NBT: usize = 2 * 1024 * 1024;

/// Typed lookups on a compound, `None` when the key is missing or the tag
/// has another type
pub trait CompoundExt {
    fn tag(&self, key: &str) -> Option<&NbtTag>;

    /// Byte, short and int tags widened to i32
    fn int(&self, key: &str) -> Option<i32> {
        match self.tag(key)? {
            NbtTag::Byte(value) => Some(*value as i32),
            NbtTag::Short(value) => Some(*value as i32),
            NbtTag::Int(value) => Some(*value),
            _ => None,
        }
    }

    fn long_array(&self, key: &str) -> Option<&[i64]> {
        match self.tag(key)? {
            NbtTag::LongArray(values) => Some(values),
            _ => None,
        }
    }

    fn string(&self, key: &str) -> Option<&str> {
        match self.tag(key)? {
            NbtTag::String(value) => Some(value),
            _ => None,
        }
    }
}

impl CompoundExt for NbtCompound {
    fn tag(&self, key: &str) -> Option<&NbtTag> {
        self.inner().get(key)
    }
}

/// Read a named root compound; `None` when the type byte is 0
pub fn read_root(cursor: &mut InCursor) -> Result<Option<NbtCompound>> {
    let start = cursor.position();
    if cursor.read_u8()? == TAG_END {
        return Ok(None);
    }
    cursor.set_position(start)?;

    let rest = cursor.read_remaining();
    let mut reader = Cursor::new(&rest[..]);
    let (root, _name) = read_nbt(&mut reader, Flavor::Uncompressed)
        .map_err(|e| WireError::Malformed(format!("NBT at {}: {}", start, e)))?;
    cursor.set_position(start + reader.position() as usize)?;
    Ok(Some(root))
}

/// 1.7 item NBT: i16 length (-1 = none) followed by a gzip stream
pub fn read_compressed_root(cursor: &mut InCursor) -> Result<Option<NbtCompound>> {
    let length = cursor.read_i16()?;
    if length < 0 {
        return Ok(None);
    }
    let compressed = cursor.read_fixed_array(length as usize)?;
    let inflated = decompress(&compressed, PayloadCompression::Gzip, MAX_INFLATED_NBT)?;
    let mut inner = cursor.nested(inflated);
    read_root(&mut inner)
}
