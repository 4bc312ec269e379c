//! Payload builders shared by the terrain tests

use blockwire_blocks::{BlockRegistry, BlockState, IdEncoding, DEFAULT_NAMESPACE};
use blockwire_core::ProtocolVersion;
use bytes::{BufMut, BytesMut};

pub const AIR: u32 = 0;
pub const STONE: u32 = 1;
pub const DIRT: u32 = 10;

pub fn put_var_int(buf: &mut BytesMut, value: i32) {
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

/// Empty unnamed compound
pub fn put_empty_compound(buf: &mut BytesMut) {
    buf.put_u8(10);
    buf.put_u16(0);
    buf.put_u8(0);
}

/// Small flattened table: air, stone and dirt
pub fn flattened_registry(version: ProtocolVersion) -> BlockRegistry {
    let mut registry = BlockRegistry::new(version, IdEncoding::Flattened);
    for (id, name) in [(AIR, "air"), (STONE, "stone"), (DIRT, "dirt")] {
        registry
            .insert(id, BlockState::new(DEFAULT_NAMESPACE, name))
            .unwrap();
    }
    registry
}
