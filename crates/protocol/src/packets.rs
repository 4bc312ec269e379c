//! Message-level decoding
//!
//! Every decoder in the workspace reports problems through
//! [`blockwire_core::WireError`]. The functions here are the boundary
//! where those errors turn into "drop this message": they never escape to
//! the connection loop.

use crate::cursor::InCursor;
use crate::metadata::{read_attribute_set, AttributeSet};
use blockwire_core::{ProtocolVersion, Result};
use bytes::Bytes;

/// Decode one message payload, dropping it on any recoverable error.
///
/// Unrecoverable errors (definition or IO problems surfacing mid-decode)
/// are logged at error level and also dropped; the caller decides whether
/// the connection can go on from its own state.
pub fn decode_or_drop<T, F>(what: &'static str, payload: Bytes, version: ProtocolVersion, decode: F) -> Option<T>
where
    F: FnOnce(&mut InCursor) -> Result<T>,
{
    decode_cursor_or_drop(what, InCursor::new(payload, version), decode)
}

/// Like [`decode_or_drop`], over a cursor the caller configured
pub fn decode_cursor_or_drop<T, F>(what: &'static str, mut cursor: InCursor, decode: F) -> Option<T>
where
    F: FnOnce(&mut InCursor) -> Result<T>,
{
    let version = cursor.version();
    match decode(&mut cursor) {
        Ok(value) => {
            if cursor.remaining() > 0 {
                tracing::debug!(
                    packet = what,
                    remaining = cursor.remaining(),
                    "trailing bytes after decode"
                );
            }
            Some(value)
        }
        Err(err) if err.is_recoverable() => {
            tracing::warn!(
                packet = what,
                %version,
                position = cursor.position(),
                error = %err,
                "dropping malformed message"
            );
            None
        }
        Err(err) => {
            tracing::error!(packet = what, %version, error = %err, "dropping message");
            None
        }
    }
}

/// Entity metadata update
///
/// # Packet Format
/// ```text
/// {entity id: i32 before 1.8, VarInt after}{metadata list}
/// ```
///
/// # Fields
/// - `entity_id`: Target entity
/// - `update`: Only the slots the server chose to send
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadataPacket {
    pub entity_id: i32,
    pub update: AttributeSet,
}

impl EntityMetadataPacket {
    pub fn decode(cursor: &mut InCursor) -> Result<Self> {
        let entity_id = cursor.read_entity_id()?;
        let update = read_attribute_set(cursor)?;
        Ok(Self { entity_id, update })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AttributeValue;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn test_entity_metadata_packet() {
        let mut buf = BytesMut::new();
        buf.put_u8(42);
        buf.put_u8(16);
        buf.put_u8(0);
        buf.put_i8(1);
        buf.put_u8(0xFF);
        let packet = decode_or_drop("entity metadata", buf.freeze(), ProtocolVersion::V1_9_4, |c| {
            EntityMetadataPacket::decode(c)
        })
        .unwrap();
        assert_eq!(packet.entity_id, 42);
        assert_eq!(packet.update.get(16), Some(&AttributeValue::Byte(1)));
    }

    #[test]
    fn test_truncated_packet_is_dropped() {
        let payload = Bytes::from_static(&[42, 16, 2]);
        let result = decode_or_drop("entity metadata", payload, ProtocolVersion::V1_9_4, |c| {
            EntityMetadataPacket::decode(c)
        });
        assert_eq!(result, None);
    }

    #[test]
    fn test_legacy_entity_id_is_int() {
        let mut buf = BytesMut::new();
        buf.put_i32(1000);
        buf.put_u8(0x00);
        buf.put_i8(0);
        buf.put_u8(0x7F);
        let packet = decode_or_drop("entity metadata", buf.freeze(), ProtocolVersion::V1_7_10, |c| {
            EntityMetadataPacket::decode(c)
        })
        .unwrap();
        assert_eq!(packet.entity_id, 1000);
        assert_eq!(packet.update.len(), 1);
    }
}
