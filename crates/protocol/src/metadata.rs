//! Entity metadata wire stream
//!
//! Entity metadata is a self-describing list of `(key, type, value)`
//! triples. The stream framing and the numeric type ids both changed over
//! time:
//!
//! | Versions | Entry header | Terminator |
//! |---|---|---|
//! | before 1.9 | one byte, `type << 5 \| key` | `0x7F` |
//! | 1.9 and later | key byte, VarInt type | `0xFF` |
//!
//! Type ids are resolved through per-type [`VersionedMapping`] tables.

use crate::cursor::InCursor;
use crate::items::{read_item_slot, read_particle, ItemSlot, ParticleData};
use crate::nbt::{self, NbtCompound};
use blockwire_core::{
    BlockPosition, Direction, Pose, ProtocolVersion, Result, Rotations, VersionedMapping,
    WireError,
};
use std::collections::HashMap;

/// Abstract value types of the metadata stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Byte,
    Short,
    Int,
    VarInt,
    Float,
    String,
    Chat,
    OptChat,
    Slot,
    Boolean,
    Vector,
    Rotation,
    Position,
    OptPosition,
    Direction,
    OptUuid,
    OptBlockState,
    Nbt,
    Particle,
    VillagerData,
    OptVarInt,
    Pose,
}

use blockwire_core::ProtocolVersion as V;

static BYTE_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_7_2, Some(0))]);
static SHORT_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(1)), (V::V1_9, None)]);
static INT_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(2)), (V::V1_9, None)]);
static VAR_INT_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(1))]);
static FLOAT_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(3)), (V::V1_9, Some(2))]);
static STRING_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(4)), (V::V1_9, Some(3))]);
static CHAT_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(4))]);
static OPT_CHAT_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_13, Some(5))]);
static SLOT_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(5)), (V::V1_13, Some(6))]);
static BOOLEAN_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(6)), (V::V1_13, Some(7))]);
static VECTOR_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_7_2, Some(6)), (V::V1_9, None)]);
static ROTATION_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_8, Some(7)), (V::V1_13, Some(8))]);
static POSITION_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(8)), (V::V1_13, Some(9))]);
static OPT_POSITION_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(9)), (V::V1_13, Some(10))]);
static DIRECTION_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(10)), (V::V1_13, Some(11))]);
static OPT_UUID_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(11)), (V::V1_13, Some(12))]);
static OPT_BLOCK_STATE_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(12)), (V::V1_13, Some(13))]);
static NBT_ID: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_12, Some(13)), (V::V1_13, Some(14))]);
static PARTICLE_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_13, Some(15))]);
static VILLAGER_DATA_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_14, Some(16))]);
static OPT_VAR_INT_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_14, Some(17))]);
static POSE_ID: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_14, Some(18))]);

impl AttributeType {
    pub const ALL: [AttributeType; 22] = [
        AttributeType::Byte,
        AttributeType::Short,
        AttributeType::Int,
        AttributeType::VarInt,
        AttributeType::Float,
        AttributeType::String,
        AttributeType::Chat,
        AttributeType::OptChat,
        AttributeType::Slot,
        AttributeType::Boolean,
        AttributeType::Vector,
        AttributeType::Rotation,
        AttributeType::Position,
        AttributeType::OptPosition,
        AttributeType::Direction,
        AttributeType::OptUuid,
        AttributeType::OptBlockState,
        AttributeType::Nbt,
        AttributeType::Particle,
        AttributeType::VillagerData,
        AttributeType::OptVarInt,
        AttributeType::Pose,
    ];

    pub fn wire_ids(self) -> &'static VersionedMapping<u8> {
        match self {
            AttributeType::Byte => &BYTE_ID,
            AttributeType::Short => &SHORT_ID,
            AttributeType::Int => &INT_ID,
            AttributeType::VarInt => &VAR_INT_ID,
            AttributeType::Float => &FLOAT_ID,
            AttributeType::String => &STRING_ID,
            AttributeType::Chat => &CHAT_ID,
            AttributeType::OptChat => &OPT_CHAT_ID,
            AttributeType::Slot => &SLOT_ID,
            AttributeType::Boolean => &BOOLEAN_ID,
            AttributeType::Vector => &VECTOR_ID,
            AttributeType::Rotation => &ROTATION_ID,
            AttributeType::Position => &POSITION_ID,
            AttributeType::OptPosition => &OPT_POSITION_ID,
            AttributeType::Direction => &DIRECTION_ID,
            AttributeType::OptUuid => &OPT_UUID_ID,
            AttributeType::OptBlockState => &OPT_BLOCK_STATE_ID,
            AttributeType::Nbt => &NBT_ID,
            AttributeType::Particle => &PARTICLE_ID,
            AttributeType::VillagerData => &VILLAGER_DATA_ID,
            AttributeType::OptVarInt => &OPT_VAR_INT_ID,
            AttributeType::Pose => &POSE_ID,
        }
    }

    /// Map a wire type id back to its abstract type at `version`
    pub fn from_wire(id: u8, version: ProtocolVersion) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.wire_ids().get(version) == Some(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VillagerData {
    pub villager_type: i32,
    pub profession: i32,
    pub level: i32,
}

/// One decoded metadata value
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    VarInt(i32),
    Float(f32),
    String(String),
    /// JSON text component, kept as sent
    Chat(String),
    OptChat(Option<String>),
    Slot(Option<ItemSlot>),
    Boolean(bool),
    Vector([i32; 3]),
    Rotation(Rotations),
    Position(BlockPosition),
    OptPosition(Option<BlockPosition>),
    Direction(Direction),
    OptUuid(Option<u128>),
    /// Raw block state id, resolved against the registry by the reader
    OptBlockState(Option<i32>),
    Nbt(Option<NbtCompound>),
    Particle(ParticleData),
    VillagerData(VillagerData),
    OptVarInt(Option<i32>),
    Pose(Pose),
}

impl AttributeValue {
    pub fn value_type(&self) -> AttributeType {
        match self {
            AttributeValue::Byte(_) => AttributeType::Byte,
            AttributeValue::Short(_) => AttributeType::Short,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::VarInt(_) => AttributeType::VarInt,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Chat(_) => AttributeType::Chat,
            AttributeValue::OptChat(_) => AttributeType::OptChat,
            AttributeValue::Slot(_) => AttributeType::Slot,
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Vector(_) => AttributeType::Vector,
            AttributeValue::Rotation(_) => AttributeType::Rotation,
            AttributeValue::Position(_) => AttributeType::Position,
            AttributeValue::OptPosition(_) => AttributeType::OptPosition,
            AttributeValue::Direction(_) => AttributeType::Direction,
            AttributeValue::OptUuid(_) => AttributeType::OptUuid,
            AttributeValue::OptBlockState(_) => AttributeType::OptBlockState,
            AttributeValue::Nbt(_) => AttributeType::Nbt,
            AttributeValue::Particle(_) => AttributeType::Particle,
            AttributeValue::VillagerData(_) => AttributeType::VillagerData,
            AttributeValue::OptVarInt(_) => AttributeType::OptVarInt,
            AttributeValue::Pose(_) => AttributeType::Pose,
        }
    }

    /// Booleans, or bytes where any non-zero value is true
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(v) => Some(*v),
            AttributeValue::Byte(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Any integer width, sign extended
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            AttributeValue::Byte(v) => Some(*v as i32),
            AttributeValue::Short(v) => Some(*v as i32),
            AttributeValue::Int(v) | AttributeValue::VarInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Any integer width as an unsigned bit field
    pub fn as_flags(&self) -> Option<u32> {
        match self {
            AttributeValue::Byte(v) => Some(*v as u8 as u32),
            AttributeValue::Short(v) => Some(*v as u16 as u32),
            AttributeValue::Int(v) | AttributeValue::VarInt(v) => Some(*v as u32),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            other => other.as_i32().map(|v| v as f32),
        }
    }

    /// Plain strings, chat components and present optional chat
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::String(v) | AttributeValue::Chat(v) => Some(v),
            AttributeValue::OptChat(v) => v.as_deref(),
            _ => None,
        }
    }
}

/// Unordered set of attribute slots keyed by their index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    slots: HashMap<u8, AttributeValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slot, returning the value it replaced
    pub fn insert(&mut self, key: u8, value: AttributeValue) -> Option<AttributeValue> {
        self.slots.insert(key, value)
    }

    #[inline]
    pub fn get(&self, key: u8) -> Option<&AttributeValue> {
        self.slots.get(&key)
    }

    pub fn contains(&self, key: u8) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &AttributeValue)> {
        self.slots.iter().map(|(key, value)| (*key, value))
    }

    /// Merge a partial update: keys in `update` overwrite, all other known
    /// keys are kept.
    pub fn merge(&mut self, update: AttributeSet) {
        self.slots.extend(update.slots);
    }
}

impl FromIterator<(u8, AttributeValue)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (u8, AttributeValue)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// Read a full metadata list up to and including its terminator
pub fn read_attribute_set(cursor: &mut InCursor) -> Result<AttributeSet> {
    let mut set = AttributeSet::new();
    let version = cursor.version();

    loop {
        let (key, type_id) = if version < ProtocolVersion::V1_9 {
            let item = cursor.read_u8()?;
            if item == 0x7F {
                break;
            }
            (item & 0x1F, item >> 5)
        } else {
            let key = cursor.read_u8()?;
            if key == 0xFF {
                break;
            }
            let type_id = cursor.read_var_int()?;
            if !(0..=u8::MAX as i32).contains(&type_id) {
                return Err(WireError::Malformed(format!(
                    "Metadata type id {} out of range",
                    type_id
                )));
            }
            (key, type_id as u8)
        };

        let value_type = AttributeType::from_wire(type_id, version).ok_or_else(|| {
            WireError::Malformed(format!(
                "Unknown metadata type {} for key {} at {}",
                type_id, key, version
            ))
        })?;
        let value = read_value(cursor, value_type)?;
        tracing::trace!(key, ?value_type, "metadata slot");
        set.insert(key, value);
    }

    Ok(set)
}

fn read_value(cursor: &mut InCursor, value_type: AttributeType) -> Result<AttributeValue> {
    let value = match value_type {
        AttributeType::Byte => AttributeValue::Byte(cursor.read_i8()?),
        AttributeType::Short => AttributeValue::Short(cursor.read_i16()?),
        AttributeType::Int => AttributeValue::Int(cursor.read_i32()?),
        AttributeType::VarInt => AttributeValue::VarInt(cursor.read_var_int()?),
        AttributeType::Float => AttributeValue::Float(cursor.read_f32()?),
        AttributeType::String => AttributeValue::String(read_text(cursor)?),
        AttributeType::Chat => AttributeValue::Chat(read_text(cursor)?),
        AttributeType::OptChat => AttributeValue::OptChat(if cursor.read_bool()? {
            Some(read_text(cursor)?)
        } else {
            None
        }),
        AttributeType::Slot => AttributeValue::Slot(read_item_slot(cursor)?),
        AttributeType::Boolean => AttributeValue::Boolean(cursor.read_bool()?),
        AttributeType::Vector => AttributeValue::Vector([
            cursor.read_i32()?,
            cursor.read_i32()?,
            cursor.read_i32()?,
        ]),
        AttributeType::Rotation => AttributeValue::Rotation(Rotations::new(
            cursor.read_f32()?,
            cursor.read_f32()?,
            cursor.read_f32()?,
        )),
        AttributeType::Position => AttributeValue::Position(cursor.read_block_position()?),
        AttributeType::OptPosition => AttributeValue::OptPosition(if cursor.read_bool()? {
            Some(cursor.read_block_position()?)
        } else {
            None
        }),
        AttributeType::Direction => {
            let id = cursor.read_var_int()?;
            let direction = Direction::from_id(id)
                .ok_or_else(|| WireError::Malformed(format!("Invalid direction {}", id)))?;
            AttributeValue::Direction(direction)
        }
        AttributeType::OptUuid => AttributeValue::OptUuid(if cursor.read_bool()? {
            Some(cursor.read_uuid()?)
        } else {
            None
        }),
        AttributeType::OptBlockState => {
            let id = cursor.read_var_int()?;
            AttributeValue::OptBlockState(if id == 0 { None } else { Some(id) })
        }
        AttributeType::Nbt => AttributeValue::Nbt(nbt::read_root(cursor)?),
        AttributeType::Particle => AttributeValue::Particle(read_particle(cursor)?),
        AttributeType::VillagerData => AttributeValue::VillagerData(VillagerData {
            villager_type: cursor.read_var_int()?,
            profession: cursor.read_var_int()?,
            level: cursor.read_var_int()?,
        }),
        AttributeType::OptVarInt => {
            let raw = cursor.read_var_int()?;
            AttributeValue::OptVarInt(if raw == 0 { None } else { Some(raw - 1) })
        }
        AttributeType::Pose => {
            let id = cursor.read_var_int()?;
            let pose =
                Pose::from_id(id).ok_or_else(|| WireError::Malformed(format!("Invalid pose {}", id)))?;
            AttributeValue::Pose(pose)
        }
    };
    Ok(value)
}

/// Metadata strings are VarInt-prefixed from 1.7 on
fn read_text(cursor: &mut InCursor) -> Result<String> {
    let max_chars = cursor.max_string_length();
    cursor.read_string(max_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn test_type_ids_unique_per_version() {
        for info in blockwire_core::KNOWN_VERSIONS {
            let version = ProtocolVersion::from_protocol(info.protocol);
            let mut seen = std::collections::HashSet::new();
            for ty in AttributeType::ALL {
                if let Some(id) = ty.wire_ids().get(version) {
                    assert!(seen.insert(id), "duplicate type id {} at {}", id, info.name);
                }
            }
        }
    }

    #[test]
    fn test_from_wire_by_era() {
        assert_eq!(AttributeType::from_wire(1, V::V1_8), Some(AttributeType::Short));
        assert_eq!(AttributeType::from_wire(1, V::V1_9), Some(AttributeType::VarInt));
        assert_eq!(AttributeType::from_wire(6, V::V1_12_2), Some(AttributeType::Boolean));
        assert_eq!(AttributeType::from_wire(6, V::V1_13), Some(AttributeType::Slot));
        assert_eq!(AttributeType::from_wire(7, V::V1_7_10), None);
        assert_eq!(AttributeType::from_wire(18, V::V1_14_4), Some(AttributeType::Pose));
    }

    #[test]
    fn test_legacy_stream() {
        let mut buf = BytesMut::new();
        // key 0, byte
        buf.put_u8(0x00);
        buf.put_i8(0x02);
        // key 1, short
        buf.put_u8(1 << 5 | 1);
        buf.put_i16(300);
        // key 6, float
        buf.put_u8(3 << 5 | 6);
        buf.put_f32(20.0);
        buf.put_u8(0x7F);
        buf.put_u8(0xAB);
        let mut cursor = InCursor::new(buf.freeze(), V::V1_8);

        let set = read_attribute_set(&mut cursor).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0), Some(&AttributeValue::Byte(2)));
        assert_eq!(set.get(1), Some(&AttributeValue::Short(300)));
        assert_eq!(set.get(6), Some(&AttributeValue::Float(20.0)));
        // terminator consumed, trailing byte left alone
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_modern_stream() {
        let mut buf = BytesMut::new();
        buf.put_u8(0);
        buf.put_u8(0);
        buf.put_i8(0x20);
        buf.put_u8(6);
        buf.put_u8(18);
        buf.put_u8(5);
        buf.put_u8(12);
        buf.put_u8(17);
        buf.put_u8(0);
        buf.put_u8(0xFF);
        let mut cursor = InCursor::new(buf.freeze(), V::V1_14_4);

        let set = read_attribute_set(&mut cursor).unwrap();
        assert_eq!(set.get(0), Some(&AttributeValue::Byte(0x20)));
        assert_eq!(set.get(6), Some(&AttributeValue::Pose(Pose::Sneaking)));
        assert_eq!(set.get(12), Some(&AttributeValue::OptVarInt(None)));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let mut cursor = InCursor::new(vec![0x00, 0x63, 0x00], V::V1_12_2);
        assert!(matches!(
            read_attribute_set(&mut cursor),
            Err(WireError::Malformed(_))
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let mut cursor = InCursor::new(vec![0x00, 0x02], V::V1_12_2);
        assert!(matches!(
            read_attribute_set(&mut cursor),
            Err(WireError::EndOfBuffer { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_unrelated_slots() {
        let mut known: AttributeSet = vec![
            (0, AttributeValue::Byte(1)),
            (7, AttributeValue::Float(20.0)),
        ]
        .into_iter()
        .collect();
        let update: AttributeSet = vec![(7, AttributeValue::Float(5.0))].into_iter().collect();
        known.merge(update);
        assert_eq!(known.get(0), Some(&AttributeValue::Byte(1)));
        assert_eq!(known.get(7), Some(&AttributeValue::Float(5.0)));
    }

    #[test]
    fn test_width_coercion() {
        assert_eq!(AttributeValue::Byte(1).as_bool(), Some(true));
        assert_eq!(AttributeValue::Byte(0).as_bool(), Some(false));
        assert_eq!(AttributeValue::Short(300).as_i32(), Some(300));
        assert_eq!(AttributeValue::Byte(-128).as_flags(), Some(0x80));
        assert_eq!(AttributeValue::Int(20).as_f32(), Some(20.0));
        assert_eq!(AttributeValue::Float(1.0).as_i32(), None);
        assert_eq!(AttributeValue::OptChat(None).as_text(), None);
    }
}
