//! Minecart fields
//!
//! # Display block encoding
//! ```text
//! 1.7 - 1.8:   id | meta << 16
//! 1.9 - 1.12:  id | meta << 12
//! 1.13+:       block state id
//! ```

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_blocks::{BlockRegistry, StateRef};
use blockwire_core::ProtocolVersion as V;

/// Display offset of an empty minecart, in sixteenths of a block
pub const DEFAULT_DISPLAY_OFFSET: i32 = 6;

pub static HURT_SHAKE: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(17))), (V::V1_9, Some(Next(1)))],
);
pub static HURT_DIRECTION: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(18))), (V::V1_9, Some(Next(2)))],
);
pub static DAMAGE: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(19))), (V::V1_9, Some(Next(3)))],
);
pub static DISPLAY_BLOCK: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(20))), (V::V1_9, Some(Next(4)))],
);
pub static DISPLAY_OFFSET: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(21))), (V::V1_9, Some(Next(5)))],
);
pub static SHOWS_CUSTOM_BLOCK: Field = Field::new(
    EntityKind::AbstractMinecart,
    &[(V::V1_7_2, Some(At(22))), (V::V1_9, Some(Next(6)))],
);

impl EntityData {
    pub fn hurt_shake(&self) -> i32 {
        self.read_i32(&HURT_SHAKE, 0)
    }

    pub fn hurt_direction(&self) -> i32 {
        self.read_i32(&HURT_DIRECTION, 1)
    }

    pub fn damage_taken(&self) -> f32 {
        self.read_f32(&DAMAGE, 0.0)
    }

    /// Raw display block value as sent
    pub fn display_block_raw(&self) -> Option<i32> {
        self.read_int(&DISPLAY_BLOCK)
    }

    /// Block shown inside the minecart, resolved through `registry`.
    ///
    /// `None` when the server never sent one. Unknown ids resolve to
    /// [`StateRef::UNKNOWN`].
    pub fn display_block(&self, registry: &BlockRegistry) -> Option<StateRef> {
        let raw = self.display_block_raw()?;
        let version = self.version();
        let state = if version >= V::V1_13 {
            registry.state_for(raw as u32)
        } else if version >= V::V1_9 {
            registry.resolve_legacy((raw & 0x0FFF) as u16, ((raw >> 12) & 0x0F) as u8)
        } else {
            registry.resolve_legacy((raw & 0xFFFF) as u16, ((raw >> 16) & 0x0F) as u8)
        };
        Some(state)
    }

    pub fn display_offset(&self) -> i32 {
        self.read_i32(&DISPLAY_OFFSET, DEFAULT_DISPLAY_OFFSET)
    }

    pub fn shows_custom_block(&self) -> bool {
        self.read_bool(&SHOWS_CUSTOM_BLOCK, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwire_blocks::{build_legacy_registry, BlockState, IdEncoding, DEFAULT_NAMESPACE};
    use blockwire_core::ProtocolVersion;
    use blockwire_protocol::AttributeValue;

    fn cart(version: ProtocolVersion, slots: Vec<(u8, AttributeValue)>) -> EntityData {
        EntityData::with_slots(EntityKind::AbstractMinecart, version, slots.into_iter().collect())
    }

    #[test]
    fn test_display_block_1_8() {
        let registry = build_legacy_registry(V::V1_8).unwrap();
        let data = cart(
            V::V1_8,
            vec![
                (20, AttributeValue::Int(35 | 14 << 16)),
                (22, AttributeValue::Byte(1)),
            ],
        );
        let state = registry.state(data.display_block(&registry).unwrap());
        assert_eq!(state.to_string(), "minecraft:wool[color=red]");
        assert!(data.shows_custom_block());
    }

    #[test]
    fn test_display_block_1_12() {
        let registry = build_legacy_registry(V::V1_12_2).unwrap();
        // base entity 0-5, minecart 6-11
        let data = cart(
            V::V1_12_2,
            vec![(9, AttributeValue::VarInt(54)), (10, AttributeValue::VarInt(8))],
        );
        let state = registry.state(data.display_block(&registry).unwrap());
        assert_eq!(state.identifier, "chest");
        assert_eq!(data.display_offset(), 8);
    }

    #[test]
    fn test_display_block_flattened() {
        let mut registry = BlockRegistry::new(V::V1_13_2, IdEncoding::Flattened);
        let tnt = registry
            .insert(1324, BlockState::new(DEFAULT_NAMESPACE, "tnt"))
            .unwrap();
        let data = cart(V::V1_13_2, vec![(9, AttributeValue::VarInt(1324))]);
        assert_eq!(data.display_block(&registry), Some(tnt));

        let unknown = cart(V::V1_13_2, vec![(9, AttributeValue::VarInt(99_999))]);
        assert_eq!(unknown.display_block(&registry), Some(StateRef::UNKNOWN));
    }

    #[test]
    fn test_defaults() {
        let registry = build_legacy_registry(V::V1_12_2).unwrap();
        let data = cart(V::V1_12_2, vec![]);
        assert_eq!(data.display_block(&registry), None);
        assert_eq!(data.display_offset(), DEFAULT_DISPLAY_OFFSET);
        assert_eq!(data.hurt_direction(), 1);
        assert_eq!(data.damage_taken(), 0.0);
        assert!(!data.shows_custom_block());
    }

    #[test]
    fn test_hurt_fields() {
        // 1.16.5: base entity 0-6
        let data = cart(
            V::V1_16_5,
            vec![
                (7, AttributeValue::VarInt(10)),
                (8, AttributeValue::VarInt(-1)),
                (9, AttributeValue::Float(28.0)),
            ],
        );
        assert_eq!(data.hurt_shake(), 10);
        assert_eq!(data.hurt_direction(), -1);
        assert_eq!(data.damage_taken(), 28.0);
    }
}
