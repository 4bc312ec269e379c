//! Arrows and dropped items

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::ProtocolVersion as V;
use blockwire_protocol::{AttributeValue, ItemSlot};

pub const ARROW_CRITICAL: u32 = 0x01;
pub const ARROW_NO_CLIP: u32 = 0x02;

/// Effect color of an arrow without potion effects
pub const NO_EFFECT_COLOR: i32 = -1;

pub static ARROW_FLAGS: Field = Field::new(
    EntityKind::AbstractArrow,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, Some(Next(1)))],
);
pub static ARROW_OWNER: Field = Field::new(
    EntityKind::AbstractArrow,
    &[(V::V1_13, Some(Next(2))), (V::V1_16, None)],
);
pub static PIERCING_LEVEL: Field = Field::new(
    EntityKind::AbstractArrow,
    &[(V::V1_14, Some(Next(3))), (V::V1_16, Some(Next(2)))],
);
pub static ARROW_EFFECT_COLOR: Field = Field::new(EntityKind::Arrow, &[(V::V1_9, Some(Next(1)))]);

pub static ITEM: Field = Field::new(
    EntityKind::ItemEntity,
    &[(V::V1_7_2, Some(At(10))), (V::V1_9, Some(Next(1)))],
);

impl EntityData {
    pub fn is_critical(&self) -> bool {
        self.read_flag(&ARROW_FLAGS, ARROW_CRITICAL)
    }

    pub fn has_no_clip(&self) -> bool {
        self.version() >= V::V1_13 && self.read_flag(&ARROW_FLAGS, ARROW_NO_CLIP)
    }

    pub fn piercing_level(&self) -> i32 {
        self.read_i32(&PIERCING_LEVEL, 0)
    }

    /// Shooter UUID, only sent between 1.13 and 1.15
    pub fn arrow_owner(&self) -> Option<u128> {
        self.read_uuid(&ARROW_OWNER)
    }

    pub fn arrow_effect_color(&self) -> i32 {
        self.read_i32(&ARROW_EFFECT_COLOR, NO_EFFECT_COLOR)
    }

    pub fn item(&self) -> Option<&ItemSlot> {
        match self.slot(&ITEM)? {
            AttributeValue::Slot(slot) => slot.as_ref(),
            _ => None,
        }
    }
}
