//! Fields shared by every entity

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use crate::living::{LEGACY_NAME_TAG, LEGACY_NAME_TAG_VISIBLE};
use blockwire_core::{Pose, ProtocolVersion as V};
use blockwire_protocol::AttributeValue;

pub const FLAG_ON_FIRE: u32 = 0x01;
pub const FLAG_SNEAKING: u32 = 0x02;
pub const FLAG_SPRINTING: u32 = 0x08;
pub const FLAG_SWIMMING: u32 = 0x10;
pub const FLAG_INVISIBLE: u32 = 0x20;
pub const FLAG_GLOWING: u32 = 0x40;
pub const FLAG_ELYTRA: u32 = 0x80;

pub const DEFAULT_AIR_SUPPLY: i32 = 300;

pub static FLAGS: Field = Field::new(
    EntityKind::Entity,
    &[(V::V1_7_2, Some(At(0))), (V::V1_9, Some(Next(1)))],
);
pub static AIR_SUPPLY: Field = Field::new(
    EntityKind::Entity,
    &[(V::V1_7_2, Some(At(1))), (V::V1_9, Some(Next(2)))],
);
pub static CUSTOM_NAME: Field = Field::new(
    EntityKind::Entity,
    &[(V::V1_8, Some(At(2))), (V::V1_9, Some(Next(3)))],
);
pub static CUSTOM_NAME_VISIBLE: Field = Field::new(
    EntityKind::Entity,
    &[(V::V1_8, Some(At(3))), (V::V1_9, Some(Next(4)))],
);
pub static SILENT: Field = Field::new(
    EntityKind::Entity,
    &[(V::V1_8, Some(At(4))), (V::V1_9, Some(Next(5)))],
);
pub static NO_GRAVITY: Field = Field::new(EntityKind::Entity, &[(V::V1_10, Some(Next(6)))]);
pub static POSE: Field = Field::new(EntityKind::Entity, &[(V::V1_14, Some(Next(7)))]);
pub static TICKS_FROZEN: Field = Field::new(EntityKind::Entity, &[(V::V1_17, Some(Next(8)))]);

impl EntityData {
    pub fn is_on_fire(&self) -> bool {
        self.read_flag(&FLAGS, FLAG_ON_FIRE)
    }

    pub fn is_sneaking(&self) -> bool {
        self.read_flag(&FLAGS, FLAG_SNEAKING)
    }

    pub fn is_sprinting(&self) -> bool {
        self.read_flag(&FLAGS, FLAG_SPRINTING)
    }

    /// Bit 0x10 meant "using an item" before 1.13
    pub fn is_swimming(&self) -> bool {
        self.version() >= V::V1_13 && self.read_flag(&FLAGS, FLAG_SWIMMING)
    }

    pub fn is_invisible(&self) -> bool {
        self.read_flag(&FLAGS, FLAG_INVISIBLE)
    }

    pub fn is_glowing(&self) -> bool {
        self.version() >= V::V1_9 && self.read_flag(&FLAGS, FLAG_GLOWING)
    }

    pub fn is_flying_with_elytra(&self) -> bool {
        self.version() >= V::V1_9 && self.read_flag(&FLAGS, FLAG_ELYTRA)
    }

    pub fn air_supply(&self) -> i32 {
        self.read_i32(&AIR_SUPPLY, DEFAULT_AIR_SUPPLY)
    }

    /// Custom name as sent: plain text before 1.13, a JSON text component
    /// after. Only living entities carry one in 1.7.
    pub fn custom_name(&self) -> Option<&str> {
        if self.version() < V::V1_8 {
            return self.read_text(&LEGACY_NAME_TAG);
        }
        self.read_text(&CUSTOM_NAME)
    }

    pub fn is_custom_name_visible(&self) -> bool {
        if self.version() < V::V1_8 {
            return self.read_bool(&LEGACY_NAME_TAG_VISIBLE, false);
        }
        self.read_bool(&CUSTOM_NAME_VISIBLE, false)
    }

    pub fn is_silent(&self) -> bool {
        self.read_bool(&SILENT, false)
    }

    pub fn has_no_gravity(&self) -> bool {
        self.read_bool(&NO_GRAVITY, false)
    }

    pub fn pose(&self) -> Pose {
        match self.slot(&POSE) {
            Some(AttributeValue::Pose(pose)) => *pose,
            _ => Pose::default(),
        }
    }

    pub fn ticks_frozen(&self) -> i32 {
        self.read_i32(&TICKS_FROZEN, 0)
    }
}
