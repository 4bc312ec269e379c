//! Living entities, mobs and ageable mobs

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::{BlockPosition, ProtocolVersion as V};

pub const HAND_ACTIVE: u32 = 0x01;
pub const HAND_OFFHAND: u32 = 0x02;
pub const HAND_RIPTIDE: u32 = 0x04;

pub const MOB_NO_AI: u32 = 0x01;
pub const MOB_LEFT_HANDED: u32 = 0x02;
pub const MOB_AGGRESSIVE: u32 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

// ===== Living =====

pub static HAND_STATE: Field = Field::new(EntityKind::Living, &[(V::V1_9, Some(Next(1)))]);
pub static HEALTH: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(6))), (V::V1_9, Some(Next(2)))],
);
pub static EFFECT_COLOR: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(7))), (V::V1_9, Some(Next(3)))],
);
pub static EFFECT_AMBIENT: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(8))), (V::V1_9, Some(Next(4)))],
);
pub static ARROW_COUNT: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(9))), (V::V1_9, Some(Next(5)))],
);
pub static STINGER_COUNT: Field = Field::new(EntityKind::Living, &[(V::V1_15, Some(Next(6)))]);
pub static BED_LOCATION: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_14, Some(Next(6))), (V::V1_15, Some(Next(7)))],
);
/// 1.8 only; from 1.9 the flag lives in the mob flags
pub static LEGACY_NO_AI: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_8, Some(At(15))), (V::V1_9, None)],
);
/// Name tag before 1.8 moved it to the base entity
pub static LEGACY_NAME_TAG: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(10))), (V::V1_8, None)],
);
pub static LEGACY_NAME_TAG_VISIBLE: Field = Field::new(
    EntityKind::Living,
    &[(V::V1_7_2, Some(At(11))), (V::V1_8, None)],
);

// ===== Mob =====

pub static MOB_FLAGS: Field = Field::new(EntityKind::Mob, &[(V::V1_9, Some(Next(1)))]);

// ===== Ageable =====

/// Signed age byte before 1.9, negative for babies
pub static LEGACY_AGE: Field = Field::new(
    EntityKind::AgeableMob,
    &[(V::V1_7_2, Some(At(12))), (V::V1_9, None)],
);
pub static IS_BABY: Field = Field::new(EntityKind::AgeableMob, &[(V::V1_9, Some(Next(1)))]);

impl EntityData {
    pub fn is_hand_active(&self) -> bool {
        self.read_flag(&HAND_STATE, HAND_ACTIVE)
    }

    pub fn active_hand(&self) -> Hand {
        if self.read_flag(&HAND_STATE, HAND_OFFHAND) {
            Hand::Off
        } else {
            Hand::Main
        }
    }

    pub fn is_riptide_spinning(&self) -> bool {
        self.version() >= V::V1_13 && self.read_flag(&HAND_STATE, HAND_RIPTIDE)
    }

    pub fn health(&self) -> f32 {
        self.read_f32(&HEALTH, 1.0)
    }

    pub fn effect_color(&self) -> i32 {
        self.read_i32(&EFFECT_COLOR, 0)
    }

    pub fn is_effect_ambient(&self) -> bool {
        self.read_bool(&EFFECT_AMBIENT, false)
    }

    pub fn arrow_count(&self) -> i32 {
        self.read_i32(&ARROW_COUNT, 0)
    }

    pub fn stinger_count(&self) -> i32 {
        self.read_i32(&STINGER_COUNT, 0)
    }

    pub fn bed_location(&self) -> Option<BlockPosition> {
        self.read_opt_position(&BED_LOCATION)
    }

    /// AI disabled. A byte on every living entity in 1.8, a mob flag bit
    /// from 1.9.
    pub fn has_no_ai(&self) -> bool {
        if self.version() < V::V1_9 {
            self.read_bool(&LEGACY_NO_AI, false)
        } else {
            self.read_flag(&MOB_FLAGS, MOB_NO_AI)
        }
    }

    pub fn is_left_handed(&self) -> bool {
        self.read_flag(&MOB_FLAGS, MOB_LEFT_HANDED)
    }

    pub fn is_aggressive(&self) -> bool {
        self.version() >= V::V1_14 && self.read_flag(&MOB_FLAGS, MOB_AGGRESSIVE)
    }

    pub fn is_baby(&self) -> bool {
        if self.version() < V::V1_9 {
            self.read_int(&LEGACY_AGE).map_or(false, |age| age < 0)
        } else {
            self.read_bool(&IS_BABY, false)
        }
    }
}
