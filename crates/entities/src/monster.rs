//! Creepers and slimes

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::ProtocolVersion as V;

/// Swell direction: -1 idle, 1 fusing
pub const CREEPER_IDLE: i32 = -1;

pub static CREEPER_STATE: Field = Field::new(
    EntityKind::Creeper,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, Some(Next(1)))],
);
pub static CREEPER_POWERED: Field = Field::new(
    EntityKind::Creeper,
    &[(V::V1_7_2, Some(At(17))), (V::V1_9, Some(Next(2)))],
);
pub static CREEPER_IGNITED: Field = Field::new(EntityKind::Creeper, &[(V::V1_9, Some(Next(3)))]);

pub static SLIME_SIZE: Field = Field::new(
    EntityKind::Slime,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, Some(Next(1)))],
);

impl EntityData {
    pub fn creeper_state(&self) -> i32 {
        self.read_i32(&CREEPER_STATE, CREEPER_IDLE)
    }

    pub fn is_powered(&self) -> bool {
        self.read_bool(&CREEPER_POWERED, false)
    }

    pub fn is_ignited(&self) -> bool {
        self.read_bool(&CREEPER_IGNITED, false)
    }

    pub fn slime_size(&self) -> i32 {
        self.read_i32(&SLIME_SIZE, 1)
    }
}
