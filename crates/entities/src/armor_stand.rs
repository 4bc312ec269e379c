//! Armor stand fields

use crate::data::EntityData;
use crate::entity::NO_GRAVITY;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::{ProtocolVersion as V, Rotations};

pub const STAND_SMALL: u32 = 0x01;
/// "Has gravity" before 1.10; the base no-gravity slot replaced it
pub const STAND_LEGACY_GRAVITY: u32 = 0x02;
pub const STAND_ARMS: u32 = 0x04;
pub const STAND_NO_BASE_PLATE: u32 = 0x08;
pub const STAND_MARKER: u32 = 0x10;

pub const DEFAULT_HEAD_ROTATION: Rotations = Rotations::new(0.0, 0.0, 0.0);
pub const DEFAULT_BODY_ROTATION: Rotations = Rotations::new(0.0, 0.0, 0.0);
pub const DEFAULT_LEFT_ARM_ROTATION: Rotations = Rotations::new(-10.0, 0.0, -10.0);
pub const DEFAULT_RIGHT_ARM_ROTATION: Rotations = Rotations::new(-15.0, 0.0, 10.0);
pub const DEFAULT_LEFT_LEG_ROTATION: Rotations = Rotations::new(-1.0, 0.0, -1.0);
pub const DEFAULT_RIGHT_LEG_ROTATION: Rotations = Rotations::new(1.0, 0.0, 1.0);

pub static STAND_FLAGS: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(10))), (V::V1_9, Some(Next(1)))],
);
pub static HEAD_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(11))), (V::V1_9, Some(Next(2)))],
);
pub static BODY_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(12))), (V::V1_9, Some(Next(3)))],
);
pub static LEFT_ARM_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(13))), (V::V1_9, Some(Next(4)))],
);
pub static RIGHT_ARM_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(14))), (V::V1_9, Some(Next(5)))],
);
pub static LEFT_LEG_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(15))), (V::V1_9, Some(Next(6)))],
);
pub static RIGHT_LEG_ROTATION: Field = Field::new(
    EntityKind::ArmorStand,
    &[(V::V1_8, Some(At(16))), (V::V1_9, Some(Next(7)))],
);

impl EntityData {
    pub fn is_small(&self) -> bool {
        self.read_flag(&STAND_FLAGS, STAND_SMALL)
    }

    pub fn has_arms(&self) -> bool {
        self.read_flag(&STAND_FLAGS, STAND_ARMS)
    }

    pub fn has_no_base_plate(&self) -> bool {
        self.read_flag(&STAND_FLAGS, STAND_NO_BASE_PLATE)
    }

    pub fn is_marker(&self) -> bool {
        self.read_flag(&STAND_FLAGS, STAND_MARKER)
    }

    /// Before 1.10 a set bit means gravity applies; from 1.10 the base
    /// entity's no-gravity slot decides. Absent data means gravity.
    pub fn has_gravity(&self) -> bool {
        if !self.is_a(EntityKind::ArmorStand) {
            return !self.has_no_gravity();
        }
        if self.version() < V::V1_10 {
            self.slot(&STAND_FLAGS)
                .and_then(|value| value.as_flags())
                .map_or(true, |flags| flags & STAND_LEGACY_GRAVITY != 0)
        } else {
            !self.read_bool(&NO_GRAVITY, false)
        }
    }

    pub fn head_rotation(&self) -> Rotations {
        self.read_rotation(&HEAD_ROTATION, DEFAULT_HEAD_ROTATION)
    }

    pub fn body_rotation(&self) -> Rotations {
        self.read_rotation(&BODY_ROTATION, DEFAULT_BODY_ROTATION)
    }

    pub fn left_arm_rotation(&self) -> Rotations {
        self.read_rotation(&LEFT_ARM_ROTATION, DEFAULT_LEFT_ARM_ROTATION)
    }

    pub fn right_arm_rotation(&self) -> Rotations {
        self.read_rotation(&RIGHT_ARM_ROTATION, DEFAULT_RIGHT_ARM_ROTATION)
    }

    pub fn left_leg_rotation(&self) -> Rotations {
        self.read_rotation(&LEFT_LEG_ROTATION, DEFAULT_LEFT_LEG_ROTATION)
    }

    pub fn right_leg_rotation(&self) -> Rotations {
        self.read_rotation(&RIGHT_LEG_ROTATION, DEFAULT_RIGHT_LEG_ROTATION)
    }
}
