//! Horses and tamable animals
//!
//! The horse flag byte lost its "has chest" bit in 1.12, shifting bred,
//! eating, rearing and mouth-open down by one bit. Before 1.11 every horse
//! type shared one kind, so type, variant and armor are declared on
//! [`EntityKind::AbstractHorse`]; from the 1.11 split variant and armor
//! belong to [`EntityKind::Horse`].

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::ProtocolVersion as V;

pub const HORSE_TAME: u32 = 0x02;
pub const HORSE_SADDLED: u32 = 0x04;

pub const TAMABLE_SITTING: u32 = 0x01;
pub const TAMABLE_TAMED: u32 = 0x04;

// ===== AbstractHorse =====

pub static HORSE_FLAGS: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, Some(Next(1)))],
);
pub static LEGACY_HORSE_TYPE: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_7_2, Some(At(19))), (V::V1_9, Some(Next(2))), (V::V1_11, None)],
);
pub static SHARED_HORSE_VARIANT: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_7_2, Some(At(20))), (V::V1_9, Some(Next(3))), (V::V1_11, None)],
);
/// Owner name before 1.9
pub static LEGACY_HORSE_OWNER: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_7_2, Some(At(21))), (V::V1_9, None)],
);
pub static HORSE_OWNER: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_9, Some(Next(4))), (V::V1_11, Some(Next(2)))],
);
pub static SHARED_HORSE_ARMOR: Field = Field::new(
    EntityKind::AbstractHorse,
    &[(V::V1_7_2, Some(At(22))), (V::V1_9, Some(Next(5))), (V::V1_11, None)],
);

// ===== Horse =====

pub static HORSE_VARIANT: Field = Field::new(EntityKind::Horse, &[(V::V1_11, Some(Next(1)))]);
/// Armor moved to the inventory in 1.14
pub static HORSE_ARMOR: Field = Field::new(
    EntityKind::Horse,
    &[(V::V1_11, Some(Next(2))), (V::V1_14, None)],
);

// ===== TamableAnimal =====

pub static TAMABLE_FLAGS: Field = Field::new(
    EntityKind::TamableAnimal,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, Some(Next(1)))],
);
pub static LEGACY_TAMABLE_OWNER: Field = Field::new(
    EntityKind::TamableAnimal,
    &[(V::V1_7_2, Some(At(17))), (V::V1_9, None)],
);
pub static TAMABLE_OWNER: Field = Field::new(EntityKind::TamableAnimal, &[(V::V1_9, Some(Next(2)))]);

impl EntityData {
    /// Bits above saddled moved down by one in 1.12
    fn horse_flag(&self, mask_since_1_12: u32) -> bool {
        let mask = if self.version() >= V::V1_12 {
            mask_since_1_12
        } else {
            mask_since_1_12 << 1
        };
        self.read_flag(&HORSE_FLAGS, mask)
    }

    pub fn is_tame(&self) -> bool {
        self.read_flag(&HORSE_FLAGS, HORSE_TAME)
    }

    pub fn is_saddled(&self) -> bool {
        self.read_flag(&HORSE_FLAGS, HORSE_SADDLED)
    }

    /// Only meaningful before 1.12; later versions send chests per kind
    pub fn has_chest(&self) -> bool {
        self.version() < V::V1_12 && self.read_flag(&HORSE_FLAGS, 0x08)
    }

    pub fn is_bred(&self) -> bool {
        self.horse_flag(0x08)
    }

    pub fn is_eating(&self) -> bool {
        self.horse_flag(0x10)
    }

    pub fn is_rearing(&self) -> bool {
        self.horse_flag(0x20)
    }

    pub fn is_mouth_open(&self) -> bool {
        self.horse_flag(0x40)
    }

    /// Horse, donkey, mule, zombie or skeleton horse before 1.11
    pub fn legacy_horse_type(&self) -> i32 {
        self.read_i32(&LEGACY_HORSE_TYPE, 0)
    }

    pub fn horse_variant(&self) -> i32 {
        if self.version() >= V::V1_11 {
            self.read_i32(&HORSE_VARIANT, 0)
        } else {
            self.read_i32(&SHARED_HORSE_VARIANT, 0)
        }
    }

    /// Armor type; 0 from 1.14, where armor is an inventory item
    pub fn legacy_horse_armor(&self) -> i32 {
        if self.version() >= V::V1_11 {
            self.read_i32(&HORSE_ARMOR, 0)
        } else {
            self.read_i32(&SHARED_HORSE_ARMOR, 0)
        }
    }

    pub fn legacy_owner_name(&self) -> Option<&str> {
        self.read_text(&LEGACY_HORSE_OWNER)
            .or_else(|| self.read_text(&LEGACY_TAMABLE_OWNER))
            .filter(|name| !name.is_empty())
    }

    pub fn owner(&self) -> Option<u128> {
        self.read_uuid(&HORSE_OWNER)
            .or_else(|| self.read_uuid(&TAMABLE_OWNER))
    }

    pub fn is_sitting(&self) -> bool {
        self.read_flag(&TAMABLE_FLAGS, TAMABLE_SITTING)
    }

    pub fn is_tamed(&self) -> bool {
        self.read_flag(&TAMABLE_FLAGS, TAMABLE_TAMED)
    }
}
