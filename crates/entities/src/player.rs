//! Player fields

use crate::data::EntityData;
use crate::kind::EntityKind;
use crate::layout::{Field, SlotRule::Absolute as At, SlotRule::Offset as Next};
use blockwire_core::ProtocolVersion as V;
use blockwire_protocol::{AttributeValue, NbtCompound};

pub const SKIN_CAPE: u8 = 0x01;
pub const SKIN_JACKET: u8 = 0x02;
pub const SKIN_LEFT_SLEEVE: u8 = 0x04;
pub const SKIN_RIGHT_SLEEVE: u8 = 0x08;
pub const SKIN_LEFT_PANTS: u8 = 0x10;
pub const SKIN_RIGHT_PANTS: u8 = 0x20;
pub const SKIN_HAT: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainHand {
    Left,
    Right,
}

pub static ADDITIONAL_HEARTS: Field = Field::new(
    EntityKind::Player,
    &[(V::V1_7_2, Some(At(17))), (V::V1_9, Some(Next(1)))],
);
pub static SCORE: Field = Field::new(
    EntityKind::Player,
    &[(V::V1_7_2, Some(At(18))), (V::V1_9, Some(Next(2)))],
);
pub static SKIN_PARTS: Field = Field::new(
    EntityKind::Player,
    &[(V::V1_8, Some(At(10))), (V::V1_9, Some(Next(3)))],
);
/// Bit 0x02 hides the cape; replaced by the skin part mask in 1.9
pub static LEGACY_HIDE_CAPE: Field = Field::new(
    EntityKind::Player,
    &[(V::V1_7_2, Some(At(16))), (V::V1_9, None)],
);
pub static MAIN_HAND: Field = Field::new(EntityKind::Player, &[(V::V1_9, Some(Next(4)))]);
pub static LEFT_SHOULDER: Field = Field::new(EntityKind::Player, &[(V::V1_12, Some(Next(5)))]);
pub static RIGHT_SHOULDER: Field = Field::new(EntityKind::Player, &[(V::V1_12, Some(Next(6)))]);

impl EntityData {
    pub fn additional_hearts(&self) -> f32 {
        self.read_f32(&ADDITIONAL_HEARTS, 0.0)
    }

    pub fn score(&self) -> i32 {
        self.read_i32(&SCORE, 0)
    }

    pub fn skin_parts(&self) -> u8 {
        self.read_flags(&SKIN_PARTS) as u8
    }

    pub fn shows_skin_part(&self, part: u8) -> bool {
        self.skin_parts() & part != 0
    }

    pub fn legacy_hides_cape(&self) -> bool {
        self.read_flag(&LEGACY_HIDE_CAPE, 0x02)
    }

    pub fn main_hand(&self) -> MainHand {
        match self.read_int(&MAIN_HAND) {
            Some(0) => MainHand::Left,
            _ => MainHand::Right,
        }
    }

    pub fn left_shoulder(&self) -> Option<&NbtCompound> {
        self.shoulder(&LEFT_SHOULDER)
    }

    pub fn right_shoulder(&self) -> Option<&NbtCompound> {
        self.shoulder(&RIGHT_SHOULDER)
    }

    fn shoulder(&self, field: &Field) -> Option<&NbtCompound> {
        match self.slot(field)? {
            AttributeValue::Nbt(tag) => tag.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwire_core::ProtocolVersion;
    use blockwire_protocol::NbtTag;

    fn player(version: ProtocolVersion, slots: Vec<(u8, AttributeValue)>) -> EntityData {
        EntityData::with_slots(EntityKind::Player, version, slots.into_iter().collect())
    }

    #[test]
    fn test_player_1_9() {
        let data = player(
            V::V1_9,
            vec![
                (10, AttributeValue::Float(4.0)),
                (11, AttributeValue::VarInt(120)),
                (12, AttributeValue::Byte((SKIN_CAPE | SKIN_HAT) as i8)),
                (13, AttributeValue::Byte(0)),
            ],
        );
        assert_eq!(data.additional_hearts(), 4.0);
        assert_eq!(data.score(), 120);
        assert!(data.shows_skin_part(SKIN_HAT));
        assert!(!data.shows_skin_part(SKIN_JACKET));
        assert_eq!(data.main_hand(), MainHand::Left);
    }

    #[test]
    fn test_shoulders_from_1_12() {
        let mut parrot = NbtCompound::new();
        parrot.insert("id", NbtTag::String("minecraft:parrot".into()));
        // 1.12.2: living ends at 10
        let data = player(
            V::V1_12_2,
            vec![
                (15, AttributeValue::Nbt(Some(parrot.clone()))),
                (16, AttributeValue::Nbt(None)),
            ],
        );
        assert_eq!(data.left_shoulder(), Some(&parrot));
        assert_eq!(data.right_shoulder(), None);
        assert_eq!(data.main_hand(), MainHand::Right);

        let older = player(V::V1_11_2, vec![(15, AttributeValue::Nbt(Some(parrot)))]);
        assert_eq!(older.left_shoulder(), None);
    }

    #[test]
    fn test_player_1_8() {
        let data = player(
            V::V1_8,
            vec![
                (10, AttributeValue::Byte(0x7F)),
                (16, AttributeValue::Byte(0x02)),
                (17, AttributeValue::Float(2.0)),
                (18, AttributeValue::Int(9)),
            ],
        );
        assert_eq!(data.skin_parts(), 0x7F);
        assert!(data.legacy_hides_cape());
        assert_eq!(data.additional_hearts(), 2.0);
        assert_eq!(data.score(), 9);
    }

    #[test]
    fn test_player_1_7() {
        let data = player(
            V::V1_7_10,
            vec![
                (10, AttributeValue::String("Steve".into())),
                (16, AttributeValue::Byte(0x02)),
                (17, AttributeValue::Float(6.0)),
                (18, AttributeValue::Int(31)),
            ],
        );
        assert!(data.legacy_hides_cape());
        assert_eq!(data.additional_hearts(), 6.0);
        assert_eq!(data.score(), 31);
        // key 10 is the living name tag in 1.7, not skin parts
        assert_eq!(data.skin_parts(), 0);
        assert_eq!(data.custom_name(), Some("Steve"));
    }
}
