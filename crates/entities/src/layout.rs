//! Field layouts
//!
//! A field's key is a [`VersionedMapping`] of [`SlotRule`]s. Legacy eras
//! (1.7, 1.8) use absolute keys; from 1.9 the key is an offset past the
//! last key claimed by the owning kind's parent, so the first field of a
//! kind is `Offset(1)`.

use crate::kind::EntityKind;
use blockwire_core::{ProtocolVersion, Resolution, VersionedMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRule {
    Absolute(u8),
    Offset(u8),
}

pub type FieldLayout = VersionedMapping<SlotRule>;

/// One metadata field of an entity kind
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Kind that declares the field; offsets count from its parent
    pub owner: EntityKind,
    pub layout: FieldLayout,
}

impl Field {
    pub const fn new(
        owner: EntityKind,
        rules: &'static [(ProtocolVersion, Option<SlotRule>)],
    ) -> Self {
        Self {
            owner,
            layout: VersionedMapping::new(rules),
        }
    }

    /// Key of this field at `version`, if the field exists there
    pub fn key(&self, version: ProtocolVersion) -> Option<u8> {
        match self.layout.resolve(version) {
            Resolution::Wire(SlotRule::Absolute(key)) => Some(key),
            Resolution::Wire(SlotRule::Offset(offset)) => {
                let base = match self.owner.parent() {
                    Some(parent) => parent.last_claimed_key(version)?,
                    None => -1,
                };
                u8::try_from(base + offset as i16).ok()
            }
            Resolution::Unsupported => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockwire_core::ProtocolVersion as V;

    static CRITICAL: Field = Field::new(
        EntityKind::AbstractArrow,
        &[
            (V::V1_8, Some(SlotRule::Absolute(16))),
            (V::V1_9, Some(SlotRule::Offset(1))),
        ],
    );

    static REMOVED: Field = Field::new(
        EntityKind::Living,
        &[(V::V1_9, Some(SlotRule::Offset(1))), (V::V1_13, None)],
    );

    #[test]
    fn test_absolute_and_offset_keys() {
        assert_eq!(CRITICAL.key(V::V1_7_10), None);
        assert_eq!(CRITICAL.key(V::V1_8), Some(16));
        assert_eq!(CRITICAL.key(V::V1_9_4), Some(5));
        assert_eq!(CRITICAL.key(V::V1_12_2), Some(6));
        assert_eq!(CRITICAL.key(V::V1_14_4), Some(7));
        assert_eq!(CRITICAL.key(V::V1_17), Some(8));
    }

    #[test]
    fn test_removed_field() {
        assert_eq!(REMOVED.key(V::V1_9), Some(5));
        assert_eq!(REMOVED.key(V::V1_13), None);
    }

    fn declared_fields() -> Vec<&'static Field> {
        use crate::{armor_stand, entity, horse, living, minecart, monster, player, projectile};
        vec![
            &entity::FLAGS,
            &entity::AIR_SUPPLY,
            &entity::CUSTOM_NAME,
            &entity::CUSTOM_NAME_VISIBLE,
            &entity::SILENT,
            &entity::NO_GRAVITY,
            &entity::POSE,
            &entity::TICKS_FROZEN,
            &living::HAND_STATE,
            &living::HEALTH,
            &living::EFFECT_COLOR,
            &living::EFFECT_AMBIENT,
            &living::ARROW_COUNT,
            &living::STINGER_COUNT,
            &living::BED_LOCATION,
            &living::LEGACY_NO_AI,
            &living::LEGACY_NAME_TAG,
            &living::LEGACY_NAME_TAG_VISIBLE,
            &living::MOB_FLAGS,
            &living::LEGACY_AGE,
            &living::IS_BABY,
            &horse::HORSE_FLAGS,
            &horse::LEGACY_HORSE_TYPE,
            &horse::SHARED_HORSE_VARIANT,
            &horse::LEGACY_HORSE_OWNER,
            &horse::HORSE_OWNER,
            &horse::SHARED_HORSE_ARMOR,
            &horse::HORSE_VARIANT,
            &horse::HORSE_ARMOR,
            &horse::TAMABLE_FLAGS,
            &horse::LEGACY_TAMABLE_OWNER,
            &horse::TAMABLE_OWNER,
            &player::ADDITIONAL_HEARTS,
            &player::SCORE,
            &player::SKIN_PARTS,
            &player::LEGACY_HIDE_CAPE,
            &player::MAIN_HAND,
            &player::LEFT_SHOULDER,
            &player::RIGHT_SHOULDER,
            &armor_stand::STAND_FLAGS,
            &armor_stand::HEAD_ROTATION,
            &armor_stand::BODY_ROTATION,
            &armor_stand::LEFT_ARM_ROTATION,
            &armor_stand::RIGHT_ARM_ROTATION,
            &armor_stand::LEFT_LEG_ROTATION,
            &armor_stand::RIGHT_LEG_ROTATION,
            &projectile::ARROW_FLAGS,
            &projectile::ARROW_OWNER,
            &projectile::PIERCING_LEVEL,
            &projectile::ARROW_EFFECT_COLOR,
            &projectile::ITEM,
            &minecart::HURT_SHAKE,
            &minecart::HURT_DIRECTION,
            &minecart::DAMAGE,
            &minecart::DISPLAY_BLOCK,
            &minecart::DISPLAY_OFFSET,
            &minecart::SHOWS_CUSTOM_BLOCK,
            &monster::CREEPER_STATE,
            &monster::CREEPER_POWERED,
            &monster::CREEPER_IGNITED,
            &monster::SLIME_SIZE,
        ]
    }

    #[test]
    fn test_offsets_fill_each_claimed_run() {
        let fields = declared_fields();
        for info in blockwire_core::KNOWN_VERSIONS {
            let version = ProtocolVersion::from_protocol(info.protocol);
            for kind in EntityKind::ALL {
                let mut offsets: Vec<u8> = fields
                    .iter()
                    .filter(|field| field.owner == kind)
                    .filter_map(|field| match field.layout.resolve(version) {
                        Resolution::Wire(SlotRule::Offset(offset)) => Some(offset),
                        _ => None,
                    })
                    .collect();
                offsets.sort_unstable();

                match kind.claimed_run(version) {
                    Resolution::Wire(run) => {
                        let expected: Vec<u8> = (1..=run).collect();
                        assert_eq!(offsets, expected, "{} at {}", kind, info.name);
                    }
                    Resolution::Unsupported => {
                        assert!(offsets.is_empty(), "{} at {}", kind, info.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_absolute_keys_once_runs_apply() {
        for info in blockwire_core::KNOWN_VERSIONS {
            let version = ProtocolVersion::from_protocol(info.protocol);
            if version < V::V1_9 {
                continue;
            }
            for field in declared_fields() {
                assert!(
                    !matches!(field.layout.resolve(version), Resolution::Wire(SlotRule::Absolute(_))),
                    "{} at {}",
                    field.owner,
                    info.name
                );
            }
        }
    }
}
