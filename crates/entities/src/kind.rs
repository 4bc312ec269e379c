//! Entity kinds and their claimed slot runs
//!
//! From 1.9 on, metadata keys are assigned in class-hierarchy order: every
//! kind claims a contiguous run of keys directly after its parent's last
//! key. The run length of each kind changes between versions, so the key
//! of a field is "sum of ancestor runs + offset".
//!
//! Before 1.9 keys were fixed per field with gaps and no run table
//! applies; those fields use absolute keys instead.

use blockwire_core::{ProtocolVersion, ProtocolVersion as V, Resolution, VersionedMapping};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Entity,
    Living,
    Mob,
    PathfinderMob,
    AgeableMob,
    Animal,
    AbstractHorse,
    Horse,
    TamableAnimal,
    Player,
    ArmorStand,
    AbstractArrow,
    Arrow,
    ItemEntity,
    Monster,
    Creeper,
    AbstractMinecart,
    Slime,
}

static ENTITY_RUN: VersionedMapping<u8> = VersionedMapping::new(&[
    (V::V1_9, Some(5)),
    (V::V1_10, Some(6)),
    (V::V1_14, Some(7)),
    (V::V1_17, Some(8)),
]);
static LIVING_RUN: VersionedMapping<u8> = VersionedMapping::new(&[
    (V::V1_9, Some(5)),
    (V::V1_14, Some(6)),
    (V::V1_15, Some(7)),
]);
static EMPTY_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(0))]);
static SINGLE_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(1))]);
static ABSTRACT_HORSE_RUN: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(5)), (V::V1_11, Some(2))]);
static HORSE_RUN: VersionedMapping<u8> = VersionedMapping::new(&[
    (V::V1_9, Some(0)),
    (V::V1_11, Some(2)),
    (V::V1_14, Some(1)),
]);
static TAMABLE_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(2))]);
static PLAYER_RUN: VersionedMapping<u8> =
    VersionedMapping::new(&[(V::V1_9, Some(4)), (V::V1_12, Some(6))]);
static ARMOR_STAND_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(7))]);
static ABSTRACT_ARROW_RUN: VersionedMapping<u8> = VersionedMapping::new(&[
    (V::V1_9, Some(1)),
    (V::V1_13, Some(2)),
    (V::V1_14, Some(3)),
    (V::V1_16, Some(2)),
]);
static CREEPER_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(3))]);
static MINECART_RUN: VersionedMapping<u8> = VersionedMapping::new(&[(V::V1_9, Some(6))]);

impl EntityKind {
    pub const ALL: [EntityKind; 18] = [
        EntityKind::Entity,
        EntityKind::Living,
        EntityKind::Mob,
        EntityKind::PathfinderMob,
        EntityKind::AgeableMob,
        EntityKind::Animal,
        EntityKind::AbstractHorse,
        EntityKind::Horse,
        EntityKind::TamableAnimal,
        EntityKind::Player,
        EntityKind::ArmorStand,
        EntityKind::AbstractArrow,
        EntityKind::Arrow,
        EntityKind::ItemEntity,
        EntityKind::Monster,
        EntityKind::Creeper,
        EntityKind::AbstractMinecart,
        EntityKind::Slime,
    ];

    pub fn parent(self) -> Option<EntityKind> {
        use EntityKind::*;
        match self {
            Entity => None,
            Living | AbstractArrow | ItemEntity | AbstractMinecart => Some(Entity),
            Mob | Player | ArmorStand => Some(Living),
            PathfinderMob | Slime => Some(Mob),
            AgeableMob | Monster => Some(PathfinderMob),
            Animal => Some(AgeableMob),
            AbstractHorse | TamableAnimal => Some(Animal),
            Horse => Some(AbstractHorse),
            Arrow => Some(AbstractArrow),
            Creeper => Some(Monster),
        }
    }

    /// `self` or one of its ancestors equals `ancestor`
    pub fn is_a(self, ancestor: EntityKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    fn run_table(self) -> &'static VersionedMapping<u8> {
        use EntityKind::*;
        match self {
            Entity => &ENTITY_RUN,
            Living => &LIVING_RUN,
            PathfinderMob | Animal | Monster => &EMPTY_RUN,
            Mob | AgeableMob | Arrow | ItemEntity | Slime => &SINGLE_RUN,
            AbstractHorse => &ABSTRACT_HORSE_RUN,
            Horse => &HORSE_RUN,
            TamableAnimal => &TAMABLE_RUN,
            Player => &PLAYER_RUN,
            ArmorStand => &ARMOR_STAND_RUN,
            AbstractArrow => &ABSTRACT_ARROW_RUN,
            Creeper => &CREEPER_RUN,
            AbstractMinecart => &MINECART_RUN,
        }
    }

    /// Number of keys this kind itself claims at `version`.
    ///
    /// Unsupported before 1.9, where keys are not assigned by runs.
    pub fn claimed_run(self, version: ProtocolVersion) -> Resolution<u8> {
        self.run_table().resolve(version)
    }

    /// Highest key claimed by this kind or any ancestor; `-1` means no
    /// key is claimed yet. `None` when runs do not apply at `version`.
    pub fn last_claimed_key(self, version: ProtocolVersion) -> Option<i16> {
        let mut last = -1i16;
        let mut current = Some(self);
        while let Some(kind) = current {
            last += kind.claimed_run(version).ok()? as i16;
            current = kind.parent();
        }
        Some(last)
    }

    pub fn name(self) -> &'static str {
        use EntityKind::*;
        match self {
            Entity => "entity",
            Living => "living",
            Mob => "mob",
            PathfinderMob => "pathfinder_mob",
            AgeableMob => "ageable_mob",
            Animal => "animal",
            AbstractHorse => "abstract_horse",
            Horse => "horse",
            TamableAnimal => "tamable_animal",
            Player => "player",
            ArmorStand => "armor_stand",
            AbstractArrow => "abstract_arrow",
            Arrow => "arrow",
            ItemEntity => "item",
            Monster => "monster",
            Creeper => "creeper",
            AbstractMinecart => "abstract_minecart",
            Slime => "slime",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
