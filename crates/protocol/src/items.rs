//! Item stacks and particle payloads as they appear inside entity metadata

use crate::cursor::InCursor;
use crate::nbt::{self, NbtCompound};
use blockwire_core::{ProtocolVersion, Result, VersionedMapping, WireError};

/// One item stack
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSlot {
    /// Numeric item id of the active version
    pub item_id: i32,
    pub count: u8,
    /// Damage / metadata value, only sent before the flattening
    pub damage: i16,
    pub nbt: Option<NbtCompound>,
}

/// Read an item slot
///
/// # Format
/// - Before 1.13.2: i16 id (-1 = empty), u8 count, i16 damage (before
///   1.13), NBT (gzip-wrapped before 1.8)
/// - From 1.13.2: bool present, VarInt id, u8 count, NBT
pub fn read_item_slot(cursor: &mut InCursor) -> Result<Option<ItemSlot>> {
    let version = cursor.version();
    if version >= ProtocolVersion::V1_13_2 {
        if !cursor.read_bool()? {
            return Ok(None);
        }
        let item_id = cursor.read_var_int()?;
        let count = cursor.read_u8()?;
        let nbt = nbt::read_root(cursor)?;
        return Ok(Some(ItemSlot {
            item_id,
            count,
            damage: 0,
            nbt,
        }));
    }

    let item_id = cursor.read_i16()?;
    if item_id < 0 {
        return Ok(None);
    }
    let count = cursor.read_u8()?;
    let damage = if version < ProtocolVersion::V1_13 {
        cursor.read_i16()?
    } else {
        0
    };
    let nbt = if version < ProtocolVersion::V1_8 {
        nbt::read_compressed_root(cursor)?
    } else {
        nbt::read_root(cursor)?
    };
    Ok(Some(ItemSlot {
        item_id: item_id as i32,
        count,
        damage,
        nbt,
    }))
}

/// Extra data carried by a particle
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleExtra {
    None,
    /// Block state id (block and falling dust particles)
    BlockState(i32),
    Dust {
        red: f32,
        green: f32,
        blue: f32,
        scale: f32,
    },
    Item(Option<ItemSlot>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleData {
    pub particle_id: i32,
    pub extra: ParticleExtra,
}

/// Particle ids that carry extra data at one version
#[derive(Debug, Clone, Copy)]
struct ParticleLayout {
    block: i32,
    falling_dust: i32,
    dust: i32,
    item: i32,
}

// The particle registry is not shipped, so only revisions whose data-bearing
// ids are tabled can decode particle values.
static PARTICLE_LAYOUTS: VersionedMapping<ParticleLayout> = VersionedMapping::new(&[
    (
        ProtocolVersion::V1_13,
        Some(ParticleLayout {
            block: 3,
            falling_dust: 20,
            dust: 11,
            item: 27,
        }),
    ),
    (
        ProtocolVersion::V1_14,
        Some(ParticleLayout {
            block: 3,
            falling_dust: 23,
            dust: 14,
            item: 32,
        }),
    ),
    (ProtocolVersion::V1_16, None),
]);

pub fn read_particle(cursor: &mut InCursor) -> Result<ParticleData> {
    let particle_id = cursor.read_var_int()?;
    let layout = PARTICLE_LAYOUTS.get(cursor.version()).ok_or_else(|| {
        WireError::Malformed(format!(
            "No particle layout for {}, cannot size particle {}",
            cursor.version(),
            particle_id
        ))
    })?;

    let extra = if particle_id == layout.block || particle_id == layout.falling_dust {
        ParticleExtra::BlockState(cursor.read_var_int()?)
    } else if particle_id == layout.dust {
        ParticleExtra::Dust {
            red: cursor.read_f32()?,
            green: cursor.read_f32()?,
            blue: cursor.read_f32()?,
            scale: cursor.read_f32()?,
        }
    } else if particle_id == layout.item {
        ParticleExtra::Item(read_item_slot(cursor)?)
    } else {
        ParticleExtra::None
    };
    Ok(ParticleData { particle_id, extra })
}
