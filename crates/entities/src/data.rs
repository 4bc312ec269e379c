//! Merged metadata of one tracked entity
//!
//! Servers send metadata as partial updates. [`EntityData`] keeps the
//! union of every update received so far; typed getters (implemented in
//! the per-kind modules) read from it on each call. A getter returns its
//! default when the kind lacks the field, the version predates it, the
//! server never sent it, or the slot holds an unexpected type.

use crate::kind::EntityKind;
use crate::layout::Field;
use blockwire_core::{BlockPosition, ProtocolVersion, Rotations};
use blockwire_protocol::{AttributeSet, AttributeValue, EntityMetadataPacket};

#[derive(Debug, Clone, PartialEq)]
pub struct EntityData {
    kind: EntityKind,
    version: ProtocolVersion,
    slots: AttributeSet,
}

impl EntityData {
    pub fn new(kind: EntityKind, version: ProtocolVersion) -> Self {
        Self {
            kind,
            version,
            slots: AttributeSet::new(),
        }
    }

    pub fn with_slots(kind: EntityKind, version: ProtocolVersion, slots: AttributeSet) -> Self {
        Self {
            kind,
            version,
            slots,
        }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn slots(&self) -> &AttributeSet {
        &self.slots
    }

    pub fn is_a(&self, kind: EntityKind) -> bool {
        self.kind.is_a(kind)
    }

    /// Merge a partial update: keys present in `update` are replaced, all
    /// others are kept
    pub fn apply(&mut self, update: AttributeSet) {
        tracing::trace!(kind = %self.kind, slots = update.len(), "applying metadata update");
        self.slots.merge(update);
    }

    pub fn apply_packet(&mut self, packet: EntityMetadataPacket) {
        self.apply(packet.update);
    }

    /// Raw slot backing `field`
    pub fn slot(&self, field: &Field) -> Option<&AttributeValue> {
        if !self.kind.is_a(field.owner) {
            return None;
        }
        let key = field.key(self.version)?;
        self.slots.get(key)
    }

    // ===== Coercing readers =====

    fn coerce<T>(
        &self,
        field: &Field,
        convert: impl FnOnce(&AttributeValue) -> Option<T>,
    ) -> Option<T> {
        let value = self.slot(field)?;
        let converted = convert(value);
        if converted.is_none() {
            tracing::trace!(
                kind = %self.kind,
                owner = %field.owner,
                found = ?value.value_type(),
                "metadata slot has unexpected type"
            );
        }
        converted
    }

    pub(crate) fn read_bool(&self, field: &Field, default: bool) -> bool {
        self.coerce(field, AttributeValue::as_bool).unwrap_or(default)
    }

    pub(crate) fn read_int(&self, field: &Field) -> Option<i32> {
        self.coerce(field, AttributeValue::as_i32)
    }

    pub(crate) fn read_i32(&self, field: &Field, default: i32) -> i32 {
        self.read_int(field).unwrap_or(default)
    }

    pub(crate) fn read_f32(&self, field: &Field, default: f32) -> f32 {
        self.coerce(field, AttributeValue::as_f32).unwrap_or(default)
    }

    pub(crate) fn read_flags(&self, field: &Field) -> u32 {
        self.coerce(field, AttributeValue::as_flags).unwrap_or(0)
    }

    pub(crate) fn read_flag(&self, field: &Field, mask: u32) -> bool {
        self.read_flags(field) & mask != 0
    }

    pub(crate) fn read_text(&self, field: &Field) -> Option<&str> {
        self.slot(field).and_then(AttributeValue::as_text)
    }

    pub(crate) fn read_rotation(&self, field: &Field, default: Rotations) -> Rotations {
        self.coerce(field, |value| match value {
            AttributeValue::Rotation(rotation) => Some(*rotation),
            _ => None,
        })
        .unwrap_or(default)
    }

    pub(crate) fn read_uuid(&self, field: &Field) -> Option<u128> {
        self.coerce(field, |value| match value {
            AttributeValue::OptUuid(uuid) => Some(*uuid),
            _ => None,
        })
        .flatten()
    }

    pub(crate) fn read_opt_position(&self, field: &Field) -> Option<BlockPosition> {
        self.coerce(field, |value| match value {
            AttributeValue::OptPosition(position) => Some(*position),
            AttributeValue::Position(position) => Some(Some(*position)),
            _ => None,
        })
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SlotRule;
    use blockwire_core::ProtocolVersion as V;

    static HEALTH: Field = Field::new(
        EntityKind::Living,
        &[
            (V::V1_7_2, Some(SlotRule::Absolute(6))),
            (V::V1_9, Some(SlotRule::Offset(2))),
        ],
    );

    #[test]
    fn test_apply_merges() {
        let mut data = EntityData::new(EntityKind::Living, V::V1_12_2);
        data.apply([(0, AttributeValue::Byte(0x01)), (7, AttributeValue::Float(20.0))].into_iter().collect());
        data.apply([(7, AttributeValue::Float(5.5))].into_iter().collect());

        assert_eq!(data.slots().len(), 2);
        assert_eq!(data.slots().get(0), Some(&AttributeValue::Byte(0x01)));
        assert_eq!(data.read_f32(&HEALTH, 1.0), 5.5);
    }

    #[test]
    fn test_wrong_kind_reads_default() {
        let data = EntityData::with_slots(
            EntityKind::ItemEntity,
            V::V1_12_2,
            [(7, AttributeValue::Float(5.5))].into_iter().collect(),
        );
        assert_eq!(data.slot(&HEALTH), None);
        assert_eq!(data.read_f32(&HEALTH, 1.0), 1.0);
    }

    #[test]
    fn test_unexpected_type_reads_default() {
        let data = EntityData::with_slots(
            EntityKind::Living,
            V::V1_12_2,
            [(7, AttributeValue::String("full".into()))].into_iter().collect(),
        );
        assert_eq!(data.read_f32(&HEALTH, 1.0), 1.0);
    }

    #[test]
    fn test_coercion_widens() {
        let data = EntityData::with_slots(
            EntityKind::Living,
            V::V1_8,
            [(6, AttributeValue::Int(12))].into_iter().collect(),
        );
        assert_eq!(data.read_f32(&HEALTH, 1.0), 12.0);
        assert_eq!(data.read_i32(&HEALTH, 0), 12);
    }
}
