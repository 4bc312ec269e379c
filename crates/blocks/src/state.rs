//! Block state value type

use crate::properties::{BlockProperty, PropertyValue};
use crate::rotation::BlockRotation;
use std::collections::BTreeSet;
use std::fmt;

pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A block type plus its configuration
///
/// Equality is structural. Properties live in a sorted set, so two states
/// built from the same pairs in a different order are equal and hash
/// equally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    pub namespace: String,
    pub identifier: String,
    pub properties: BTreeSet<BlockProperty>,
    pub rotation: BlockRotation,
}

impl BlockState {
    pub fn new(namespace: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            identifier: identifier.into(),
            properties: BTreeSet::new(),
            rotation: BlockRotation::None,
        }
    }

    /// Placeholder for ids a table does not know
    pub fn unknown() -> Self {
        Self::new("blockwire", "unknown")
    }

    pub fn with_property(mut self, property: BlockProperty) -> Self {
        self.properties.insert(property);
        self
    }

    pub fn with_rotation(mut self, rotation: BlockRotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value)
    }

    /// `namespace:identifier`
    pub fn full_identifier(&self) -> String {
        format!("{}:{}", self.namespace, self.identifier)
    }

    pub fn is_unknown(&self) -> bool {
        self.namespace == "blockwire" && self.identifier == "unknown"
    }

    /// Any of the empty block types; terrain stores these as no block
    pub fn is_air(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
            && matches!(self.identifier.as_str(), "air" | "cave_air" | "void_air")
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.identifier)?;
        if self.properties.is_empty() && self.rotation == BlockRotation::None {
            return Ok(());
        }
        f.write_str("[")?;
        let mut first = true;
        if self.rotation != BlockRotation::None {
            write!(f, "rotation={}", self.rotation)?;
            first = false;
        }
        for property in &self.properties {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}", property)?;
            first = false;
        }
        f.write_str("]")
    }
}

/// Index of an interned state inside one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateRef(pub(crate) u32);

impl StateRef {
    /// Every registry keeps the unknown placeholder at index 0
    pub const UNKNOWN: StateRef = StateRef(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}
