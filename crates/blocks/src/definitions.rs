//! Definition table loader
//!
//! # Format
//! ```text
//! {
//!   "minecraft:red_wool": { "states": [ { "id": 1084 } ] },
//!   "furnace": {
//!     "states": [
//!       { "id": 61, "meta": 2, "properties": { "facing": "north", "lit": false } }
//!     ]
//!   }
//! }
//! ```
//!
//! Flattened tables (1.13+) use `id` as the block state id. Earlier tables
//! give the legacy block id plus `meta`, stored as `id << 4 | meta`.
//!
//! Bare identifiers take the default namespace. The first of `facing`,
//! `rotation` and `orientation` becomes the state's rotation; every other
//! property must be in the known vocabulary or loading fails.

use crate::error::{RegistryError, Result};
use crate::properties::{BlockProperty, PropertyParseError};
use crate::registry::{BlockRegistry, IdEncoding};
use crate::rotation::{BlockRotation, ROTATION_PROPERTIES};
use crate::state::BlockState;
use blockwire_core::ProtocolVersion;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct BlockDefinition {
    #[serde(default)]
    states: Vec<StateDefinition>,
}

#[derive(Debug, Deserialize)]
struct StateDefinition {
    id: u32,
    #[serde(default)]
    meta: Option<u32>,
    #[serde(default)]
    properties: BTreeMap<String, RawValue>,
}

/// Property values appear as strings, booleans or numbers depending on
/// the tool that produced the table
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(v) => write!(f, "{}", v),
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::Text(v) => f.write_str(v),
        }
    }
}

/// Build a table for `version` from definition JSON
pub fn load_registry(
    json: &str,
    version: ProtocolVersion,
    default_namespace: &str,
) -> Result<BlockRegistry> {
    let definitions: BTreeMap<String, BlockDefinition> = serde_json::from_str(json)?;
    let encoding = IdEncoding::for_version(version);
    let mut registry = BlockRegistry::new(version, encoding);

    for (name, definition) in &definitions {
        let (namespace, identifier) = split_identifier(name, default_namespace)?;
        for state_definition in &definition.states {
            let id = numeric_id(identifier, state_definition, encoding)?;
            let state = build_state(namespace, identifier, &state_definition.properties)?;
            registry.insert(id, state)?;
        }
    }

    tracing::debug!(
        states = registry.len(),
        blocks = definitions.len(),
        %version,
        "loaded block definitions"
    );
    Ok(registry)
}

pub fn load_registry_file<P: AsRef<Path>>(
    path: P,
    version: ProtocolVersion,
    default_namespace: &str,
) -> Result<BlockRegistry> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    tracing::info!(path = %path.as_ref().display(), %version, "reading block definitions");
    load_registry(&contents, version, default_namespace)
}

fn split_identifier<'a>(name: &'a str, default_namespace: &'a str) -> Result<(&'a str, &'a str)> {
    let (namespace, identifier) = match name.split_once(':') {
        Some(parts) => parts,
        None => (default_namespace, name),
    };
    if namespace.is_empty() || identifier.is_empty() || identifier.contains(':') {
        return Err(RegistryError::InvalidIdentifier(name.to_string()));
    }
    Ok((namespace, identifier))
}

fn numeric_id(identifier: &str, state: &StateDefinition, encoding: IdEncoding) -> Result<u32> {
    match encoding {
        IdEncoding::Flattened => Ok(state.id),
        IdEncoding::Legacy => {
            let meta = state.meta.unwrap_or(0);
            if meta > 15 {
                return Err(RegistryError::InvalidMeta {
                    identifier: identifier.to_string(),
                    meta,
                });
            }
            if state.id > u16::MAX as u32 {
                return Err(RegistryError::LegacyIdOutOfRange {
                    identifier: identifier.to_string(),
                    id: state.id,
                });
            }
            Ok(state.id << 4 | meta)
        }
    }
}

fn build_state(
    namespace: &str,
    identifier: &str,
    properties: &BTreeMap<String, RawValue>,
) -> Result<BlockState> {
    let mut state = BlockState::new(namespace, identifier);

    let rotation_key = ROTATION_PROPERTIES
        .iter()
        .find(|name| properties.contains_key(**name))
        .copied();

    for (name, raw) in properties {
        let value = raw.to_string();
        if Some(name.as_str()) == rotation_key {
            let rotation = BlockRotation::from_name(&value).ok_or_else(|| {
                RegistryError::UnknownPropertyValue {
                    identifier: identifier.to_string(),
                    name: name.clone(),
                    value: value.clone(),
                }
            })?;
            state = state.with_rotation(rotation);
            continue;
        }

        let property = BlockProperty::parse(name, &value).map_err(|err| match err {
            PropertyParseError::UnknownName => RegistryError::UnknownProperty {
                identifier: identifier.to_string(),
                name: name.clone(),
            },
            PropertyParseError::UnknownValue => RegistryError::UnknownPropertyValue {
                identifier: identifier.to_string(),
                name: name.clone(),
                value,
            },
        })?;
        state = state.with_property(property);
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyValue;
    use crate::state::DEFAULT_NAMESPACE;
    use blockwire_core::WireError;

    const FLATTENED: &str = r#"{
        "minecraft:red_wool": { "states": [ { "id": 1084 } ] },
        "oak_stairs": {
            "states": [
                { "id": 1953, "properties": { "facing": "north", "half": "top", "shape": "straight", "waterlogged": true } },
                { "id": 1954, "properties": { "facing": "north", "half": "top", "shape": "straight", "waterlogged": false } }
            ]
        },
        "oak_sign": {
            "states": [
                { "id": 3382, "properties": { "rotation": 8, "waterlogged": false } }
            ]
        },
        "jigsaw": {
            "states": [ { "id": 15760, "properties": { "orientation": "down_east" } } ]
        },
        "farmland": {
            "states": [ { "id": 3365, "properties": { "moisture": "7" } } ]
        }
    }"#;

    #[test]
    fn test_red_wool_flattened() {
        let registry = load_registry(FLATTENED, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).unwrap();
        let state = registry.state(registry.state_for(1084));
        assert_eq!(state.full_identifier(), "minecraft:red_wool");
        assert!(state.properties.is_empty());
        assert_eq!(state.rotation, BlockRotation::None);
    }

    #[test]
    fn test_state_id_roundtrip() {
        let registry = load_registry(FLATTENED, ProtocolVersion::V1_16_5, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(registry.len(), 6);
        for (id, state) in registry.iter() {
            assert_eq!(registry.id_for(state), Some(id));
            assert_eq!(registry.state(registry.state_for(id)), state);
        }
    }

    #[test]
    fn test_rotation_lifted() {
        let registry = load_registry(FLATTENED, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).unwrap();

        let stairs = registry.state(registry.state_for(1953));
        assert_eq!(stairs.rotation, BlockRotation::North);
        assert_eq!(stairs.property("facing"), None);
        assert_eq!(stairs.property("waterlogged"), Some(PropertyValue::Bool(true)));
        assert_eq!(stairs.property("half"), Some(PropertyValue::Named("top")));

        let sign = registry.state(registry.state_for(3382));
        assert_eq!(sign.rotation, BlockRotation::North);

        let jigsaw = registry.state(registry.state_for(15760));
        assert_eq!(jigsaw.rotation, BlockRotation::DownEast);

        let farmland = registry.state(registry.state_for(3365));
        assert_eq!(farmland.property("moisture"), Some(PropertyValue::Int(7)));
    }

    #[test]
    fn test_unknown_property_is_fatal() {
        let json = r#"{ "stone": { "states": [ { "id": 1, "properties": { "sparkly": true } } ] } }"#;
        let err = load_registry(json, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownProperty { ref name, .. } if name == "sparkly"));

        let json = r#"{ "snow": { "states": [ { "id": 1, "properties": { "layers": 9 } } ] } }"#;
        let err = load_registry(json, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownPropertyValue { .. }));

        let json = r#"{ "furnace": { "states": [ { "id": 1, "properties": { "facing": "inward" } } ] } }"#;
        assert!(load_registry(json, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).is_err());
    }

    #[test]
    fn test_transitional_ids() {
        let json = r#"{
            "wool": { "states": [ { "id": 35, "meta": 14 } ] },
            "furnace": { "states": [ { "id": 61, "meta": 2, "properties": { "facing": "north" } } ] }
        }"#;
        let registry = load_registry(json, ProtocolVersion::V1_12_2, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(registry.encoding(), IdEncoding::Legacy);
        assert_eq!(registry.state(registry.resolve_legacy(35, 14)).identifier, "wool");
        assert_eq!(
            registry.state(registry.resolve_legacy(61, 2)).rotation,
            BlockRotation::North
        );

        let json = r#"{ "wool": { "states": [ { "id": 35, "meta": 16 } ] } }"#;
        assert!(matches!(
            load_registry(json, ProtocolVersion::V1_12_2, DEFAULT_NAMESPACE),
            Err(RegistryError::InvalidMeta { meta: 16, .. })
        ));
    }

    #[test]
    fn test_transitional_id_out_of_range() {
        // 2^28 + 1 would collide with id 1 once shifted
        let json = r#"{ "stone": { "states": [ { "id": 268435457 } ] } }"#;
        let err = load_registry(json, ProtocolVersion::V1_12_2, DEFAULT_NAMESPACE).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::LegacyIdOutOfRange { id: 268435457, .. }
        ));
        assert!(matches!(WireError::from(err), WireError::UnknownDefinition(_)));

        let json = r#"{ "stone": { "states": [ { "id": 65535 } ] } }"#;
        let registry = load_registry(json, ProtocolVersion::V1_12_2, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(registry.state(registry.resolve_legacy(65535, 0)).identifier, "stone");

        // flattened ids are never shifted
        let json = r#"{ "stone": { "states": [ { "id": 268435457 } ] } }"#;
        assert!(load_registry(json, ProtocolVersion::V1_16_5, DEFAULT_NAMESPACE).is_ok());
    }

    #[test]
    fn test_namespaces() {
        let json = r#"{
            "stone": { "states": [ { "id": 1 } ] },
            "custom:stone": { "states": [ { "id": 2 } ] }
        }"#;
        let registry = load_registry(json, ProtocolVersion::V1_14, "minecraft").unwrap();
        assert_eq!(registry.state(registry.state_for(1)).namespace, "minecraft");
        assert_eq!(registry.state(registry.state_for(2)).namespace, "custom");

        let json = r#"{ "a:b:c": { "states": [ { "id": 1 } ] } }"#;
        assert!(matches!(
            load_registry(json, ProtocolVersion::V1_14, "minecraft"),
            Err(RegistryError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let json = r#"{ "stone": { "states": [ { "id": 1 }, { "id": 2 } ] } }"#;
        assert!(matches!(
            load_registry(json, ProtocolVersion::V1_13, DEFAULT_NAMESPACE),
            Err(RegistryError::DuplicateState { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, FLATTENED).unwrap();
        let registry = load_registry_file(&path, ProtocolVersion::V1_13, DEFAULT_NAMESPACE).unwrap();
        assert_eq!(registry.len(), 6);

        assert!(matches!(
            load_registry_file(dir.path().join("missing.json"), ProtocolVersion::V1_13, DEFAULT_NAMESPACE),
            Err(RegistryError::FileError(_))
        ));
    }
}
