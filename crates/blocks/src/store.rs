//! Per-version registry store
//!
//! Holds one [`BlockRegistry`] per protocol version that has a table and
//! picks the right one for any negotiated version. Tables are loaded once
//! and shared read-only afterwards.

use crate::definitions::load_registry_file;
use crate::error::{RegistryError, Result};
use crate::legacy::build_legacy_registry;
use crate::registry::{BlockRegistry, IdEncoding};
use crate::state::DEFAULT_NAMESPACE;
use blockwire_config::DecoderConfig;
use blockwire_core::ProtocolVersion;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of a version's table inside `<definitions_dir>/<version name>/`
pub const DEFINITIONS_FILE: &str = "blocks.json";

pub struct RegistryStore {
    tables: RwLock<BTreeMap<ProtocolVersion, Arc<BlockRegistry>>>,
    legacy: Arc<BlockRegistry>,
    definitions_dir: Option<PathBuf>,
    default_namespace: String,
}

impl RegistryStore {
    /// Store with only the built-in legacy table
    pub fn new() -> Result<Self> {
        Ok(Self {
            tables: RwLock::new(BTreeMap::new()),
            legacy: Arc::new(build_legacy_registry(ProtocolVersion::V1_12_2)?),
            definitions_dir: None,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        })
    }

    /// Store that reads tables from `<dir>/<version name>/blocks.json`
    pub fn with_definitions_dir<P: AsRef<Path>>(dir: P, default_namespace: &str) -> Result<Self> {
        let mut store = Self::new()?;
        store.definitions_dir = Some(dir.as_ref().to_path_buf());
        store.default_namespace = default_namespace.to_string();
        Ok(store)
    }

    /// Store over the configured definitions directory. Tables are not
    /// read until [`load_all`](Self::load_all) or
    /// [`load_version`](Self::load_version).
    pub fn from_config(config: &DecoderConfig) -> Result<Self> {
        Self::with_definitions_dir(&config.definitions_dir, &config.default_namespace)
    }

    pub fn insert(&self, registry: BlockRegistry) -> Arc<BlockRegistry> {
        let registry = Arc::new(registry);
        self.tables
            .write()
            .insert(registry.version(), Arc::clone(&registry));
        registry
    }

    /// Load the table file for one version from the definitions directory
    pub fn load_version(&self, version: ProtocolVersion) -> Result<Arc<BlockRegistry>> {
        let dir = self
            .definitions_dir
            .as_ref()
            .ok_or(RegistryError::NoTable(version))?;
        let path = dir.join(version.name()).join(DEFINITIONS_FILE);
        let registry = load_registry_file(&path, version, &self.default_namespace)?;
        Ok(self.insert(registry))
    }

    /// Load every table found in the definitions directory.
    ///
    /// Directories not named after a known version are skipped. Returns the
    /// number of tables loaded.
    pub fn load_all(&self) -> Result<usize> {
        let Some(dir) = self.definitions_dir.as_ref() else {
            return Ok(0);
        };

        let mut loaded = 0;
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(version) = name.to_str().and_then(ProtocolVersion::by_name) else {
                tracing::debug!(entry = ?name, "skipping non-version entry");
                continue;
            };
            if !entry.path().join(DEFINITIONS_FILE).is_file() {
                continue;
            }
            self.load_version(version)?;
            loaded += 1;
        }

        tracing::info!(tables = loaded, dir = %dir.display(), "loaded block tables");
        Ok(loaded)
    }

    /// Table to use for `version`.
    ///
    /// Picks the newest table with the same id encoding at or below the
    /// version, then the oldest table of that encoding above it. Versions
    /// before the flattening fall back to the built-in legacy table.
    pub fn for_version(&self, version: ProtocolVersion) -> Option<Arc<BlockRegistry>> {
        let encoding = IdEncoding::for_version(version);
        let tables = self.tables.read();

        let at_or_below = tables
            .range(..=version)
            .rev()
            .map(|(_, table)| table)
            .find(|table| table.encoding() == encoding);
        let above = || {
            tables
                .range(version..)
                .map(|(_, table)| table)
                .find(|table| table.encoding() == encoding)
        };

        if let Some(table) = at_or_below.or_else(above) {
            return Some(Arc::clone(table));
        }
        match encoding {
            IdEncoding::Legacy => Some(Arc::clone(&self.legacy)),
            IdEncoding::Flattened => {
                tracing::warn!(%version, "no block table for version");
                None
            }
        }
    }

    /// Like [`for_version`](Self::for_version) but an error when nothing fits
    pub fn require(&self, version: ProtocolVersion) -> Result<Arc<BlockRegistry>> {
        self.for_version(version)
            .ok_or(RegistryError::NoTable(version))
    }

    pub fn legacy(&self) -> Arc<BlockRegistry> {
        Arc::clone(&self.legacy)
    }

    pub fn loaded_versions(&self) -> Vec<ProtocolVersion> {
        self.tables.read().keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BlockState;

    fn table(version: ProtocolVersion, identifier: &str) -> BlockRegistry {
        let mut registry = BlockRegistry::new(version, IdEncoding::for_version(version));
        registry
            .insert(1, BlockState::new(DEFAULT_NAMESPACE, identifier))
            .unwrap();
        registry
    }

    #[test]
    fn test_nearest_table_at_or_below() {
        let store = RegistryStore::new().unwrap();
        store.insert(table(ProtocolVersion::V1_13, "a"));
        store.insert(table(ProtocolVersion::V1_16, "b"));

        let pick = |v| store.for_version(v).unwrap().state(crate::StateRef(1)).identifier.clone();
        assert_eq!(pick(ProtocolVersion::V1_13_2), "a");
        assert_eq!(pick(ProtocolVersion::V1_16_5), "b");
        assert_eq!(pick(ProtocolVersion::V1_16), "b");
    }

    #[test]
    fn test_falls_forward_within_encoding() {
        let store = RegistryStore::new().unwrap();
        store.insert(table(ProtocolVersion::V1_14, "a"));
        let picked = store.for_version(ProtocolVersion::V1_13).unwrap();
        assert_eq!(picked.version(), ProtocolVersion::V1_14);
    }

    #[test]
    fn test_never_crosses_flattening() {
        let store = RegistryStore::new().unwrap();
        store.insert(table(ProtocolVersion::V1_13, "flat"));

        let legacy = store.for_version(ProtocolVersion::V1_12_2).unwrap();
        assert_eq!(legacy.encoding(), IdEncoding::Legacy);
        assert!(Arc::ptr_eq(&legacy, &store.legacy()));

        let empty = RegistryStore::new().unwrap();
        assert!(empty.for_version(ProtocolVersion::V1_18).is_none());
        assert!(matches!(
            empty.require(ProtocolVersion::V1_18),
            Err(RegistryError::NoTable(_))
        ));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let version_dir = dir.path().join(ProtocolVersion::V1_13_2.name());
        std::fs::create_dir_all(&version_dir).unwrap();
        std::fs::write(
            version_dir.join(DEFINITIONS_FILE),
            r#"{ "red_wool": { "states": [ { "id": 1084 } ] } }"#,
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();

        let store = RegistryStore::with_definitions_dir(dir.path(), DEFAULT_NAMESPACE).unwrap();
        assert_eq!(store.load_all().unwrap(), 1);
        assert_eq!(store.loaded_versions(), vec![ProtocolVersion::V1_13_2]);

        let registry = store.for_version(ProtocolVersion::V1_15).unwrap();
        assert_eq!(registry.state(registry.state_for(1084)).identifier, "red_wool");
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let version_dir = dir.path().join(ProtocolVersion::V1_16_5.name());
        std::fs::create_dir_all(&version_dir).unwrap();
        std::fs::write(
            version_dir.join(DEFINITIONS_FILE),
            r#"{ "lamp": { "states": [ { "id": 9 } ] } }"#,
        )
        .unwrap();

        let config = DecoderConfig {
            definitions_dir: dir.path().to_path_buf(),
            default_namespace: "custom".into(),
            ..DecoderConfig::default()
        };
        let store = RegistryStore::from_config(&config).unwrap();
        let registry = store.load_version(ProtocolVersion::V1_16_5).unwrap();
        assert_eq!(registry.state(registry.state_for(9)).namespace, "custom");
    }

    #[test]
    fn test_load_version_without_dir() {
        let store = RegistryStore::new().unwrap();
        assert!(matches!(
            store.load_version(ProtocolVersion::V1_13),
            Err(RegistryError::NoTable(_))
        ));
    }
}
