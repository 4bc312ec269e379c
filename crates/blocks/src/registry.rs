//! Interned block state table for one protocol version
//!
//! # Layout
//! - `states`: arena of interned states, index 0 is the unknown placeholder
//! - `ids`: arena index to numeric id
//! - `by_id`: numeric id to arena index
//! - `by_value`: state value to arena index
//!
//! The arena holds `Arc<BlockState>` so the value map shares the arena's
//! allocation instead of cloning every state.

use crate::error::{RegistryError, Result};
use crate::state::{BlockState, StateRef};
use blockwire_core::ProtocolVersion;
use std::collections::HashMap;
use std::sync::Arc;

/// How numeric ids of a table are formed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdEncoding {
    /// Pre-flattening: `legacy id << 4 | metadata`
    Legacy,
    /// Flattened block state ids
    Flattened,
}

impl IdEncoding {
    pub fn for_version(version: ProtocolVersion) -> Self {
        if version.is_flattened() {
            IdEncoding::Flattened
        } else {
            IdEncoding::Legacy
        }
    }
}

#[derive(Debug)]
pub struct BlockRegistry {
    version: ProtocolVersion,
    encoding: IdEncoding,
    states: Vec<Arc<BlockState>>,
    ids: Vec<Option<u32>>,
    by_id: HashMap<u32, StateRef>,
    by_value: HashMap<Arc<BlockState>, StateRef>,
}

impl BlockRegistry {
    /// Empty table holding only the unknown placeholder
    pub fn new(version: ProtocolVersion, encoding: IdEncoding) -> Self {
        Self {
            version,
            encoding,
            states: vec![Arc::new(BlockState::unknown())],
            ids: vec![None],
            by_id: HashMap::new(),
            by_value: HashMap::new(),
        }
    }

    /// Add a state under `id`.
    ///
    /// Ids and state values must both be unique within one table so that
    /// `state_for` and `id_for` stay exact inverses.
    pub fn insert(&mut self, id: u32, state: BlockState) -> Result<StateRef> {
        if let Some(existing) = self.by_id.get(&id) {
            return Err(RegistryError::DuplicateId {
                id,
                existing: self.states[existing.index()].to_string(),
                duplicate: state.to_string(),
            });
        }
        if let Some(existing) = self.by_value.get(&state) {
            return Err(RegistryError::DuplicateState {
                state: state.to_string(),
                existing: self.ids[existing.index()].unwrap_or_default(),
                duplicate: id,
            });
        }

        let state_ref = StateRef(self.states.len() as u32);
        let state = Arc::new(state);
        self.states.push(Arc::clone(&state));
        self.ids.push(Some(id));
        self.by_id.insert(id, state_ref);
        self.by_value.insert(state, state_ref);
        Ok(state_ref)
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn encoding(&self) -> IdEncoding {
        self.encoding
    }

    /// Number of states, not counting the placeholder
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a numeric id, falling back to [`StateRef::UNKNOWN`]
    pub fn state_for(&self, id: u32) -> StateRef {
        match self.by_id.get(&id) {
            Some(state_ref) => *state_ref,
            None => {
                tracing::trace!(id, version = %self.version, "unknown block id");
                StateRef::UNKNOWN
            }
        }
    }

    pub fn try_state_for(&self, id: u32) -> Option<StateRef> {
        self.by_id.get(&id).copied()
    }

    /// Resolve a pre-flattening `(id, metadata)` pair.
    ///
    /// Tries the exact pair, then metadata 0, then gives the unknown
    /// placeholder. Flattened tables have no metadata and always give the
    /// placeholder.
    pub fn resolve_legacy(&self, id: u16, data: u8) -> StateRef {
        if self.encoding != IdEncoding::Legacy {
            return StateRef::UNKNOWN;
        }
        let base = (id as u32) << 4;
        self.try_state_for(base | (data as u32 & 0x0F))
            .or_else(|| self.try_state_for(base))
            .unwrap_or_else(|| {
                tracing::trace!(id, data, "unknown legacy block");
                StateRef::UNKNOWN
            })
    }

    pub fn id_for(&self, state: &BlockState) -> Option<u32> {
        self.by_value
            .get(state)
            .and_then(|state_ref| self.ids[state_ref.index()])
    }

    pub fn id_of(&self, state_ref: StateRef) -> Option<u32> {
        self.ids.get(state_ref.index()).copied().flatten()
    }

    pub fn lookup(&self, state: &BlockState) -> Option<StateRef> {
        self.by_value.get(state).copied()
    }

    /// The interned state behind a reference; out-of-range references
    /// resolve to the placeholder
    pub fn state(&self, state_ref: StateRef) -> &BlockState {
        self.states
            .get(state_ref.index())
            .unwrap_or(&self.states[StateRef::UNKNOWN.index()])
    }

    /// Shared handle to an interned state
    pub fn state_arc(&self, state_ref: StateRef) -> Arc<BlockState> {
        Arc::clone(
            self.states
                .get(state_ref.index())
                .unwrap_or(&self.states[StateRef::UNKNOWN.index()]),
        )
    }

    /// All `(id, state)` pairs, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BlockState)> {
        self.ids
            .iter()
            .zip(self.states.iter())
            .filter_map(|(id, state)| id.map(|id| (id, state.as_ref())))
    }
}
