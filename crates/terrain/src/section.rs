//! Decoded 16x16x16 block volume

use crate::nibble::NibbleArray;
use blockwire_blocks::{BlockRegistry, IdEncoding, StateRef};
use blockwire_core::{cell_index, SECTION_CELLS};
use std::collections::HashMap;

/// One section of a column.
///
/// Cells are indexed `y << 8 | z << 4 | x`; `None` is air. Built once per
/// decode and never patched in place: a re-sent section replaces the old
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainSection {
    cells: Box<[Option<StateRef>]>,
    pub block_light: Option<NibbleArray>,
    pub sky_light: Option<NibbleArray>,
    /// 4x4x4 biome ids (1.18+)
    pub biomes: Option<Box<[u32]>>,
}

impl TerrainSection {
    /// Section with every cell air
    pub fn empty() -> Self {
        Self {
            cells: vec![None; SECTION_CELLS].into_boxed_slice(),
            block_light: None,
            sky_light: None,
            biomes: None,
        }
    }

    pub(crate) fn from_cells(cells: Box<[Option<StateRef>]>) -> Self {
        debug_assert_eq!(cells.len(), SECTION_CELLS);
        Self {
            cells,
            block_light: None,
            sky_light: None,
            biomes: None,
        }
    }

    /// Resolve one global id per cell through `registry`.
    ///
    /// Legacy tables take `id << 4 | meta` values; flattened tables take
    /// block state ids. Each distinct id is resolved once.
    pub fn from_global_ids(registry: &BlockRegistry, ids: &[u32]) -> Self {
        let mut resolver = CellResolver::new(registry);
        Self::from_cells(ids.iter().map(|id| resolver.resolve(*id)).collect())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<StateRef> {
        self.cells[cell_index(x, y, z)]
    }

    pub fn cells(&self) -> &[Option<StateRef>] {
        &self.cells
    }

    /// Non-air cells
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn block_light_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.block_light
            .as_ref()
            .map_or(0, |light| light.get(cell_index(x, y, z)))
    }

    /// Sky light; 0 when the section has none
    pub fn sky_light_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sky_light
            .as_ref()
            .map_or(0, |light| light.get(cell_index(x, y, z)))
    }

    pub fn biome_at(&self, x: usize, y: usize, z: usize) -> Option<u32> {
        let biomes = self.biomes.as_ref()?;
        biomes.get(((y >> 2) << 4) | ((z >> 2) << 2) | (x >> 2)).copied()
    }
}

/// Maps global ids to cells, caching per distinct id
pub(crate) struct CellResolver<'a> {
    registry: &'a BlockRegistry,
    cache: HashMap<u32, Option<StateRef>>,
}

impl<'a> CellResolver<'a> {
    pub(crate) fn new(registry: &'a BlockRegistry) -> Self {
        Self {
            registry,
            cache: HashMap::new(),
        }
    }

    pub(crate) fn resolve(&mut self, id: u32) -> Option<StateRef> {
        let registry = self.registry;
        *self.cache.entry(id).or_insert_with(|| {
            let state = match registry.encoding() {
                // direct palettes may carry more bits than a block id holds
                IdEncoding::Legacy => match u16::try_from(id >> 4) {
                    Ok(block) => registry.resolve_legacy(block, (id & 0x0F) as u8),
                    Err(_) => StateRef::UNKNOWN,
                },
                IdEncoding::Flattened => registry.state_for(id),
            };
            if registry.state(state).is_air() {
                None
            } else {
                Some(state)
            }
        })
    }
}
