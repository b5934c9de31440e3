use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strata_tiles::{AIR, TileId};

use crate::coord::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkCoord, LocalPos};

/// Per-tile state beyond the tile id. Absent means the tile has none.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMeta {
    Crop { stage: u8 },
    Liquid { volume: u16 },
    Damage { dealt: u16 },
    Opaque(Vec<u8>),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickEntry {
    pub index: u32,
    pub due: f64,
}

/// Sparse tile block for one chunk coordinate.
///
/// Air is never stored: writing `AIR` removes the entry. The tick schedule is
/// kept sorted by `due`; entries with equal due times stay in insertion order.
#[derive(Clone, Debug)]
pub struct ChunkColumn {
    coord: ChunkCoord,
    tiles: HashMap<u32, TileId>,
    meta: HashMap<u32, TileMeta>,
    ticks: Vec<TickEntry>,
    dirty: bool,
    last_access: u64,
}

impl ChunkColumn {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            tiles: HashMap::new(),
            meta: HashMap::new(),
            ticks: Vec::new(),
            dirty: false,
            last_access: 0,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn get(&self, pos: LocalPos) -> TileId {
        self.get_index(pos.index())
    }

    #[inline]
    pub fn get_index(&self, index: u32) -> TileId {
        self.tiles.get(&index).copied().unwrap_or(AIR)
    }

    #[inline]
    pub fn set(&mut self, pos: LocalPos, id: TileId) {
        debug_assert!(pos.q < CHUNK_WIDTH && pos.r < CHUNK_WIDTH && pos.layer < CHUNK_DEPTH);
        self.set_index(pos.index(), id);
    }

    pub fn set_index(&mut self, index: u32, id: TileId) {
        if id == AIR {
            self.tiles.remove(&index);
        } else {
            self.tiles.insert(index, id);
        }
        self.dirty = true;
    }

    pub fn get_metadata(&self, pos: LocalPos) -> Option<&TileMeta> {
        self.meta.get(&pos.index())
    }

    /// `None` clears.
    pub fn set_metadata(&mut self, pos: LocalPos, meta: Option<TileMeta>) {
        let index = pos.index();
        match meta {
            Some(m) => {
                self.meta.insert(index, m);
            }
            None => {
                self.meta.remove(&index);
            }
        }
        self.dirty = true;
    }

    /// Set every cell of one horizontal slice.
    pub fn fill_layer(&mut self, layer: usize, id: TileId) {
        debug_assert!(layer < CHUNK_DEPTH);
        for r in 0..CHUNK_WIDTH {
            for q in 0..CHUNK_WIDTH {
                self.set_index(LocalPos::new(q, r, layer).index(), id);
            }
        }
    }

    pub fn fill(&mut self, id: TileId) {
        for layer in 0..CHUNK_DEPTH {
            self.fill_layer(layer, id);
        }
    }

    /// Insert after any entries already due at or before `due`.
    pub fn register_tick(&mut self, index: u32, due: f64) {
        let at = self.ticks.partition_point(|e| e.due <= due);
        self.ticks.insert(at, TickEntry { index, due });
        self.dirty = true;
    }

    /// Removes the earliest entry for `index`; returns whether one existed.
    pub fn deregister_tick(&mut self, index: u32) -> bool {
        match self.ticks.iter().position(|e| e.index == index) {
            Some(at) => {
                self.ticks.remove(at);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Drain every entry due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: f64) -> Vec<TickEntry> {
        let n = self.ticks.partition_point(|e| e.due <= now);
        if n > 0 {
            self.dirty = true;
        }
        self.ticks.drain(..n).collect()
    }

    #[inline]
    pub fn ticks(&self) -> &[TickEntry] {
        &self.ticks
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn last_access(&self) -> u64 {
        self.last_access
    }

    #[inline]
    pub fn touch(&mut self, stamp: u64) {
        self.last_access = stamp;
    }

    /// Stored (non-air) tiles.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn has_entry(&self, pos: LocalPos) -> bool {
        self.tiles.contains_key(&pos.index())
    }

    pub fn iter_tiles(&self) -> impl Iterator<Item = (LocalPos, TileId)> + '_ {
        self.tiles
            .iter()
            .map(|(&i, &id)| (LocalPos::from_index(i), id))
    }

    /// Dense copy in index order, for comparing chunk contents.
    pub fn to_dense(&self) -> Vec<TileId> {
        let mut out = vec![AIR; crate::coord::CHUNK_VOLUME];
        for (&i, &id) in &self.tiles {
            out[i as usize] = id;
        }
        out
    }
}
