use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use rayon::prelude::*;

use strata_chunk::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkColumn, ChunkCoord, TickEntry, TileMeta};
use strata_tiles::{AIR, TileId, TileRegistry};
use strata_world::{GenCtx, OceanIndex, World};

use crate::RuntimeError;
use crate::generate::{chunk_in_world, generate_column};
use crate::palette::TilePalette;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub generated: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// Lazily generated, LRU-bounded store of chunk columns for one world.
///
/// Recency is an access sequence number bumped on every chunk touch, so two
/// accesses in the same game step still order strictly. Game time only
/// drives tick due times.
pub struct WorldCache {
    world: World,
    ctx: GenCtx,
    ocean: OceanIndex,
    palette: TilePalette,
    columns: HashMap<ChunkCoord, ChunkColumn>,
    capacity: usize,
    access_seq: u64,
    game_time: f64,
    hits: u64,
    misses: u64,
    generated: u64,
    evictions: u64,
}

impl WorldCache {
    /// Resolves every generator tile name and builds the ocean index up front.
    ///
    /// Params that skipped `WorldGenConfig::validate` still get their world
    /// shape checked here; everything else is trusted.
    pub fn new(world: World, registry: &TileRegistry, capacity: usize) -> Result<Self, RuntimeError> {
        world.params.check_shape()?;
        let palette = TilePalette::resolve(&world.params, registry)?;
        let ctx = world.make_gen_ctx();
        let ocean = OceanIndex::build(&ctx);
        Ok(Self {
            world,
            ctx,
            ocean,
            palette,
            columns: HashMap::new(),
            capacity: capacity.max(1),
            access_seq: 0,
            game_time: 0.0,
            hits: 0,
            misses: 0,
            generated: 0,
            evictions: 0,
        })
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn ocean(&self) -> &OceanIndex {
        &self.ocean
    }

    #[inline]
    pub fn palette(&self) -> &TilePalette {
        &self.palette
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tile at a world coordinate; air outside the world.
    pub fn get_tile(&mut self, q: i32, r: i32, layer: i32) -> TileId {
        if !self.world.in_bounds(q, r, layer) {
            return AIR;
        }
        let pos = ChunkCoord::local_of(q, r, layer);
        self.ensure_column(ChunkCoord::from_world(q, r, layer)).get(pos)
    }

    /// Write a tile; ignored outside the world.
    pub fn set_tile(&mut self, q: i32, r: i32, layer: i32, id: TileId) {
        if !self.world.in_bounds(q, r, layer) {
            return;
        }
        let pos = ChunkCoord::local_of(q, r, layer);
        self.ensure_column(ChunkCoord::from_world(q, r, layer))
            .set(pos, id);
    }

    /// Make the focus chunk, its six neighbours, and the slices above and
    /// below each of them resident.
    pub fn preload_near(&mut self, q: i32, r: i32, layer: i32) {
        let center = ChunkCoord::from_world(q, r, layer);
        let mut ring = [center; 7];
        ring[1..].copy_from_slice(&center.neighbor_columns());
        for dl in -1..=1 {
            for c in ring {
                let coord = c.offset(0, 0, dl);
                if chunk_in_world(coord, self.world.radius(), self.world.depth()) {
                    self.ensure_column(coord);
                }
            }
        }
    }

    /// Every chunk coordinate that intersects the world.
    pub fn world_chunks(&self) -> Vec<ChunkCoord> {
        let radius = self.world.radius();
        let depth = self.world.depth();
        let w = CHUNK_WIDTH as i32;
        let lo = (-radius).div_euclid(w);
        let hi = radius.div_euclid(w);
        let slices = (depth + CHUNK_DEPTH as i32 - 1) / CHUNK_DEPTH as i32;
        let mut out = Vec::new();
        for cr in lo..=hi {
            for cq in lo..=hi {
                for cl in 0..slices {
                    let coord = ChunkCoord::new(cq, cr, cl);
                    if chunk_in_world(coord, radius, depth) {
                        out.push(coord);
                    }
                }
            }
        }
        out
    }

    /// Generate every missing chunk of the world in parallel. Small worlds only.
    ///
    /// Work is split into batches of at most `capacity` chunks, each inserted
    /// before the next is generated. Returns how many chunks were generated.
    pub fn preload_all(&mut self) -> usize {
        let todo: Vec<ChunkCoord> = self
            .world_chunks()
            .into_iter()
            .filter(|c| !self.columns.contains_key(c))
            .collect();
        let total = todo.len() + self.columns.len();
        if total > self.capacity {
            log::warn!(
                target: "cache",
                "preload_all: world has {} chunks but capacity is {}; the oldest will be evicted",
                total,
                self.capacity
            );
        }
        let mut n = 0;
        for batch in todo.chunks(self.capacity) {
            let built = self.generate_batch(batch);
            n += built.len();
            for chunk in built {
                self.misses += 1;
                self.generated += 1;
                self.insert(chunk);
            }
        }
        log::info!(target: "cache", "preload_all generated {} chunks", n);
        n
    }

    fn generate_batch(&self, coords: &[ChunkCoord]) -> Vec<ChunkColumn> {
        let world = &self.world;
        let ocean = &self.ocean;
        let palette = &self.palette;
        coords
            .par_iter()
            .map_init(
                || world.make_gen_ctx(),
                |ctx, &coord| generate_column(ctx, ocean, palette, coord),
            )
            .collect()
    }

    /// Fetch or generate `coord`, marking it most recently used.
    pub fn ensure_column(&mut self, coord: ChunkCoord) -> &mut ChunkColumn {
        self.access_seq += 1;
        let stamp = self.access_seq;
        if !self.columns.contains_key(&coord) && self.columns.len() >= self.capacity {
            self.evict_lru();
        }
        let chunk = match self.columns.entry(coord) {
            Entry::Occupied(e) => {
                self.hits += 1;
                e.into_mut()
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                self.generated += 1;
                e.insert(generate_column(&self.ctx, &self.ocean, &self.palette, coord))
            }
        };
        chunk.touch(stamp);
        chunk
    }

    fn insert(&mut self, mut chunk: ChunkColumn) {
        let coord = chunk.coord();
        if !self.columns.contains_key(&coord) && self.columns.len() >= self.capacity {
            self.evict_lru();
        }
        self.access_seq += 1;
        chunk.touch(self.access_seq);
        self.columns.insert(coord, chunk);
    }

    fn evict_lru(&mut self) {
        let victim = self
            .columns
            .values()
            .min_by_key(|c| c.last_access())
            .map(|c| c.coord());
        if let Some(coord) = victim {
            self.evict(coord);
        }
    }

    /// Drop a resident chunk. Dirty chunks lose their edits; nothing persists yet.
    pub fn evict(&mut self, coord: ChunkCoord) -> Option<ChunkColumn> {
        let chunk = self.columns.remove(&coord)?;
        self.evictions += 1;
        if chunk.is_dirty() {
            log::debug!(
                target: "cache",
                "evicting dirty chunk ({}, {}, {}) without persistence",
                coord.cq,
                coord.cr,
                coord.cl
            );
        }
        Some(chunk)
    }

    #[inline]
    pub fn is_resident(&self, coord: ChunkCoord) -> bool {
        self.columns.contains_key(&coord)
    }

    /// Resident coordinates, sorted.
    pub fn resident_coords(&self) -> Vec<ChunkCoord> {
        let mut v: Vec<ChunkCoord> = self.columns.keys().copied().collect();
        v.sort();
        v
    }

    /// Resident chunk without touching recency.
    pub fn column(&self, coord: ChunkCoord) -> Option<&ChunkColumn> {
        self.columns.get(&coord)
    }

    pub fn column_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkColumn> {
        self.columns.get_mut(&coord)
    }

    pub fn advance(&mut self, dt: f64) {
        self.game_time += dt;
    }

    #[inline]
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    /// Schedule a tile for simulation at absolute game time `due`.
    pub fn register_tick(&mut self, q: i32, r: i32, layer: i32, due: f64) -> bool {
        if !self.world.in_bounds(q, r, layer) {
            return false;
        }
        let index = ChunkCoord::local_of(q, r, layer).index();
        self.ensure_column(ChunkCoord::from_world(q, r, layer))
            .register_tick(index, due);
        true
    }

    pub fn deregister_tick(&mut self, q: i32, r: i32, layer: i32) -> bool {
        if !self.world.in_bounds(q, r, layer) {
            return false;
        }
        let index = ChunkCoord::local_of(q, r, layer).index();
        self.ensure_column(ChunkCoord::from_world(q, r, layer))
            .deregister_tick(index)
    }

    /// Drain ticks due at the current game time from every resident chunk.
    pub fn take_due_ticks(&mut self) -> Vec<(ChunkCoord, TickEntry)> {
        let now = self.game_time;
        let mut out = Vec::new();
        for (coord, chunk) in self.columns.iter_mut() {
            out.extend(chunk.pop_due(now).into_iter().map(|e| (*coord, e)));
        }
        out.sort_by(|a, b| a.1.due.total_cmp(&b.1.due).then(a.0.cmp(&b.0)));
        out
    }

    pub fn get_metadata(&mut self, q: i32, r: i32, layer: i32) -> Option<&TileMeta> {
        if !self.world.in_bounds(q, r, layer) {
            return None;
        }
        let pos = ChunkCoord::local_of(q, r, layer);
        self.ensure_column(ChunkCoord::from_world(q, r, layer))
            .get_metadata(pos)
    }

    pub fn set_metadata(&mut self, q: i32, r: i32, layer: i32, meta: Option<TileMeta>) {
        if !self.world.in_bounds(q, r, layer) {
            return;
        }
        let pos = ChunkCoord::local_of(q, r, layer);
        self.ensure_column(ChunkCoord::from_world(q, r, layer))
            .set_metadata(pos, meta);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            generated: self.generated,
            evictions: self.evictions,
            entries: self.columns.len(),
        }
    }
}
