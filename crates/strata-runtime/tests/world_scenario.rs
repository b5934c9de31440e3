use strata_chunk::{ChunkCoord, TileMeta};
use strata_runtime::{WorldCache, generate_column, TilePalette};
use strata_tiles::{AIR, FLOOR, TileRegistry};
use strata_world::{OceanIndex, World, WorldGenParams};

fn registry() -> TileRegistry {
    TileRegistry::builtin().expect("builtin tiles")
}

fn small_cache(mut tweak: impl FnMut(&mut WorldGenParams), capacity: usize) -> WorldCache {
    let mut p = WorldGenParams::small();
    tweak(&mut p);
    WorldCache::new(World::new(p), &registry(), capacity).expect("cache")
}

fn top_non_air(cache: &mut WorldCache, q: i32, r: i32) -> Option<i32> {
    let depth = cache.world().depth();
    (0..depth).rev().find(|&l| cache.get_tile(q, r, l) != AIR)
}

#[test]
fn world_floor_is_indestructible_tile() {
    let mut cache = small_cache(|_| {}, 64);
    assert_eq!(cache.world().radius(), 64);
    assert_eq!(cache.world().depth(), 48);
    assert_eq!(cache.world().sea_level(), 24);
    assert_eq!(cache.get_tile(0, 0, 0), FLOOR);
    assert_eq!(cache.get_tile(-40, 17, 0), FLOOR);
}

#[test]
fn land_column_tops_out_above_sea() {
    let mut cache = small_cache(|p| p.caves.enable = false, 64);
    let sea = cache.world().sea_level();
    assert!(!cache.ocean().is_ocean(0, 0));
    let top = top_non_air(&mut cache, 0, 0).expect("solid column");
    assert!(top >= sea, "top {top} below sea {sea}");
}

#[test]
fn ocean_column_is_water_from_surface_to_sea_level() {
    let mut cache = small_cache(|_| {}, 64);
    let world = cache.world().clone();
    let ctx = world.make_gen_ctx();
    let water = registry().id_by_name("water").unwrap();
    let sea = world.sea_level();
    let mut checked = 0;
    for c in strata_hex::ring(0, 0, world.radius() - 3) {
        if !cache.ocean().is_ocean(c.q, c.r) {
            continue;
        }
        let surface = ctx.surface_layer(c.q, c.r);
        for layer in surface + 1..=sea {
            assert_eq!(cache.get_tile(c.q, c.r, layer), water, "{c:?} layer {layer}");
        }
        assert_eq!(cache.get_tile(c.q, c.r, sea + 1), AIR);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn regeneration_after_eviction_is_bit_identical() {
    let mut cache = small_cache(|_| {}, 64);
    let coord = ChunkCoord::new(0, 0, 3);
    let first = cache.ensure_column(coord).to_dense();
    cache.set_tile(5, 5, 26, 0);
    assert!(cache.column(coord).unwrap().is_dirty());
    cache.evict(coord).expect("resident");
    assert!(!cache.is_resident(coord));
    let second = cache.ensure_column(coord).to_dense();
    assert_eq!(first, second);
    assert!(!cache.column(coord).unwrap().is_dirty());
}

#[test]
fn independent_contexts_generate_identical_chunks() {
    let world = World::new(WorldGenParams::small());
    let reg = registry();
    let palette = TilePalette::resolve(&world.params, &reg).unwrap();
    let a = world.make_gen_ctx();
    let b = world.make_gen_ctx();
    let ocean = OceanIndex::build(&a);
    for coord in [ChunkCoord::new(0, 0, 2), ChunkCoord::new(-2, 1, 1), ChunkCoord::new(1, -2, 4)] {
        let x = generate_column(&a, &ocean, &palette, coord);
        let y = generate_column(&b, &ocean, &palette, coord);
        assert_eq!(x.to_dense(), y.to_dense());
    }
}

#[test]
fn out_of_world_reads_are_air_and_writes_ignored() {
    let mut cache = small_cache(|_| {}, 8);
    assert_eq!(cache.get_tile(0, 0, -1), AIR);
    assert_eq!(cache.get_tile(0, 0, 48), AIR);
    assert_eq!(cache.get_tile(65, 0, 10), AIR);
    cache.set_tile(0, 65, 10, 2);
    cache.set_tile(i32::MIN, i32::MAX, i32::MIN, 2);
    assert_eq!(cache.stats().entries, 0);
}

#[test]
fn set_then_get_round_trips() {
    let mut cache = small_cache(|_| {}, 8);
    let stone = registry().id_by_name("stone").unwrap();
    cache.set_tile(3, -4, 40, stone);
    assert_eq!(cache.get_tile(3, -4, 40), stone);
    cache.set_tile(3, -4, 40, AIR);
    assert_eq!(cache.get_tile(3, -4, 40), AIR);
}

#[test]
fn preload_near_loads_21_chunks_around_focus() {
    let mut cache = small_cache(|_| {}, 64);
    cache.preload_near(0, 0, 20);
    assert_eq!(cache.stats().entries, 21);
    assert!(cache.is_resident(ChunkCoord::new(0, 0, 1)));
    assert!(cache.is_resident(ChunkCoord::new(1, -1, 3)));
    // Bottom slice: nothing below layer 0 gets generated.
    cache.preload_near(0, 0, 0);
    assert!(!cache.is_resident(ChunkCoord::new(0, 0, -1)));
    let before = cache.stats().generated;
    cache.preload_near(0, 0, 20);
    assert_eq!(cache.stats().generated, before);
}

#[test]
fn preload_all_covers_small_world() {
    let mut cache = small_cache(|_| {}, 1_000);
    let expected = cache.world_chunks().len();
    let n = cache.preload_all();
    assert_eq!(n, expected);
    assert_eq!(cache.stats().entries, expected);
    let misses = cache.stats().misses;
    for c in strata_hex::ring(0, 0, 40) {
        cache.get_tile(c.q, c.r, 30);
    }
    assert_eq!(cache.stats().misses, misses);
}

#[test]
fn metadata_and_ticks_route_to_owning_chunk() {
    let mut cache = small_cache(|_| {}, 16);
    cache.set_metadata(-1, -1, 30, Some(TileMeta::Crop { stage: 1 }));
    assert_eq!(cache.get_metadata(-1, -1, 30), Some(&TileMeta::Crop { stage: 1 }));
    assert_eq!(cache.get_metadata(0, 0, 30), None);
    assert!(cache.register_tick(-1, -1, 30, 2.0));
    assert!(cache.register_tick(4, 4, 30, 1.0));
    assert!(!cache.register_tick(500, 0, 30, 1.0));
    cache.advance(1.5);
    let due = cache.take_due_ticks();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].0, ChunkCoord::new(0, 0, 3));
    assert!(cache.deregister_tick(-1, -1, 30));
    cache.advance(1.0);
    assert!(cache.take_due_ticks().is_empty());
}

#[test]
fn unvalidated_shape_is_rejected_before_generation() {
    let mut p = WorldGenParams::small();
    p.depth = 1;
    let err = WorldCache::new(World::new(p), &registry(), 8)
        .err()
        .expect("depth 1 must be rejected");
    assert!(matches!(err, strata_runtime::RuntimeError::Config(_)));

    let mut p = WorldGenParams::small();
    p.sea_level = 0;
    assert!(WorldCache::new(World::new(p), &registry(), 8).is_err());
}
