use strata_hex::{range, ring};
use strata_world::{OceanIndex, World, WorldGenParams};

fn flat_island() -> World {
    let mut p = WorldGenParams::small();
    p.island.noise_amplitude = 0.0;
    World::new(p)
}

#[test]
fn boundary_ring_is_ocean_and_classes_are_exclusive() {
    let world = flat_island();
    assert_eq!(world.radius(), 64);
    let ctx = world.make_gen_ctx();
    let ocean = OceanIndex::build(&ctx);

    for c in ring(0, 0, world.radius()) {
        assert!(ocean.is_ocean(c.q, c.r), "rim cell {c:?} not ocean");
    }
    for c in range(0, 0, world.radius()) {
        assert!(!(ocean.is_ocean(c.q, c.r) && ocean.is_beach(c.q, c.r)));
    }
    assert!(!ocean.is_ocean(0, 0));
    assert_eq!(ocean.stats().border_violations, 0);
}

#[test]
fn ocean_cells_sit_below_sea_and_touch_the_rim_through_ocean() {
    let world = flat_island();
    let ctx = world.make_gen_ctx();
    let ocean = OceanIndex::build(&ctx);
    let sea = world.sea_level();
    for c in range(0, 0, world.radius()) {
        if ocean.is_ocean(c.q, c.r) {
            assert!(ctx.surface_layer(c.q, c.r) < sea);
        }
    }
    let stats = ocean.stats();
    assert!(stats.ocean > 0);
    assert!(stats.beach > 0);
}

#[test]
fn beach_band_hugs_the_shore() {
    let world = flat_island();
    let ctx = world.make_gen_ctx();
    let ocean = OceanIndex::build(&ctx);
    let reach = world.params.beach_radius;
    for c in range(0, 0, world.radius()) {
        if !ocean.is_beach(c.q, c.r) {
            continue;
        }
        let near_ocean = range(c.q, c.r, reach)
            .into_iter()
            .any(|n| ocean.is_ocean(n.q, n.r));
        assert!(near_ocean, "beach at {c:?} is more than {reach} from ocean");
    }
}

#[test]
fn rebuild_is_identical() {
    let world = World::new(WorldGenParams::small());
    let a = OceanIndex::build(&world.make_gen_ctx());
    let b = OceanIndex::build(&world.make_gen_ctx());
    for c in range(0, 0, world.radius()) {
        assert_eq!(a.is_ocean(c.q, c.r), b.is_ocean(c.q, c.r));
        assert_eq!(a.is_beach(c.q, c.r), b.is_beach(c.q, c.r));
    }
}
