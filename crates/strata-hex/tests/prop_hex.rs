use strata_hex::{
    Axial, DIRECTIONS, axial_to_cube, axial_to_pixel, distance, distance_from_origin, neighbors,
    pixel_to_axial, range, ring,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn coord() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

fn small_radius() -> impl Strategy<Value = i32> {
    0i32..=12
}

proptest! {
    // pixel_to_axial(axial_to_pixel(q, r)) == (q, r)
    #[test]
    fn pixel_round_trip(q in coord(), r in coord()) {
        let (x, y) = axial_to_pixel(q, r, 1.0);
        prop_assert_eq!(pixel_to_axial(x, y, 1.0), Axial::new(q, r));
    }

    // Same round trip at a non-unit cell size
    #[test]
    fn pixel_round_trip_scaled(q in -5_000i32..=5_000, r in -5_000i32..=5_000) {
        let (x, y) = axial_to_pixel(q, r, 24.0);
        prop_assert_eq!(pixel_to_axial(x, y, 24.0), Axial::new(q, r));
    }

    #[test]
    fn cube_sums_to_zero(q in coord(), r in coord()) {
        let c = axial_to_cube(q, r);
        prop_assert_eq!(c.x + c.y + c.z, 0);
        prop_assert_eq!(c.to_axial(), Axial::new(q, r));
    }

    #[test]
    fn neighbors_are_adjacent(q in coord(), r in coord()) {
        let center = Axial::new(q, r);
        let ns = neighbors(q, r);
        let unique: HashSet<Axial> = ns.iter().copied().collect();
        prop_assert_eq!(unique.len(), 6);
        for n in ns {
            prop_assert_eq!(distance(center, n), 1);
        }
    }

    #[test]
    fn ring_has_6k_cells_at_distance_k(q in coord(), r in coord(), k in small_radius()) {
        let center = Axial::new(q, r);
        let cells = ring(q, r, k);
        let expect = if k == 0 { 1 } else { 6 * k as usize };
        prop_assert_eq!(cells.len(), expect);
        let unique: HashSet<Axial> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), expect);
        for c in cells {
            prop_assert_eq!(distance(center, c), k);
        }
    }

    #[test]
    fn range_has_hexagonal_number_of_cells(q in coord(), r in coord(), k in small_radius()) {
        let center = Axial::new(q, r);
        let cells = range(q, r, k);
        let n = k as usize;
        prop_assert_eq!(cells.len(), 3 * n * n + 3 * n + 1);
        prop_assert!(cells.contains(&center));
        let unique: HashSet<Axial> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());
        for c in cells {
            prop_assert!(distance(center, c) <= k);
        }
    }

    // Extreme coordinates wrap or saturate instead of overflowing
    #[test]
    fn full_i32_range_is_total(q in any::<i32>(), r in any::<i32>(), q2 in any::<i32>(), r2 in any::<i32>()) {
        let a = Axial::new(q, r);
        let b = Axial::new(q2, r2);
        let c = axial_to_cube(q, r);
        prop_assert_eq!(c.x.wrapping_add(c.y).wrapping_add(c.z), 0);
        prop_assert_eq!(c.to_axial(), a);
        let d = distance(a, b);
        prop_assert!(d >= 0);
        prop_assert_eq!(d, distance(b, a));
        prop_assert_eq!(distance(a, Axial::ORIGIN), distance_from_origin(q, r));
        prop_assert_eq!(neighbors(q, r).len(), 6);
        prop_assert_eq!(ring(q, r, 2).len(), 12);
        prop_assert_eq!(range(q, r, 1).len(), 7);
    }

    // distance is symmetric and agrees with the origin shortcut
    #[test]
    fn distance_symmetric(q in coord(), r in coord()) {
        let a = Axial::new(q, r);
        prop_assert_eq!(distance(a, Axial::ORIGIN), distance(Axial::ORIGIN, a));
        prop_assert_eq!(distance(a, Axial::ORIGIN), distance_from_origin(q, r));
    }
}

#[test]
fn directions_cycle_back_to_start() {
    let mut cur = Axial::ORIGIN;
    for d in DIRECTIONS {
        cur += d;
    }
    assert_eq!(cur, Axial::ORIGIN);
}

#[test]
fn edge_of_i32_does_not_overflow() {
    assert_eq!(distance(Axial::new(i32::MAX, 0), Axial::new(-1, 0)), i32::MAX);
    assert_eq!(distance(Axial::new(i32::MAX, 0), Axial::new(i32::MIN, 0)), i32::MAX);
    assert_eq!(neighbors(i32::MAX, 0)[0], Axial::new(i32::MIN, 0));
    let c = axial_to_cube(i32::MIN, 0);
    assert_eq!(c.y, i32::MIN);
    assert_eq!(distance_from_origin(i32::MIN, i32::MIN), i32::MAX);
}

#[test]
fn range_is_union_of_rings() {
    let mut from_rings: Vec<Axial> = (0..=4).flat_map(|k| ring(3, -7, k)).collect();
    let mut from_range = range(3, -7, 4);
    from_rings.sort();
    from_range.sort();
    assert_eq!(from_rings, from_range);
}
