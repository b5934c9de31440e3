//! One-shot classification of every hex column as ocean, beach or land.
//!
//! A multi-source BFS starts from the world's boundary ring and spreads
//! through columns whose surface lies below sea level. Land touched by the
//! fill seeds a second, bounded wave that paints the beach band.

use std::collections::VecDeque;
use std::time::Instant;

use strata_hex::{Axial, DIRECTIONS, distance_from_origin, ring};

use crate::gen_ctx::GenCtx;

const LAND: u8 = 0;
const OCEAN: u8 = 1;
const BEACH: u8 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OceanStats {
    pub ocean: usize,
    pub beach: usize,
    /// Boundary-ring columns at or above sea level.
    pub border_violations: usize,
}

/// Dense byte-per-column state over the `(2R+1)²` axial square.
#[derive(Clone, Debug)]
pub struct OceanIndex {
    radius: i32,
    stride: usize,
    cells: Vec<u8>,
    stats: OceanStats,
}

impl OceanIndex {
    pub fn build(ctx: &GenCtx) -> Self {
        let p = &*ctx.params;
        Self::build_with(p.radius, p.sea_level, p.beach_radius, |q, r| {
            ctx.surface_layer(q, r)
        })
    }

    /// Build against an arbitrary surface function.
    pub fn build_with(
        radius: i32,
        sea_level: i32,
        beach_radius: i32,
        mut surface: impl FnMut(i32, i32) -> i32,
    ) -> Self {
        let started = Instant::now();
        let radius = radius.max(0);
        let stride = (2 * radius + 1) as usize;
        log::info!(
            target: "ocean",
            "ocean fill start: radius={} cells={}",
            radius,
            stride * stride
        );
        let mut index = OceanIndex {
            radius,
            stride,
            cells: vec![LAND; stride * stride],
            stats: OceanStats::default(),
        };

        let mut queue: VecDeque<u32> = VecDeque::new();
        let mut first_violation: Option<Axial> = None;
        for c in ring(0, 0, radius) {
            if surface(c.q, c.r) >= sea_level {
                index.stats.border_violations += 1;
                first_violation.get_or_insert(c);
                continue;
            }
            let i = index.slot(c.q, c.r);
            if index.cells[i] == LAND {
                index.cells[i] = OCEAN;
                queue.push_back(i as u32);
            }
        }
        if let Some(c) = first_violation {
            log::warn!(
                target: "ocean",
                "{} boundary columns at or above sea level (first at q={} r={}); ocean may be under-filled",
                index.stats.border_violations,
                c.q,
                c.r
            );
        }

        let mut beach_front: Vec<u32> = Vec::new();
        while let Some(i) = queue.pop_front() {
            let here = index.coord_of(i as usize);
            for d in DIRECTIONS {
                let n = here + d;
                if distance_from_origin(n.q, n.r) > radius {
                    continue;
                }
                let j = index.slot(n.q, n.r);
                if index.cells[j] != LAND {
                    continue;
                }
                if surface(n.q, n.r) < sea_level {
                    index.cells[j] = OCEAN;
                    queue.push_back(j as u32);
                } else {
                    index.cells[j] = BEACH;
                    beach_front.push(j as u32);
                }
            }
        }

        if beach_radius <= 0 {
            for &i in &beach_front {
                index.cells[i as usize] = LAND;
            }
        } else {
            for _ in 1..beach_radius {
                let mut next = Vec::new();
                for &i in &beach_front {
                    let here = index.coord_of(i as usize);
                    for d in DIRECTIONS {
                        let n = here + d;
                        if distance_from_origin(n.q, n.r) > radius {
                            continue;
                        }
                        let j = index.slot(n.q, n.r);
                        if index.cells[j] == LAND {
                            index.cells[j] = BEACH;
                            next.push(j as u32);
                        }
                    }
                }
                if next.is_empty() {
                    break;
                }
                beach_front = next;
            }
        }

        for &v in &index.cells {
            match v {
                OCEAN => index.stats.ocean += 1,
                BEACH => index.stats.beach += 1,
                _ => {}
            }
        }
        log::info!(
            target: "ocean",
            "ocean fill done: ocean={} beach={} border_violations={} in {}ms",
            index.stats.ocean,
            index.stats.beach,
            index.stats.border_violations,
            started.elapsed().as_millis()
        );
        index
    }

    #[inline]
    fn slot(&self, q: i32, r: i32) -> usize {
        (q + self.radius) as usize * self.stride + (r + self.radius) as usize
    }

    #[inline]
    fn coord_of(&self, i: usize) -> Axial {
        Axial::new(
            (i / self.stride) as i32 - self.radius,
            (i % self.stride) as i32 - self.radius,
        )
    }

    #[inline]
    fn state(&self, q: i32, r: i32) -> u8 {
        if q < -self.radius || q > self.radius || r < -self.radius || r > self.radius {
            return LAND;
        }
        self.cells[self.slot(q, r)]
    }

    #[inline]
    pub fn is_ocean(&self, q: i32, r: i32) -> bool {
        self.state(q, r) == OCEAN
    }

    #[inline]
    pub fn is_beach(&self, q: i32, r: i32) -> bool {
        self.state(q, r) == BEACH
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn stats(&self) -> OceanStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bowl: flat land inside `land_radius`, sea floor outside.
    fn bowl(land_radius: i32) -> impl FnMut(i32, i32) -> i32 {
        move |q, r| if distance_from_origin(q, r) <= land_radius { 30 } else { 10 }
    }

    #[test]
    fn ring_of_sea_around_island() {
        let idx = OceanIndex::build_with(20, 24, 3, bowl(8));
        for c in ring(0, 0, 20) {
            assert!(idx.is_ocean(c.q, c.r));
        }
        assert!(idx.is_ocean(0, 9));
        assert!(!idx.is_ocean(0, 8));
        // three rings of beach: distances 8, 7, 6
        for c in ring(0, 0, 8).into_iter().chain(ring(0, 0, 6)) {
            assert!(idx.is_beach(c.q, c.r));
        }
        for c in ring(0, 0, 5) {
            assert!(!idx.is_beach(c.q, c.r) && !idx.is_ocean(c.q, c.r));
        }
        let s = idx.stats();
        assert_eq!(s.border_violations, 0);
        assert_eq!(s.beach, 6 * (8 + 7 + 6));
    }

    #[test]
    fn inland_lake_is_not_ocean() {
        // Land ring at distance 10..=14 walls off a sunken interior.
        let idx = OceanIndex::build_with(20, 24, 1, |q, r| {
            let d = distance_from_origin(q, r);
            if (10..=14).contains(&d) { 30 } else { 5 }
        });
        assert!(idx.is_ocean(0, 18));
        assert!(!idx.is_ocean(0, 0));
        assert!(!idx.is_ocean(0, 9));
        assert!(idx.is_beach(0, 14));
        assert!(!idx.is_beach(0, 10));
    }

    #[test]
    fn zero_beach_radius_leaves_no_beach() {
        let idx = OceanIndex::build_with(16, 24, 0, bowl(5));
        assert_eq!(idx.stats().beach, 0);
        assert!(idx.is_ocean(0, 6));
        assert!(!idx.is_beach(0, 5));
    }

    #[test]
    fn border_violations_are_counted_not_fatal() {
        // Land reaches the rim on one side.
        let idx = OceanIndex::build_with(12, 24, 1, |q, _r| if q >= 6 { 30 } else { 10 });
        let s = idx.stats();
        assert!(s.border_violations > 0);
        assert!(idx.is_ocean(-12, 0));
        assert!(!idx.is_ocean(12, 0));
    }

    #[test]
    fn outside_queries_are_false() {
        let idx = OceanIndex::build_with(8, 24, 2, bowl(2));
        assert!(!idx.is_ocean(100, -3));
        assert!(!idx.is_beach(-9, 0));
        assert!(!idx.is_ocean(i32::MAX, i32::MIN));
    }
}
