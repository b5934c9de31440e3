use serde::{Deserialize, Serialize};
use strata_hex::DIRECTIONS;

/// Horizontal footprint edge, in hex cells, along both axial axes.
pub const CHUNK_WIDTH: usize = 32;
/// Layers per chunk slice.
pub const CHUNK_DEPTH: usize = 8;
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_DEPTH;

const W: i32 = CHUNK_WIDTH as i32;
const D: i32 = CHUNK_DEPTH as i32;

/// Chunk address: axial column-block `(cq, cr)` and vertical slice `cl`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cq: i32,
    pub cr: i32,
    pub cl: i32,
}

/// Position inside a chunk; every field is below its chunk dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub q: usize,
    pub r: usize,
    pub layer: usize,
}

impl LocalPos {
    #[inline]
    pub const fn new(q: usize, r: usize, layer: usize) -> Self {
        Self { q, r, layer }
    }

    /// Flattened slot: `(layer·W + r)·W + q`.
    #[inline]
    pub const fn index(self) -> u32 {
        ((self.layer * CHUNK_WIDTH + self.r) * CHUNK_WIDTH + self.q) as u32
    }

    #[inline]
    pub const fn from_index(i: u32) -> Self {
        let i = i as usize;
        Self {
            q: i % CHUNK_WIDTH,
            r: (i / CHUNK_WIDTH) % CHUNK_WIDTH,
            layer: i / (CHUNK_WIDTH * CHUNK_WIDTH),
        }
    }
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cq: i32, cr: i32, cl: i32) -> Self {
        Self { cq, cr, cl }
    }

    /// Owning chunk of a world tile. Floors toward negative infinity.
    #[inline]
    pub fn from_world(q: i32, r: i32, layer: i32) -> Self {
        Self {
            cq: q.div_euclid(W),
            cr: r.div_euclid(W),
            cl: layer.div_euclid(D),
        }
    }

    /// Position of a world tile inside its owning chunk.
    #[inline]
    pub fn local_of(q: i32, r: i32, layer: i32) -> LocalPos {
        LocalPos {
            q: q.rem_euclid(W) as usize,
            r: r.rem_euclid(W) as usize,
            layer: layer.rem_euclid(D) as usize,
        }
    }

    /// World `(q, r, layer)` of local `(0, 0, 0)`.
    #[inline]
    pub fn origin(self) -> (i32, i32, i32) {
        (self.cq * W, self.cr * W, self.cl * D)
    }

    #[inline]
    pub fn offset(self, dq: i32, dr: i32, dl: i32) -> Self {
        Self {
            cq: self.cq + dq,
            cr: self.cr + dr,
            cl: self.cl + dl,
        }
    }

    /// The six same-slice chunks across each hex direction.
    pub fn neighbor_columns(self) -> [ChunkCoord; 6] {
        DIRECTIONS.map(|d| self.offset(d.q, d.r, 0))
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cq, value.cr, value.cl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_coords_floor() {
        assert_eq!(ChunkCoord::from_world(-1, -1, -1), ChunkCoord::new(-1, -1, -1));
        assert_eq!(ChunkCoord::local_of(-1, -32, -1), LocalPos::new(31, 0, 7));
        assert_eq!(ChunkCoord::from_world(31, 32, 8), ChunkCoord::new(0, 1, 1));
    }

    #[test]
    fn index_round_trips() {
        for i in [0u32, 1, 31, 32, 1023, 1024, CHUNK_VOLUME as u32 - 1] {
            assert_eq!(LocalPos::from_index(i).index(), i);
        }
        assert_eq!(LocalPos::new(31, 31, 7).index() as usize, CHUNK_VOLUME - 1);
    }

    #[test]
    fn neighbors_stay_on_slice() {
        let c = ChunkCoord::new(2, -3, 5);
        let ns = c.neighbor_columns();
        assert!(ns.iter().all(|n| n.cl == 5 && *n != c));
        assert_eq!(ns[0], ChunkCoord::new(3, -3, 5));
    }
}
