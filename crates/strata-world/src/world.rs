use std::sync::Arc;

use strata_hex::distance_from_origin;

use crate::worldgen::WorldGenParams;

/// Shape and seed of one generated world. Cheap to clone; params are shared.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: i64,
    pub params: Arc<WorldGenParams>,
}

impl World {
    pub fn new(params: WorldGenParams) -> Self {
        Self {
            seed: params.seed,
            params: Arc::new(params),
        }
    }

    /// Same params, different master seed.
    pub fn with_seed(params: WorldGenParams, seed: i64) -> Self {
        Self {
            seed,
            params: Arc::new(params),
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.params.radius
    }

    #[inline]
    pub fn depth(&self) -> i32 {
        self.params.depth
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.params.sea_level
    }

    /// Hex column lies inside the world disc.
    #[inline]
    pub fn contains_column(&self, q: i32, r: i32) -> bool {
        distance_from_origin(q, r) <= self.params.radius
    }

    #[inline]
    pub fn in_bounds(&self, q: i32, r: i32, layer: i32) -> bool {
        layer >= 0 && layer < self.params.depth && self.contains_column(q, r)
    }

    /// Hex columns inside the world: `3R² + 3R + 1`.
    pub fn column_count(&self) -> u64 {
        let r = self.params.radius as u64;
        3 * r * r + 3 * r + 1
    }
}
