use super::hash::pick_in;
use crate::gen_ctx::GenCtx;

const HEIGHT_SALT: u32 = 0x7A11_0001;
const CANOPY_SALT: u32 = 0xC0A0_0002;

/// Ranges of `TreeSpecies::default()`, used for unconfigured species.
pub const FALLBACK_HEIGHT: [i32; 2] = [4, 6];
pub const FALLBACK_CANOPY_RADIUS: [i32; 2] = [1, 2];

impl GenCtx {
    /// `(trunk height, canopy radius)` for a tree rooted at `(q, r)`.
    pub fn tree_dimensions(&self, q: i32, r: i32, species: &str) -> (i32, i32) {
        let sp = self.params.tree_species(species);
        let (height, canopy) = (sp.height, sp.canopy_radius);
        (
            pick_in(self.tree_seed, q, r, HEIGHT_SALT, height[0], height[1]),
            pick_in(self.tree_seed, q, r, CANOPY_SALT, canopy[0], canopy[1]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{World, WorldGenParams};

    #[test]
    fn dimensions_stay_in_species_range() {
        let world = World::new(WorldGenParams::small());
        let ctx = world.make_gen_ctx();
        let oak = world.params.trees["oak"].clone();
        for c in strata_hex::range(0, 0, 10) {
            let (h, cr) = ctx.tree_dimensions(c.q, c.r, "oak");
            assert!(h >= oak.height[0] && h <= oak.height[1]);
            assert!(cr >= oak.canopy_radius[0] && cr <= oak.canopy_radius[1]);
        }
    }

    #[test]
    fn unknown_species_falls_back() {
        let world = World::new(WorldGenParams::small());
        let ctx = world.make_gen_ctx();
        for c in strata_hex::range(0, 0, 6) {
            let (h, cr) = ctx.tree_dimensions(c.q, c.r, "baobab");
            assert!((FALLBACK_HEIGHT[0]..=FALLBACK_HEIGHT[1]).contains(&h));
            assert!((FALLBACK_CANOPY_RADIUS[0]..=FALLBACK_CANOPY_RADIUS[1]).contains(&cr));
        }
    }
}
