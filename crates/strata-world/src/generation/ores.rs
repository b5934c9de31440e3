use strata_hex::axial_to_pixel;

use crate::gen_ctx::GenCtx;

/// Noise scale per unit of `cluster_size`; bigger clusters sample lower frequencies.
pub const ORE_SCALE_UNIT: f32 = 6.0;

impl GenCtx {
    /// First configured ore whose depth window holds `surface - layer` and
    /// whose own noise field clears `1 - rarity`.
    pub fn ore_at(&self, q: i32, r: i32, layer: i32, surface: i32) -> Option<&str> {
        self.ore_index_at(q, r, layer, surface)
            .map(|i| self.params.ores[i].tile.as_str())
    }

    /// Like `ore_at`, but yields the index into `params.ores`.
    pub fn ore_index_at(&self, q: i32, r: i32, layer: i32, surface: i32) -> Option<usize> {
        let depth = surface - layer;
        let (x, y) = axial_to_pixel(q, r, 1.0);
        for (i, (def, field)) in self.params.ores.iter().zip(&self.ores).enumerate() {
            if depth < def.min_depth || depth > def.max_depth {
                continue;
            }
            let n = field.sample3(
                x as f32,
                y as f32,
                layer as f32,
                def.cluster_size * ORE_SCALE_UNIT,
                1,
            );
            if n > 1.0 - def.rarity {
                return Some(i);
            }
        }
        None
    }
}
