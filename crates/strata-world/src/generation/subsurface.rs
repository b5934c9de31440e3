use strata_hex::axial_to_pixel;

use crate::gen_ctx::GenCtx;
use crate::worldgen::{Marble, MaterialNames};

/// Bulk materials the generator lays down; ores and plants are named directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Grass,
    Sand,
    Stone,
    Dirt,
    Grimstone,
    Marble,
    Water,
    Lava,
}

impl Material {
    pub const ALL: [Material; 8] = [
        Material::Grass,
        Material::Sand,
        Material::Stone,
        Material::Dirt,
        Material::Grimstone,
        Material::Marble,
        Material::Water,
        Material::Lava,
    ];

    pub fn tile_name(self, names: &MaterialNames) -> &str {
        match self {
            Material::Grass => &names.grass,
            Material::Sand => &names.sand,
            Material::Stone => &names.stone,
            Material::Dirt => &names.dirt,
            Material::Grimstone => &names.grimstone,
            Material::Marble => &names.marble,
            Material::Water => &names.water,
            Material::Lava => &names.lava,
        }
    }

    /// Host rock that lava and ore may replace.
    #[inline]
    pub fn is_host_rock(self) -> bool {
        matches!(self, Material::Stone | Material::Grimstone)
    }
}

/// Material for one layer below the surface.
///
/// Precedence: dirt, then the grimstone floor, then marble bands, then stone.
/// All noise inputs are per-column values computed once by the caller.
pub fn subsurface_tile(
    depth_below_surface: i32,
    layer: i32,
    grimstone_floor: i32,
    marble_value: f32,
    dirt_depth: i32,
    marble: &Marble,
) -> Material {
    if depth_below_surface <= dirt_depth {
        return Material::Dirt;
    }
    if layer <= grimstone_floor {
        return Material::Grimstone;
    }
    let shift = (marble_value - 0.5) * 2.0 * marble.wobble;
    let in_band = marble
        .bands
        .iter()
        .any(|b| (layer as f32 - b.center as f32 - shift).abs() <= b.half_width as f32);
    if in_band {
        Material::Marble
    } else {
        Material::Stone
    }
}

impl GenCtx {
    /// Highest layer of the grimstone floor under column `(q, r)`.
    pub fn grimstone_floor(&self, q: i32, r: i32) -> i32 {
        let g = &self.params.grimstone;
        let (x, y) = axial_to_pixel(q, r, 1.0);
        let n = self.grimstone.sample2(x as f32, y as f32, g.scale, 1);
        (g.base_layer as f32 + (n - 0.5) * 2.0 * g.variation).round() as i32
    }

    /// Marble band offset input in `[0, 1]`.
    pub fn marble_noise(&self, q: i32, r: i32) -> f32 {
        let (x, y) = axial_to_pixel(q, r, 1.0);
        self.marble
            .sample2(x as f32, y as f32, self.params.marble.scale, 1)
    }

    pub fn dirt_depth(&self, q: i32, r: i32) -> i32 {
        let d = &self.params.dirt;
        let (x, y) = axial_to_pixel(q, r, 1.0);
        let n = self.dirt.sample2(x as f32, y as f32, d.scale, 1);
        (d.min_depth as f32 + n * (d.max_depth - d.min_depth) as f32).round() as i32
    }
}
