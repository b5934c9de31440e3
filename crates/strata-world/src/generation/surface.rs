use strata_hex::{axial_to_pixel, distance_from_origin, euclidean_distance};

use super::subsurface::Material;
use crate::gen_ctx::GenCtx;

impl GenCtx {
    /// Topmost solid layer of column `(q, r)`.
    ///
    /// Radial exponential falloff blended with fBm. The noise term fades out
    /// toward the rim and is dropped entirely at and beyond the world radius,
    /// so the boundary ring always sits at `edge_height`.
    pub fn surface_layer(&self, q: i32, r: i32) -> i32 {
        let p = &*self.params;
        let isl = &p.island;
        let radius = p.radius.max(1);
        let t = (euclidean_distance(q, r) / (3f64.sqrt() * radius as f64)).clamp(0.0, 1.0) as f32;
        let k = isl.falloff_steepness;
        let floor = (-k).exp();
        let falloff = ((-k * t.powf(isl.falloff_exponent)).exp() - floor) / (1.0 - floor);
        let base = isl.edge_height + (isl.center_height - isl.edge_height) * falloff;

        let hexdist = distance_from_origin(q, r);
        let h = if hexdist >= radius {
            base
        } else {
            let fade_width = (radius as f32 * isl.boundary_fade_ratio).max(1.0);
            let fade = ((radius - hexdist) as f32 / fade_width).clamp(0.0, 1.0);
            let (x, y) = axial_to_pixel(q, r, 1.0);
            let n = self
                .terrain
                .sample2(x as f32, y as f32, isl.noise_scale, isl.noise_octaves);
            base + (n - 0.5) * 2.0 * isl.noise_amplitude * fade
        };
        (h.round() as i32).clamp(1, (p.depth - 1).max(1))
    }

    /// Material of the surface layer itself.
    pub fn surface_material(&self, surface: i32, ocean: bool, beach: bool) -> Material {
        let p = &*self.params;
        if ocean || beach {
            Material::Sand
        } else if surface >= p.sea_level + p.stone_above_sea {
            Material::Stone
        } else {
            Material::Grass
        }
    }
}
