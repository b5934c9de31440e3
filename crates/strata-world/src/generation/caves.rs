use strata_hex::axial_to_pixel;

use crate::gen_ctx::GenCtx;
use crate::worldgen::Lava;

/// Lava noise threshold at `layer`: flat up to `full_layer`, then rising
/// linearly to 1.0 at `ceiling_layer`. Samples must exceed it strictly.
pub fn lava_threshold(lava: &Lava, layer: i32) -> f32 {
    if layer <= lava.full_layer {
        return lava.base_threshold;
    }
    if layer >= lava.ceiling_layer {
        return 1.0;
    }
    let t = (layer - lava.full_layer) as f32 / (lava.ceiling_layer - lava.full_layer) as f32;
    lava.base_threshold + (1.0 - lava.base_threshold) * t
}

impl GenCtx {
    /// Anisotropic 3D noise carve. No depth gate, caves may open at the surface.
    pub fn is_cave(&self, q: i32, r: i32, layer: i32) -> bool {
        let c = &self.params.caves;
        if !c.enable {
            return false;
        }
        let (x, y) = axial_to_pixel(q, r, 1.0);
        let n = self.caves.sample3(
            x as f32 * c.horizontal_stretch,
            y as f32 * c.horizontal_stretch,
            layer as f32 * c.vertical_stretch,
            c.scale,
            c.octaves,
        );
        n > c.threshold
    }

    pub fn lava_at(&self, q: i32, r: i32, layer: i32) -> bool {
        let lava = &self.params.lava;
        if !lava.enable {
            return false;
        }
        let threshold = lava_threshold(lava, layer);
        if threshold >= 1.0 {
            return false;
        }
        let (x, y) = axial_to_pixel(q, r, 1.0);
        self.lava
            .sample3(x as f32, y as f32, layer as f32, lava.scale, lava.octaves)
            > threshold
    }
}
