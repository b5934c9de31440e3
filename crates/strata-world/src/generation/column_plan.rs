use strata_hex::distance_from_origin;

use super::subsurface::Material;
use crate::gen_ctx::GenCtx;
use crate::ocean::OceanIndex;
use crate::worldgen::PlantKind;

/// Vegetation chosen for one column; `rule` indexes `params.plants`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantPlan {
    Cover {
        rule: usize,
    },
    Tree {
        rule: usize,
        height: i32,
        canopy_radius: i32,
    },
}

impl PlantPlan {
    #[inline]
    pub fn rule(&self) -> usize {
        match *self {
            PlantPlan::Cover { rule } | PlantPlan::Tree { rule, .. } => rule,
        }
    }
}

/// Everything about one hex column that doesn't depend on the layer.
#[derive(Clone, Debug)]
pub struct ColumnInfo {
    pub q: i32,
    pub r: i32,
    pub in_world: bool,
    pub surface: i32,
    pub grimstone_floor: i32,
    pub marble: f32,
    pub dirt_depth: i32,
    pub ocean: bool,
    pub beach: bool,
    pub surface_material: Material,
    pub plant: Option<PlantPlan>,
}

#[derive(Clone, Debug)]
pub struct ChunkColumnPlan {
    pub columns: Vec<ColumnInfo>,
    pub width: usize,
}

impl ChunkColumnPlan {
    #[inline]
    pub fn index(&self, lq: usize, lr: usize) -> usize {
        lr * self.width + lq
    }

    #[inline]
    pub fn column(&self, lq: usize, lr: usize) -> &ColumnInfo {
        &self.columns[self.index(lq, lr)]
    }

    /// Highest surface among in-world columns, or `None` if the footprint is all outside.
    pub fn max_surface(&self) -> Option<i32> {
        self.columns
            .iter()
            .filter(|c| c.in_world)
            .map(|c| c.surface)
            .max()
    }

    /// Every in-world column is ocean.
    pub fn all_ocean(&self) -> bool {
        self.columns.iter().filter(|c| c.in_world).all(|c| c.ocean)
    }
}

/// Per-column precompute for a `width × width` footprint starting at `(base_q, base_r)`.
pub fn build_chunk_column_plan(
    ctx: &GenCtx,
    ocean: &OceanIndex,
    base_q: i32,
    base_r: i32,
    width: usize,
) -> ChunkColumnPlan {
    let params = &*ctx.params;
    let mut columns = Vec::with_capacity(width * width);
    for lr in 0..width {
        let r = base_r + lr as i32;
        for lq in 0..width {
            let q = base_q + lq as i32;
            if distance_from_origin(q, r) > params.radius {
                columns.push(ColumnInfo {
                    q,
                    r,
                    in_world: false,
                    surface: 0,
                    grimstone_floor: 0,
                    marble: 0.0,
                    dirt_depth: 0,
                    ocean: false,
                    beach: false,
                    surface_material: Material::Stone,
                    plant: None,
                });
                continue;
            }
            let surface = ctx.surface_layer(q, r);
            let grimstone_floor = ctx.grimstone_floor(q, r);
            let marble = ctx.marble_noise(q, r);
            let dirt_depth = ctx.dirt_depth(q, r);
            let is_ocean = ocean.is_ocean(q, r);
            let is_beach = ocean.is_beach(q, r);
            let surface_material = ctx.surface_material(surface, is_ocean, is_beach);
            let plant = if surface >= params.sea_level && surface_material == Material::Grass {
                plan_plant(ctx, q, r, surface)
            } else {
                None
            };
            columns.push(ColumnInfo {
                q,
                r,
                in_world: true,
                surface,
                grimstone_floor,
                marble,
                dirt_depth,
                ocean: is_ocean,
                beach: is_beach,
                surface_material,
                plant,
            });
        }
    }
    ChunkColumnPlan { columns, width }
}

fn plan_plant(ctx: &GenCtx, q: i32, r: i32, surface: i32) -> Option<PlantPlan> {
    let (rule, spec) = ctx.plant_spec(q, r, surface)?;
    Some(match &spec.kind {
        PlantKind::Cover { .. } => PlantPlan::Cover { rule },
        PlantKind::Tree { species } => {
            let (height, canopy_radius) = ctx.tree_dimensions(q, r, species);
            PlantPlan::Tree {
                rule,
                height,
                canopy_radius,
            }
        }
    })
}
