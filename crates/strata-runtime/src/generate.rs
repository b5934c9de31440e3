use std::time::Instant;

use strata_chunk::{CHUNK_DEPTH, CHUNK_WIDTH, ChunkColumn, ChunkCoord, LocalPos};
use strata_hex::{distance_from_origin, range};
use strata_tiles::{AIR, FLOOR, TileId};
use strata_world::{
    ColumnInfo, GenCtx, Material, OceanIndex, PlantPlan, build_chunk_column_plan, subsurface_tile,
};

use crate::palette::{PlantTiles, TilePalette};

/// Whether any tile of `coord` lies inside the world.
pub fn chunk_in_world(coord: ChunkCoord, radius: i32, depth: i32) -> bool {
    let w = CHUNK_WIDTH as i64;
    let d = CHUNK_DEPTH as i64;
    let l0 = i64::from(coord.cl) * d;
    if l0 >= i64::from(depth) || l0 + d <= 0 {
        return false;
    }
    // Hex distance is at least the larger axial magnitude.
    let nearest = |lo: i64| {
        if lo > 0 {
            lo
        } else if lo + w - 1 < 0 {
            -(lo + w - 1)
        } else {
            0
        }
    };
    let q0 = i64::from(coord.cq) * w;
    let r0 = i64::from(coord.cr) * w;
    if nearest(q0) > i64::from(radius) || nearest(r0) > i64::from(radius) {
        return false;
    }
    let (q0, r0) = (q0 as i32, r0 as i32);
    let w = CHUNK_WIDTH as i32;
    (0..w).any(|lr| (0..w).any(|lq| distance_from_origin(q0 + lq, r0 + lr) <= radius))
}

struct TreeRoot {
    lq: usize,
    lr: usize,
    top: i32,
    canopy_radius: i32,
    canopy: TileId,
}

/// Fill one chunk from pure worldgen queries. Same inputs, same tiles.
pub fn generate_column(
    ctx: &GenCtx,
    ocean: &OceanIndex,
    palette: &TilePalette,
    coord: ChunkCoord,
) -> ChunkColumn {
    let started = Instant::now();
    let params = &*ctx.params;
    let (q0, r0, l0) = coord.origin();
    let mut chunk = ChunkColumn::new(coord);
    let plan = build_chunk_column_plan(ctx, ocean, q0, r0, CHUNK_WIDTH);

    let water = palette.material(Material::Water);
    let all_in_world = plan.columns.iter().all(|c| c.in_world);
    let open_sea_above = match plan.max_surface() {
        Some(top) if all_in_world && plan.all_ocean() => Some(top),
        _ => None,
    };

    for ll in 0..CHUNK_DEPTH {
        let layer = l0 + ll as i32;
        if layer < 0 || layer >= params.depth {
            continue;
        }
        if let Some(top) = open_sea_above {
            if layer > top && layer <= params.sea_level {
                chunk.fill_layer(ll, water);
                continue;
            }
        }
        for lr in 0..CHUNK_WIDTH {
            for lq in 0..CHUNK_WIDTH {
                let col = plan.column(lq, lr);
                if !col.in_world {
                    continue;
                }
                let id = tile_for(ctx, palette, col, layer);
                if id != AIR {
                    chunk.set(LocalPos::new(lq, lr, ll), id);
                }
            }
        }
    }

    place_vegetation(ctx, palette, &plan.columns, &mut chunk, l0);

    chunk.mark_clean();
    log::debug!(
        target: "worldgen",
        "generated chunk ({}, {}, {}): {} tiles in {}us",
        coord.cq,
        coord.cr,
        coord.cl,
        chunk.tile_count(),
        started.elapsed().as_micros()
    );
    chunk
}

fn tile_for(ctx: &GenCtx, palette: &TilePalette, col: &ColumnInfo, layer: i32) -> TileId {
    let params = &*ctx.params;
    if layer == 0 {
        return FLOOR;
    }
    if layer < col.surface {
        if ctx.is_cave(col.q, col.r, layer) {
            return AIR;
        }
        let mat = subsurface_tile(
            col.surface - layer,
            layer,
            col.grimstone_floor,
            col.marble,
            col.dirt_depth,
            &params.marble,
        );
        if mat.is_host_rock() {
            if ctx.lava_at(col.q, col.r, layer) {
                return palette.material(Material::Lava);
            }
            if let Some(i) = ctx.ore_index_at(col.q, col.r, layer, col.surface) {
                return palette.ore(i);
            }
        }
        return palette.material(mat);
    }
    if layer == col.surface {
        if ctx.is_cave(col.q, col.r, layer) {
            return AIR;
        }
        return palette.material(col.surface_material);
    }
    if col.ocean && layer <= params.sea_level {
        return palette.material(Material::Water);
    }
    AIR
}

// Vegetation only ever writes into air, so the first tile placed in a cell wins.
fn place_vegetation(
    ctx: &GenCtx,
    palette: &TilePalette,
    columns: &[ColumnInfo],
    chunk: &mut ChunkColumn,
    l0: i32,
) {
    let depth = ctx.params.depth;
    let w = CHUNK_WIDTH as i32;
    let put = |chunk: &mut ChunkColumn, lq: usize, lr: usize, layer: i32, id: TileId| {
        let ll = layer - l0;
        if layer >= depth || !(0..CHUNK_DEPTH as i32).contains(&ll) {
            return;
        }
        let pos = LocalPos::new(lq, lr, ll as usize);
        if chunk.get(pos) == AIR {
            chunk.set(pos, id);
        }
    };

    let mut roots: Vec<TreeRoot> = Vec::new();
    for (i, col) in columns.iter().enumerate() {
        let Some(plant) = col.plant else { continue };
        // A cave breach at the surface leaves nothing to root in.
        if ctx.is_cave(col.q, col.r, col.surface) {
            continue;
        }
        let (lq, lr) = (i % CHUNK_WIDTH, i / CHUNK_WIDTH);
        match (plant, palette.plant(plant.rule())) {
            (PlantPlan::Cover { .. }, PlantTiles::Cover(tile)) => {
                put(chunk, lq, lr, col.surface + 1, tile);
            }
            (
                PlantPlan::Tree {
                    height,
                    canopy_radius,
                    ..
                },
                PlantTiles::Tree { trunk, canopy },
            ) => {
                for layer in col.surface + 1..=col.surface + height {
                    put(chunk, lq, lr, layer, trunk);
                }
                roots.push(TreeRoot {
                    lq,
                    lr,
                    top: col.surface + height,
                    canopy_radius,
                    canopy,
                });
            }
            _ => {}
        }
    }

    for root in roots {
        for cell in range(root.lq as i32, root.lr as i32, root.canopy_radius) {
            if cell.q < 0 || cell.q >= w || cell.r < 0 || cell.r >= w {
                continue;
            }
            let (lq, lr) = (cell.q as usize, cell.r as usize);
            if !columns[lr * CHUNK_WIDTH + lq].in_world {
                continue;
            }
            if lq != root.lq || lr != root.lr {
                put(chunk, lq, lr, root.top, root.canopy);
            }
            put(chunk, lq, lr, root.top + 1, root.canopy);
        }
    }
}
