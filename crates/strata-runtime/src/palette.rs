use strata_tiles::{TileId, TileRegistry};
use strata_world::worldgen::{PlantKind, WorldGenParams};
use strata_world::Material;

use crate::RuntimeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantTiles {
    Cover(TileId),
    Tree { trunk: TileId, canopy: TileId },
}

/// Tile ids for every name the generator can emit, resolved once up front.
#[derive(Clone, Debug)]
pub struct TilePalette {
    materials: [TileId; Material::ALL.len()],
    ores: Vec<TileId>,
    plants: Vec<PlantTiles>,
}

fn lookup(reg: &TileRegistry, name: &str) -> Result<TileId, RuntimeError> {
    reg.id_by_name(name).ok_or_else(|| RuntimeError::UnknownTile {
        name: name.to_string(),
    })
}

impl TilePalette {
    pub fn resolve(params: &WorldGenParams, reg: &TileRegistry) -> Result<Self, RuntimeError> {
        let mut materials = [0; Material::ALL.len()];
        for m in Material::ALL {
            materials[m as usize] = lookup(reg, m.tile_name(&params.materials))?;
        }
        let ores = params
            .ores
            .iter()
            .map(|o| lookup(reg, &o.tile))
            .collect::<Result<Vec<_>, _>>()?;
        let mut plants = Vec::with_capacity(params.plants.len());
        for rule in &params.plants {
            plants.push(match &rule.kind {
                PlantKind::Cover { tile } => PlantTiles::Cover(lookup(reg, tile)?),
                PlantKind::Tree { species } => {
                    let sp = params.tree_species(species);
                    PlantTiles::Tree {
                        trunk: lookup(reg, &sp.trunk)?,
                        canopy: lookup(reg, &sp.canopy)?,
                    }
                }
            });
        }
        Ok(Self {
            materials,
            ores,
            plants,
        })
    }

    #[inline]
    pub fn material(&self, m: Material) -> TileId {
        self.materials[m as usize]
    }

    #[inline]
    pub fn ore(&self, index: usize) -> TileId {
        self.ores[index]
    }

    #[inline]
    pub fn plant(&self, rule: usize) -> PlantTiles {
        self.plants[rule]
    }
}
