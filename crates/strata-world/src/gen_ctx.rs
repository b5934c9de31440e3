use std::sync::Arc;

use crate::noise::{NoiseField, NoiseSystem};
use crate::world::World;
use crate::worldgen::WorldGenParams;

/// Per-thread generation context: one noise field per system plus the params snapshot.
#[derive(Debug)]
pub struct GenCtx {
    pub terrain: NoiseField,
    pub grimstone: NoiseField,
    pub marble: NoiseField,
    pub dirt: NoiseField,
    pub caves: NoiseField,
    pub lava: NoiseField,
    pub temperature: NoiseField,
    pub humidity: NoiseField,
    /// Indexed like `params.ores`.
    pub ores: Vec<NoiseField>,
    pub plant_seed: u32,
    pub tree_seed: u32,
    pub params: Arc<WorldGenParams>,
}

impl World {
    pub fn make_gen_ctx(&self) -> GenCtx {
        let seed = self.seed;
        let params = Arc::clone(&self.params);
        let ores = (0..params.ores.len() as u32)
            .map(|i| NoiseField::for_system(seed, NoiseSystem::Ore(i)))
            .collect();
        GenCtx {
            terrain: NoiseField::for_system(seed, NoiseSystem::Terrain),
            grimstone: NoiseField::for_system(seed, NoiseSystem::Grimstone),
            marble: NoiseField::for_system(seed, NoiseSystem::Marble),
            dirt: NoiseField::for_system(seed, NoiseSystem::Dirt),
            caves: NoiseField::for_system(seed, NoiseSystem::Caves),
            lava: NoiseField::for_system(seed, NoiseSystem::Lava),
            temperature: NoiseField::for_system(seed, NoiseSystem::Temperature),
            humidity: NoiseField::for_system(seed, NoiseSystem::Humidity),
            ores,
            plant_seed: crate::noise::derive_seed(seed, NoiseSystem::Plants.id()) as u32,
            tree_seed: crate::noise::derive_seed(seed, NoiseSystem::Trees.id()) as u32,
            params,
        }
    }
}
