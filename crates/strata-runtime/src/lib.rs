//! World cache: lazy chunk generation, LRU residency, and the tile read/write API.
#![forbid(unsafe_code)]

mod cache;
mod generate;
mod palette;

pub use cache::{CacheStats, WorldCache};
pub use generate::{chunk_in_world, generate_column};
pub use palette::{PlantTiles, TilePalette};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("worldgen references tile `{name}`, which the registry does not define")]
    UnknownTile { name: String },

    #[error(transparent)]
    Config(#[from] strata_world::ConfigError),
}
