//! World shape, seeded noise, pure generation queries, and the ocean pre-pass.
#![forbid(unsafe_code)]

pub mod generation;
pub mod noise;
pub mod ocean;
pub mod worldgen;

mod gen_ctx;
mod world;

pub use gen_ctx::GenCtx;
pub use generation::{
    ChunkColumnPlan, ColumnInfo, Material, PlantPlan, build_chunk_column_plan, subsurface_tile,
};
pub use noise::{NoiseField, NoiseSystem, derive_seed, noise2d, noise3d};
pub use ocean::{OceanIndex, OceanStats};
pub use world::World;
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenParams};
