mod biome;
mod caves;
mod column_plan;
mod hash;
mod ores;
mod subsurface;
mod surface;
mod trees;

pub use self::caves::lava_threshold;
pub use self::column_plan::{ChunkColumnPlan, ColumnInfo, PlantPlan, build_chunk_column_plan};
pub use self::hash::{hash2, rand01};
pub use self::ores::ORE_SCALE_UNIT;
pub use self::subsurface::{Material, subsurface_tile};
pub use self::trees::{FALLBACK_CANOPY_RADIUS, FALLBACK_HEIGHT};
