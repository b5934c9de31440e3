//! Tile definitions and the validated tile registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{RegistryError, TileRegistry};
pub use types::{AIR, FLOOR, TileCategory, TileId, TileType};
