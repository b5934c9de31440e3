//! Chunk coordinates and the sparse chunk column storage unit.
#![forbid(unsafe_code)]

mod column;
mod coord;

pub use column::{ChunkColumn, TickEntry, TileMeta};
pub use coord::{CHUNK_DEPTH, CHUNK_VOLUME, CHUNK_WIDTH, ChunkCoord, LocalPos};
