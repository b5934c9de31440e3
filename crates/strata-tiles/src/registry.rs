use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::{TileDef, TilesConfig};
use super::types::{AIR, FLOOR, TileCategory, TileId, TileType};

const BUILTIN_TILES: &str = include_str!("../assets/tiles.toml");

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read tile table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tile table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tile `{name}` has no id")]
    MissingId { name: String },

    #[error("tile id {id} assigned to both `{first}` and `{second}`")]
    DuplicateId {
        id: TileId,
        first: String,
        second: String,
    },

    #[error("tile name `{name}` defined more than once")]
    DuplicateName { name: String },

    #[error("tile id space is not contiguous: id {missing} is unassigned")]
    NonContiguous { missing: TileId },

    #[error("id 0 is reserved for air but was given to `{name}`")]
    ReservedAir { name: String },

    #[error("id 1 (world floor) is not defined")]
    MissingFloor,

    #[error("floor tile `{name}` (id 1) must be indestructible")]
    FloorNotIndestructible { name: String },

    #[error("tile `{name}` has unknown category `{category}`")]
    UnknownCategory { name: String, category: String },
}

/// Validated id <-> definition table. Loaded once, never mutated.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    tiles: Vec<TileType>,
    by_name: HashMap<String, TileId>,
}

impl TileRegistry {
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_TILES)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        let cfg: TilesConfig = toml::from_str(s)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: TilesConfig) -> Result<Self, RegistryError> {
        let mut slots: Vec<Option<TileType>> = vec![Some(TileType::air())];
        let mut by_name: HashMap<String, TileId> = HashMap::new();
        by_name.insert("air".into(), AIR);
        let mut explicit_air = false;

        for def in cfg.tiles {
            let id = def.id.ok_or_else(|| RegistryError::MissingId {
                name: def.name.clone(),
            })?;
            if id == AIR {
                if def.name != "air" {
                    return Err(RegistryError::ReservedAir { name: def.name });
                }
                if explicit_air {
                    return Err(RegistryError::DuplicateName { name: def.name });
                }
                explicit_air = true;
                continue;
            }
            if by_name.contains_key(&def.name) {
                return Err(RegistryError::DuplicateName { name: def.name });
            }
            let ty = compile_tile(id, def)?;
            let idx = id as usize;
            if slots.len() <= idx {
                slots.resize(idx + 1, None);
            }
            if let Some(prev) = &slots[idx] {
                return Err(RegistryError::DuplicateId {
                    id,
                    first: prev.name.clone(),
                    second: ty.name,
                });
            }
            by_name.insert(ty.name.clone(), id);
            slots[idx] = Some(ty);
        }

        let mut tiles = Vec::with_capacity(slots.len());
        for (i, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(ty) => tiles.push(ty),
                None => {
                    return Err(RegistryError::NonContiguous {
                        missing: i as TileId,
                    });
                }
            }
        }

        let floor = tiles
            .get(FLOOR as usize)
            .ok_or(RegistryError::MissingFloor)?;
        if !floor.is_indestructible() {
            return Err(RegistryError::FloorNotIndestructible {
                name: floor.name.clone(),
            });
        }

        log::debug!(target: "tiles", "tile registry loaded: {} tiles", tiles.len());
        Ok(Self { tiles, by_name })
    }

    #[inline]
    pub fn get(&self, id: TileId) -> Option<&TileType> {
        self.tiles.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    /// Number of ids including air.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.tiles.iter()
    }
}

fn compile_tile(id: TileId, def: TileDef) -> Result<TileType, RegistryError> {
    let category: TileCategory =
        def.category
            .parse()
            .map_err(|_| RegistryError::UnknownCategory {
                name: def.name.clone(),
                category: def.category.clone(),
            })?;
    let hardness = if def.indestructible.unwrap_or(false) {
        f32::INFINITY
    } else {
        def.hardness.unwrap_or(1.0)
    };
    let solid = def.solid.unwrap_or(!matches!(
        category,
        TileCategory::Air | TileCategory::Liquid
    ));
    Ok(TileType {
        id,
        name: def.name,
        solid,
        hardness,
        transparent: def.transparent.unwrap_or(!solid),
        luminous: def.luminous.unwrap_or(false),
        category,
        color: def.color.unwrap_or([255, 0, 255]),
    })
}
