use std::fmt;
use std::str::FromStr;

pub type TileId = u16;

/// Never stored; a lookup miss is air.
pub const AIR: TileId = 0;
/// Reserved for the indestructible world floor.
pub const FLOOR: TileId = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileCategory {
    Air,
    Terrain,
    Ore,
    Liquid,
    Vegetation,
    Structure,
}

impl TileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TileCategory::Air => "air",
            TileCategory::Terrain => "terrain",
            TileCategory::Ore => "ore",
            TileCategory::Liquid => "liquid",
            TileCategory::Vegetation => "vegetation",
            TileCategory::Structure => "structure",
        }
    }
}

impl FromStr for TileCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "air" => Ok(TileCategory::Air),
            "terrain" => Ok(TileCategory::Terrain),
            "ore" => Ok(TileCategory::Ore),
            "liquid" => Ok(TileCategory::Liquid),
            "vegetation" => Ok(TileCategory::Vegetation),
            "structure" => Ok(TileCategory::Structure),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct TileType {
    pub id: TileId,
    pub name: String,
    pub solid: bool,
    /// `f32::INFINITY` for indestructible tiles.
    pub hardness: f32,
    pub transparent: bool,
    pub luminous: bool,
    pub category: TileCategory,
    pub color: [u8; 3],
}

impl TileType {
    pub(crate) fn air() -> Self {
        TileType {
            id: AIR,
            name: "air".into(),
            solid: false,
            hardness: 0.0,
            transparent: true,
            luminous: false,
            category: TileCategory::Air,
            color: [0, 0, 0],
        }
    }

    #[inline]
    pub fn is_indestructible(&self) -> bool {
        self.hardness.is_infinite()
    }
}
