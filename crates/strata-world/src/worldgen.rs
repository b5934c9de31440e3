use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::generation::{FALLBACK_CANOPY_RADIUS, FALLBACK_HEIGHT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse worldgen config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid worldgen config `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: impl Into<String>, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Largest radius whose dense ocean index still fits a `u32` cell index.
pub const MAX_WORLD_RADIUS: u32 = 30_000;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldShape,
    #[serde(default)]
    pub island: Island,
    #[serde(default)]
    pub materials: MaterialNames,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub dirt: Dirt,
    #[serde(default)]
    pub grimstone: Grimstone,
    #[serde(default)]
    pub marble: Marble,
    #[serde(default = "default_ores")]
    pub ores: Vec<OreDef>,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub lava: Lava,
    #[serde(default)]
    pub ocean: Ocean,
    #[serde(default)]
    pub biome: Biome,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            world: WorldShape::default(),
            island: Island::default(),
            materials: MaterialNames::default(),
            surface: Surface::default(),
            dirt: Dirt::default(),
            grimstone: Grimstone::default(),
            marble: Marble::default(),
            ores: default_ores(),
            caves: Caves::default(),
            lava: Lava::default(),
            ocean: Ocean::default(),
            biome: Biome::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldShape {
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default = "default_depth")]
    pub depth: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_seed")]
    pub seed: i64,
}
fn default_radius() -> u32 {
    5_000
}
fn default_depth() -> i32 {
    1_024
}
fn default_sea_level() -> i32 {
    512
}
fn default_seed() -> i64 {
    1_337
}
impl Default for WorldShape {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            depth: default_depth(),
            sea_level: default_sea_level(),
            seed: default_seed(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Island {
    #[serde(default = "default_center_height")]
    pub center_height: f32,
    #[serde(default = "default_edge_height")]
    pub edge_height: f32,
    #[serde(default = "default_falloff_steepness")]
    pub falloff_steepness: f32,
    #[serde(default = "default_falloff_exponent")]
    pub falloff_exponent: f32,
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f32,
    #[serde(default = "default_island_scale")]
    pub noise_scale: f32,
    #[serde(default = "default_island_octaves")]
    pub noise_octaves: u32,
    #[serde(default = "default_fade_ratio")]
    pub boundary_fade_ratio: f32,
}
fn default_center_height() -> f32 {
    720.0
}
fn default_edge_height() -> f32 {
    380.0
}
fn default_falloff_steepness() -> f32 {
    3.0
}
fn default_falloff_exponent() -> f32 {
    2.0
}
fn default_noise_amplitude() -> f32 {
    120.0
}
fn default_island_scale() -> f32 {
    900.0
}
fn default_island_octaves() -> u32 {
    5
}
fn default_fade_ratio() -> f32 {
    0.08
}
impl Default for Island {
    fn default() -> Self {
        Self {
            center_height: default_center_height(),
            edge_height: default_edge_height(),
            falloff_steepness: default_falloff_steepness(),
            falloff_exponent: default_falloff_exponent(),
            noise_amplitude: default_noise_amplitude(),
            noise_scale: default_island_scale(),
            noise_octaves: default_island_octaves(),
            boundary_fade_ratio: default_fade_ratio(),
        }
    }
}

/// Tile names the generator emits, resolved against the tile registry at load.
#[derive(Clone, Debug, Deserialize)]
pub struct MaterialNames {
    #[serde(default = "d_grass")]
    pub grass: String,
    #[serde(default = "d_sand")]
    pub sand: String,
    #[serde(default = "d_stone")]
    pub stone: String,
    #[serde(default = "d_dirt")]
    pub dirt: String,
    #[serde(default = "d_grimstone")]
    pub grimstone: String,
    #[serde(default = "d_marble")]
    pub marble: String,
    #[serde(default = "d_water")]
    pub water: String,
    #[serde(default = "d_lava")]
    pub lava: String,
}
fn d_grass() -> String {
    "grass".into()
}
fn d_sand() -> String {
    "sand".into()
}
fn d_stone() -> String {
    "stone".into()
}
fn d_dirt() -> String {
    "dirt".into()
}
fn d_grimstone() -> String {
    "grimstone".into()
}
fn d_marble() -> String {
    "marble".into()
}
fn d_water() -> String {
    "water".into()
}
fn d_lava() -> String {
    "lava".into()
}
impl Default for MaterialNames {
    fn default() -> Self {
        Self {
            grass: d_grass(),
            sand: d_sand(),
            stone: d_stone(),
            dirt: d_dirt(),
            grimstone: d_grimstone(),
            marble: d_marble(),
            water: d_water(),
            lava: d_lava(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    /// Columns this many layers above sea level get a bare stone surface.
    #[serde(default = "default_stone_above_sea")]
    pub stone_above_sea: i32,
}
fn default_stone_above_sea() -> i32 {
    160
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            stone_above_sea: default_stone_above_sea(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Dirt {
    #[serde(default = "default_dirt_min")]
    pub min_depth: i32,
    #[serde(default = "default_dirt_max")]
    pub max_depth: i32,
    #[serde(default = "default_dirt_scale")]
    pub scale: f32,
}
fn default_dirt_min() -> i32 {
    2
}
fn default_dirt_max() -> i32 {
    6
}
fn default_dirt_scale() -> f32 {
    180.0
}
impl Default for Dirt {
    fn default() -> Self {
        Self {
            min_depth: default_dirt_min(),
            max_depth: default_dirt_max(),
            scale: default_dirt_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grimstone {
    #[serde(default = "default_grim_base")]
    pub base_layer: i32,
    #[serde(default = "default_grim_variation")]
    pub variation: f32,
    #[serde(default = "default_grim_scale")]
    pub scale: f32,
}
fn default_grim_base() -> i32 {
    96
}
fn default_grim_variation() -> f32 {
    24.0
}
fn default_grim_scale() -> f32 {
    400.0
}
impl Default for Grimstone {
    fn default() -> Self {
        Self {
            base_layer: default_grim_base(),
            variation: default_grim_variation(),
            scale: default_grim_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MarbleBand {
    pub center: i32,
    pub half_width: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Marble {
    #[serde(default = "default_marble_bands")]
    pub bands: Vec<MarbleBand>,
    #[serde(default = "default_marble_wobble")]
    pub wobble: f32,
    #[serde(default = "default_marble_scale")]
    pub scale: f32,
}
fn default_marble_bands() -> Vec<MarbleBand> {
    vec![
        MarbleBand {
            center: 300,
            half_width: 6,
        },
        MarbleBand {
            center: 420,
            half_width: 4,
        },
    ]
}
fn default_marble_wobble() -> f32 {
    10.0
}
fn default_marble_scale() -> f32 {
    350.0
}
impl Default for Marble {
    fn default() -> Self {
        Self {
            bands: default_marble_bands(),
            wobble: default_marble_wobble(),
            scale: default_marble_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct OreDef {
    pub tile: String,
    pub rarity: f32,
    pub min_depth: i32,
    pub max_depth: i32,
    #[serde(default = "default_cluster")]
    pub cluster_size: f32,
}
fn default_cluster() -> f32 {
    2.0
}
fn ore(tile: &str, rarity: f32, min_depth: i32, max_depth: i32, cluster_size: f32) -> OreDef {
    OreDef {
        tile: tile.into(),
        rarity,
        min_depth,
        max_depth,
        cluster_size,
    }
}
fn default_ores() -> Vec<OreDef> {
    vec![
        ore("diamond_ore", 0.04, 300, 1_000, 1.5),
        ore("gold_ore", 0.06, 120, 700, 2.0),
        ore("iron_ore", 0.09, 16, 400, 3.0),
        ore("coal_ore", 0.12, 4, 200, 4.0),
    ]
}

#[derive(Clone, Debug, Deserialize)]
pub struct Caves {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_cave_threshold")]
    pub threshold: f32,
    #[serde(default = "default_cave_scale")]
    pub scale: f32,
    #[serde(default = "default_cave_octaves")]
    pub octaves: u32,
    #[serde(default = "default_one")]
    pub horizontal_stretch: f32,
    #[serde(default = "default_vertical_stretch")]
    pub vertical_stretch: f32,
}
fn default_true() -> bool {
    true
}
fn default_one() -> f32 {
    1.0
}
fn default_cave_threshold() -> f32 {
    0.74
}
fn default_cave_scale() -> f32 {
    40.0
}
fn default_cave_octaves() -> u32 {
    2
}
fn default_vertical_stretch() -> f32 {
    2.2
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            enable: true,
            threshold: default_cave_threshold(),
            scale: default_cave_scale(),
            octaves: default_cave_octaves(),
            horizontal_stretch: default_one(),
            vertical_stretch: default_vertical_stretch(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Lava {
    #[serde(default = "default_true")]
    pub enable: bool,
    #[serde(default = "default_lava_threshold")]
    pub base_threshold: f32,
    /// Layers at or below this use `base_threshold`.
    #[serde(default = "default_lava_full")]
    pub full_layer: i32,
    /// Threshold reaches 1.0 here; no lava at or above it.
    #[serde(default = "default_lava_ceiling")]
    pub ceiling_layer: i32,
    #[serde(default = "default_lava_scale")]
    pub scale: f32,
    #[serde(default = "default_cave_octaves")]
    pub octaves: u32,
}
fn default_lava_threshold() -> f32 {
    0.78
}
fn default_lava_full() -> i32 {
    120
}
fn default_lava_ceiling() -> i32 {
    360
}
fn default_lava_scale() -> f32 {
    30.0
}
impl Default for Lava {
    fn default() -> Self {
        Self {
            enable: true,
            base_threshold: default_lava_threshold(),
            full_layer: default_lava_full(),
            ceiling_layer: default_lava_ceiling(),
            scale: default_lava_scale(),
            octaves: default_cave_octaves(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ocean {
    #[serde(default = "default_beach_radius")]
    pub beach_radius: i32,
}
fn default_beach_radius() -> i32 {
    3
}
impl Default for Ocean {
    fn default() -> Self {
        Self {
            beach_radius: default_beach_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biome {
    #[serde(default = "default_temp_scale")]
    pub temperature_scale: f32,
    #[serde(default = "default_humidity_scale")]
    pub humidity_scale: f32,
    /// Temperature drop per layer above sea level.
    #[serde(default = "default_lapse_rate")]
    pub lapse_rate: f32,
    #[serde(default = "default_plants")]
    pub plants: Vec<PlantDef>,
    #[serde(default = "default_trees")]
    pub trees: BTreeMap<String, TreeSpecies>,
}
fn default_temp_scale() -> f32 {
    1_200.0
}
fn default_humidity_scale() -> f32 {
    1_000.0
}
fn default_lapse_rate() -> f32 {
    0.004
}
impl Default for Biome {
    fn default() -> Self {
        Self {
            temperature_scale: default_temp_scale(),
            humidity_scale: default_humidity_scale(),
            lapse_rate: default_lapse_rate(),
            plants: default_plants(),
            trees: default_trees(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlantKindTag {
    Cover,
    Tree,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlantDef {
    pub name: String,
    pub kind: PlantKindTag,
    /// Cover plants: the tile placed above the surface.
    #[serde(default)]
    pub tile: Option<String>,
    /// Trees: key into `biome.trees`.
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default = "default_window")]
    pub temperature: [f32; 2],
    #[serde(default = "default_window")]
    pub humidity: [f32; 2],
    pub rarity: f32,
}
fn default_window() -> [f32; 2] {
    [0.0, 1.0]
}
fn cover(name: &str, tile: &str, temperature: [f32; 2], humidity: [f32; 2], rarity: f32) -> PlantDef {
    PlantDef {
        name: name.into(),
        kind: PlantKindTag::Cover,
        tile: Some(tile.into()),
        species: None,
        temperature,
        humidity,
        rarity,
    }
}
fn tree(name: &str, species: &str, temperature: [f32; 2], humidity: [f32; 2], rarity: f32) -> PlantDef {
    PlantDef {
        name: name.into(),
        kind: PlantKindTag::Tree,
        tile: None,
        species: Some(species.into()),
        temperature,
        humidity,
        rarity,
    }
}
fn default_plants() -> Vec<PlantDef> {
    vec![
        tree("pine", "pine", [0.0, 0.42], [0.35, 1.0], 0.03),
        tree("oak", "oak", [0.38, 0.8], [0.45, 1.0], 0.025),
        cover("fern", "fern", [0.3, 0.7], [0.6, 1.0], 0.12),
        cover("wildflower", "wildflower", [0.45, 0.9], [0.3, 0.7], 0.05),
        cover("tall_grass", "tall_grass", [0.2, 1.0], [0.25, 1.0], 0.18),
    ]
}

#[derive(Clone, Debug, Deserialize)]
pub struct TreeSpecies {
    pub trunk: String,
    pub canopy: String,
    #[serde(default = "default_tree_height")]
    pub height: [i32; 2],
    #[serde(default = "default_canopy_radius")]
    pub canopy_radius: [i32; 2],
}
fn default_tree_height() -> [i32; 2] {
    FALLBACK_HEIGHT
}
fn default_canopy_radius() -> [i32; 2] {
    FALLBACK_CANOPY_RADIUS
}
const DEFAULT_TREE_TRUNK: &str = "oak_log";
const DEFAULT_TREE_CANOPY: &str = "oak_leaves";

/// Stand-in for a plant rule whose species has no `[biome.trees.<name>]` entry.
impl Default for TreeSpecies {
    fn default() -> Self {
        Self {
            trunk: DEFAULT_TREE_TRUNK.into(),
            canopy: DEFAULT_TREE_CANOPY.into(),
            height: default_tree_height(),
            canopy_radius: default_canopy_radius(),
        }
    }
}
fn default_trees() -> BTreeMap<String, TreeSpecies> {
    BTreeMap::from([
        (
            "oak".to_string(),
            TreeSpecies {
                trunk: "oak_log".into(),
                canopy: "oak_leaves".into(),
                height: [4, 7],
                canopy_radius: [2, 3],
            },
        ),
        (
            "pine".to_string(),
            TreeSpecies {
                trunk: "pine_log".into(),
                canopy: "pine_needles".into(),
                height: [6, 10],
                canopy_radius: [1, 2],
            },
        ),
    ])
}

impl WorldGenConfig {
    /// Radius-64 development world: small enough for `preload_all` and tests.
    pub fn small() -> Self {
        Self {
            world: WorldShape {
                radius: 64,
                depth: 48,
                sea_level: 24,
                seed: default_seed(),
            },
            island: Island {
                center_height: 36.0,
                edge_height: 12.0,
                falloff_steepness: 3.0,
                falloff_exponent: 2.0,
                noise_amplitude: 4.0,
                noise_scale: 40.0,
                noise_octaves: 3,
                boundary_fade_ratio: 0.15,
            },
            materials: MaterialNames::default(),
            surface: Surface { stone_above_sea: 9 },
            dirt: Dirt {
                min_depth: 1,
                max_depth: 3,
                scale: 16.0,
            },
            grimstone: Grimstone {
                base_layer: 5,
                variation: 2.0,
                scale: 20.0,
            },
            marble: Marble {
                bands: vec![MarbleBand {
                    center: 14,
                    half_width: 1,
                }],
                wobble: 2.0,
                scale: 24.0,
            },
            ores: vec![
                ore("diamond_ore", 0.04, 14, 40, 1.0),
                ore("gold_ore", 0.06, 9, 30, 1.0),
                ore("iron_ore", 0.09, 4, 24, 1.5),
                ore("coal_ore", 0.12, 2, 16, 2.0),
            ],
            caves: Caves {
                scale: 8.0,
                ..Caves::default()
            },
            lava: Lava {
                full_layer: 4,
                ceiling_layer: 12,
                scale: 6.0,
                ..Lava::default()
            },
            ocean: Ocean { beach_radius: 2 },
            biome: Biome {
                temperature_scale: 60.0,
                humidity_scale: 50.0,
                lapse_rate: 0.02,
                plants: default_plants(),
                trees: default_trees(),
            },
        }
    }

    /// Schema checks run before any generation; a bad config never reaches the generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        check_world_shape(i64::from(w.radius), w.depth, w.sea_level)?;
        let i = &self.island;
        for (field, v) in [
            ("island.center_height", i.center_height),
            ("island.edge_height", i.edge_height),
        ] {
            if !(0.0..w.depth as f32).contains(&v) {
                return Err(invalid(field, "must lie inside the world depth"));
            }
        }
        if i.edge_height >= w.sea_level as f32 {
            return Err(invalid(
                "island.edge_height",
                "must be below sea level so the world edge is open ocean",
            ));
        }
        positive("island.noise_scale", i.noise_scale)?;
        positive("island.falloff_steepness", i.falloff_steepness)?;
        positive("island.falloff_exponent", i.falloff_exponent)?;
        if i.noise_amplitude < 0.0 {
            return Err(invalid("island.noise_amplitude", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&i.boundary_fade_ratio) {
            return Err(invalid("island.boundary_fade_ratio", "must be in [0, 1]"));
        }
        if self.dirt.min_depth < 0 || self.dirt.min_depth > self.dirt.max_depth {
            return Err(invalid("dirt", "need 0 <= min_depth <= max_depth"));
        }
        positive("dirt.scale", self.dirt.scale)?;
        positive("grimstone.scale", self.grimstone.scale)?;
        positive("marble.scale", self.marble.scale)?;
        if self.marble.bands.iter().any(|b| b.half_width < 0) {
            return Err(invalid("marble.bands", "half_width must not be negative"));
        }
        for (idx, o) in self.ores.iter().enumerate() {
            let field = format!("ores[{idx}]");
            if o.min_depth > o.max_depth {
                return Err(invalid(field, "min_depth exceeds max_depth"));
            }
            if !(0.0..=1.0).contains(&o.rarity) {
                return Err(invalid(field, "rarity must be in [0, 1]"));
            }
            if o.cluster_size <= 0.0 {
                return Err(invalid(field, "cluster_size must be positive"));
            }
        }
        positive("caves.scale", self.caves.scale)?;
        positive("caves.horizontal_stretch", self.caves.horizontal_stretch)?;
        positive("caves.vertical_stretch", self.caves.vertical_stretch)?;
        positive("lava.scale", self.lava.scale)?;
        if self.lava.full_layer > self.lava.ceiling_layer {
            return Err(invalid("lava", "full_layer exceeds ceiling_layer"));
        }
        if self.ocean.beach_radius < 0 {
            return Err(invalid("ocean.beach_radius", "must not be negative"));
        }
        positive("biome.temperature_scale", self.biome.temperature_scale)?;
        positive("biome.humidity_scale", self.biome.humidity_scale)?;
        for (name, sp) in &self.biome.trees {
            let field = format!("biome.trees.{name}");
            if sp.height[0] < 1 || sp.height[0] > sp.height[1] {
                return Err(invalid(field, "height must be [min, max] with 1 <= min <= max"));
            }
            if sp.canopy_radius[0] < 0 || sp.canopy_radius[0] > sp.canopy_radius[1] {
                return Err(invalid(field, "canopy_radius must be [min, max] with 0 <= min <= max"));
            }
        }
        for (idx, p) in self.biome.plants.iter().enumerate() {
            let field = format!("biome.plants[{idx}]");
            if !(0.0..=1.0).contains(&p.rarity) {
                return Err(invalid(field, "rarity must be in [0, 1]"));
            }
            if p.temperature[0] > p.temperature[1] || p.humidity[0] > p.humidity[1] {
                return Err(invalid(field, "climate window min exceeds max"));
            }
            match p.kind {
                PlantKindTag::Cover if p.tile.is_none() => {
                    return Err(invalid(field, "cover plants need a `tile`"));
                }
                PlantKindTag::Tree => match p.species.as_deref() {
                    Some(sp) if self.biome.trees.contains_key(sp) => {}
                    Some(sp) => {
                        log::warn!(
                            target: "worldgen",
                            "{field}: unknown tree species `{sp}`, using the default species"
                        );
                    }
                    None => return Err(invalid(field, "tree plants need a `species`")),
                },
                _ => {}
            }
        }
        Ok(())
    }
}

fn check_world_shape(radius: i64, depth: i32, sea_level: i32) -> Result<(), ConfigError> {
    if radius < 1 || radius > i64::from(MAX_WORLD_RADIUS) {
        return Err(invalid(
            "world.radius",
            format!("must be in 1..={MAX_WORLD_RADIUS}, got {radius}"),
        ));
    }
    if depth < 2 {
        return Err(invalid("world.depth", "must be at least 2"));
    }
    if sea_level <= 0 || sea_level >= depth {
        return Err(invalid(
            "world.sea_level",
            format!("must be inside (0, {depth}), got {sea_level}"),
        ));
    }
    Ok(())
}

fn positive(field: &str, v: f32) -> Result<(), ConfigError> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {v}")))
    }
}

#[derive(Clone, Debug)]
pub enum PlantKind {
    Cover { tile: String },
    Tree { species: String },
}

#[derive(Clone, Debug)]
pub struct PlantRule {
    pub name: String,
    pub kind: PlantKind,
    pub temperature: [f32; 2],
    pub humidity: [f32; 2],
    pub rarity: f32,
}

impl PlantRule {
    #[inline]
    pub fn accepts(&self, temperature: f32, humidity: f32) -> bool {
        temperature >= self.temperature[0]
            && temperature <= self.temperature[1]
            && humidity >= self.humidity[0]
            && humidity <= self.humidity[1]
    }
}

// Flattened params used in tight loops (snapshot of a validated config)
#[derive(Clone, Debug)]
pub struct WorldGenParams {
    pub radius: i32,
    pub depth: i32,
    pub sea_level: i32,
    pub seed: i64,
    pub island: Island,
    pub materials: MaterialNames,
    pub stone_above_sea: i32,
    pub dirt: Dirt,
    pub grimstone: Grimstone,
    pub marble: Marble,
    pub ores: Vec<OreDef>,
    pub caves: Caves,
    pub lava: Lava,
    pub beach_radius: i32,
    pub temperature_scale: f32,
    pub humidity_scale: f32,
    pub lapse_rate: f32,
    pub plants: Vec<PlantRule>,
    pub trees: BTreeMap<String, TreeSpecies>,
}

impl WorldGenParams {
    /// Flattens `cfg`; call `validate` first (the loaders below do).
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let plants = cfg
            .biome
            .plants
            .iter()
            .map(|p| PlantRule {
                name: p.name.clone(),
                kind: match p.kind {
                    PlantKindTag::Cover => PlantKind::Cover {
                        tile: p.tile.clone().unwrap_or_default(),
                    },
                    PlantKindTag::Tree => PlantKind::Tree {
                        species: p.species.clone().unwrap_or_default(),
                    },
                },
                temperature: p.temperature,
                humidity: p.humidity,
                rarity: p.rarity,
            })
            .collect();
        Self {
            radius: cfg.world.radius as i32,
            depth: cfg.world.depth,
            sea_level: cfg.world.sea_level,
            seed: cfg.world.seed,
            island: cfg.island.clone(),
            materials: cfg.materials.clone(),
            stone_above_sea: cfg.surface.stone_above_sea,
            dirt: cfg.dirt.clone(),
            grimstone: cfg.grimstone.clone(),
            marble: cfg.marble.clone(),
            ores: cfg.ores.clone(),
            caves: cfg.caves.clone(),
            lava: cfg.lava.clone(),
            beach_radius: cfg.ocean.beach_radius,
            temperature_scale: cfg.biome.temperature_scale,
            humidity_scale: cfg.biome.humidity_scale,
            lapse_rate: cfg.biome.lapse_rate,
            plants,
            trees: cfg.biome.trees.clone(),
        }
    }

    /// Re-checks radius, depth and sea level on params that may not have come
    /// through `validate` (hand-built or `from_config`).
    pub fn check_shape(&self) -> Result<(), ConfigError> {
        check_world_shape(i64::from(self.radius), self.depth, self.sea_level)
    }

    pub fn try_from_config(cfg: &WorldGenConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::from_config(cfg))
    }

    pub fn small() -> Self {
        Self::from_config(&WorldGenConfig::small())
    }

    /// The named species, or `TreeSpecies::default()` when it is not configured.
    pub fn tree_species(&self, name: &str) -> Cow<'_, TreeSpecies> {
        match self.trees.get(name) {
            Some(sp) => Cow::Borrowed(sp),
            None => Cow::Owned(TreeSpecies::default()),
        }
    }

    /// Every tile name the generator can emit.
    pub fn tile_names(&self) -> Vec<&str> {
        let m = &self.materials;
        let mut names = vec![
            m.grass.as_str(),
            m.sand.as_str(),
            m.stone.as_str(),
            m.dirt.as_str(),
            m.grimstone.as_str(),
            m.marble.as_str(),
            m.water.as_str(),
            m.lava.as_str(),
        ];
        names.extend(self.ores.iter().map(|o| o.tile.as_str()));
        let mut fallback_tree = false;
        for p in &self.plants {
            match &p.kind {
                PlantKind::Cover { tile } => names.push(tile.as_str()),
                PlantKind::Tree { species } => fallback_tree |= !self.trees.contains_key(species),
            }
        }
        if fallback_tree {
            names.push(DEFAULT_TREE_TRUNK);
            names.push(DEFAULT_TREE_CANOPY);
        }
        for sp in self.trees.values() {
            names.push(sp.trunk.as_str());
            names.push(sp.canopy.as_str());
        }
        names
    }
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

pub fn params_from_toml_str(s: &str) -> Result<WorldGenParams, ConfigError> {
    let cfg: WorldGenConfig = toml::from_str(s)?;
    WorldGenParams::try_from_config(&cfg)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path)?;
    params_from_toml_str(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        WorldGenConfig::default().validate().expect("default preset");
        WorldGenConfig::small().validate().expect("small preset");
    }

    #[test]
    fn empty_toml_uses_production_defaults() {
        let p = params_from_toml_str("").unwrap();
        assert_eq!(p.radius, 5_000);
        assert_eq!(p.depth, 1_024);
        assert_eq!(p.ores.len(), 4);
        assert!(!p.plants.is_empty());
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let p = params_from_toml_str(
            r#"
            [world]
            radius = 64
            depth = 48
            sea_level = 24

            [island]
            center_height = 40.0
            edge_height = 10.0

            [[ores]]
            tile = "coal_ore"
            rarity = 0.2
            min_depth = 1
            max_depth = 20
        "#,
        )
        .unwrap();
        assert_eq!(p.radius, 64);
        assert_eq!(p.island.noise_octaves, 5);
        assert_eq!(p.ores.len(), 1);
        assert_eq!(p.ores[0].cluster_size, 2.0);
    }

    #[test]
    fn rejects_sea_level_outside_depth() {
        let err = params_from_toml_str("[world]\ndepth = 32\nsea_level = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "world.sea_level"));
    }

    #[test]
    fn unknown_tree_species_falls_back_to_default() {
        let mut cfg = WorldGenConfig::small();
        cfg.biome.plants.push(tree("baobab", "baobab", [0.0, 1.0], [0.0, 1.0], 0.1));
        let p = WorldGenParams::try_from_config(&cfg).expect("unknown species is not fatal");
        let sp = p.tree_species("baobab");
        assert_eq!(sp.height, FALLBACK_HEIGHT);
        assert_eq!(sp.canopy_radius, FALLBACK_CANOPY_RADIUS);
        assert_eq!(sp.trunk, TreeSpecies::default().trunk);
        assert_eq!(p.tree_species("oak").trunk, "oak_log");
        assert!(p.tile_names().contains(&"oak_leaves"));
    }

    #[test]
    fn tree_rule_without_species_is_rejected() {
        let mut cfg = WorldGenConfig::small();
        let mut def = tree("mystery", "mystery", [0.0, 1.0], [0.0, 1.0], 0.1);
        def.species = None;
        cfg.biome.plants.push(def);
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn shape_check_catches_hand_built_params() {
        let mut p = WorldGenParams::small();
        assert!(p.check_shape().is_ok());
        p.depth = 1;
        assert!(matches!(p.check_shape(), Err(ConfigError::Invalid { ref field, .. }) if field == "world.depth"));
        let mut p = WorldGenParams::small();
        p.radius = -3;
        assert!(p.check_shape().is_err());
    }

    #[test]
    fn rejects_inverted_ore_depths() {
        let mut cfg = WorldGenConfig::small();
        cfg.ores[0].min_depth = 30;
        cfg.ores[0].max_depth = 10;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            params_from_toml_str("[world]\nradius = \"big\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn tile_names_cover_every_emitter() {
        let p = WorldGenParams::small();
        let names = p.tile_names();
        for expect in ["grass", "water", "lava", "coal_ore", "oak_log", "pine_needles", "fern"] {
            assert!(names.contains(&expect), "missing {expect}");
        }
    }
}
