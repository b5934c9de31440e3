use serde::Deserialize;

/// Raw `[[tiles]]` table as written in the tile TOML.
#[derive(Clone, Debug, Deserialize)]
pub struct TilesConfig {
    #[serde(default)]
    pub tiles: Vec<TileDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub hardness: Option<f32>,
    #[serde(default)]
    pub indestructible: Option<bool>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub luminous: Option<bool>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

fn default_category() -> String {
    "terrain".into()
}

impl TileDef {
    /// Convenience for building definitions in code.
    pub fn named(name: &str, id: u16) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
            solid: None,
            hardness: None,
            indestructible: None,
            transparent: None,
            luminous: None,
            category: default_category(),
            color: None,
        }
    }
}
