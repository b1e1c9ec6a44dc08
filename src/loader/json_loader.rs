// src/loader/json_loader.rs
//! Serde models for map and sprite metadata files.

use crate::error::WorldError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Tiled-style map description. Only the fields the world needs are read;
/// anything else in the JSON is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDescription {
    /// map width in cells
    pub width: u32,
    /// map height in cells
    pub height: u32,
    /// layers in draw order
    #[serde(default)]
    pub layers: Vec<LayerDescription>,
}

/// One layer of a [`MapDescription`].
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDescription {
    /// layer name, may be empty
    #[serde(default)]
    pub name: String,
    /// layer tag, `"tilelayer"` for tile data
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// row-major gids
    #[serde(default)]
    pub data: Vec<u32>,
}

impl LayerDescription {
    /// Tile layer named `name` holding `data`.
    pub fn tiles(name: &str, data: Vec<u32>) -> Self {
        Self {
            name: name.to_owned(),
            kind: Some(TILE_LAYER.to_owned()),
            data,
        }
    }

    /// Whether this layer is tagged as tile data.
    pub fn is_tile_layer(&self) -> bool {
        self.kind.as_deref() == Some(TILE_LAYER)
    }
}

const TILE_LAYER: &str = "tilelayer";

impl MapDescription {
    /// First layer tagged as a tile layer.
    pub fn tile_layer(&self) -> Option<&LayerDescription> {
        self.layers.iter().find(|l| l.is_tile_layer())
    }

    /// Built-in demo map: a grass field with a road, water, a bridge and a
    /// handful of obstacles. Features that do not fit in the requested size
    /// are left out.
    pub fn demo(width: u32, height: u32) -> Self {
        const GRASS: u32 = 1;
        const ROAD: u32 = 2;
        const TILE_FLOOR: u32 = 3;
        const WATER: u32 = 4;
        const LAKE: u32 = 5;
        const WALL: u32 = 6;
        const TREE: u32 = 7;
        const HOUSE: u32 = 8;
        const ROCK: u32 = 9;
        const LAVA: u32 = 10;

        let mut data = vec![GRASS; (width * height) as usize];
        let mut put = |x: u32, y: u32, gid: u32| {
            if x < width && y < height {
                data[(y * width + x) as usize] = gid;
            }
        };

        for x in 0..width {
            put(x, 5, ROAD);
        }
        for y in 2..5 {
            put(2, y, WATER);
            put(3, y, LAKE);
        }
        put(7, 7, HOUSE);
        put(7, 2, TREE);
        put(4, 6, ROCK);
        put(8, 3, LAVA);
        put(4, 4, WALL);
        put(5, 4, TILE_FLOOR);
        put(6, 4, TILE_FLOOR);

        Self {
            width,
            height,
            layers: vec![LayerDescription::tiles("Ground", data)],
        }
    }
}

/// Sprite-sheet metadata for the avatar. Every field is optional; zero values
/// count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimationMeta {
    /// frame width in pixels (default: tile size)
    #[serde(default)]
    pub frame_width: Option<u32>,
    /// frame height in pixels (default: tile size)
    #[serde(default)]
    pub frame_height: Option<u32>,
    /// playback rate (default: 8)
    #[serde(default)]
    pub fps: Option<u32>,
    /// frame count (default: derived from the atlas size)
    #[serde(default)]
    pub total_frames: Option<u32>,
    /// facing name to frame indices (default: built-in table)
    #[serde(default)]
    pub animations: Option<HashMap<String, Vec<u32>>>,
}

/// Decode a map description from JSON text.
pub fn decode_map_str(json: &str) -> Result<MapDescription, WorldError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a map description from a `.json` file.
pub fn decode_map_file<P: AsRef<Path>>(path: P) -> Result<MapDescription, WorldError> {
    read_json(path.as_ref())
}

/// Decode avatar animation metadata from JSON text.
pub fn decode_animation_str(json: &str) -> Result<AnimationMeta, WorldError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode avatar animation metadata from a `.json` file.
pub fn decode_animation_file<P: AsRef<Path>>(path: P) -> Result<AnimationMeta, WorldError> {
    read_json(path.as_ref())
}

pub(crate) fn read_json<T: DeserializeOwned>(p: &Path) -> Result<T, WorldError> {
    if p.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(WorldError::InvalidMap(format!(
            "File must be JSON: {}",
            p.display()
        )));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| WorldError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&txt).map_err(|source| WorldError::Json {
        path: p.to_path_buf(),
        source,
    })
}
