use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::avatar::AvatarConfig;
use crate::error::WorldError;
use crate::loader::json_loader::read_json;

/// Game settings. Every field has a default, so an empty JSON object is a
/// valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// cell edge in pixels
    pub tile_size: u32,
    /// window width in pixels
    pub view_width: u32,
    /// window height in pixels
    pub view_height: u32,
    /// size of the built-in map used when no map file exists
    pub demo_size: (u32, u32),
    /// tile atlas image
    pub tilesheet: PathBuf,
    /// avatar atlas image
    pub player_texture: PathBuf,
    /// avatar animation metadata
    pub player_anim: PathBuf,
    /// user-edited map, preferred when present
    pub user_map: PathBuf,
    /// shipped map
    pub demo_map: PathBuf,
    /// avatar tuning
    pub avatar: AvatarConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            view_width: 32 * 20,
            view_height: 32 * 15,
            demo_size: (20, 15),
            tilesheet: "assets/build/tiles/tilesheet.png".into(),
            player_texture: "assets/build/characters/player.png".into(),
            player_anim: "assets/build/characters/player.anim.json".into(),
            user_map: "maps/user_map.json".into(),
            demo_map: "maps/demo_map.json".into(),
            avatar: AvatarConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads a config from a `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WorldError> {
        read_json(path.as_ref())
    }
}

/// Asset files found on disk, resolved against a root directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    /// map file; `None` means use the built-in demo map
    pub map: Option<PathBuf>,
    /// tile atlas image
    pub tilesheet: Option<PathBuf>,
    /// avatar atlas image
    pub player_texture: Option<PathBuf>,
    /// avatar animation metadata
    pub player_anim: Option<PathBuf>,
}

impl AssetPlan {
    /// Looks for each configured asset under `root`. The user map wins over
    /// the demo map.
    pub fn probe(root: &Path, config: &GameConfig) -> Self {
        let found = |rel: &Path| {
            let p = root.join(rel);
            p.is_file().then_some(p)
        };

        let plan = Self {
            map: found(&config.user_map).or_else(|| found(&config.demo_map)),
            tilesheet: found(&config.tilesheet),
            player_texture: found(&config.player_texture),
            player_anim: found(&config.player_anim),
        };

        info!(
            "assets: map={:?} tilesheet={} player={} anim={}",
            plan.map,
            plan.tilesheet.is_some(),
            plan.player_texture.is_some(),
            plan.player_anim.is_some()
        );
        plan
    }

    /// Both the avatar atlas and its metadata are present.
    pub fn has_sprite_sheet(&self) -> bool {
        self.player_texture.is_some() && self.player_anim.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg: GameConfig = serde_json::from_str("{}").expect("decode");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "tile_size": 16, "avatar": { "speed": 90.0 } }"#)
                .expect("decode");
        assert_eq!(cfg.tile_size, 16);
        assert_eq!(cfg.avatar.speed, Some(90.0));
        assert_eq!(cfg.user_map, PathBuf::from("maps/user_map.json"));
    }
}
