#![warn(missing_docs)]

//! Tile-grid world with a collision-aware walking avatar, rendered with
//! Macroquad.

mod atlas;
pub mod avatar;
mod config;
mod error;
mod input;
pub mod loader {
    //! JSON decoding of maps and sprite metadata.
    pub mod json_loader;
}
pub mod render;
pub mod world;

pub use atlas::{frame_rect, AtlasInfo, FrameRef, PlaceholderKey};
pub use avatar::{
    resolve_facing, AnimationSet, AvatarConfig, AvatarController, AvatarState, Facing,
    RenderState, SpriteSheet,
};
pub use config::{AssetPlan, GameConfig};
pub use error::WorldError;
pub use input::{frame_units, HeldKeys};
pub use loader::json_loader::{
    decode_animation_file, decode_animation_str, decode_map_file, decode_map_str, AnimationMeta,
    LayerDescription, MapDescription,
};
pub use render::Renderer;
pub use world::{BlockedSet, GridCoord, GridWorld, TileLayer, TileSprite};
