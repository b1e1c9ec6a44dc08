//! Draws a [`GridWorld`] and an [`AvatarController`] with macroquad.
//!
//! Needs a live macroquad context; everything upstream of this module does
//! not.

use std::collections::HashMap;

use macroquad::math::DVec2;
use macroquad::prelude::*;

use crate::atlas::{FrameRef, PlaceholderKey};
use crate::avatar::AvatarController;
use crate::world::GridWorld;

pub mod cull;

pub use cull::{camera_offset, query_visible_rect, visible_cell_range};

/// Sprite anchor of the avatar, as a fraction of the frame size.
const AVATAR_ANCHOR: (f32, f32) = (0.5, 0.9);

/// Holds the GPU textures: the optional atlases plus placeholder images
/// uploaded on first use.
pub struct Renderer {
    tilesheet: Option<Texture2D>,
    player: Option<Texture2D>,
    uploaded: HashMap<PlaceholderKey, Texture2D>,
}

impl Renderer {
    /// Renderer drawing atlas frames from `tilesheet` / `player`.
    pub fn new(tilesheet: Option<Texture2D>, player: Option<Texture2D>) -> Self {
        for tex in tilesheet.iter().chain(player.iter()) {
            tex.set_filter(FilterMode::Nearest);
        }
        Self {
            tilesheet,
            player,
            uploaded: HashMap::new(),
        }
    }

    fn upload(&mut self, key: PlaceholderKey, image: &Image) -> &Texture2D {
        self.uploaded.entry(key).or_insert_with(|| {
            let tex = Texture2D::from_image(image);
            tex.set_filter(FilterMode::Nearest);
            tex
        })
    }

    /// Draws the tiles visible in a `view`-sized window translated by
    /// `offset`.
    pub fn draw_world(&mut self, world: &GridWorld, offset: DVec2, view: DVec2) {
        let view_min = -offset;
        let view_max = view_min + view;

        for sprite in query_visible_rect(world, view_min, view_max) {
            let x = (sprite.position.x + offset.x) as f32;
            let y = (sprite.position.y + offset.y) as f32;

            match sprite.frame {
                FrameRef::Atlas(src) => {
                    if let Some(tex) = &self.tilesheet {
                        draw_texture_ex(
                            tex,
                            x,
                            y,
                            WHITE,
                            DrawTextureParams {
                                source: Some(src),
                                ..Default::default()
                            },
                        );
                    }
                }
                FrameRef::Placeholder(key) => {
                    if let Some(img) = world.placeholder(sprite.gid) {
                        let tex = self.upload(key, img);
                        draw_texture(tex, x, y, WHITE);
                    }
                }
            }
        }
    }

    /// Draws the avatar's current frame anchored at its feet.
    pub fn draw_avatar(&mut self, avatar: &AvatarController<'_>, offset: DVec2) {
        let pos = avatar.position() + offset;

        match avatar.current_frame() {
            FrameRef::Atlas(src) => {
                if let Some(tex) = &self.player {
                    let x = pos.x as f32 - src.w * AVATAR_ANCHOR.0;
                    let y = pos.y as f32 - src.h * AVATAR_ANCHOR.1;
                    draw_texture_ex(
                        tex,
                        x,
                        y,
                        WHITE,
                        DrawTextureParams {
                            source: Some(src),
                            ..Default::default()
                        },
                    );
                }
            }
            FrameRef::Placeholder(key) => {
                let PlaceholderKey::Avatar(facing) = key else {
                    return;
                };
                if let Some(img) = avatar.placeholder(facing) {
                    let tex = self.upload(key, img);
                    let x = pos.x as f32 - tex.width() * AVATAR_ANCHOR.0;
                    let y = pos.y as f32 - tex.height() * AVATAR_ANCHOR.1;
                    draw_texture(tex, x, y, WHITE);
                }
            }
        }
    }
}
