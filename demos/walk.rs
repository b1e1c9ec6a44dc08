use std::path::Path;

use anyhow::Context;
use log::{error, info, warn};
use macroquad::math::dvec2;
use macroquad::prelude::*;
use tile_walker::world::rules::default_walkable;
use tile_walker::render::camera_offset;
use tile_walker::{
    decode_animation_file, decode_map_file, frame_units, AssetPlan, AtlasInfo,
    AvatarController, BlockedSet, GameConfig, GridWorld, HeldKeys, MapDescription, Renderer,
    SpriteSheet,
};

const CONFIG_PATH: &str = "walk.json";

fn window_conf() -> Conf {
    let cfg = GameConfig::default();
    Conf {
        window_title: "Tile Walker".into(),
        window_width: cfg.view_width as i32,
        window_height: cfg.view_height as i32,
        ..Default::default()
    }
}

async fn texture(path: Option<&Path>) -> Option<Texture2D> {
    let path = path?;
    match load_texture(&path.to_string_lossy()).await {
        Ok(tex) => Some(tex),
        Err(e) => {
            warn!("could not load {}: {}", path.display(), e);
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{:#}", e);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = if Path::new(CONFIG_PATH).is_file() {
        GameConfig::load(CONFIG_PATH).context("loading walk.json")?
    } else {
        GameConfig::default()
    };
    let plan = AssetPlan::probe(Path::new("."), &config);

    let map = match &plan.map {
        Some(path) => decode_map_file(path)
            .with_context(|| format!("decoding map {}", path.display()))?,
        None => {
            info!("no map file, using the built-in demo map");
            MapDescription::demo(config.demo_size.0, config.demo_size.1)
        }
    };

    let tilesheet = texture(plan.tilesheet.as_deref()).await;
    let atlas = tilesheet
        .as_ref()
        .map(|t| AtlasInfo::new(t.width() as u32, t.height() as u32));
    let world = GridWorld::new(&map, config.tile_size, atlas).context("building world")?;
    let blocked = BlockedSet::default_rules();

    let (player, sheet) = if plan.has_sprite_sheet() {
        let player = texture(plan.player_texture.as_deref()).await;
        let meta = match &plan.player_anim {
            Some(path) => Some(decode_animation_file(path).context("decoding avatar animations")?),
            None => None,
        };
        let sheet = player.as_ref().zip(meta).map(|(tex, meta)| SpriteSheet {
            atlas: AtlasInfo::new(tex.width() as u32, tex.height() as u32),
            meta,
        });
        (player, sheet)
    } else {
        (None, None)
    };

    let mut avatar = AvatarController::new(&world, &blocked, config.avatar, sheet.as_ref());
    let spawn = world.find_spawn(&default_walkable());
    avatar.set_position(spawn.x, spawn.y);

    let mut renderer = Renderer::new(tilesheet, player);
    let map_px = world.pixel_size();

    loop {
        let (dx, dy) = HeldKeys::poll().direction();
        avatar.set_direction(dx, dy);

        let dt = frame_units(get_frame_time());
        avatar.try_move(dt);
        avatar.update(dt);

        if is_key_pressed(KeyCode::R) {
            avatar.set_position(spawn.x, spawn.y);
        }

        let view = dvec2(screen_width() as f64, screen_height() as f64);
        let offset = camera_offset(view, map_px, avatar.position());

        clear_background(BLACK);
        renderer.draw_world(&world, offset, view);
        renderer.draw_avatar(&avatar, offset);

        draw_text(
            &format!("{:?}  FPS: {}", avatar.facing(), get_fps()),
            10.0,
            24.0,
            24.0,
            WHITE,
        );

        next_frame().await;
    }
}
