//! The player avatar: facing, collision-aware motion and animation.
//!
//! Per frame the caller runs [`AvatarController::set_direction`],
//! [`AvatarController::try_move`] and [`AvatarController::update`], in that
//! order.

use std::collections::HashMap;

use log::debug;
use macroquad::math::{dvec2, DVec2};
use macroquad::prelude::Image;
use serde::Deserialize;

use crate::atlas::FrameRef;
use crate::world::{BlockedSet, GridWorld};

pub mod animation;
pub mod facing;

pub use animation::{AnimationSet, RenderState, SpriteSheet};
pub use facing::{resolve_facing, Facing};

/// Collision probes around the feet, in tiles: center, front-right,
/// front-left, back-right, back-left.
pub const SAMPLE_OFFSETS: [(f64, f64); 5] = [
    (0.0, 0.0),
    (0.25, 0.1),
    (-0.25, 0.1),
    (0.2, -0.2),
    (-0.2, -0.2),
];

/// Frame units per second; `dt` of 1.0 is one 60 Hz frame.
const FRAME_UNITS_PER_SECOND: f64 = 60.0;

/// Avatar tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct AvatarConfig {
    /// world units per frame unit; four tiles per second when unset
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Mutable per-frame state of the avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarState {
    /// feet position in world units
    pub position: DVec2,
    /// last requested direction, not normalized
    pub direction: DVec2,
    /// facing derived from `direction`
    pub facing: Facing,
    /// world units per frame unit
    pub speed: f64,
}

/// Moves the avatar through a [`GridWorld`], refusing cells in a
/// [`BlockedSet`].
pub struct AvatarController<'w> {
    world: &'w GridWorld,
    blocked: &'w BlockedSet,
    state: AvatarState,
    animations: AnimationSet,
    render: RenderState,
    placeholders: HashMap<Facing, Image>,
    render_updates: u64,
}

impl<'w> AvatarController<'w> {
    /// Creates an idle avatar at the origin.
    ///
    /// With a sprite sheet the avatar is animated from it; without one it
    /// shows a generated figure per facing.
    pub fn new(
        world: &'w GridWorld,
        blocked: &'w BlockedSet,
        config: AvatarConfig,
        sheet: Option<&SpriteSheet>,
    ) -> Self {
        let tile = world.tile_size();
        let speed = config
            .speed
            .unwrap_or(tile as f64 * 4.0 / FRAME_UNITS_PER_SECOND);

        let (animations, render, placeholders) = match sheet {
            Some(sheet) => {
                let animations = AnimationSet::from_sheet(sheet, tile);
                let fps = sheet
                    .meta
                    .fps
                    .filter(|f| *f > 0)
                    .unwrap_or(animation::DEFAULT_FPS);
                let render = RenderState::Animated {
                    frames: animations.frames(Facing::Idle).to_vec(),
                    frame_rate_hz: fps as f64,
                    elapsed: 0.0,
                };
                (animations, render, HashMap::new())
            }
            None => {
                let px = u16::try_from(tile).unwrap_or(u16::MAX);
                let placeholders = Facing::ALL
                    .iter()
                    .map(|f| (*f, animation::figure_placeholder(*f, px)))
                    .collect();
                let animations = AnimationSet::placeholders();
                let render = RenderState::Static {
                    frame: animations.frames(Facing::Idle)[0],
                };
                (animations, render, placeholders)
            }
        };

        debug!(
            "avatar speed {}, {}",
            speed,
            if sheet.is_some() { "animated" } else { "static" }
        );

        Self {
            world,
            blocked,
            state: AvatarState {
                position: DVec2::ZERO,
                direction: DVec2::ZERO,
                facing: Facing::Idle,
                speed,
            },
            animations,
            render,
            placeholders,
            render_updates: 0,
        }
    }

    /// Stores the requested direction and updates the facing. The frame
    /// sequence only changes when the facing does.
    pub fn set_direction(&mut self, dx: f64, dy: f64) {
        self.state.direction = dvec2(dx, dy);

        let facing = resolve_facing(dx, dy);
        if facing == self.state.facing {
            return;
        }
        self.state.facing = facing;
        self.render.swap(self.animations.frames(facing));
        self.render_updates += 1;
    }

    /// Teleports the avatar, ignoring collisions.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.state.position = dvec2(x, y);
    }

    /// Changes the movement speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.state.speed = speed;
    }

    /// Moves `speed * dt` along the current direction.
    ///
    /// A blocked move falls back to the x-only step and then the y-only step
    /// (from wherever the x step left the avatar), so the avatar slides along
    /// walls. A fully blocked move leaves the position unchanged.
    pub fn try_move(&mut self, dt: f64) {
        let dir = self.state.direction;
        let magnitude = dir.length();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return;
        }

        let step = dir / magnitude * (self.state.speed * dt);
        let pos = self.state.position;
        let target = pos + step;

        if self.can_move_to(target.x, target.y) {
            self.state.position = target;
            return;
        }

        if self.can_move_to(target.x, self.state.position.y) {
            self.state.position.x = target.x;
        }
        if self.can_move_to(self.state.position.x, target.y) {
            self.state.position.y = target.y;
        }
    }

    /// Whether the avatar could stand at `(x, y)`: no probe in
    /// [`SAMPLE_OFFSETS`] touches a blocked gid.
    pub fn can_move_to(&self, x: f64, y: f64) -> bool {
        let ts = self.world.tile_size() as f64;
        SAMPLE_OFFSETS.iter().all(|(ox, oy)| {
            let gid = self.world.gid_at_world(x + ox * ts, y + oy * ts);
            !self.blocked.contains(gid)
        })
    }

    /// Advances the animation by `delta` frame units. No-op for a static
    /// avatar.
    pub fn update(&mut self, delta: f64) {
        self.render.advance(delta);
    }

    /// Current position.
    pub fn position(&self) -> DVec2 {
        self.state.position
    }

    /// Last requested direction.
    pub fn direction(&self) -> DVec2 {
        self.state.direction
    }

    /// Current facing.
    pub fn facing(&self) -> Facing {
        self.state.facing
    }

    /// Movement speed.
    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    /// Snapshot of the motion state.
    pub fn state(&self) -> AvatarState {
        self.state
    }

    /// Active render state.
    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// Frame to draw now.
    pub fn current_frame(&self) -> FrameRef {
        self.render.current_frame()
    }

    /// How many times the displayed frame sequence was swapped.
    pub fn render_updates(&self) -> u64 {
        self.render_updates
    }

    /// Frame sequences per facing.
    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    /// Generated figure for `facing`; `None` for an animated avatar.
    pub fn placeholder(&self, facing: Facing) -> Option<&Image> {
        self.placeholders.get(&facing)
    }

    /// The world the avatar walks in.
    pub fn world(&self) -> &'w GridWorld {
        self.world
    }
}
