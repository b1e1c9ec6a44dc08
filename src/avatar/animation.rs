//! Avatar frame sequences and playback state.

use std::collections::HashMap;

use log::warn;
use macroquad::prelude::{Color, Image, BLANK};

use super::facing::Facing;
use crate::atlas::{AtlasInfo, FrameRef, PlaceholderKey};
use crate::loader::json_loader::AnimationMeta;
use crate::world::palette::rgb;

/// Playback rate when the metadata does not give one.
pub const DEFAULT_FPS: u32 = 8;

/// Frame indices used when no usable animation table is supplied.
pub const DEFAULT_ANIMATIONS: [(Facing, &[u32]); 5] = [
    (Facing::Down, &[0, 1, 2, 1]),
    (Facing::Left, &[3, 4, 5, 4]),
    (Facing::Right, &[6, 7, 8, 7]),
    (Facing::Up, &[9, 10, 11, 10]),
    (Facing::Idle, &[0]),
];

/// A real sprite sheet for the avatar: the atlas size plus its metadata.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    /// atlas texture size
    pub atlas: AtlasInfo,
    /// frame layout and animation table
    pub meta: AnimationMeta,
}

/// Frame sequences per facing. A facing without its own sequence plays the
/// idle one.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSet {
    sequences: HashMap<Facing, Vec<FrameRef>>,
    fallback: FrameRef,
}

impl AnimationSet {
    /// Slices every sequence out of `sheet`. Frames default to `tile_size`
    /// squares; an absent, empty or unrecognised animation table is replaced
    /// with [`DEFAULT_ANIMATIONS`].
    pub fn from_sheet(sheet: &SpriteSheet, tile_size: u32) -> Self {
        let meta = &sheet.meta;
        let fw = meta.frame_width.filter(|w| *w > 0).unwrap_or(tile_size);
        let fh = meta.frame_height.filter(|h| *h > 0).unwrap_or(tile_size);
        let total = meta.total_frames.filter(|t| *t > 0);
        let slice = |index: u32| FrameRef::Atlas(sheet.atlas.frame(fw, fh, index, total));

        let mut table: HashMap<Facing, Vec<u32>> = HashMap::new();
        if let Some(anims) = &meta.animations {
            for (name, frames) in anims {
                match name.parse::<Facing>() {
                    Ok(facing) if !frames.is_empty() => {
                        table.insert(facing, frames.clone());
                    }
                    Ok(facing) => warn!("animation '{}' has no frames, ignoring", facing),
                    Err(e) => warn!("{}, ignoring animation", e),
                }
            }
            if table.is_empty() {
                warn!("no usable animations in sprite metadata, using built-in table");
            }
        }
        if table.is_empty() {
            table = DEFAULT_ANIMATIONS
                .iter()
                .map(|(f, frames)| (*f, frames.to_vec()))
                .collect();
        }

        let sequences = table
            .into_iter()
            .map(|(facing, frames)| {
                (facing, frames.into_iter().map(&slice).collect::<Vec<_>>())
            })
            .collect();

        Self {
            sequences,
            fallback: slice(0),
        }
    }

    /// One single-frame placeholder sequence per facing.
    pub fn placeholders() -> Self {
        let sequences = Facing::ALL
            .iter()
            .map(|f| (*f, vec![FrameRef::Placeholder(PlaceholderKey::Avatar(*f))]))
            .collect();
        Self {
            sequences,
            fallback: FrameRef::Placeholder(PlaceholderKey::Avatar(Facing::Idle)),
        }
    }

    /// Sequence for `facing`, else the idle sequence, else a single
    /// first-frame sequence.
    pub fn frames(&self, facing: Facing) -> &[FrameRef] {
        self.sequences
            .get(&facing)
            .or_else(|| self.sequences.get(&Facing::Idle))
            .map(Vec::as_slice)
            .unwrap_or(std::slice::from_ref(&self.fallback))
    }

    /// Whether `facing` has its own sequence.
    pub fn has(&self, facing: Facing) -> bool {
        self.sequences.contains_key(&facing)
    }
}

/// What the avatar draws. Picked once at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    /// looping frame sequence from a sprite sheet
    Animated {
        /// active sequence
        frames: Vec<FrameRef>,
        /// playback rate in frames per second
        frame_rate_hz: f64,
        /// playback position, in frames
        elapsed: f64,
    },
    /// a single frame, swapped on facing changes
    Static {
        /// active frame
        frame: FrameRef,
    },
}

impl RenderState {
    /// Frame to draw now.
    pub fn current_frame(&self) -> FrameRef {
        match self {
            RenderState::Animated {
                frames, elapsed, ..
            } => frames[current_index(*elapsed, frames.len())],
            RenderState::Static { frame } => *frame,
        }
    }

    /// Advances playback by `delta` frame units (1.0 = 1/60 s).
    pub fn advance(&mut self, delta: f64) {
        if let RenderState::Animated {
            frame_rate_hz,
            elapsed,
            ..
        } = self
        {
            *elapsed += delta * *frame_rate_hz / 60.0;
        }
    }

    /// Switches to `frames` and restarts playback.
    pub(crate) fn swap(&mut self, frames: &[FrameRef]) {
        match self {
            RenderState::Animated {
                frames: active,
                elapsed,
                ..
            } => {
                *active = frames.to_vec();
                *elapsed = 0.0;
            }
            RenderState::Static { frame } => {
                if let Some(first) = frames.first() {
                    *frame = *first;
                }
            }
        }
    }
}

fn current_index(elapsed: f64, len: usize) -> usize {
    (elapsed.floor() as i64).rem_euclid(len.max(1) as i64) as usize
}

/// Procedural stand-in figure for `facing`: a head, a body, swinging arms and
/// two legs on a transparent `size` x `size` canvas.
pub fn figure_placeholder(facing: Facing, size: u16) -> Image {
    let s = size as f32;
    let mut img = Image::gen_image_color(size, size, BLANK);

    let skin = rgb(0xfff176);
    let cloth = rgb(0x90caf9);
    let arm = Color::new(1.0, 1.0, 1.0, 0.6);
    let leg = Color::new(0.0, 0.0, 0.0, 0.6);

    fill_circle(&mut img, s / 2.0, s / 4.0, s / 4.0, skin);
    fill_rect(&mut img, s / 4.0, s / 3.0, s / 2.0, s * 0.55, cloth);

    let order = Facing::ALL.iter().position(|f| *f == facing).unwrap_or(0);
    let swing = (order as f32).sin() * s * 0.05;
    line(&mut img, (s / 4.0, s * 0.6), (s / 8.0, s * 0.8 + swing), arm);
    line(&mut img, (s * 0.75, s * 0.6), (s * 0.9, s * 0.8 - swing), arm);
    line(&mut img, (s * 0.4, s * 0.85), (s * 0.35, s), leg);
    line(&mut img, (s * 0.6, s * 0.85), (s * 0.65, s), leg);

    img
}

fn put(img: &mut Image, x: f32, y: f32, c: Color) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < img.width as u32 && y < img.height as u32 {
        img.set_pixel(x, y, c);
    }
}

fn fill_circle(img: &mut Image, cx: f32, cy: f32, r: f32, c: Color) {
    for y in 0..img.height {
        for x in 0..img.width {
            let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
            if dx * dx + dy * dy <= r * r {
                img.set_pixel(x as u32, y as u32, c);
            }
        }
    }
}

fn fill_rect(img: &mut Image, x: f32, y: f32, w: f32, h: f32, c: Color) {
    let mut py = y;
    while py < y + h {
        let mut px = x;
        while px < x + w {
            put(img, px, py, c);
            px += 1.0;
        }
        py += 1.0;
    }
}

fn line(img: &mut Image, from: (f32, f32), to: (f32, f32), c: Color) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        put(img, from.0 + dx * t, from.1 + dy * t, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::Rect;

    fn sheet(meta: AnimationMeta) -> SpriteSheet {
        SpriteSheet {
            atlas: AtlasInfo::new(96, 128),
            meta,
        }
    }

    fn rect(x: f32, y: f32) -> FrameRef {
        FrameRef::Atlas(Rect::new(x, y, 32.0, 32.0))
    }

    #[test]
    fn default_table_when_metadata_has_no_animations() {
        let set = AnimationSet::from_sheet(&sheet(AnimationMeta::default()), 32);
        // 3 columns: frame 4 => (32, 32)
        assert_eq!(
            set.frames(Facing::Left),
            &[rect(0.0, 32.0), rect(32.0, 32.0), rect(64.0, 32.0), rect(32.0, 32.0)]
        );
        assert_eq!(set.frames(Facing::Idle), &[rect(0.0, 0.0)]);
        assert!(Facing::ALL.iter().all(|f| set.has(*f)));
    }

    #[test]
    fn custom_table_replaces_default_and_missing_keys_play_idle() {
        let mut anims = HashMap::new();
        anims.insert("idle".to_owned(), vec![2]);
        anims.insert("right".to_owned(), vec![0, 1]);
        let meta = AnimationMeta {
            animations: Some(anims),
            ..Default::default()
        };
        let set = AnimationSet::from_sheet(&sheet(meta), 32);
        assert_eq!(set.frames(Facing::Right), &[rect(0.0, 0.0), rect(32.0, 0.0)]);
        assert!(!set.has(Facing::Up));
        assert_eq!(set.frames(Facing::Up), &[rect(64.0, 0.0)]);
    }

    #[test]
    fn unusable_table_falls_back_to_default() {
        let mut anims = HashMap::new();
        anims.insert("walk".to_owned(), vec![1, 2]);
        anims.insert("down".to_owned(), vec![]);
        let meta = AnimationMeta {
            animations: Some(anims),
            ..Default::default()
        };
        let set = AnimationSet::from_sheet(&sheet(meta), 32);
        assert_eq!(set.frames(Facing::Down).len(), 4);
    }

    #[test]
    fn frame_indices_clamp_to_total_frames() {
        let mut anims = HashMap::new();
        anims.insert("idle".to_owned(), vec![50]);
        let meta = AnimationMeta {
            total_frames: Some(5),
            animations: Some(anims),
            ..Default::default()
        };
        let set = AnimationSet::from_sheet(&sheet(meta), 32);
        // frame 4 in a 3-column sheet
        assert_eq!(set.frames(Facing::Idle), &[rect(32.0, 32.0)]);
    }

    #[test]
    fn missing_idle_without_table_entry_uses_first_frame() {
        let mut anims = HashMap::new();
        anims.insert("down".to_owned(), vec![1]);
        let meta = AnimationMeta {
            animations: Some(anims),
            ..Default::default()
        };
        let set = AnimationSet::from_sheet(&sheet(meta), 32);
        assert_eq!(set.frames(Facing::Left), &[rect(0.0, 0.0)]);
    }

    #[test]
    fn animated_playback_loops() {
        let mut state = RenderState::Animated {
            frames: vec![rect(0.0, 0.0), rect(32.0, 0.0), rect(64.0, 0.0)],
            frame_rate_hz: 8.0,
            elapsed: 0.0,
        };
        assert_eq!(state.current_frame(), rect(0.0, 0.0));
        // 7.5 frame units at 8 fps => one animation frame
        state.advance(7.5);
        assert_eq!(state.current_frame(), rect(32.0, 0.0));
        state.advance(15.0);
        assert_eq!(state.current_frame(), rect(0.0, 0.0));
    }

    #[test]
    fn static_state_ignores_time() {
        let mut state = RenderState::Static {
            frame: rect(0.0, 0.0),
        };
        state.advance(100.0);
        assert_eq!(state.current_frame(), rect(0.0, 0.0));
    }

    #[test]
    fn figures_differ_between_facings() {
        let idle = figure_placeholder(Facing::Idle, 32);
        let down = figure_placeholder(Facing::Down, 32);
        assert_eq!(idle.width(), 32);
        assert_eq!(idle.get_pixel(0, 0), BLANK);
        assert_ne!(idle.get_pixel(16, 8), BLANK);
        assert_ne!(idle.bytes, down.bytes);
    }
}
