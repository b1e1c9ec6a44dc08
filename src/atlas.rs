//! Atlas slicing shared by tiles and avatar frames.

use macroquad::prelude::Rect;

use crate::avatar::Facing;

/// Pixel dimensions of a loaded atlas texture.
///
/// Only the size is needed to slice; the texture itself stays with the
/// render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtlasInfo {
    /// texture width in pixels
    pub width: u32,
    /// texture height in pixels
    pub height: u32,
}

impl AtlasInfo {
    /// Atlas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Source rectangle of frame `index` for `frame_w` x `frame_h` frames.
    #[inline]
    pub fn frame(&self, frame_w: u32, frame_h: u32, index: u32, total: Option<u32>) -> Rect {
        frame_rect(self.width, self.height, frame_w, frame_h, index, total)
    }
}

/// Key of a generated placeholder texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKey {
    /// flat-color tile for a gid
    Tile(u32),
    /// procedural avatar figure for a facing
    Avatar(Facing),
}

/// What to draw for one sprite frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRef {
    /// sub-rectangle of the atlas texture
    Atlas(Rect),
    /// generated placeholder texture
    Placeholder(PlaceholderKey),
}

/// Computes the source rectangle of the `index`-th frame in an atlas laid out
/// row-major in `frame_w` x `frame_h` cells.
///
/// `index` is clamped to the last frame. `total` overrides the frame count
/// derived from the atlas size. Degenerate inputs (frame wider than the atlas,
/// zero frames) resolve to the first cell.
pub fn frame_rect(
    atlas_w: u32,
    atlas_h: u32,
    frame_w: u32,
    frame_h: u32,
    index: u32,
    total: Option<u32>,
) -> Rect {
    let columns = if frame_w == 0 { 0 } else { atlas_w / frame_w };
    let rows = if frame_h == 0 { 0 } else { atlas_h / frame_h };
    let total = total.unwrap_or(columns.saturating_mul(rows));

    let clamped = index.min(total.saturating_sub(1));
    let (col, row) = if columns == 0 {
        (0, 0)
    } else {
        (clamped % columns, clamped / columns)
    };

    Rect::new(
        (u64::from(col) * u64::from(frame_w)) as f32,
        (u64::from(row) * u64::from(frame_h)) as f32,
        frame_w as f32,
        frame_h as f32,
    )
}
