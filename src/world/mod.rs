//! The tile grid: cell lookups, coordinate conversion and tile sprites.

use std::collections::{HashMap, HashSet};

use log::debug;
use macroquad::math::{dvec2, DVec2};
use macroquad::prelude::Image;

use crate::atlas::{AtlasInfo, FrameRef, PlaceholderKey};
use crate::error::WorldError;
use crate::loader::json_loader::MapDescription;

pub mod palette;
pub mod rules;

pub use rules::BlockedSet;

/// Integer cell coordinate. May lie outside the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// column
    pub x: i32,
    /// row
    pub y: i32,
}

impl GridCoord {
    /// Cell at column `x`, row `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Decoded tile data. `cells[y * width + x]` is the gid at `(x, y)`, `0` is
/// empty. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    /// width in cells
    pub width: u32,
    /// height in cells
    pub height: u32,
    /// cell edge in world units
    pub tile_size: u32,
    cells: Vec<u32>,
}

impl TileLayer {
    /// Row-major gids.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    #[inline]
    fn get(&self, gx: i32, gy: i32) -> u32 {
        if gx < 0 || gy < 0 || gx as u32 >= self.width || gy as u32 >= self.height {
            return 0;
        }
        self.cells[gy as usize * self.width as usize + gx as usize]
    }
}

/// A static tile sprite, built once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSprite {
    /// gid of the cell
    pub gid: u32,
    /// cell the sprite covers
    pub cell: GridCoord,
    /// top-left corner in world units
    pub position: DVec2,
    /// what to draw
    pub frame: FrameRef,
}

/// The tile grid: occupancy queries, coordinate transforms and the static
/// sprite list.
pub struct GridWorld {
    layer: TileLayer,
    atlas: Option<AtlasInfo>,
    sprites: Vec<TileSprite>,
    placeholders: HashMap<u32, Image>,
}

impl GridWorld {
    /// Builds the world from the first tile layer of `map`.
    ///
    /// With an atlas, gid `n` is drawn from atlas frame `n - 1`; without one,
    /// each distinct gid gets a generated flat-color tile.
    pub fn new(
        map: &MapDescription,
        tile_size: u32,
        atlas: Option<AtlasInfo>,
    ) -> Result<Self, WorldError> {
        if tile_size == 0 {
            return Err(WorldError::InvalidMap("tile size must be non-zero".into()));
        }

        let source = map.tile_layer().ok_or(WorldError::MissingLayer)?;
        let expected = map.width as usize * map.height as usize;
        if source.data.len() != expected {
            return Err(WorldError::InvalidLayerSize {
                expected,
                actual: source.data.len(),
            });
        }

        let layer = TileLayer {
            width: map.width,
            height: map.height,
            tile_size,
            cells: source.data.clone(),
        };

        let (sprites, placeholders) = build_sprites(&layer, atlas);

        debug!(
            "world {}x{} (tile {}): {} sprites, {} placeholder textures, atlas={}",
            layer.width,
            layer.height,
            tile_size,
            sprites.len(),
            placeholders.len(),
            atlas.is_some()
        );

        Ok(Self {
            layer,
            atlas,
            sprites,
            placeholders,
        })
    }

    /// `(floor(x / tile), floor(y / tile))`. No bounds check.
    #[inline]
    pub fn world_to_grid(&self, x: f64, y: f64) -> GridCoord {
        let ts = self.layer.tile_size as f64;
        GridCoord::new((x / ts).floor() as i32, (y / ts).floor() as i32)
    }

    /// Top-left corner of cell `(gx, gy)`.
    ///
    /// Inverse of [`world_to_grid`](Self::world_to_grid) only for grid-aligned
    /// points; anything inside a cell maps back to its corner.
    #[inline]
    pub fn grid_to_world(&self, gx: i32, gy: i32) -> DVec2 {
        let ts = self.layer.tile_size as f64;
        dvec2(gx as f64 * ts, gy as f64 * ts)
    }

    /// Gid at cell `(gx, gy)`; `0` outside the map, so off-map space is
    /// passable.
    #[inline]
    pub fn gid_at_grid(&self, gx: i32, gy: i32) -> u32 {
        self.layer.get(gx, gy)
    }

    /// Gid under world point `(x, y)`.
    #[inline]
    pub fn gid_at_world(&self, x: f64, y: f64) -> u32 {
        let g = self.world_to_grid(x, y);
        self.gid_at_grid(g.x, g.y)
    }

    /// Spawn point on the first walkable cell in row-major order: horizontally
    /// centered, near the bottom of the cell. Top-left cell center if no cell
    /// is walkable.
    pub fn find_spawn(&self, walkable: &HashSet<u32>) -> DVec2 {
        let ts = self.layer.tile_size as f64;
        let width = self.layer.width as usize;

        self.layer
            .cells
            .iter()
            .position(|gid| walkable.contains(gid))
            .map(|idx| {
                let corner = self.grid_to_world((idx % width) as i32, (idx / width) as i32);
                corner + dvec2(ts / 2.0, ts * 0.8)
            })
            .unwrap_or_else(|| dvec2(ts / 2.0, ts / 2.0))
    }

    /// Decoded tile data.
    pub fn layer(&self) -> &TileLayer {
        &self.layer
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.layer.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.layer.height
    }

    /// Cell edge in world units.
    pub fn tile_size(&self) -> u32 {
        self.layer.tile_size
    }

    /// Map extent in world units.
    pub fn pixel_size(&self) -> DVec2 {
        self.grid_to_world(self.layer.width as i32, self.layer.height as i32)
    }

    /// Atlas the sprites were sliced from, if any.
    pub fn atlas(&self) -> Option<AtlasInfo> {
        self.atlas
    }

    /// Static sprites for every non-empty cell, row-major.
    pub fn sprites(&self) -> &[TileSprite] {
        &self.sprites
    }

    /// Generated texture for `gid`, when running without an atlas.
    pub fn placeholder(&self, gid: u32) -> Option<&Image> {
        self.placeholders.get(&gid)
    }

    /// Number of distinct placeholder textures generated.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }
}

fn build_sprites(
    layer: &TileLayer,
    atlas: Option<AtlasInfo>,
) -> (Vec<TileSprite>, HashMap<u32, Image>) {
    let width = layer.width as usize;
    let ts = layer.tile_size;
    let px = u16::try_from(ts).unwrap_or(u16::MAX);

    let mut sprites = Vec::with_capacity(layer.cells.len());
    let mut placeholders = HashMap::new();

    for (idx, &gid) in layer.cells.iter().enumerate() {
        if gid == 0 {
            continue;
        }

        let cell = GridCoord::new((idx % width) as i32, (idx / width) as i32);
        let frame = match atlas {
            Some(atlas) => FrameRef::Atlas(atlas.frame(ts, ts, gid - 1, None)),
            None => {
                placeholders
                    .entry(gid)
                    .or_insert_with(|| palette::tile_placeholder(gid, px));
                FrameRef::Placeholder(PlaceholderKey::Tile(gid))
            }
        };

        sprites.push(TileSprite {
            gid,
            cell,
            position: dvec2(cell.x as f64 * ts as f64, cell.y as f64 * ts as f64),
            frame,
        });
    }

    (sprites, placeholders)
}
