//! Flat-color placeholder tiles.

use macroquad::prelude::{Color, Image, WHITE};

/// Placeholder colors by gid, as `0xRRGGBB`.
const TILE_COLORS: [(u32, u32); 10] = [
    (1, 0x4caf50),  // grass
    (2, 0xbdb76b),  // road
    (3, 0xc0c0c0),  // tile floor
    (4, 0x1e88e5),  // water
    (5, 0x1565c0),  // lake
    (6, 0x6d4c41),  // wall
    (7, 0x2e7d32),  // tree
    (8, 0x8d6e63),  // house
    (9, 0x757575),  // rock
    (10, 0xff5722), // lava
];

pub(crate) fn rgb(hex: u32) -> Color {
    Color::from_rgba(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
        255,
    )
}

/// Placeholder color for `gid`; white when the gid has no entry.
pub fn tile_color(gid: u32) -> Color {
    TILE_COLORS
        .iter()
        .find(|(g, _)| *g == gid)
        .map(|(_, hex)| rgb(*hex))
        .unwrap_or(WHITE)
}

/// Darkens `c` by `amount` (0..1), keeping it opaque.
pub(crate) fn shade(c: Color, amount: f32) -> Color {
    let k = 1.0 - amount;
    Color::new(c.r * k, c.g * k, c.b * k, 1.0)
}

/// Flat `size` x `size` tile in the gid's color with a faint diagonal.
pub fn tile_placeholder(gid: u32, size: u16) -> Image {
    let fill = tile_color(gid);
    let mut img = Image::gen_image_color(size, size, fill);
    let stroke = shade(fill, 0.1);
    for i in 0..size as u32 {
        img.set_pixel(i, i, stroke);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_gids() {
        assert_eq!(tile_color(1), Color::from_rgba(0x4c, 0xaf, 0x50, 255));
        assert_eq!(tile_color(10), Color::from_rgba(0xff, 0x57, 0x22, 255));
        assert_eq!(tile_color(42), WHITE);
    }

    #[test]
    fn placeholder_is_filled_with_stroke() {
        let img = tile_placeholder(4, 8);
        assert_eq!(img.width(), 8);
        assert_eq!(img.height(), 8);
        assert_eq!(img.get_pixel(7, 0), img.get_pixel(0, 7));
        assert_ne!(img.get_pixel(3, 3), img.get_pixel(7, 0));
    }
}
