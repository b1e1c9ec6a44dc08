//! Visible-cell culling and camera clamping.

use crate::world::{GridCoord, GridWorld, TileSprite};
use macroquad::math::{dvec2, DVec2};

const CULL_MARGIN_CELLS: i32 = 1;

/// Inclusive cell range covering the world-space rectangle
/// `view_min..view_max`, padded by one cell. Corners may come in any order.
pub fn visible_cell_range(
    world: &GridWorld,
    view_min: DVec2,
    view_max: DVec2,
) -> (GridCoord, GridCoord) {
    let a = world.world_to_grid(view_min.x, view_min.y);
    let b = world.world_to_grid(view_max.x, view_max.y);

    let min = GridCoord::new(
        a.x.min(b.x).saturating_sub(CULL_MARGIN_CELLS),
        a.y.min(b.y).saturating_sub(CULL_MARGIN_CELLS),
    );
    let max = GridCoord::new(
        a.x.max(b.x).saturating_add(CULL_MARGIN_CELLS),
        a.y.max(b.y).saturating_add(CULL_MARGIN_CELLS),
    );
    (min, max)
}

/// Tile sprites inside the visible range, in row-major order.
pub fn query_visible_rect<'g>(
    world: &'g GridWorld,
    view_min: DVec2,
    view_max: DVec2,
) -> impl Iterator<Item = &'g TileSprite> + 'g {
    let (min, max) = visible_cell_range(world, view_min, view_max);
    world.sprites().iter().filter(move |s| {
        s.cell.x >= min.x && s.cell.x <= max.x && s.cell.y >= min.y && s.cell.y <= max.y
    })
}

/// Translation that centers `focus` in a `view`-sized window without showing
/// anything past the map edges. Maps smaller than the view stick to the
/// top-left corner.
pub fn camera_offset(view: DVec2, map_px: DVec2, focus: DVec2) -> DVec2 {
    let axis = |view: f64, map: f64, focus: f64| {
        let min = (view - map).min(0.0);
        (view / 2.0 - focus).min(0.0).max(min)
    };
    dvec2(
        axis(view.x, map_px.x, focus.x),
        axis(view.y, map_px.y, focus.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::json_loader::MapDescription;

    fn world() -> GridWorld {
        // 20x15 grass with a few obstacles, all non-empty
        GridWorld::new(&MapDescription::demo(20, 15), 32, None).expect("world")
    }

    #[test]
    fn range_is_padded_and_order_independent() {
        let w = world();
        let (min, max) = visible_cell_range(&w, dvec2(100.0, 100.0), dvec2(0.0, 0.0));
        assert_eq!(min, GridCoord::new(-1, -1));
        assert_eq!(max, GridCoord::new(4, 4));
    }

    #[test]
    fn query_visible_rect_returns_sprites_in_stable_order() {
        let w = world();
        let cells: Vec<GridCoord> = query_visible_rect(&w, dvec2(64.0, 64.0), dvec2(127.0, 127.0))
            .map(|s| s.cell)
            .collect();

        // cells 2..=3 padded to 1..=4 on both axes
        assert_eq!(cells.len(), 16);
        assert!(cells.windows(2).all(|p| (p[0].y, p[0].x) < (p[1].y, p[1].x)));
        assert_eq!(cells[0], GridCoord::new(1, 1));
        assert_eq!(cells[15], GridCoord::new(4, 4));
    }

    #[test]
    fn camera_follows_then_clamps() {
        let view = dvec2(640.0, 480.0);
        let map = dvec2(1280.0, 960.0);
        // near the top-left: no scrolling past the edge
        assert_eq!(camera_offset(view, map, dvec2(10.0, 10.0)), dvec2(0.0, 0.0));
        // middle: centered
        assert_eq!(camera_offset(view, map, dvec2(640.0, 480.0)), dvec2(-320.0, -240.0));
        // bottom-right: clamped to the far edge
        assert_eq!(camera_offset(view, map, dvec2(1270.0, 950.0)), dvec2(-640.0, -480.0));
        // map smaller than view
        assert_eq!(
            camera_offset(view, dvec2(320.0, 240.0), dvec2(300.0, 200.0)),
            dvec2(0.0, 0.0)
        );
    }
}
