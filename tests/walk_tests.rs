// tests/walk_tests.rs

use std::collections::HashSet;

use macroquad::math::dvec2;
use macroquad::prelude::Rect;
use tile_walker::world::rules::default_walkable;
use tile_walker::{
    frame_rect, resolve_facing, AvatarConfig, AvatarController, BlockedSet, Facing, GridCoord,
    GridWorld, LayerDescription, MapDescription,
};

fn four_by_four_with_rock() -> MapDescription {
    let mut data = vec![1; 16];
    data[5] = 9;
    MapDescription {
        width: 4,
        height: 4,
        layers: vec![LayerDescription::tiles("Ground", data)],
    }
}

#[test]
fn diagonal_blocked_by_rock_slides_along_open_row() {
    let world = GridWorld::new(&four_by_four_with_rock(), 32, None).expect("world");
    let blocked: BlockedSet = [9].into_iter().collect();
    // 32 per axis once the diagonal is normalized
    let speed = 32.0 * 2f64.sqrt();
    let mut avatar = AvatarController::new(
        &world,
        &blocked,
        AvatarConfig { speed: Some(speed) },
        None,
    );
    avatar.set_position(16.0, 16.0);

    avatar.set_direction(1.0, 1.0);
    avatar.try_move(1.0);
    avatar.update(1.0);

    let pos = avatar.position();
    assert!((pos.x - 48.0).abs() < 1e-9, "x should reach 48, got {:?}", pos);
    assert_eq!(pos.y, 16.0);
    assert_eq!(world.world_to_grid(pos.x, pos.y), GridCoord::new(1, 0));
    assert_eq!(avatar.facing(), Facing::Down);
}

#[test]
fn walking_into_off_map_space_is_allowed() {
    let world = GridWorld::new(&four_by_four_with_rock(), 32, None).expect("world");
    let blocked = BlockedSet::default_rules();
    let mut avatar = AvatarController::new(
        &world,
        &blocked,
        AvatarConfig { speed: Some(32.0) },
        None,
    );
    avatar.set_position(16.0, 16.0);
    avatar.set_direction(0.0, -1.0);
    for _ in 0..3 {
        avatar.try_move(1.0);
    }
    assert!(avatar.position().y < 0.0);
    assert_eq!(world.gid_at_world(avatar.position().x, avatar.position().y), 0);
}

#[test]
fn demo_map_walk_never_enters_blocked_terrain() {
    let world = GridWorld::new(&MapDescription::demo(20, 15), 32, None).expect("world");
    let blocked = BlockedSet::default_rules();
    let spawn = world.find_spawn(&default_walkable());
    assert_eq!(spawn, dvec2(16.0, 32.0 * 0.8));

    let mut avatar = AvatarController::new(
        &world,
        &blocked,
        AvatarConfig { speed: Some(3.0) },
        None,
    );
    avatar.set_position(spawn.x, spawn.y);

    // zig-zag through the field towards the water and the wall
    let moves = [(1.0, 1.0), (1.0, 0.0), (0.0, 1.0), (1.0, -1.0), (-1.0, 1.0)];
    for (i, (dx, dy)) in moves.iter().cycle().take(400).enumerate() {
        avatar.set_direction(*dx, *dy);
        avatar.try_move(1.0);
        avatar.update(1.0);

        let p = avatar.position();
        assert!(avatar.can_move_to(p.x, p.y), "step {i}: stuck inside blocked terrain at {:?}", p);
    }
}

#[test]
fn facing_and_slicing_examples() {
    assert_eq!(resolve_facing(3.0, 3.0), Facing::Down);
    assert_eq!(resolve_facing(0.005, 0.005), Facing::Idle);
    assert_eq!(
        frame_rect(128, 64, 32, 32, 5, None),
        Rect::new(32.0, 32.0, 32.0, 32.0)
    );
}

#[test]
fn custom_blocked_set_from_hash_set() {
    let world = GridWorld::new(&four_by_four_with_rock(), 32, None).expect("world");
    let set: HashSet<u32> = [1].into_iter().collect();
    let blocked = BlockedSet::from(set);
    let avatar = AvatarController::new(&world, &blocked, AvatarConfig::default(), None);
    // everything but the rock is blocked now
    assert!(!avatar.can_move_to(16.0, 16.0));
    assert!(avatar.can_move_to(48.0, 48.0));
}
