use std::rc::Rc;

use gopher_jump::entities::*;
use gopher_jump::geometry::Rect;
use gopher_jump::layout::PipeLayout;

fn make_state() -> GameState {
    GameState {
        mode: Mode::Game,
        player: Player { x16: 0, y16: 1600, vx: 0, vy: 0, jump_count: 0, facing: Facing::Right },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        camera_x: -240,
        camera_y: 0,
        level: Rc::new(Level {
            pipes: PipeLayout::from_heights(vec![3; 4]),
            platforms: vec![Block { x: 0, y: 0, tiles: 1 }],
            kill_boxes: Vec::new(),
        }),
        gameover_count: 0,
        frame: 0,
    }
}

#[test]
fn entity_clone_and_eq() {
    assert_eq!(Mode::Title, Mode::Title);
    assert_ne!(Mode::Game, Mode::GameOver);
    assert_ne!(Facing::Left, Facing::Right);
    assert_eq!(Facing::Left.sign(), -1);
    assert_eq!(Facing::Right.sign(), 1);
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    cloned.player.x16 = 99;
    cloned.enemies.push(Enemy { x: 5, y: 5 });
    cloned.mode = Mode::GameOver;

    assert_eq!(original.player.x16, 0);
    assert!(original.enemies.is_empty());
    assert_eq!(original.mode, Mode::Game);
}

#[test]
fn game_state_clone_shares_level() {
    let original = make_state();
    let cloned = original.clone();
    assert!(Rc::ptr_eq(&original.level, &cloned.level));
}

#[test]
fn player_pixel_position_floors_negative_subpixels() {
    let p = Player { x16: -1, y16: 33, vx: 0, vy: 0, jump_count: 0, facing: Facing::Left };
    assert_eq!(p.x(), -1);
    assert_eq!(p.y(), 2);
}

#[test]
fn player_hitbox_is_centred_in_sprite() {
    let p = Player { x16: 10 * 16, y16: 20 * 16, vx: 0, vy: 0, jump_count: 0, facing: Facing::Right };
    assert_eq!(p.hitbox(), Rect::new(11, 22, PLAYER_WIDTH, PLAYER_HEIGHT));
}

#[test]
fn block_rect_is_one_tile_high() {
    let b = Block { x: 64, y: 96, tiles: 3 };
    assert_eq!(b.rect(), Rect::new(64, 96, 3 * TILE_SIZE, TILE_SIZE));
}

#[test]
fn ground_line_is_one_tile_above_the_bottom() {
    assert_eq!(GROUND_Y, 448);
}
