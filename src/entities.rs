/// All game entity types — pure data, no logic beyond coordinate accessors.

use std::rc::Rc;

use crate::geometry::{floor_div, Rect};
use crate::layout::PipeLayout;

// ── World constants ───────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const TILE_SIZE: i32 = 32;

/// Sub-pixel units per pixel for the player's position.
pub const POSITION_SCALE: i32 = 16;

/// Bottom edge of the play area the player stands on.
pub const GROUND_Y: i32 = SCREEN_HEIGHT - TILE_SIZE;

pub const PIPE_WIDTH: i32 = TILE_SIZE * 2;
pub const PIPE_START_OFFSET_X: i32 = -1;
pub const PIPE_INTERVAL_X: i32 = 8;
pub const PIPE_GAP_Y: i32 = 5;

// Velocities are pixels per frame.
pub const MOVE_ACCELERATION: i32 = 1;
pub const MAX_MOVE_VELOCITY: i32 = 3;
pub const GRAVITY: i32 = 1;
pub const MAX_GRAVITY_VELOCITY: i32 = 8;
pub const JUMP_VELOCITY: i32 = 8;
pub const MAX_JUMPS: u8 = 2;

pub const PLAYER_SPRITE_WIDTH: i32 = 32;
pub const PLAYER_SPRITE_HEIGHT: i32 = 64;
pub const PLAYER_WIDTH: i32 = 30;
pub const PLAYER_HEIGHT: i32 = 60;

pub const ENEMY_WIDTH: i32 = 32;
pub const ENEMY_HEIGHT: i32 = 32;
pub const ENEMY_STEP: i32 = 1;
pub const MAX_ENEMIES: usize = 7;

pub const PROJECTILE_SPEED: i32 = 4;
pub const PROJECTILE_LIFESPAN: u32 = 200;

/// Frames the game-over screen ignores input for.
pub const GAMEOVER_FRAMES: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Title,
    Game,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Horizontal position in sub-pixel units.
    pub x16: i32,
    /// Vertical position in sub-pixel units (down is positive).
    pub y16: i32,
    pub vx: i32,
    pub vy: i32,
    /// Jumps used since the last ground or platform contact.
    pub jump_count: u8,
    pub facing: Facing,
}

impl Player {
    pub fn x(&self) -> i32 {
        floor_div(self.x16, POSITION_SCALE)
    }

    pub fn y(&self) -> i32 {
        floor_div(self.y16, POSITION_SCALE)
    }

    /// Collision box, centred inside the sprite.
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x() + (PLAYER_SPRITE_WIDTH - PLAYER_WIDTH) / 2,
            self.y() + (PLAYER_SPRITE_HEIGHT - PLAYER_HEIGHT) / 2,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    /// Frames left before the projectile disappears.
    pub lifespan: u32,
    pub facing: Facing,
}

// ── Static level geometry ─────────────────────────────────────────────────────

/// A one-tile-high run of tiles: used for platforms and kill-boxes alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    /// Width in tiles.
    pub tiles: i32,
}

impl Block {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.tiles * TILE_SIZE, TILE_SIZE)
    }
}

/// Level data built once per (re)initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub pipes: PipeLayout,
    pub platforms: Vec<Block>,
    pub kill_boxes: Vec<Block>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can return a new
/// copy; the level is shared, so cloning never copies the pipe layout.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub mode: Mode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// In fire order.
    pub projectiles: Vec<Projectile>,
    pub camera_x: i32,
    pub camera_y: i32,
    pub level: Rc<Level>,
    pub gameover_count: u32,
    pub frame: u64,
}
