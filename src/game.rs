/// Title → Game → GameOver → Title state machine.
///
/// `update` is the whole per-frame step: it dispatches on the mode, runs the
/// physics functions from `compute` in a fixed order, and reports the sounds
/// the frame produced. Randomness is only consumed when a level is built.

use std::rc::Rc;

use rand::Rng;

use crate::audio::Sound;
use crate::compute::{
    advance_projectiles, apply_gravity, fire, hits_enemy, hits_kill_box, hits_pipe, integrate,
    jump, land_on_platforms, patrol, resolve_platforms, settle, stand_on, steer, touches_ground,
};
use crate::entities::{
    Block, Enemy, Facing, GameState, Level, Mode, Player, ENEMY_HEIGHT, GAMEOVER_FRAMES, GROUND_Y,
    MAX_ENEMIES, POSITION_SCALE,
};
use crate::input::{Action, Input};
use crate::layout::{self, PipeLayout};

pub const START_CAMERA_X: i32 = -240;
pub const START_Y16: i32 = 100 * POSITION_SCALE;

/// Enemies are dropped somewhere in this stretch of ground ahead of the start.
pub const ENEMY_SPAWN_MIN_X: i32 = 320;
pub const ENEMY_SPAWN_MAX_X: i32 = 2880;

/// Platforms placed between the first few pipe columns.
const PLATFORMS: [Block; 4] = [
    Block { x: 320, y: 352, tiles: 3 },
    Block { x: 576, y: 288, tiles: 4 },
    Block { x: 832, y: 320, tiles: 3 },
    Block { x: 1344, y: 320, tiles: 4 },
];

/// Spikes on the ground.
const KILL_BOXES: [Block; 3] = [
    Block { x: 1088, y: GROUND_Y - 32, tiles: 2 },
    Block { x: 1600, y: GROUND_Y - 32, tiles: 1 },
    Block { x: 2112, y: GROUND_Y - 32, tiles: 2 },
];

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn spawn_enemies(rng: &mut impl Rng) -> Vec<Enemy> {
    let count = rng.gen_range(0..=MAX_ENEMIES);
    (0..count)
        .map(|_| Enemy {
            x: rng.gen_range(ENEMY_SPAWN_MIN_X..ENEMY_SPAWN_MAX_X),
            y: GROUND_Y - ENEMY_HEIGHT,
        })
        .collect()
}

pub fn build_level(rng: &mut impl Rng) -> Level {
    Level {
        pipes: PipeLayout::generate(rng),
        platforms: PLATFORMS.to_vec(),
        kill_boxes: KILL_BOXES.to_vec(),
    }
}

/// Full (re)initialization: new pipe layout, new enemies, title screen.
pub fn new_game(rng: &mut impl Rng) -> GameState {
    let level = build_level(rng);
    let enemies = spawn_enemies(rng);
    tracing::info!(enemies = enemies.len(), "level initialized");
    GameState {
        mode: Mode::Title,
        player: Player {
            x16: 0,
            y16: START_Y16,
            vx: 0,
            vy: 0,
            jump_count: 0,
            facing: Facing::Right,
        },
        enemies,
        projectiles: Vec::new(),
        camera_x: START_CAMERA_X,
        camera_y: 0,
        level: Rc::new(level),
        gameover_count: 0,
        frame: 0,
    }
}

/// Pipes passed so far; derived from the player's position on every call.
pub fn score(state: &GameState) -> i32 {
    layout::score(state.player.x16)
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the game by exactly one frame.
pub fn update(state: &GameState, input: &impl Input, rng: &mut impl Rng) -> (GameState, Vec<Sound>) {
    let mut sounds = Vec::new();
    let next = match state.mode {
        Mode::Title => {
            if input.is_just_pressed(Action::Start) {
                tracing::debug!(frame = state.frame, "title -> game");
                GameState {
                    mode: Mode::Game,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
        Mode::Game => step_game(state, input, &mut sounds),
        Mode::GameOver => {
            let gameover_count = state.gameover_count.saturating_sub(1);
            if gameover_count == 0 && input.is_just_pressed(Action::Start) {
                tracing::debug!(frame = state.frame, "game over -> title");
                new_game(rng)
            } else {
                GameState {
                    gameover_count,
                    ..state.clone()
                }
            }
        }
    };
    (
        GameState {
            frame: state.frame + 1,
            ..next
        },
        sounds,
    )
}

fn step_game(state: &GameState, input: &impl Input, sounds: &mut Vec<Sound>) -> GameState {
    let level = &state.level;

    // ── 1. Jump ──────────────────────────────────────────────────────────────
    let mut player = state.player.clone();
    if input.is_just_pressed(Action::Jump) {
        let jumped = jump(&player);
        if jumped.jump_count != player.jump_count {
            sounds.push(Sound::Jump);
        }
        player = jumped;
    }

    if input.is_just_pressed(Action::Restart) {
        tracing::debug!(frame = state.frame, "run abandoned");
        return GameState {
            mode: Mode::GameOver,
            gameover_count: 0,
            player,
            ..state.clone()
        };
    }

    // ── 2. Projectiles ───────────────────────────────────────────────────────
    // Existing shots move first so a shot fired this frame starts where the
    // player is.
    let mut projectiles = advance_projectiles(&state.projectiles);
    if input.is_just_pressed(Action::Fire) {
        projectiles = fire(&projectiles, &player);
        sounds.push(Sound::Shoot);
    }

    // ── 3. Movement & gravity ────────────────────────────────────────────────
    let blocked = resolve_platforms(&player, &level.platforms);
    let steered = steer(&player, input, blocked);
    let moved = integrate(&steered);
    let camera_x = state.camera_x.saturating_add(moved.vx);
    let mut player = apply_gravity(&moved);

    // ── 4. Contacts ──────────────────────────────────────────────────────────
    if let Some(top) = land_on_platforms(&steered, &moved, &level.platforms) {
        player = stand_on(&player, top);
    }
    if touches_ground(&player) {
        player = settle(&player);
    }
    let pressed = resolve_platforms(&player, &level.platforms);
    if pressed.left || pressed.right {
        player.jump_count = 0;
    }

    // ── 5. Enemies ───────────────────────────────────────────────────────────
    let enemies = patrol(&state.enemies);

    // ── 6. Hazards ───────────────────────────────────────────────────────────
    // Pipes only bump: one cue when contact begins, no effect on the run.
    if hits_pipe(&player, &level.pipes) && !hits_pipe(&state.player, &level.pipes) {
        sounds.push(Sound::Hit);
        tracing::debug!(frame = state.frame, x = player.x(), "pipe bump");
    }
    let hit = hits_kill_box(&player, &level.kill_boxes) || hits_enemy(&player, &enemies);

    let (mode, gameover_count) = if hit {
        sounds.push(Sound::Hit);
        tracing::debug!(
            frame = state.frame,
            score = layout::score(player.x16),
            "player hit"
        );
        (Mode::GameOver, GAMEOVER_FRAMES)
    } else {
        (Mode::Game, state.gameover_count)
    };

    tracing::trace!(x16 = player.x16, y16 = player.y16, vx = player.vx, vy = player.vy, "step");

    GameState {
        mode,
        player,
        enemies,
        projectiles,
        camera_x,
        gameover_count,
        ..state.clone()
    }
}
