/// Pure physics and collision functions.
///
/// Every public function takes immutable references to the current entities
/// and returns new values; the state machine in `game` decides the order in
/// which they run within a frame.

use crate::entities::{
    Block, Enemy, Facing, Player, Projectile, ENEMY_STEP, GRAVITY, GROUND_Y, JUMP_VELOCITY,
    MAX_GRAVITY_VELOCITY, MAX_JUMPS, MAX_MOVE_VELOCITY, MOVE_ACCELERATION, PIPE_GAP_Y,
    PIPE_WIDTH, PLAYER_HEIGHT, PLAYER_SPRITE_HEIGHT, PLAYER_WIDTH,
    POSITION_SCALE, PROJECTILE_LIFESPAN, PROJECTILE_SPEED, TILE_SIZE,
};
use crate::geometry::floor_div;
use crate::input::{Input, Key};
use crate::layout::PipeLayout;

/// Which sides of a block the player is pressed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    /// Player sits just left of the block's left edge.
    pub left: bool,
    /// Player sits just inside the block's right edge.
    pub right: bool,
}

impl Contact {
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Directions in which movement input is ignored this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
}

// ── Jumping ──────────────────────────────────────────────────────────────────

/// Apply a jump impulse if the player still has a jump left.
pub fn jump(player: &Player) -> Player {
    if player.jump_count >= MAX_JUMPS {
        return player.clone();
    }
    Player {
        vy: -2 * JUMP_VELOCITY,
        jump_count: player.jump_count + 1,
        ..player.clone()
    }
}

// ── Movement integration ─────────────────────────────────────────────────────

/// Turn directional input into horizontal velocity.
///
/// Holding both directions stops the player; holding neither does too. Input
/// towards a blocked side is ignored, which leaves velocity untouched rather
/// than zeroing it, so a player already moving keeps moving.
pub fn steer(player: &Player, input: &impl Input, blocked: Blocked) -> Player {
    let left = input.is_pressed(&[Key::A]) || input.is_pressed(&[Key::ArrowLeft]);
    let right = input.is_pressed(&[Key::D]) || input.is_pressed(&[Key::ArrowRight]);
    let both = input.is_pressed(&[Key::A, Key::D])
        || input.is_pressed(&[Key::ArrowLeft, Key::ArrowRight]);

    let mut next = player.clone();
    if both {
        next.vx = 0;
    } else if left {
        next.facing = Facing::Left;
        if !blocked.left {
            next.vx = (player.vx - MOVE_ACCELERATION).max(-MAX_MOVE_VELOCITY);
        }
    } else if right {
        next.facing = Facing::Right;
        if !blocked.right {
            next.vx = (player.vx + MOVE_ACCELERATION).min(MAX_MOVE_VELOCITY);
        }
    } else {
        next.vx = 0;
    }
    next
}

/// Advance the position by one frame of velocity. Positions saturate at the
/// ends of the `i32` range instead of overflowing.
pub fn integrate(player: &Player) -> Player {
    Player {
        x16: player.x16.saturating_add(player.vx * POSITION_SCALE),
        y16: player.y16.saturating_add(player.vy * POSITION_SCALE),
        ..player.clone()
    }
}

pub fn apply_gravity(player: &Player) -> Player {
    Player {
        vy: (player.vy + GRAVITY).clamp(-2 * JUMP_VELOCITY, MAX_GRAVITY_VELOCITY),
        ..player.clone()
    }
}

// ── Ground & platforms ───────────────────────────────────────────────────────

pub fn touches_ground(player: &Player) -> bool {
    player.hitbox().bottom() >= GROUND_Y
}

/// Stop vertical motion and refill jumps.
pub fn settle(player: &Player) -> Player {
    Player {
        vy: 0,
        jump_count: 0,
        ..player.clone()
    }
}

/// Place the player with its hitbox bottom on `top`, then settle.
pub fn stand_on(player: &Player, top: i32) -> Player {
    let offset = (PLAYER_SPRITE_HEIGHT - PLAYER_HEIGHT) / 2 + PLAYER_HEIGHT;
    settle(&Player {
        y16: (top - offset) * POSITION_SCALE,
        ..player.clone()
    })
}

pub fn side_contact(player: &Player, block: &Block) -> Contact {
    let hb = player.hitbox();
    let r = block.rect();
    if !hb.overlaps_vertically(&r) {
        return Contact::default();
    }
    Contact {
        left: hb.x >= r.x - PLAYER_WIDTH && hb.x < r.x,
        right: hb.x > r.right() - PLAYER_WIDTH && hb.x <= r.right(),
    }
}

/// Collect side contacts across all platforms. Resolution only suppresses
/// input into the platform; it never pushes the player back out.
pub fn resolve_platforms(player: &Player, platforms: &[Block]) -> Blocked {
    platforms
        .iter()
        .map(|p| side_contact(player, p))
        .fold(Blocked::default(), |acc, c| Blocked {
            right: acc.right || c.left,
            left: acc.left || c.right,
        })
}

/// Top of the highest platform the player fell onto between `before` and
/// `after`, if any.
pub fn land_on_platforms(before: &Player, after: &Player, platforms: &[Block]) -> Option<i32> {
    if after.vy < 0 {
        return None;
    }
    let prev_bottom = before.hitbox().bottom();
    let hb = after.hitbox();
    platforms
        .iter()
        .map(Block::rect)
        .filter(|r| prev_bottom <= r.y && hb.bottom() >= r.y && hb.overlaps_horizontally(r))
        .map(|r| r.y)
        .min()
}

// ── Hazards ──────────────────────────────────────────────────────────────────

/// True when the player overlaps a pipe or flies too far above the screen.
pub fn hits_pipe(player: &Player, pipes: &PipeLayout) -> bool {
    let hb = player.hitbox();
    let (x0, y0, x1, y1) = (hb.x, hb.y, hb.right(), hb.bottom());
    if y0 < -TILE_SIZE * 4 {
        return true;
    }
    let x_min = floor_div(x0 - PIPE_WIDTH, TILE_SIZE);
    let x_max = floor_div(x0 + PLAYER_WIDTH, TILE_SIZE);
    for tile_x in x_min..=x_max {
        let Some(tile_y) = pipes.pipe_at(tile_x) else {
            continue;
        };
        if x0 >= tile_x * TILE_SIZE + PIPE_WIDTH || x1 < tile_x * TILE_SIZE {
            continue;
        }
        if y0 < tile_y * TILE_SIZE || y1 >= (tile_y + PIPE_GAP_Y) * TILE_SIZE {
            return true;
        }
    }
    false
}

pub fn hits_kill_box(player: &Player, kill_boxes: &[Block]) -> bool {
    let hb = player.hitbox();
    kill_boxes.iter().any(|k| hb.overlaps(&k.rect()))
}

pub fn hits_enemy(player: &Player, enemies: &[Enemy]) -> bool {
    let hb = player.hitbox();
    enemies.iter().any(|e| hb.overlaps(&e.hitbox()))
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Every enemy drifts left by one step; there is no turning back.
pub fn patrol(enemies: &[Enemy]) -> Vec<Enemy> {
    enemies
        .iter()
        .map(|e| Enemy {
            x: e.x.saturating_sub(ENEMY_STEP),
            ..e.clone()
        })
        .collect()
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Append a projectile at the player's position, half-way down the sprite.
pub fn fire(projectiles: &[Projectile], player: &Player) -> Vec<Projectile> {
    let mut next = projectiles.to_vec();
    next.push(Projectile {
        x: player.x(),
        y: player.y() + PLAYER_SPRITE_HEIGHT / 2,
        lifespan: PROJECTILE_LIFESPAN,
        facing: player.facing,
    });
    next
}

/// Move every projectile, age it by a frame, and drop the expired ones.
/// Survivors keep their fire order.
pub fn advance_projectiles(projectiles: &[Projectile]) -> Vec<Projectile> {
    projectiles
        .iter()
        .filter_map(|p| {
            let lifespan = p.lifespan.saturating_sub(1);
            if lifespan < 1 {
                None
            } else {
                Some(Projectile {
                    x: p.x.saturating_add(PROJECTILE_SPEED * p.facing.sign()),
                    lifespan,
                    ..p.clone()
                })
            }
        })
        .collect()
}
