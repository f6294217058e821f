use std::rc::Rc;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gopher_jump::compute::{advance_projectiles, fire, jump};
use gopher_jump::entities::*;
use gopher_jump::game::update;
use gopher_jump::input::{InputSnapshot, Key};
use gopher_jump::layout::{score, PipeLayout, PIPE_MAX_TILE_Y, PIPE_MIN_TILE_Y};

fn open_game(player: Player) -> GameState {
    GameState {
        mode: Mode::Game,
        player,
        enemies: Vec::new(),
        projectiles: Vec::new(),
        camera_x: 0,
        camera_y: 0,
        level: Rc::new(Level {
            pipes: PipeLayout::from_heights(Vec::new()),
            platforms: vec![Block { x: 160, y: 352, tiles: 3 }],
            kill_boxes: Vec::new(),
        }),
        gameover_count: 0,
        frame: 0,
    }
}

#[derive(Clone, Debug)]
struct Buttons {
    left: bool,
    right: bool,
    jump: bool,
    fire: bool,
}

fn buttons() -> impl Strategy<Value = Buttons> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(left, right, jump, fire)| Buttons { left, right, jump, fire })
}

fn snapshot(b: &Buttons) -> InputSnapshot {
    let mut s = InputSnapshot::new();
    if b.left {
        s = s.hold(Key::A);
    }
    if b.right {
        s = s.hold(Key::D);
    }
    if b.jump {
        s = s.press(Key::Space);
    }
    if b.fire {
        s = s.press(Key::F);
    }
    s
}

proptest! {
    #[test]
    fn terrain_query_rejects_off_interval_columns(seed in any::<u64>(), tile in -5000i32..5000) {
        let layout = PipeLayout::generate(&mut StdRng::seed_from_u64(seed));
        let rel = tile - PIPE_START_OFFSET_X;
        let found = layout.pipe_at(tile);
        if rel <= 0 || rel.rem_euclid(PIPE_INTERVAL_X) != 0 {
            prop_assert_eq!(found, None);
        } else {
            let h = found.unwrap();
            prop_assert!((PIPE_MIN_TILE_Y..=PIPE_MAX_TILE_Y).contains(&h));
        }
    }

    #[test]
    fn velocities_stay_in_bounds(
        frames in prop::collection::vec(buttons(), 1..300),
        start_y in 0i32..386,
    ) {
        let mut state = open_game(Player {
            x16: 0,
            y16: start_y * POSITION_SCALE,
            vx: 0,
            vy: 0,
            jump_count: 0,
            facing: Facing::Right,
        });
        let mut rng = StdRng::seed_from_u64(0);
        for b in &frames {
            state = update(&state, &snapshot(b), &mut rng).0;
            let p = &state.player;
            prop_assert!((-MAX_MOVE_VELOCITY..=MAX_MOVE_VELOCITY).contains(&p.vx));
            prop_assert!((-2 * JUMP_VELOCITY..=MAX_GRAVITY_VELOCITY).contains(&p.vy));
            prop_assert!(p.jump_count <= MAX_JUMPS);
        }
    }

    #[test]
    fn airborne_jumps_are_capped_at_two(presses in 1usize..10, vy in -16i32..=8) {
        let mut p = Player { x16: 0, y16: 0, vx: 0, vy, jump_count: 0, facing: Facing::Right };
        let mut effective = 0;
        for _ in 0..presses {
            let next = jump(&p);
            if next != p {
                effective += 1;
            }
            p = next;
        }
        prop_assert_eq!(effective, presses.min(2));
        prop_assert!(p.jump_count <= 2);
    }

    #[test]
    fn projectiles_expire_in_fire_order(fires in prop::collection::vec(any::<bool>(), 1..600)) {
        let player = Player { x16: 0, y16: 0, vx: 0, vy: 0, jump_count: 0, facing: Facing::Right };
        let mut shots: Vec<Projectile> = Vec::new();
        for &f in &fires {
            shots = advance_projectiles(&shots);
            if f {
                shots = fire(&shots, &player);
            }
        }
        // A shot fired on frame i has been advanced (n - 1 - i) times.
        let n = fires.len();
        let expected = fires
            .iter()
            .enumerate()
            .filter(|&(i, &f)| f && n - 1 - i < PROJECTILE_LIFESPAN as usize)
            .count();
        prop_assert_eq!(shots.len(), expected);
        prop_assert!(shots.windows(2).all(|w| w[0].lifespan < w[1].lifespan));
        prop_assert!(shots.iter().all(|s| s.lifespan >= 1));
    }

    #[test]
    fn score_is_monotonic(x16 in 0i32..1_000_000, dx in 0i32..100_000) {
        prop_assert!(score(x16) <= score(x16 + dx));
    }

    #[test]
    fn score_is_zero_up_to_the_start_offset(x16 in -1_000_000i32..=0) {
        prop_assert_eq!(score(x16), 0);
    }
}
