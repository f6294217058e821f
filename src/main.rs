mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing_subscriber::EnvFilter;

use gopher_jump::assets::Assets;
use gopher_jump::audio::{AudioSink, Bell, Muted};
use gopher_jump::config::GameConfig;
use gopher_jump::game::{new_game, update};
use gopher_jump::input::{HoldPolicy, Key, KeyTracker};

/// Frames a key stays held after its last event on terminals that never
/// report releases. Four frames at 30 TPS outlasts the OS repeat interval.
const HOLD_WINDOW: u64 = 4;

// ── Input mapping ─────────────────────────────────────────────────────────────

/// Logical keys for one terminal key event. Ctrl+<key> reports both.
fn keys_for(code: KeyCode, modifiers: KeyModifiers) -> Vec<Key> {
    let mut keys = match code {
        KeyCode::Left => vec![Key::ArrowLeft],
        KeyCode::Right => vec![Key::ArrowRight],
        KeyCode::Up => vec![Key::ArrowUp],
        KeyCode::Enter => vec![Key::Enter],
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => vec![Key::A],
            'd' => vec![Key::D],
            'w' => vec![Key::W],
            'f' => vec![Key::F],
            'j' => vec![Key::J],
            'r' => vec![Key::R],
            ' ' => vec![Key::Space],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    if modifiers.contains(KeyModifiers::CONTROL) && !keys.is_empty() {
        keys.push(Key::ControlLeft);
    }
    keys
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: every key event is fed to a `KeyTracker` as it is drained
/// from the channel; once per frame the tracker yields a snapshot of held
/// keys and fresh presses, and the simulation advances exactly one step.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
    policy: HoldPolicy,
    rng: &mut StdRng,
    audio: &mut dyn AudioSink,
) -> std::io::Result<()> {
    let tick = config.tick();
    let mut tracker = KeyTracker::new(policy);
    let mut state = new_game(rng);
    let mut frame: u64 = 0;

    let mut tps = 0.0;
    let mut window_start = Instant::now();
    let mut window_frames = 0u32;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                tracing::info!(frame, "quit requested");
                return Ok(());
            }
            if !modifiers.contains(KeyModifiers::CONTROL) {
                tracker.release(Key::ControlLeft);
            }
            for key in keys_for(code, modifiers) {
                match kind {
                    KeyEventKind::Press => tracker.press(key, frame),
                    KeyEventKind::Repeat => tracker.repeat(key, frame),
                    KeyEventKind::Release => tracker.release(key),
                }
            }
        }

        let input = tracker.take_snapshot(frame);
        let (next, sounds) = update(&state, &input, rng);
        if next.mode != state.mode {
            tracing::info!(frame, from = ?state.mode, to = ?next.mode, "mode changed");
        }
        state = next;
        for sound in sounds {
            audio.play(sound);
        }

        display::render(out, &state, assets, tps, terminal::size()?)?;

        window_frames += 1;
        let window = window_start.elapsed();
        if window.as_secs_f64() >= 1.0 {
            tps = f64::from(window_frames) / window.as_secs_f64();
            window_start = Instant::now();
            window_frames = 0;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < tick {
            thread::sleep(tick - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = GameConfig::load()?;
    init_tracing(&config)?;
    let assets = Assets::load().context("decoding embedded sprites")?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    tracing::info!(seed, title = %config.title, "starting");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut audio: Box<dyn AudioSink> = if config.sound {
        Box::new(Bell::new(stdout()))
    } else {
        Box::new(Muted)
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(&config.title))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the
    // hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let policy = if keyboard_enhanced {
        HoldPolicy::UntilRelease
    } else {
        HoldPolicy::Window(HOLD_WINDOW)
    };
    tracing::debug!(?policy, "input hold policy");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &config, &assets, &rx, policy, &mut rng, audio.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

/// Install the file-backed subscriber. Without a log file the game stays
/// silent: stdout and stderr both belong to the screen.
fn init_tracing(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(())
}
