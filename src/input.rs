/// Input abstraction.
///
/// The simulation only ever asks two questions: "are all of these keys held
/// right now?" and "did this action fire on this frame?". Devices feed a
/// [`KeyTracker`], which turns raw press/repeat/release events into one
/// [`InputSnapshot`] per frame.

use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    F,
    J,
    R,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Enter,
    ControlLeft,
}

/// Edge-triggered actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Leave the title or game-over screen.
    Start,
    Jump,
    Fire,
    /// Ctrl+R: abandon the current run.
    Restart,
}

enum Binding {
    /// Fires when any of the keys goes down.
    Any(&'static [Key]),
    /// Fires when `key` goes down while every modifier is held.
    Combo(&'static [Key], Key),
}

impl Action {
    fn binding(self) -> Binding {
        match self {
            Action::Start => Binding::Any(&[Key::Space, Key::Enter]),
            Action::Jump => Binding::Any(&[Key::Space, Key::W, Key::ArrowUp]),
            Action::Fire => Binding::Any(&[Key::F, Key::J]),
            Action::Restart => Binding::Combo(&[Key::ControlLeft], Key::R),
        }
    }
}

pub trait Input {
    /// True when every key in `keys` is currently held.
    fn is_pressed(&self, keys: &[Key]) -> bool;

    /// True only on the frame the action's key went down.
    fn is_just_pressed(&self, action: Action) -> bool;
}

/// Input state for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `key` without producing an edge.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    /// Press `key` on this frame: it is both held and a rising edge.
    pub fn press(mut self, key: Key) -> Self {
        self.held.insert(key);
        self.just_pressed.insert(key);
        self
    }
}

impl Input for InputSnapshot {
    fn is_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().all(|k| self.held.contains(k))
    }

    fn is_just_pressed(&self, action: Action) -> bool {
        match action.binding() {
            Binding::Any(keys) => keys.iter().any(|k| self.just_pressed.contains(k)),
            Binding::Combo(modifiers, key) => {
                self.just_pressed.contains(&key) && self.is_pressed(modifiers)
            }
        }
    }
}

// ── Key tracking ──────────────────────────────────────────────────────────────

/// How long a key counts as held after its last press or repeat event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldPolicy {
    /// Expire after this many frames of silence. For terminals that never
    /// report releases: OS key-repeat keeps refreshing a key that is down.
    Window(u64),
    /// Held until an explicit release event.
    UntilRelease,
}

/// Maintains, for every key, the frame number of the last press/repeat event
/// and turns fresh presses into rising edges.
#[derive(Debug)]
pub struct KeyTracker {
    policy: HoldPolicy,
    last_seen: HashMap<Key, u64>,
    edges: HashSet<Key>,
}

impl KeyTracker {
    pub fn new(policy: HoldPolicy) -> Self {
        KeyTracker {
            policy,
            last_seen: HashMap::new(),
            edges: HashSet::new(),
        }
    }

    fn is_held(&self, key: Key, frame: u64) -> bool {
        match (self.last_seen.get(&key), self.policy) {
            (None, _) => false,
            (Some(_), HoldPolicy::UntilRelease) => true,
            (Some(&last), HoldPolicy::Window(window)) => frame.saturating_sub(last) <= window,
        }
    }

    /// A press of a key that is not already held is a rising edge; a press of
    /// a held key is an OS auto-repeat and only refreshes it.
    pub fn press(&mut self, key: Key, frame: u64) {
        if !self.is_held(key, frame) {
            self.edges.insert(key);
        }
        self.last_seen.insert(key, frame);
    }

    pub fn repeat(&mut self, key: Key, frame: u64) {
        self.last_seen.insert(key, frame);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Snapshot for `frame`; edges are consumed so they fire exactly once.
    pub fn take_snapshot(&mut self, frame: u64) -> InputSnapshot {
        let held = self
            .last_seen
            .keys()
            .copied()
            .filter(|&k| self.is_held(k, frame))
            .collect();
        InputSnapshot {
            held,
            just_pressed: std::mem::take(&mut self.edges),
        }
    }
}
