/// Fire-and-forget sound output.

use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Jump,
    Shoot,
    Hit,
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Discards every sound.
#[derive(Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, sound: Sound) {
        tracing::trace!(?sound, "muted");
    }
}

/// Rings the terminal bell. Shots are too frequent to ring for.
#[derive(Debug)]
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Bell { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for Bell<W> {
    fn play(&mut self, sound: Sound) {
        if sound == Sound::Shoot {
            return;
        }
        let rang = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(err) = rang {
            tracing::warn!(%err, ?sound, "failed to ring bell");
        }
    }
}
