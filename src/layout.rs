/// Procedural pipe layout.
///
/// The heights are drawn once per level from the injected RNG and then read
/// periodically, so the world scrolls forever without generating anything new.

use rand::Rng;

use crate::entities::{PIPE_INTERVAL_X, PIPE_START_OFFSET_X, POSITION_SCALE, TILE_SIZE};
use crate::geometry::{floor_div, floor_mod};

pub const PIPE_LAYOUT_LEN: usize = 256;

/// Smallest and largest tile row at which the gap above a pipe may end.
pub const PIPE_MIN_TILE_Y: i32 = 2;
pub const PIPE_MAX_TILE_Y: i32 = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipeLayout {
    heights: Vec<i32>,
}

impl PipeLayout {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let heights = (0..PIPE_LAYOUT_LEN)
            .map(|_| rng.gen_range(PIPE_MIN_TILE_Y..=PIPE_MAX_TILE_Y))
            .collect();
        PipeLayout { heights }
    }

    /// Build a layout from explicit heights. An empty list yields a layout
    /// with no pipes at all.
    pub fn from_heights(heights: Vec<i32>) -> Self {
        PipeLayout { heights }
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    /// Height (in tiles) of the pipe standing at `tile_x`, if any.
    pub fn pipe_at(&self, tile_x: i32) -> Option<i32> {
        let rel = tile_x - PIPE_START_OFFSET_X;
        if rel <= 0 || floor_mod(rel, PIPE_INTERVAL_X) != 0 || self.heights.is_empty() {
            return None;
        }
        let idx = floor_div(rel, PIPE_INTERVAL_X) as usize;
        Some(self.heights[idx % self.heights.len()])
    }
}

/// Number of pipe columns passed at sub-pixel position `x16`.
pub fn score(x16: i32) -> i32 {
    let x = floor_div(floor_div(x16, POSITION_SCALE), TILE_SIZE);
    if x - PIPE_START_OFFSET_X <= 0 {
        return 0;
    }
    floor_div(x - PIPE_START_OFFSET_X, PIPE_INTERVAL_X)
}
