/// Text sprites and the asset bundle.
///
/// Art is embedded at build time and decoded once at startup; a sprite that
/// fails to decode aborts the program before the terminal is touched.

use anyhow::{bail, ensure, Result};

/// Marks a transparent cell in sprite art.
pub const TRANSPARENT: char = '.';

/// Pixels covered by one terminal cell.
pub const CELL_WIDTH: i32 = 8;
pub const CELL_HEIGHT: i32 = 16;

/// A rectangle of cells inside a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRect {
    pub col: usize,
    pub row: usize,
    pub width: usize,
    pub height: usize,
}

impl SourceRect {
    pub const fn new(col: usize, row: usize, width: usize, height: usize) -> Self {
        SourceRect { col, row, width, height }
    }
}

// Regions of the tile sheet.
pub const GROUND_TILE: SourceRect = SourceRect::new(0, 0, 4, 2);
pub const PLATFORM_TILE: SourceRect = SourceRect::new(0, 2, 4, 2);
pub const PIPE_CAP: SourceRect = SourceRect::new(4, 0, 8, 2);
pub const PIPE_BODY: SourceRect = SourceRect::new(4, 2, 8, 2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    cells: Vec<Option<char>>,
}

impl Sprite {
    /// Decode sprite art: one line per row, every row the same width.
    pub fn parse(name: &str, art: &str) -> Result<Sprite> {
        let mut rows: Vec<Vec<char>> = art.lines().map(|l| l.chars().collect()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let Some(first) = rows.first() else {
            bail!("sprite {name:?} is empty");
        };
        let width = first.len();
        for (i, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == width,
                "sprite {name:?} row {i} is {} cells wide, expected {width}",
                row.len()
            );
        }
        let cells = rows
            .iter()
            .flatten()
            .map(|&c| (c != TRANSPARENT).then_some(c))
            .collect();
        Ok(Sprite {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (col, row); `None` when transparent or out of range.
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col]
    }

    pub fn contains(&self, rect: SourceRect) -> bool {
        rect.col + rect.width <= self.width && rect.row + rect.height <= self.height
    }

    /// Crop to `rect`, clipped to the sprite bounds.
    pub fn region(&self, rect: SourceRect) -> Sprite {
        let width = rect.width.min(self.width.saturating_sub(rect.col));
        let height = rect.height.min(self.height.saturating_sub(rect.row));
        let cells = (0..height)
            .flat_map(|r| (0..width).map(move |c| (c, r)))
            .map(|(c, r)| self.cell(rect.col + c, rect.row + r))
            .collect();
        Sprite { width, height, cells }
    }

    /// Mirror left-to-right, swapping direction-bearing glyphs.
    pub fn flipped_x(&self) -> Sprite {
        let cells = (0..self.height)
            .flat_map(|r| (0..self.width).rev().map(move |c| (c, r)))
            .map(|(c, r)| self.cell(c, r).map(mirror_x))
            .collect();
        Sprite { cells, ..self.clone() }
    }

    /// Mirror top-to-bottom.
    pub fn flipped_y(&self) -> Sprite {
        let cells = (0..self.height)
            .rev()
            .flat_map(|r| (0..self.width).map(move |c| (c, r)))
            .map(|(c, r)| self.cell(c, r).map(mirror_y))
            .collect();
        Sprite { cells, ..self.clone() }
    }
}

fn mirror_x(c: char) -> char {
    match c {
        '<' => '>',
        '>' => '<',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '/' => '\\',
        '\\' => '/',
        'd' => 'b',
        'b' => 'd',
        other => other,
    }
}

fn mirror_y(c: char) -> char {
    match c {
        '/' => '\\',
        '\\' => '/',
        '^' => 'v',
        'v' => '^',
        '_' => '‾',
        other => other,
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

/// Every sprite the renderer needs, decoded once.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemy: Sprite,
    pub projectile: Sprite,
    pub spikes: Sprite,
    pub tiles: Sprite,
}

impl Assets {
    pub fn load() -> Result<Assets> {
        Self::from_art(
            include_str!("../assets/player.txt"),
            include_str!("../assets/enemy.txt"),
            include_str!("../assets/projectile.txt"),
            include_str!("../assets/spikes.txt"),
            include_str!("../assets/tiles.txt"),
        )
    }

    pub fn from_art(
        player: &str,
        enemy: &str,
        projectile: &str,
        spikes: &str,
        tiles: &str,
    ) -> Result<Assets> {
        let tiles = Sprite::parse("tiles", tiles)?;
        for (name, rect) in [
            ("ground", GROUND_TILE),
            ("platform", PLATFORM_TILE),
            ("pipe cap", PIPE_CAP),
            ("pipe body", PIPE_BODY),
        ] {
            ensure!(
                tiles.contains(rect),
                "tile sheet is {}x{} cells, too small for the {name} tile",
                tiles.width(),
                tiles.height()
            );
        }
        let assets = Assets {
            player: Sprite::parse("player", player)?,
            enemy: Sprite::parse("enemy", enemy)?,
            projectile: Sprite::parse("projectile", projectile)?,
            spikes: Sprite::parse("spikes", spikes)?,
            tiles,
        };
        tracing::debug!("assets decoded");
        Ok(assets)
    }
}
