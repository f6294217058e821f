/// Rendering layer — all terminal output lives here.
///
/// A frame is composed into a `Canvas` of character cells (one cell covers
/// 8×16 world pixels) and then written to the terminal in one pass. Nothing
/// here feeds back into the game state.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use gopher_jump::assets::{
    Assets, SourceRect, Sprite, CELL_HEIGHT, CELL_WIDTH, GROUND_TILE, PIPE_BODY, PIPE_CAP,
    PLATFORM_TILE,
};
use gopher_jump::entities::{
    Block, Facing, GameState, Mode, PIPE_GAP_Y, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE,
};
use gopher_jump::game::score;
use gopher_jump::geometry::{floor_div, floor_mod};

pub const CANVAS_COLS: usize = (SCREEN_WIDTH / CELL_WIDTH) as usize;
pub const CANVAS_ROWS: usize = (SCREEN_HEIGHT / CELL_HEIGHT) as usize;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY: Color = Color::Rgb { r: 0x80, g: 0xa0, b: 0xc0 };
const C_GROUND: Color = Color::DarkYellow;
const C_PIPE: Color = Color::Green;
const C_PLATFORM: Color = Color::DarkGrey;
const C_SPIKES: Color = Color::Red;
const C_PLAYER: Color = Color::Cyan;
const C_ENEMY: Color = Color::Magenta;
const C_PROJECTILE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: C_TEXT };

/// Where and how to blit a sprite, in cell coordinates.
#[derive(Clone, Copy, Debug)]
pub struct DrawOptions {
    pub col: i32,
    pub row: i32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub color: Color,
}

impl DrawOptions {
    /// Options for a sprite whose top-left corner is at screen pixel (x, y).
    pub fn at_pixel(x: i32, y: i32, color: Color) -> Self {
        DrawOptions {
            col: floor_div(x, CELL_WIDTH),
            row: floor_div(y, CELL_HEIGHT),
            flip_x: false,
            flip_y: false,
            color,
        }
    }
}

pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Canvas {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    fn set(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = Cell { ch, color };
    }

    /// Blit `sprite` (or the `src` region of it); transparent cells and
    /// anything off-canvas are skipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, opts: DrawOptions, src: Option<SourceRect>) {
        let mut image = match src {
            Some(rect) => sprite.region(rect),
            None => sprite.clone(),
        };
        if opts.flip_x {
            image = image.flipped_x();
        }
        if opts.flip_y {
            image = image.flipped_y();
        }
        for r in 0..image.height() {
            for c in 0..image.width() {
                if let Some(ch) = image.cell(c, r) {
                    self.set(opts.col + c as i32, opts.row + r as i32, ch, opts.color);
                }
            }
        }
    }

    pub fn draw_text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(col + i as i32, row, ch, color);
        }
    }

    /// Centre `text` horizontally on `row`.
    pub fn draw_centered(&mut self, row: i32, text: &str, color: Color) {
        let col = (self.cols as i32 - text.chars().count() as i32) / 2;
        self.draw_text(col, row, text, color);
    }

    #[cfg(test)]
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Write the canvas, clipped to a terminal of `width`×`height` cells.
    pub fn present<W: Write>(&self, out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
        let cols = self.cols.min(width as usize);
        let rows = self.rows.min(height as usize);

        out.queue(style::SetBackgroundColor(C_SKY))?;
        for row in 0..rows {
            out.queue(cursor::MoveTo(0, row as u16))?;
            let line = &self.cells[row * self.cols..row * self.cols + cols];
            // One colour change per run of same-coloured cells.
            let mut start = 0;
            while start < line.len() {
                let color = line[start].color;
                let end = line[start..]
                    .iter()
                    .position(|c| c.color != color)
                    .map_or(line.len(), |n| start + n);
                let run: String = line[start..end].iter().map(|c| c.ch).collect();
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(run))?;
                start = end;
            }
        }
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, rows as u16))?;
        out.flush()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    assets: &Assets,
    tps: f64,
    size: (u16, u16),
) -> std::io::Result<()> {
    let canvas = compose(state, assets, tps);
    canvas.present(out, size.0, size.1)
}

pub fn compose(state: &GameState, assets: &Assets, tps: f64) -> Canvas {
    let mut canvas = Canvas::new(CANVAS_COLS, CANVAS_ROWS);

    draw_tiles(&mut canvas, state, assets);
    for platform in &state.level.platforms {
        draw_block(&mut canvas, state, platform, &assets.tiles, Some(PLATFORM_TILE), C_PLATFORM);
    }
    for kill_box in &state.level.kill_boxes {
        draw_block(&mut canvas, state, kill_box, &assets.spikes, None, C_SPIKES);
    }
    if state.mode != Mode::Title {
        draw_player(&mut canvas, state, assets);
        draw_enemies(&mut canvas, state, assets);
        draw_projectiles(&mut canvas, state, assets);
    }
    draw_texts(&mut canvas, state);

    let score_str = format!("{:04}", score(state));
    let col = CANVAS_COLS as i32 - score_str.len() as i32 - 1;
    canvas.draw_text(col, 0, &score_str, C_TEXT);
    canvas.draw_text(0, 0, &format!("TPS: {tps:0.2}"), C_TEXT);

    canvas
}

// ── Terrain ───────────────────────────────────────────────────────────────────

fn draw_tiles(canvas: &mut Canvas, state: &GameState, assets: &Assets) {
    const NX: i32 = SCREEN_WIDTH / TILE_SIZE;
    const NY: i32 = SCREEN_HEIGHT / TILE_SIZE;

    let shift_x = floor_mod(state.camera_x, TILE_SIZE);
    let shift_y = floor_mod(state.camera_y, TILE_SIZE);

    for i in -2..NX + 1 {
        let x = i * TILE_SIZE - shift_x;

        let ground = DrawOptions::at_pixel(x, (NY - 1) * TILE_SIZE - shift_y, C_GROUND);
        canvas.draw_sprite(&assets.tiles, ground, Some(GROUND_TILE));

        let Some(tile_y) = state.level.pipes.pipe_at(floor_div(state.camera_x, TILE_SIZE) + i)
        else {
            continue;
        };

        // Upper pipe hangs from the top, cap facing down into the gap.
        for j in 0..tile_y {
            let opts = DrawOptions {
                flip_y: true,
                ..DrawOptions::at_pixel(x, j * TILE_SIZE - shift_y, C_PIPE)
            };
            let src = if j == tile_y - 1 { PIPE_CAP } else { PIPE_BODY };
            canvas.draw_sprite(&assets.tiles, opts, Some(src));
        }
        for j in tile_y + PIPE_GAP_Y..NY - 1 {
            let opts = DrawOptions::at_pixel(x, j * TILE_SIZE - shift_y, C_PIPE);
            let src = if j == tile_y + PIPE_GAP_Y { PIPE_CAP } else { PIPE_BODY };
            canvas.draw_sprite(&assets.tiles, opts, Some(src));
        }
    }
}

fn draw_block(
    canvas: &mut Canvas,
    state: &GameState,
    block: &Block,
    sprite: &Sprite,
    src: Option<SourceRect>,
    color: Color,
) {
    for t in 0..block.tiles {
        let opts = DrawOptions::at_pixel(
            block.x + t * TILE_SIZE - state.camera_x,
            block.y - state.camera_y,
            color,
        );
        canvas.draw_sprite(sprite, opts, src);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player(canvas: &mut Canvas, state: &GameState, assets: &Assets) {
    let p = &state.player;
    let opts = DrawOptions {
        flip_x: p.facing == Facing::Left,
        ..DrawOptions::at_pixel(p.x() - state.camera_x, p.y() - state.camera_y, C_PLAYER)
    };
    canvas.draw_sprite(&assets.player, opts, None);
}

fn draw_enemies(canvas: &mut Canvas, state: &GameState, assets: &Assets) {
    for enemy in &state.enemies {
        let x = enemy.x.saturating_sub(state.camera_x);
        let opts = DrawOptions::at_pixel(x, enemy.y - state.camera_y, C_ENEMY);
        canvas.draw_sprite(&assets.enemy, opts, None);
    }
}

fn draw_projectiles(canvas: &mut Canvas, state: &GameState, assets: &Assets) {
    for shot in &state.projectiles {
        let x = shot.x.saturating_sub(state.camera_x);
        let opts = DrawOptions::at_pixel(x, shot.y - state.camera_y, C_PROJECTILE);
        canvas.draw_sprite(&assets.projectile, opts, None);
    }
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_texts(canvas: &mut Canvas, state: &GameState) {
    match state.mode {
        Mode::Title => {
            canvas.draw_centered(6, "GOPHER JUMP", C_TEXT);
            canvas.draw_centered(14, "PRESS SPACE KEY", C_TEXT);
            canvas.draw_centered(16, "OR ENTER", C_TEXT);
            canvas.draw_centered(
                CANVAS_ROWS as i32 - 1,
                "A/D MOVE  SPACE JUMP  F FIRE  CTRL+R GIVE UP  Q QUIT",
                C_TEXT,
            );
        }
        Mode::GameOver => {
            canvas.draw_centered(5, "GAME OVER!", C_TEXT);
            if state.gameover_count == 0 {
                canvas.draw_centered(7, "PRESS SPACE KEY", C_TEXT);
            }
        }
        Mode::Game => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gopher_jump::game::new_game;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sprite(art: &str) -> Sprite {
        Sprite::parse("test", art).unwrap()
    }

    #[test]
    fn transparent_cells_keep_what_is_underneath() {
        let mut canvas = Canvas::new(4, 1);
        canvas.draw_text(0, 0, "abcd", C_TEXT);
        canvas.draw_sprite(&sprite("x..y"), DrawOptions::at_pixel(0, 0, C_TEXT), None);
        assert_eq!(canvas.row_text(0), "xbcy");
    }

    #[test]
    fn sprites_are_clipped_at_every_edge() {
        let mut canvas = Canvas::new(3, 2);
        let art = sprite("abcd\nefgh\nijkl");
        canvas.draw_sprite(
            &art,
            DrawOptions { col: -1, row: -1, flip_x: false, flip_y: false, color: C_TEXT },
            None,
        );
        assert_eq!(canvas.row_text(0), "fgh");
        assert_eq!(canvas.row_text(1), "jkl");
    }

    #[test]
    fn source_rect_and_flip_apply_before_placement() {
        let mut canvas = Canvas::new(2, 2);
        let sheet = sprite("ab12\ncd34");
        let opts = DrawOptions { col: 0, row: 0, flip_x: true, flip_y: false, color: C_TEXT };
        canvas.draw_sprite(&sheet, opts, Some(SourceRect::new(2, 0, 2, 2)));
        assert_eq!(canvas.row_text(0), "21");
        assert_eq!(canvas.row_text(1), "43");
    }

    #[test]
    fn pixel_positions_map_to_cells_with_floor() {
        let opts = DrawOptions::at_pixel(-1, 17, C_TEXT);
        assert_eq!((opts.col, opts.row), (-1, 1));
    }

    #[test]
    fn title_frame_shows_title_and_score() {
        let state = new_game(&mut StdRng::seed_from_u64(1));
        let assets = Assets::load().unwrap();
        let canvas = compose(&state, &assets, 30.0);
        assert!(canvas.row_text(6).contains("GOPHER JUMP"));
        assert!(canvas.row_text(0).contains("0000"));
        assert!(canvas.row_text(0).starts_with("TPS: 30.00"));
    }

    #[test]
    fn ground_row_is_fully_drawn() {
        let state = new_game(&mut StdRng::seed_from_u64(1));
        let assets = Assets::load().unwrap();
        let canvas = compose(&state, &assets, 0.0);
        assert!(!canvas.row_text(CANVAS_ROWS - 2).contains(' '));
    }

    #[test]
    fn present_respects_terminal_size() {
        let canvas = Canvas::new(CANVAS_COLS, CANVAS_ROWS);
        let mut out = Vec::new();
        canvas.present(&mut out, 10, 3).unwrap();
        assert!(!out.is_empty());
    }
}
