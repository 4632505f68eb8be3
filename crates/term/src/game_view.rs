//! GameView: maps a `GameSnapshot` onto a terminal canvas.
//!
//! Pure (no I/O), so everything here is unit-testable.

use crate::canvas::{Canvas, Glyph, Rgb, Style};
use crate::core::pieces::Shape;
use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Side panel width in terminal columns
const PANEL_W: u16 = 12;
/// Gap between the board frame and the side panel
const PANEL_GAP: u16 = 2;
/// Preview box interior, in board cells
const PREVIEW_COLS: u16 = 4;
const PREVIEW_ROWS: u16 = 2;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const FRAME_FG: Rgb = Rgb::new(200, 200, 200);
const BLACK: Rgb = Rgb::new(0, 0, 0);

const BLOCK: char = '█';
const GHOST: char = '░';
const EMPTY: char = '·';
const FLASH: char = '▓';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the pieces of the view land for a given viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of the board frame
    pub board_x: u16,
    pub board_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub panel_x: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Blink phase for rows being cleared
    flash_lit: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares the cells on common terminal fonts.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            flash_lit: true,
        }
    }

    /// Set the blink phase used for rows in `clearing_rows`
    pub fn set_clear_flash(&mut self, lit: bool) {
        self.flash_lit = lit;
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;

        let board_x = viewport.width.saturating_sub(total_w) / 2;
        let board_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            board_x,
            board_y,
            frame_w,
            frame_h,
            panel_x: board_x + frame_w + PANEL_GAP,
        }
    }

    /// Terminal position of the top-left character of board cell (x, y)
    pub fn cell_origin(&self, layout: &Layout, x: u16, y: u16) -> (u16, u16) {
        (
            layout.board_x + 1 + x * self.cell_w,
            layout.board_y + 1 + y * self.cell_h,
        )
    }

    /// Render the snapshot into an existing canvas, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        canvas.fill(Glyph::default());

        let layout = self.layout(viewport);
        draw_frame(
            canvas,
            layout.board_x,
            layout.board_y,
            layout.frame_w,
            layout.frame_h,
            Style::new(FRAME_FG, BLACK),
        );

        self.draw_well(canvas, &layout, snap);

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y.filter(|&gy| gy != active.y) {
                let ghost = ActiveSnapshot {
                    y: ghost_y,
                    ..active
                };
                let style = Style::new(Rgb::from(active.kind.color()).darken(160), WELL_BG).dim();
                self.draw_piece(canvas, &layout, &ghost, GHOST, style);
            }
            let style = Style::new(Rgb::from(active.kind.color()), WELL_BG).bold();
            self.draw_piece(canvas, &layout, &active, BLOCK, style);
        }

        self.draw_panel(canvas, &layout, snap);

        match snap.phase {
            Phase::Idle => self.draw_banner(canvas, &layout, &["PRESS ENTER", "TO START"]),
            Phase::GameOver => self.draw_banner(canvas, &layout, &["GAME OVER", "ENTER: RETRY"]),
            Phase::Playing | Phase::Clearing => {}
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    fn draw_well(&self, canvas: &mut Canvas, layout: &Layout, snap: &GameSnapshot) {
        let empty = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        let flash = Style::new(Rgb::new(255, 255, 255), WELL_BG).bold();

        for (y, row) in snap.board.iter().enumerate() {
            let clearing = snap.is_row_clearing(y);
            for (x, &tag) in row.iter().enumerate() {
                let (ch, style) = match PieceKind::from_tag(tag) {
                    Some(_) if clearing && self.flash_lit => (FLASH, flash),
                    Some(_) if clearing => (EMPTY, empty),
                    Some(kind) => (BLOCK, Style::new(Rgb::from(kind.color()), WELL_BG)),
                    None => (EMPTY, empty),
                };
                self.fill_cell(canvas, layout, x as u16, y as u16, ch, style);
            }
        }
    }

    /// Cells above row 0 or outside the walls are skipped.
    fn draw_piece(
        &self,
        canvas: &mut Canvas,
        layout: &Layout,
        piece: &ActiveSnapshot,
        ch: char,
        style: Style,
    ) {
        for (x, y) in piece.cells() {
            if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                self.fill_cell(canvas, layout, x as u16, y as u16, ch, style);
            }
        }
    }

    fn fill_cell(
        &self,
        canvas: &mut Canvas,
        layout: &Layout,
        x: u16,
        y: u16,
        ch: char,
        style: Style,
    ) {
        let (px, py) = self.cell_origin(layout, x, y);
        canvas.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, canvas: &mut Canvas, layout: &Layout, snap: &GameSnapshot) {
        let label = Style::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = Style::new(Rgb::new(200, 200, 200), BLACK);
        let x = layout.panel_x;
        let mut y = layout.board_y;

        canvas.put_str(x, y, "NEXT", label);
        y += 1;
        let box_w = PREVIEW_COLS * self.cell_w + 2;
        let box_h = PREVIEW_ROWS * self.cell_h + 2;
        draw_frame(canvas, x, y, box_w, box_h, Style::new(FRAME_FG, BLACK).dim());
        if let Some(kind) = snap.preview {
            self.draw_preview(canvas, x + 1, y + 1, kind);
        }
        y += box_h + 1;

        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            canvas.put_str(x, y, name, label);
            canvas.put_u32(x, y + 1, v, value);
            y += 3;
        }

        canvas.put_str(x, y, "SPEED", label);
        let end = canvas.put_u32(x, y + 1, snap.tick_interval_ms, value);
        canvas.put_str(end, y + 1, "ms", value.dim());
    }

    /// Preview piece centered in the box interior starting at (x, y)
    fn draw_preview(&self, canvas: &mut Canvas, x: u16, y: u16, kind: PieceKind) {
        let shape = Shape::template(kind);
        let inner_w = PREVIEW_COLS * self.cell_w;
        let inner_h = PREVIEW_ROWS * self.cell_h;
        let ox = x + inner_w.saturating_sub(shape.width() as u16 * self.cell_w) / 2;
        let oy = y + inner_h.saturating_sub(shape.height() as u16 * self.cell_h) / 2;
        let style = Style::new(Rgb::from(kind.color()), BLACK);

        for (dx, dy) in shape.filled() {
            canvas.fill_rect(
                ox + dx as u16 * self.cell_w,
                oy + dy as u16 * self.cell_h,
                self.cell_w,
                self.cell_h,
                BLOCK,
                style,
            );
        }
    }

    /// Centered lines of text across the middle of the well
    fn draw_banner(&self, canvas: &mut Canvas, layout: &Layout, lines: &[&str]) {
        let style = Style::new(Rgb::new(255, 255, 255), BLACK).bold();
        let top = layout.board_y + layout.frame_h / 2 - lines.len() as u16 / 2;
        for (i, text) in lines.iter().enumerate() {
            let w = text.chars().count() as u16;
            let x = layout.board_x + layout.frame_w.saturating_sub(w) / 2;
            canvas.put_str(x, top + i as u16, text, style);
        }
    }
}

fn draw_frame(canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;

    canvas.put(x, y, '┌', style);
    canvas.put(right, y, '┐', style);
    canvas.put(x, bottom, '└', style);
    canvas.put(right, bottom, '┘', style);
    for cx in x + 1..right {
        canvas.put(cx, y, '─', style);
        canvas.put(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        canvas.put(x, cy, '│', style);
        canvas.put(right, cy, '│', style);
    }
}
