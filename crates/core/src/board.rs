//! Board module - the locked-cell grid
//!
//! A 10x20 grid stored as a flat row-major array, so it never allocates.
//! Coordinates are (x, y) with x in 0..10 (left to right) and y in 0..20
//! (top to bottom). Pieces may hang above row 0 while falling; those cells
//! never collide and are never written.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row indices of complete rows, top to bottom
pub type FullRows = ArrayVec<u8, HEIGHT>;

/// Tag grid handed to renderers (0 = empty, 1..=7 = piece tag)
pub type TagGrid = [[u8; WIDTH]; HEIGHT];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Cell at (x, y), or `None` when out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and holding a piece tag
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether `shape` placed at (x, y) leaves the playfield or overlaps locked cells.
    ///
    /// Left, right and bottom edges are walls. Cells above row 0 are allowed.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().any(|(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write `kind` into every filled cell of `shape` at (x, y) that lies on the grid.
    ///
    /// Cells above row 0 are dropped. Returns the number of cells written.
    pub fn lock_piece(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.filled() {
            if self.set(x + dx, y + dy, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_none())
    }

    /// Scan top to bottom for complete rows
    pub fn full_rows(&self) -> FullRows {
        (0..HEIGHT)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as u8)
            .collect()
    }

    /// Remove the given rows and shift everything above them down.
    ///
    /// Rows need not be contiguous or sorted. Remaining rows keep their order and
    /// the freed rows reappear empty at the top. Returns the number removed.
    pub fn clear_rows(&mut self, rows: &[u8]) -> usize {
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if rows.contains(&(read_y as u8)) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        write_y
    }

    /// Compact each column in `column_mask` downward, removing gaps.
    ///
    /// The vertical order of cells within a column is preserved.
    pub fn settle_columns(&mut self, column_mask: u16) {
        for x in 0..WIDTH {
            if column_mask & (1 << x) == 0 {
                continue;
            }

            let mut write_y = HEIGHT;
            for read_y in (0..HEIGHT).rev() {
                let cell = self.cells[read_y * WIDTH + x];
                if cell.is_some() {
                    write_y -= 1;
                    self.cells[write_y * WIDTH + x] = cell;
                }
            }
            for y in 0..write_y {
                self.cells[y * WIDTH + x] = None;
            }
        }
    }

    /// Copy the board into a tag grid for rendering
    pub fn write_tag_grid(&self, out: &mut TagGrid) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, tag) in row.iter_mut().enumerate() {
                *tag = self.cells[y * WIDTH + x].map_or(0, PieceKind::tag);
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, `.` for empty and a piece letter otherwise.
    ///
    /// Rows are aligned to the bottom of the board. Intended for tests and
    /// benchmarks; unknown characters are treated as empty.
    ///
    /// ```
    /// use falltris_core::Board;
    /// use falltris_core::types::PieceKind;
    ///
    /// let board = Board::from_rows(&["ZZZZ..ZZZZ"]);
    /// assert_eq!(board.get(0, 19), Some(Some(PieceKind::Z)));
    /// assert_eq!(board.get(4, 19), Some(None));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, row) in rows.iter().take(HEIGHT).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                let kind = PieceKind::from_str(&ch.to_string());
                board.set(x as i8, y, kind);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
