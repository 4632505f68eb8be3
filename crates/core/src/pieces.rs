//! Pieces module - tetromino bitmaps, rotation and wall-kick probing
//!
//! Each of the seven templates is a small bitmap (at most 4x4) stored as one
//! bit mask per row, so shapes are `Copy` and rotating never allocates.
//! Rotation is a fixed 90° clockwise turn: transpose, then reverse the rows.

use crate::board::Board;
use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest bitmap edge among the templates
pub const MAX_SHAPE_EDGE: usize = 4;

/// A piece orientation as a row-major bitmap
///
/// Bit `c` of `rows[r]` is the cell at column `c`, row `r`. Bits outside
/// `width`/`height` are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; MAX_SHAPE_EDGE],
}

impl Shape {
    const fn new(width: u8, height: u8, rows: [u8; MAX_SHAPE_EDGE]) -> Self {
        Self {
            width,
            height,
            rows,
        }
    }

    /// Base (spawn) orientation for a piece kind
    pub fn template(kind: PieceKind) -> Self {
        TEMPLATES[kind.index()]
    }

    /// Build a shape from 0/1 rows, e.g. `&[&[1, 1, 0], &[0, 1, 1]]`.
    ///
    /// Returns `None` if the slice is empty, ragged, or larger than 4x4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height == 0 || width == 0 || height > MAX_SHAPE_EDGE || width > MAX_SHAPE_EDGE {
            return None;
        }

        let mut bits = [0u8; MAX_SHAPE_EDGE];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    bits[r] |= 1 << c;
                }
            }
        }
        Some(Self::new(width as u8, height as u8, bits))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    #[inline(always)]
    pub fn is_filled(&self, col: u8, row: u8) -> bool {
        col < self.width && row < self.height && (self.rows[row as usize] >> col) & 1 == 1
    }

    /// Offsets `(col, row)` of every filled cell, row by row
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width)
                .filter(move |&c| self.is_filled(c, r))
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Rotate 90° clockwise: `new[i][j] = old[height - 1 - j][i]`
    pub fn rotated_cw(&self) -> Self {
        let mut rows = [0u8; MAX_SHAPE_EDGE];
        for i in 0..self.width {
            for j in 0..self.height {
                if self.is_filled(i, self.height - 1 - j) {
                    rows[i as usize] |= 1 << j;
                }
            }
        }
        Self::new(self.height, self.width, rows)
    }
}

/// Templates indexed by [`PieceKind::index`]
const TEMPLATES: [Shape; 7] = [
    // I: ####
    Shape::new(4, 1, [0b1111, 0, 0, 0]),
    // Z: ##. / .##
    Shape::new(3, 2, [0b011, 0b110, 0, 0]),
    // S: .## / ##.
    Shape::new(3, 2, [0b110, 0b011, 0, 0]),
    // T: ### / .#.
    Shape::new(3, 2, [0b111, 0b010, 0, 0]),
    // O: ## / ##
    Shape::new(2, 2, [0b11, 0b11, 0, 0]),
    // L: #.. / ###
    Shape::new(3, 2, [0b001, 0b111, 0, 0]),
    // J: ..# / ###
    Shape::new(3, 2, [0b100, 0b111, 0, 0]),
];

/// The falling piece: an orientation placed at a board-relative origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// New piece in base orientation, horizontally centered on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::template(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.width()),
            y: 0,
        }
    }

    /// Absolute board coordinates `(x, y)` of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same origin, next clockwise orientation
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Bit set of the in-bounds columns this piece covers
    pub fn column_mask(&self) -> u16 {
        self.cells()
            .filter(|&(x, _)| x >= 0 && x < BOARD_WIDTH as i8)
            .fold(0u16, |mask, (x, _)| mask | (1 << x))
    }
}

/// `floor(COLS / 2) - floor(width / 2)`
pub fn spawn_x(width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (width / 2) as i8
}

/// Horizontal steps probed after a rotation collides
///
/// Yields +1, -2, +3, -4, ... for step magnitudes up to `width + leniency`.
/// Steps accumulate onto the rotated piece's origin, so the positions tried
/// relative to the unrotated origin are +1, -1, +2, -2, ...
pub fn kick_steps(width: u8, leniency: u8) -> impl Iterator<Item = i8> {
    let bound = width.saturating_add(leniency).min(i8::MAX as u8) as i8;
    (1..=bound).map(|k| if k % 2 == 1 { k } else { -k })
}
