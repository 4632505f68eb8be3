use crate::board::TagGrid;
use crate::pieces::{Piece, Shape};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute cells, including any still above row 0
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Everything a renderer needs, copied out of the engine in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: TagGrid,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i8>,
    pub preview: Option<PieceKind>,
    pub phase: Phase,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub tick_interval_ms: u32,
    /// Bit `y` set while row `y` is waiting to be cleared
    pub clearing_rows: u32,
}

impl GameSnapshot {
    /// Accepting commands right now
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_row_clearing(&self, y: usize) -> bool {
        y < BOARD_HEIGHT as usize && self.clearing_rows & (1 << y) != 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            preview: None,
            phase: Phase::Idle,
            episode_id: 0,
            score: 0,
            level: 0,
            lines: 0,
            tick_interval_ms: 0,
            clearing_rows: 0,
        }
    }
}
