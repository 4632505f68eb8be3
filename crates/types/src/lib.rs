//! Shared types and constants
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! input mapping and the terminal renderer can all agree on one vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Pieces spawn at row 0, horizontally centered on their bitmap width.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 500 | Gravity interval at level 0 |
//! | `TICK_DECREMENT_MS` | 40 | Interval shaved off per level |
//! | `MIN_TICK_MS` | 100 | Fastest gravity interval |
//! | `LINE_CLEAR_BLINK_MS` | 360 | Length of the clear animation |
//! | `FRAME_MS` | 16 | Frontend frame pacing (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use falltris_types::{PieceKind, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.tag(), 4);
//! assert_eq!(PieceKind::from_tag(4), Some(PieceKind::T));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 0
pub const BASE_TICK_MS: u32 = 500;

/// Milliseconds removed from the gravity interval per level
pub const TICK_DECREMENT_MS: u32 = 40;

/// Floor for the gravity interval
pub const MIN_TICK_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Duration of the line-clear blink before rows collapse
pub const LINE_CLEAR_BLINK_MS: u32 = 360;

/// Frontend frame interval (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// The seven tetromino kinds, in template order
///
/// The order is significant: a locked cell stores `index() + 1` as its tag,
/// so I=1, Z=2, S=3, T=4, O=5, L=6, J=7 and 0 means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    Z,
    S,
    T,
    O,
    L,
    J,
}

impl PieceKind {
    /// All kinds in template order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Position in [`PieceKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::Z => 1,
            PieceKind::S => 2,
            PieceKind::T => 3,
            PieceKind::O => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
        }
    }

    /// Non-zero board tag for this kind
    pub fn tag(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`PieceKind::tag`]. Returns `None` for 0 and anything above 7.
    ///
    /// ```
    /// use falltris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_tag(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_tag(0), None);
    /// assert_eq!(PieceKind::from_tag(8), None);
    /// ```
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1..=7 => Some(Self::ALL[(tag - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }

    /// Display color as (r, g, b)
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x34, 0x98, 0xdb),
            PieceKind::Z => (0xe7, 0x4c, 0x3c),
            PieceKind::S => (0x2e, 0xcc, 0x71),
            PieceKind::T => (0x9b, 0x59, 0xb6),
            PieceKind::O => (0xf1, 0xc4, 0x0f),
            PieceKind::L => (0xe6, 0x7e, 0x22),
            PieceKind::J => (0x1a, 0xbc, 0x9c),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Player commands accepted by the engine
///
/// Every command is a no-op unless the game is [`Phase::Playing`], except
/// [`GameAction::Start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks when blocked
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Start a new game (also restarts a running or finished one)
    Start,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use falltris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
        }
    }
}

/// Session lifecycle
///
/// `Idle → Playing ⇄ Clearing → … → GameOver → Playing` (on restart).
/// `Clearing` is the paused-for-animation part of `Playing`: ticks and input
/// are ignored until the frontend resumes the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Clearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Clearing => "clearing",
            Phase::GameOver => "game_over",
        }
    }
}

/// Outcome of one landing, emitted once the lock sequence has run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Drop bonus earned by the piece that just locked
    pub drop_score: u32,
    pub level_up: bool,
    pub game_over: bool,
}
