//! Core game logic - pure, deterministic, and testable
//!
//! All game rules and session state live here. Nothing in this crate touches
//! a terminal, a clock or the filesystem: time enters only through
//! [`GameState::tick`] and the [`Scheduler`] seam.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 locked-cell grid, collision, row detection and removal
//! - [`pieces`]: the seven tetromino bitmaps, clockwise rotation, wall-kick probes
//! - [`game_state`]: the engine state machine (spawn, move, rotate, lock, clear)
//! - [`scoring`]: line-clear points, level and gravity interval
//! - [`scheduler`]: tick scheduling requests and two ready-made schedulers
//! - [`config`]: rule switches and environment overrides
//! - [`snapshot`]: copy of engine state handed to renderers
//! - [`rng`]: seeded uniform piece selection
//!
//! # Rules
//!
//! - Each spawn picks one of the seven pieces uniformly; one preview piece is shown.
//! - Rotation is clockwise only; a colliding turn probes offsets +1, -1, +2, -2, ...
//! - Clearing k rows at once scores `100 * k * k`.
//! - Every 10 lines is a level; gravity speeds up 40ms per level down to 100ms.
//! - A piece that collides where it spawns ends the game.
//!
//! # Example
//!
//! ```
//! use falltris_core::{EngineConfig, GameState, RecordingScheduler};
//! use falltris_core::types::{GameAction, Phase};
//!
//! let mut game = GameState::new(EngineConfig::default(), 12345, RecordingScheduler::new());
//! game.start();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The piece locked and the preview took its place.
//! assert_eq!(game.board().occupied_count(), 4);
//! assert!(game.active().is_some());
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use falltris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, DropScoring, EngineConfig, GravityMode};
pub use game_state::{GameState, MoveResult};
pub use pieces::{Piece, Shape};
pub use rng::SimpleRng;
pub use scheduler::{IntervalTimer, RecordingScheduler, Scheduler, SchedulerRequest};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
