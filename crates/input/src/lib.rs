//! Terminal input mapping (engine-facing).
//!
//! Translates `crossterm` key events into [`crate::types::GameAction`]s. There
//! is no repeat logic here: held keys arrive as terminal auto-repeat and each
//! repeat is one more command.

pub mod map;

pub use falltris_types as types;

pub use map::{dispatch, handle_key_event, should_quit, Command};
