//! Terminal renderer.
//!
//! A small game-oriented rendering layer: [`GameView`] paints a
//! `GameSnapshot` onto a [`Canvas`] of styled glyphs (pure, testable), and
//! [`Screen`] diffs consecutive canvases onto the real terminal. [`ClearBlink`]
//! times the line-clear animation.

pub mod blink;
pub mod canvas;
pub mod game_view;
pub mod screen;

pub use falltris_core as core;
pub use falltris_types as types;

pub use blink::ClearBlink;
pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use game_view::{GameView, Layout, Viewport};
pub use screen::{changed_runs, encode_diff_into, encode_full_into, Screen};
