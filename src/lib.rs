//! Falltris (workspace facade crate).
//!
//! Re-exports the workspace crates as `falltris::{types, core, input, term}`
//! so integration tests, benches and the binary share one import path.

pub use falltris_core as core;
pub use falltris_input as input;
pub use falltris_term as term;
pub use falltris_types as types;
