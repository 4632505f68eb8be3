//! Clear-row blink timing.
//!
//! The engine parks in `Phase::Clearing` without knowing how long the
//! animation lasts. `ClearBlink` is the frontend half: it runs for a fixed
//! duration, toggles visibility every `period_ms`, and reports completion once
//! so the frame loop can call `finish_clear()` exactly once.

use crate::types::LINE_CLEAR_BLINK_MS;

/// Blink toggles per animation
const BLINK_PHASES: u32 = 6;

#[derive(Debug, Clone)]
pub struct ClearBlink {
    duration_ms: u32,
    period_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl ClearBlink {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            period_ms: (duration_ms / BLINK_PHASES).max(1),
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Restart the animation from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by `elapsed_ms`. Returns true on the call that finishes the animation.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= self.duration_ms {
            self.running = false;
            return true;
        }
        false
    }

    /// Whether clearing rows are lit in the current blink phase
    pub fn visible(&self) -> bool {
        !self.running || (self.elapsed_ms / self.period_ms) % 2 == 0
    }
}

impl Default for ClearBlink {
    fn default() -> Self {
        Self::new(LINE_CLEAR_BLINK_MS)
    }
}
