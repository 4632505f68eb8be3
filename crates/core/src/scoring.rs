//! Scoring module - line-clear points, levels and gravity speed
//!
//! - Clearing k rows at once awards `100 * k * k` (1→100, 2→400, 3→900, 4→1600).
//! - Level is `lines / 10` and only ever goes up.
//! - Gravity interval is `max(min, base - level * decrement)`.
//! - Drop bonuses are optional ([`DropScoring`]).

use crate::config::DropScoring;
use crate::types::LINES_PER_LEVEL;

/// Points for clearing `lines` rows with one lock
pub fn line_clear_score(lines: u32) -> u32 {
    lines.saturating_mul(lines).saturating_mul(100)
}

pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, floored at `min_ms`
pub fn tick_interval_ms(level: u32, base_ms: u32, decrement_ms: u32, min_ms: u32) -> u32 {
    base_ms
        .saturating_sub(level.saturating_mul(decrement_ms))
        .max(min_ms)
}

/// Bonus for `cells` rows of player-initiated drop
///
/// Classic rules: soft drop +1 per row, hard drop +2 per row.
pub fn drop_score(rule: DropScoring, cells: u32, is_hard_drop: bool) -> u32 {
    match rule {
        DropScoring::None => 0,
        DropScoring::Classic if is_hard_drop => cells.saturating_mul(2),
        DropScoring::Classic => cells,
    }
}
