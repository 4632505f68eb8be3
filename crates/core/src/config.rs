//! Engine configuration
//!
//! Defaults reproduce the classic rules: 500ms base gravity, no drop bonus,
//! no per-column settling and the strict wall-kick bound. Every field can be
//! overridden from the environment:
//!
//! - `FALLTRIS_BASE_TICK_MS`: gravity interval at level 0 (default 500)
//! - `FALLTRIS_TICK_DECREMENT_MS`: interval removed per level (default 40)
//! - `FALLTRIS_MIN_TICK_MS`: fastest gravity interval (default 100)
//! - `FALLTRIS_GRAVITY`: `off` or `column` (default `off`)
//! - `FALLTRIS_DROP_SCORING`: `none` or `classic` (default `none`)
//! - `FALLTRIS_ANIMATE_CLEARS`: `1`/`true` to pause for the clear animation (default false)
//! - `FALLTRIS_KICK_LENIENCY`: extra wall-kick steps beyond the piece width (default 0)
//!
//! Unset or blank variables keep the default; anything unparsable is an error.

use std::str::FromStr;

use thiserror::Error;

use crate::scoring;
use crate::types::{BASE_TICK_MS, BOARD_WIDTH, MIN_TICK_MS, TICK_DECREMENT_MS};

pub const ENV_BASE_TICK_MS: &str = "FALLTRIS_BASE_TICK_MS";
pub const ENV_TICK_DECREMENT_MS: &str = "FALLTRIS_TICK_DECREMENT_MS";
pub const ENV_MIN_TICK_MS: &str = "FALLTRIS_MIN_TICK_MS";
pub const ENV_GRAVITY: &str = "FALLTRIS_GRAVITY";
pub const ENV_DROP_SCORING: &str = "FALLTRIS_DROP_SCORING";
pub const ENV_ANIMATE_CLEARS: &str = "FALLTRIS_ANIMATE_CLEARS";
pub const ENV_KICK_LENIENCY: &str = "FALLTRIS_KICK_LENIENCY";

/// What happens to locked cells before rows are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityMode {
    /// Cells stay where they lock
    #[default]
    Off,
    /// Columns touched by the locked piece compact downward
    Column,
}

impl GravityMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(GravityMode::Off),
            "column" | "columns" => Some(GravityMode::Column),
            _ => None,
        }
    }
}

/// Whether player-initiated drops earn points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropScoring {
    #[default]
    None,
    /// +1 per soft-drop row, +2 per hard-drop row
    Classic,
}

impl DropScoring {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Some(DropScoring::None),
            "classic" => Some(DropScoring::Classic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}, expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("min_tick_ms must be at least 1")]
    ZeroMinTick,
    #[error("base_tick_ms ({base}) is below min_tick_ms ({min})")]
    BaseBelowMin { base: u32, min: u32 },
    #[error("kick_leniency {0} exceeds the board width")]
    KickLeniency(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub base_tick_ms: u32,
    pub tick_decrement_ms: u32,
    pub min_tick_ms: u32,
    pub gravity: GravityMode,
    pub drop_scoring: DropScoring,
    /// Pause in `Phase::Clearing` until `finish_clear` instead of clearing at once
    pub animate_clears: bool,
    pub kick_leniency: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_tick_ms: BASE_TICK_MS,
            tick_decrement_ms: TICK_DECREMENT_MS,
            min_tick_ms: MIN_TICK_MS,
            gravity: GravityMode::Off,
            drop_scoring: DropScoring::None,
            animate_clears: false,
            kick_leniency: 0,
        }
    }
}

impl EngineConfig {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup` (environment-shaped key/value source)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = parse_var(&lookup, ENV_BASE_TICK_MS, "milliseconds")? {
            cfg.base_tick_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_TICK_DECREMENT_MS, "milliseconds")? {
            cfg.tick_decrement_ms = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_MIN_TICK_MS, "milliseconds")? {
            cfg.min_tick_ms = v;
        }
        if let Some(v) = parse_with(&lookup, ENV_GRAVITY, "off|column", GravityMode::from_str)? {
            cfg.gravity = v;
        }
        if let Some(v) =
            parse_with(&lookup, ENV_DROP_SCORING, "none|classic", DropScoring::from_str)?
        {
            cfg.drop_scoring = v;
        }
        if let Some(v) = parse_with(&lookup, ENV_ANIMATE_CLEARS, "1|0|true|false", parse_flag)? {
            cfg.animate_clears = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_KICK_LENIENCY, "a small integer")? {
            cfg.kick_leniency = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinTick);
        }
        if self.base_tick_ms < self.min_tick_ms {
            return Err(ConfigError::BaseBelowMin {
                base: self.base_tick_ms,
                min: self.min_tick_ms,
            });
        }
        if self.kick_leniency > BOARD_WIDTH {
            return Err(ConfigError::KickLeniency(self.kick_leniency));
        }
        Ok(())
    }

    /// Gravity interval at `level`
    pub fn tick_interval_ms(&self, level: u32) -> u32 {
        scoring::tick_interval_ms(
            level,
            self.base_tick_ms,
            self.tick_decrement_ms,
            self.min_tick_ms,
        )
    }
}

fn lookup_trimmed(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    parse_with(lookup, var, expected, |s| s.parse().ok())
}

fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup_trimmed(lookup, var) else {
        return Ok(None);
    };
    match parse(&raw) {
        Some(v) => Ok(Some(v)),
        None => Err(ConfigError::Invalid {
            var,
            value: raw,
            expected,
        }),
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
