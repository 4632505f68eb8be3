//! Terminal falltris runner (default binary).
//!
//! Drives the engine from a fixed ~60 FPS frame loop: render, read input until
//! the next frame, feed elapsed time to the gravity timer, and run the
//! clear-row blink while the engine is paused in `Phase::Clearing`.
//!
//! Environment:
//! - `FALLTRIS_SEED`: piece sequence seed (default: from the clock)
//! - `FALLTRIS_LOG_PATH`: write logs to this file (`RUST_LOG` filters, default `info`)
//! - engine rule overrides, see `falltris::core::config`

use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use env_logger::{Builder, Env, Target};
use log::{debug, info};

use falltris::core::{EngineConfig, GameState, IntervalTimer};
use falltris::input::{dispatch, Command};
use falltris::term::{Canvas, ClearBlink, GameView, Screen, Viewport};
use falltris::types::{Phase, FRAME_MS};

const ENV_LOG_PATH: &str = "FALLTRIS_LOG_PATH";
const ENV_SEED: &str = "FALLTRIS_SEED";

fn main() -> Result<()> {
    init_logging()?;
    let config = EngineConfig::from_env().context("invalid engine configuration")?;
    let seed = seed_from_env()?;
    info!("falltris starting, seed {}, {:?}", seed, config);

    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen, config, seed);

    // Always try to restore terminal state.
    let _ = screen.leave();
    result
}

/// Logs go to a file or nowhere; stderr would corrupt the alternate screen.
fn init_logging() -> Result<()> {
    let path = match std::env::var(ENV_LOG_PATH) {
        Ok(path) if !path.trim().is_empty() => path,
        _ => return Ok(()),
    };
    let file = File::create(&path).with_context(|| format!("cannot open log file {path}"))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn seed_from_env() -> Result<u32> {
    match std::env::var(ENV_SEED) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{ENV_SEED}: expected an unsigned integer, got {raw:?}")),
        _ => Ok(clock_seed()),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(screen: &mut Screen, config: EngineConfig, seed: u32) -> Result<()> {
    let mut game = GameState::new(config, seed, IntervalTimer::new());
    let mut view = GameView::default();
    let mut blink = ClearBlink::default();
    let mut canvas = Canvas::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        view.set_clear_flash(blink.visible());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut canvas);
        screen.present(&mut canvas)?;

        // Input until the next frame is due.
        loop {
            let since_frame = last_frame.elapsed();
            let mut timeout = frame.saturating_sub(since_frame);
            if let Some(ms) = game.scheduler().remaining_ms() {
                timeout = timeout.min(Duration::from_millis(ms as u64).saturating_sub(since_frame));
            }
            if !event::poll(timeout)? {
                break;
            }
            let ev = event::read()?;
            if matches!(ev, Event::Resize(..)) {
                screen.invalidate();
            }
            match dispatch(&ev) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Action(action)) => {
                    game.apply_action(action);
                }
                None => {}
            }
        }

        let now = Instant::now();
        let elapsed_ms = u32::try_from(now.duration_since(last_frame).as_millis()).unwrap_or(u32::MAX);
        last_frame = now;

        // Gravity.
        game.scheduler_mut().advance(elapsed_ms);
        while game.scheduler_mut().take_due() {
            game.tick();
        }

        // Clear animation: resume the engine once, when the blink ends.
        if blink.advance(elapsed_ms) {
            game.finish_clear();
        }
        if game.phase() == Phase::Clearing && !blink.is_running() {
            blink.start();
        }

        if let Some(ev) = game.take_last_event() {
            debug!("lock event {:?}", ev);
        }
    }
}
