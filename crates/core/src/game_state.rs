//! Game state module - the engine that owns a session
//!
//! [`GameState`] ties the board, pieces, RNG, scoring and scheduler together.
//! It is driven by two stimuli only: gravity ticks (when its scheduler says
//! so) and player commands. Both run synchronously to completion.
//!
//! # Lock sequence
//!
//! A downward move that would collide locks the piece, then in order:
//! settle columns (optional), detect complete rows, clear them, score,
//! update level and speed, respawn from the preview, and check for game over.
//! With `animate_clears`, the sequence stops after detection in
//! [`Phase::Clearing`] and [`GameState::finish_clear`] runs the rest.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::board::{Board, FullRows};
use crate::config::{EngineConfig, GravityMode};
use crate::pieces::{kick_steps, Piece};
use crate::rng::SimpleRng;
use crate::scheduler::{IntervalTimer, Scheduler};
use crate::scoring::{drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, Phase, PieceKind};

/// What a single translation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// Rejected; nothing changed
    Blocked,
    /// Rejected downward move; the piece locked
    Locked,
    /// Not playing, or no active piece
    Ignored,
}

#[derive(Debug, Clone)]
pub struct GameState<S: Scheduler = IntervalTimer> {
    config: EngineConfig,
    scheduler: S,
    rng: SimpleRng,
    board: Board,
    active: Option<Piece>,
    preview: Option<PieceKind>,
    phase: Phase,
    /// Increments on every `start()`
    episode_id: u32,
    score: u32,
    lines: u32,
    level: u32,
    tick_interval_ms: u32,
    /// Rows detected but not yet removed while in `Phase::Clearing`
    pending_rows: FullRows,
    /// Drop bonus earned by the current piece
    piece_drop_score: u32,
    last_event: Option<LockEvent>,
}

impl<S: Scheduler> GameState<S> {
    /// Create an idle engine. Nothing spawns until [`GameState::start`].
    pub fn new(config: EngineConfig, seed: u32, scheduler: S) -> Self {
        let tick_interval_ms = config.tick_interval_ms(0);
        Self {
            config,
            scheduler,
            rng: SimpleRng::new(seed),
            board: Board::new(),
            active: None,
            preview: None,
            phase: Phase::Idle,
            episode_id: 0,
            score: 0,
            lines: 0,
            level: 0,
            tick_interval_ms,
            pending_rows: ArrayVec::new(),
            piece_drop_score: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn preview(&self) -> Option<PieceKind> {
        self.preview
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rows awaiting removal while clearing
    pub fn pending_rows(&self) -> &[u8] {
        &self.pending_rows
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Take and clear the outcome of the last completed lock sequence
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Begin a new session: empty board, zeroed counters, fresh active and preview pieces.
    ///
    /// Accepted from `Idle`, `GameOver` and `Playing` (restart). Ignored while
    /// a clear is in flight. Returns whether a session started.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Clearing {
            return false;
        }

        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.tick_interval_ms = self.config.tick_interval_ms(0);
        self.pending_rows.clear();
        self.last_event = None;
        self.preview = Some(self.rng.next_kind());
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Playing;

        info!(
            "episode {} started, gravity every {}ms",
            self.episode_id, self.tick_interval_ms
        );
        self.scheduler.arm(self.tick_interval_ms);
        self.spawn_piece()
    }

    /// Promote the preview to the active piece and draw a new preview.
    ///
    /// Returns false, and ends the game, if the new piece collides where it spawns.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = match self.preview.take() {
            Some(kind) => kind,
            None => self.rng.next_kind(),
        };
        self.preview = Some(self.rng.next_kind());
        self.piece_drop_score = 0;

        let piece = Piece::spawn(kind);
        if piece.collides(&self.board) {
            debug!("{} blocked at spawn ({}, {})", kind.as_str(), piece.x, piece.y);
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Gravity step. No-op unless playing. Returns whether the piece moved or locked.
    pub fn tick(&mut self) -> bool {
        matches!(self.try_move(0, 1), MoveResult::Moved | MoveResult::Locked)
    }

    /// Translate the active piece by (dx, dy), all or nothing.
    ///
    /// A rejected move leaves every bit of state untouched, except that a
    /// rejected downward move runs the lock sequence.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> MoveResult {
        if self.phase != Phase::Playing {
            return MoveResult::Ignored;
        }
        let Some(active) = self.active else {
            return MoveResult::Ignored;
        };

        let moved = active.translated(dx, dy);
        if !moved.collides(&self.board) {
            self.active = Some(moved);
            return MoveResult::Moved;
        }

        if dy > 0 {
            self.lock_active();
            return MoveResult::Locked;
        }
        MoveResult::Blocked
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0) == MoveResult::Moved
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0) == MoveResult::Moved
    }

    /// One player-initiated row down; locks if blocked
    pub fn soft_drop(&mut self) -> MoveResult {
        let result = self.try_move(0, 1);
        if result == MoveResult::Moved {
            self.award_drop(1, false);
        }
        result
    }

    /// Fall until blocked, then lock. Returns the number of rows dropped.
    ///
    /// Only the final rejected move locks; the descent itself never does.
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        loop {
            match self.try_move(0, 1) {
                MoveResult::Moved => {
                    rows += 1;
                    self.award_drop(1, true);
                }
                MoveResult::Locked | MoveResult::Blocked | MoveResult::Ignored => break,
            }
        }
        rows
    }

    /// Rotate 90° clockwise, kicking sideways if the turn collides.
    ///
    /// If no probed offset fits, bitmap and origin stay as they were.
    pub fn try_rotate(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut candidate = active.rotated();
        if !candidate.collides(&self.board) {
            self.active = Some(candidate);
            return true;
        }

        for step in kick_steps(candidate.shape.width(), self.config.kick_leniency) {
            candidate.x += step;
            if !candidate.collides(&self.board) {
                debug!(
                    "{} kicked {:+} on rotate",
                    active.kind.as_str(),
                    candidate.x - active.x
                );
                self.active = Some(candidate);
                return true;
            }
        }

        debug!("{} rotation rejected at x={}", active.kind.as_str(), active.x);
        false
    }

    /// Apply a player command. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => matches!(
                self.soft_drop(),
                MoveResult::Moved | MoveResult::Locked
            ),
            GameAction::HardDrop => {
                if self.phase != Phase::Playing || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::Start => self.start(),
        }
    }

    /// Resume after the clear animation: remove rows, score, respawn, re-arm.
    ///
    /// The only way out of `Phase::Clearing`. Returns false in any other phase,
    /// so calling it twice cannot re-arm the scheduler twice.
    pub fn finish_clear(&mut self) -> bool {
        if self.phase != Phase::Clearing {
            return false;
        }
        let rows = std::mem::take(&mut self.pending_rows);
        self.phase = Phase::Playing;
        self.complete_lock(&rows, true);
        true
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> Option<i8> {
        let mut ghost = self.active?;
        while !ghost.translated(0, 1).collides(&self.board) {
            ghost.y += 1;
        }
        Some(ghost.y)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_tag_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.preview = self.preview;
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.tick_interval_ms = self.tick_interval_ms;
        out.clearing_rows = self
            .pending_rows
            .iter()
            .fold(0u32, |mask, &y| mask | (1 << y));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn award_drop(&mut self, rows: u32, is_hard_drop: bool) {
        let bonus = drop_score(self.config.drop_scoring, rows, is_hard_drop);
        self.score = self.score.saturating_add(bonus);
        self.piece_drop_score = self.piece_drop_score.saturating_add(bonus);
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let written = self
            .board
            .lock_piece(&piece.shape, piece.x, piece.y, piece.kind);
        debug!(
            "locked {} at ({}, {}), {} cells on grid",
            piece.kind.as_str(),
            piece.x,
            piece.y,
            written
        );

        if self.config.gravity == GravityMode::Column {
            self.board.settle_columns(piece.column_mask());
        }

        let rows = self.board.full_rows();
        if self.config.animate_clears && !rows.is_empty() {
            self.pending_rows = rows;
            self.phase = Phase::Clearing;
            self.scheduler.disarm();
            return;
        }

        self.complete_lock(&rows, false);
    }

    /// Steps after detection: clear, score, level/speed, respawn, game-over check
    fn complete_lock(&mut self, rows: &[u8], resumed: bool) {
        let cleared = self.board.clear_rows(rows) as u32;
        let line_score = line_clear_score(cleared);
        self.score = self.score.saturating_add(line_score);
        self.lines = self.lines.saturating_add(cleared);

        let level_up = self.update_level();
        let drop_score = self.piece_drop_score;
        let alive = self.spawn_piece();

        // A resumed sequence always owes exactly one re-arm.
        if alive && (level_up || resumed) {
            self.scheduler.arm(self.tick_interval_ms);
        }

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            line_clear_score: line_score,
            drop_score,
            level_up,
            game_over: !alive,
        });
    }

    fn update_level(&mut self) -> bool {
        let level = level_for_lines(self.lines);
        if level <= self.level {
            return false;
        }
        self.level = level;
        self.tick_interval_ms = self.config.tick_interval_ms(level);
        info!(
            "level {} reached, gravity every {}ms",
            level, self.tick_interval_ms
        );
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.active = None;
        self.scheduler.disarm();
        info!(
            "episode {} over: score {}, lines {}, level {}",
            self.episode_id, self.score, self.lines, self.level
        );
    }

    #[cfg(test)]
    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (tests only)
    #[cfg(test)]
    fn force_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }
}

impl Default for GameState<IntervalTimer> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), 1, IntervalTimer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropScoring;
    use crate::pieces::Shape;
    use crate::scheduler::{RecordingScheduler, SchedulerRequest};

    fn engine(config: EngineConfig) -> GameState<RecordingScheduler> {
        GameState::new(config, 12345, RecordingScheduler::new())
    }

    fn started(config: EngineConfig) -> GameState<RecordingScheduler> {
        let mut state = engine(config);
        assert!(state.start());
        state.scheduler_mut().take();
        state
    }

    fn fill_row_except(board: &mut Board, y: i8, gaps: &[i8]) {
        for x in 0..10 {
            if !gaps.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_game_state_is_idle() {
        let state = engine(EngineConfig::default());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.active().is_none());
        assert!(state.preview().is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_interval_ms(), 500);
        assert!(state.scheduler().requests().is_empty());
    }

    #[test]
    fn test_idle_ignores_commands() {
        let mut state = engine(EngineConfig::default());
        assert!(!state.tick());
        assert!(!state.move_left());
        assert!(!state.try_rotate());
        assert_eq!(state.hard_drop(), 0);
        assert_eq!(state.try_move(0, 1), MoveResult::Ignored);
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_start_spawns_and_arms() {
        let mut state = engine(EngineConfig::default());
        assert!(state.start());

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.episode_id(), 1);
        let active = state.active().unwrap();
        assert_eq!(active.y, 0);
        assert_eq!(active.shape, Shape::template(active.kind));
        assert!(state.preview().is_some());
        assert_eq!(state.scheduler().requests(), &[SchedulerRequest::Arm(500)]);
    }

    #[test]
    fn test_preview_becomes_active() {
        let mut state = started(EngineConfig::default());
        let next = state.preview().unwrap();
        state.hard_drop();
        assert_eq!(state.active().unwrap().kind, next);
    }

    #[test]
    fn test_tick_moves_down_one_row() {
        let mut state = started(EngineConfig::default());
        let y = state.active().unwrap().y;
        assert!(state.tick());
        assert_eq!(state.active().unwrap().y, y + 1);
    }

    #[test]
    fn test_horizontal_block_is_atomic() {
        let mut state = started(EngineConfig::default());
        while state.move_left() {}

        let before_piece = state.active();
        let before_board = state.board().clone();
        let before_score = state.score();

        assert_eq!(state.try_move(-1, 0), MoveResult::Blocked);
        assert_eq!(state.active(), before_piece);
        assert_eq!(state.board(), &before_board);
        assert_eq!(state.score(), before_score);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_blocked_downward_move_locks() {
        let mut state = started(EngineConfig::default());
        state.force_active(Piece::spawn(PieceKind::O).translated(0, 18));

        assert_eq!(state.try_move(0, 1), MoveResult::Locked);
        assert!(state.board().is_occupied(4, 18));
        assert!(state.board().is_occupied(5, 19));
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
    }

    #[test]
    fn test_single_line_clear_with_i_piece() {
        let mut state = started(EngineConfig::default());
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.board_mut().set(0, 18, Some(PieceKind::T));
        state.force_active(Piece::spawn(PieceKind::I));

        let rows = state.hard_drop();

        assert_eq!(rows, 19);
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        // The leftover cell from row 18 shifted down into row 19.
        assert!(state.board().is_occupied(0, 19));
        assert_eq!(state.board().occupied_count(), 1);
        assert!(state.board().is_row_empty(0));
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.line_clear_score, 100);
    }

    #[test]
    fn test_multi_line_scores_quadratically() {
        for (k, expected) in [(1u32, 100u32), (2, 400), (3, 900), (4, 1600)] {
            let mut state = started(EngineConfig::default());
            for i in 0..k {
                fill_row_except(state.board_mut(), 19 - i as i8, &[0]);
            }
            let mut vertical = Piece::spawn(PieceKind::I).rotated();
            vertical.x = 0;
            state.force_active(vertical);

            state.hard_drop();

            assert_eq!(state.score(), expected, "k = {}", k);
            assert_eq!(state.lines(), k);
            let ev = state.take_last_event().unwrap();
            assert_eq!(ev.lines_cleared, k);
        }
    }

    #[test]
    fn test_hard_drop_reaches_floor_without_intermediate_lock() {
        let mut state = started(EngineConfig::default());
        state.force_active(Piece::spawn(PieceKind::T));

        let rows = state.hard_drop();

        assert_eq!(rows, 18);
        assert_eq!(state.board().occupied_count(), 4);
        assert!(state.board().is_occupied(4, 18));
        assert!(state.board().is_occupied(5, 19));
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let mut state = started(EngineConfig::default());
        state.force_active(Piece::spawn(PieceKind::L).translated(0, 5));
        let before = state.active().unwrap();

        for _ in 0..4 {
            assert!(state.try_rotate());
        }

        assert_eq!(state.active().unwrap().shape, before.shape);
    }

    #[test]
    fn test_wall_kick_off_left_wall() {
        let mut state = started(EngineConfig::default());
        // "#. / ## / #." flush against the left wall; turning it back to
        // "### / .#." hits the block at (1, 5).
        let mut piece = Piece::spawn(PieceKind::T).translated(0, 5);
        piece.shape = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
        piece.x = 0;
        state.force_active(piece);
        state.board_mut().set(1, 5, Some(PieceKind::O));

        // Probes x = 1 (blocked), x = -1 (wall), then x = 2.
        assert!(state.try_rotate());
        let kicked = state.active().unwrap();
        assert_eq!(kicked.shape, Shape::template(PieceKind::T));
        assert_eq!(kicked.x, 2);
        assert_eq!(kicked.y, 5);
    }

    #[test]
    fn test_left_wall_rotation_reverts_when_boxed_in() {
        let mut state = started(EngineConfig::default());
        let mut piece = Piece::spawn(PieceKind::T).translated(0, 5);
        piece.shape = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
        piece.x = 0;
        state.force_active(piece);
        state.board_mut().set(2, 5, Some(PieceKind::O));

        assert!(!state.try_rotate());
        assert_eq!(state.active(), Some(piece));
    }

    #[test]
    fn test_rotation_reverts_without_valid_kick() {
        let mut state = started(EngineConfig::default());
        let mut vertical_i = Piece::spawn(PieceKind::I).rotated().translated(0, 5);
        vertical_i.x = 9;
        state.force_active(vertical_i);

        // Horizontal I needs x <= 6; from x = 9 the probes reach 10, 8, 11, 7.
        assert!(!state.try_rotate());
        assert_eq!(state.active(), Some(vertical_i));
    }

    #[test]
    fn test_kick_leniency_extends_search() {
        let config = EngineConfig {
            kick_leniency: 2,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        let mut vertical_i = Piece::spawn(PieceKind::I).rotated().translated(0, 5);
        vertical_i.x = 9;
        state.force_active(vertical_i);

        // Step -6 brings the cumulative offset to -3, i.e. x = 6.
        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().x, 6);
    }

    #[test]
    fn test_oversized_kick_leniency_still_kicks() {
        let config = EngineConfig {
            kick_leniency: 252,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        let mut vertical_i = Piece::spawn(PieceKind::I).rotated().translated(0, 5);
        vertical_i.x = 9;
        state.force_active(vertical_i);

        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().x, 6);
    }

    fn block_spawn_area(state: &mut GameState<RecordingScheduler>) {
        for y in 0..2 {
            fill_row_except(state.board_mut(), y, &[0]);
        }
        let mut piece = Piece::spawn(PieceKind::O);
        piece.x = 0;
        piece.y = -2;
        state.force_active(piece);
    }

    #[test]
    fn test_spawn_collision_is_immediate_game_over() {
        let mut state = started(EngineConfig::default());
        block_spawn_area(&mut state);

        // The O locks entirely above row 0 and the next piece is blocked at spawn.
        assert_eq!(state.try_move(0, 1), MoveResult::Locked);

        assert_eq!(state.phase(), Phase::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.board().occupied_count(), 18);
        assert_eq!(state.scheduler().requests(), &[SchedulerRequest::Disarm]);
        let ev = state.take_last_event().unwrap();
        assert!(ev.game_over);

        assert!(!state.tick());
        assert!(!state.try_rotate());
        assert!(!state.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_restart_after_game_over_resets_session() {
        let mut state = started(EngineConfig::default());
        block_spawn_area(&mut state);
        state.tick();
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.episode_id(), 2);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.scheduler().interval_ms(), Some(500));
    }

    #[test]
    fn test_level_up_rearms_scheduler() {
        let mut state = started(EngineConfig::default());
        state.lines = 9;

        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.force_active(Piece::spawn(PieceKind::I));
        state.hard_drop();

        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 1);
        assert_eq!(state.tick_interval_ms(), 460);
        assert_eq!(state.scheduler().requests(), &[SchedulerRequest::Arm(460)]);
        assert!(state.take_last_event().unwrap().level_up);
    }

    #[test]
    fn test_no_rearm_without_level_up() {
        let mut state = started(EngineConfig::default());
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.force_active(Piece::spawn(PieceKind::I));
        state.hard_drop();

        assert_eq!(state.lines(), 1);
        assert!(state.scheduler().requests().is_empty());
    }

    #[test]
    fn test_animated_clear_pauses_and_resumes_once() {
        let config = EngineConfig {
            animate_clears: true,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.force_active(Piece::spawn(PieceKind::I));

        state.hard_drop();

        assert_eq!(state.phase(), Phase::Clearing);
        assert_eq!(state.pending_rows(), &[19]);
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
        assert!(state.take_last_event().is_none());
        assert_eq!(state.snapshot().clearing_rows, 1 << 19);
        assert_eq!(state.scheduler().requests(), &[SchedulerRequest::Disarm]);

        // Paused: ticks, input and restart are ignored.
        assert!(!state.tick());
        assert!(!state.try_rotate());
        assert!(!state.start());

        assert!(state.finish_clear());
        assert!(!state.finish_clear());

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.score(), 100);
        assert!(state.active().is_some());
        assert_eq!(
            state.scheduler().requests(),
            &[SchedulerRequest::Disarm, SchedulerRequest::Arm(500)]
        );
        assert_eq!(state.take_last_event().unwrap().lines_cleared, 1);
    }

    #[test]
    fn test_animated_clear_defers_game_over_until_finished() {
        let config = EngineConfig {
            animate_clears: true,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        for y in [0, 1, 19] {
            fill_row_except(state.board_mut(), y, &[0]);
        }
        let mut piece = Piece::spawn(PieceKind::I);
        piece.shape = piece.shape.rotated_cw();
        piece.x = 0;
        piece.y = 0;
        state.force_active(piece);
        state.preview = Some(PieceKind::T);

        state.hard_drop();

        assert_eq!(state.phase(), Phase::Clearing);
        assert_eq!(state.pending_rows(), &[19]);
        assert_eq!(state.scheduler().requests(), &[SchedulerRequest::Disarm]);

        // The shifted stack now blocks the T spawn.
        assert!(state.finish_clear());

        assert_eq!(state.phase(), Phase::GameOver);
        assert!(state.active().is_none());
        assert_eq!(state.lines(), 1);
        assert_eq!(
            state.scheduler().requests(),
            &[SchedulerRequest::Disarm, SchedulerRequest::Disarm]
        );
        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert!(event.game_over);
    }

    #[test]
    fn test_animated_clear_skips_pause_without_rows() {
        let config = EngineConfig {
            animate_clears: true,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        state.hard_drop();
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.scheduler().requests().is_empty());
    }

    #[test]
    fn test_animated_clear_then_level_up_arms_once() {
        let config = EngineConfig {
            animate_clears: true,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        state.lines = 9;
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.force_active(Piece::spawn(PieceKind::I));
        state.hard_drop();
        state.finish_clear();

        assert_eq!(
            state.scheduler().requests(),
            &[SchedulerRequest::Disarm, SchedulerRequest::Arm(460)]
        );
    }

    #[test]
    fn test_column_gravity_settles_before_detection() {
        let config = EngineConfig {
            gravity: GravityMode::Column,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        // Row 19 is full except column 4.
        fill_row_except(state.board_mut(), 19, &[4]);
        state.board_mut().set(3, 18, Some(PieceKind::J));
        state.board_mut().set(5, 18, Some(PieceKind::J));
        // A vertical I in column 3 stacks on (3, 18); a gapless column settles to itself.
        let mut vertical = Piece::spawn(PieceKind::I).rotated();
        vertical.x = 3;
        state.force_active(vertical);
        let before = state.board().occupied_count();

        state.hard_drop();

        assert_eq!(state.board().occupied_count(), before + 4);
        assert_eq!(state.lines(), 0);
    }

    #[test]
    fn test_column_gravity_fills_hole_and_clears() {
        let config = EngineConfig {
            gravity: GravityMode::Column,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        fill_row_except(state.board_mut(), 19, &[0]);
        // Overhang above the hole in column 0.
        state.board_mut().set(0, 17, Some(PieceKind::L));
        state.board_mut().set(1, 18, Some(PieceKind::L));
        let mut o = Piece::spawn(PieceKind::O);
        o.x = 0;
        state.force_active(o);

        // O lands on the overhang at rows 15-16; settling columns 0-1 fills (0, 19).
        state.hard_drop();

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_classic_drop_scoring() {
        let config = EngineConfig {
            drop_scoring: DropScoring::Classic,
            ..EngineConfig::default()
        };
        let mut state = started(config);
        state.force_active(Piece::spawn(PieceKind::O));

        assert_eq!(state.soft_drop(), MoveResult::Moved);
        assert_eq!(state.score(), 1);

        let rows = state.hard_drop();
        assert_eq!(rows, 17);
        assert_eq!(state.score(), 1 + 34);
        assert_eq!(state.take_last_event().unwrap().drop_score, 35);
    }

    #[test]
    fn test_default_rules_give_no_drop_bonus() {
        let mut state = started(EngineConfig::default());
        state.soft_drop();
        state.hard_drop();
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_ghost_y_matches_hard_drop() {
        let mut state = started(EngineConfig::default());
        state.force_active(Piece::spawn(PieceKind::S));
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_restart_while_playing() {
        let mut state = started(EngineConfig::default());
        state.hard_drop();
        assert!(state.start());
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.episode_id(), 2);
    }
}
