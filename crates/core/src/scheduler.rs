//! Scheduler seam - how the engine asks for gravity ticks
//!
//! The engine never owns a clock. It tells its [`Scheduler`] when to start
//! ticking and at which interval, and when to stop:
//!
//! | Engine event | Request |
//! |--------------|---------|
//! | `start()` | `arm(base interval)` |
//! | level up | `arm(new interval)` |
//! | clear animation begins | `disarm()` |
//! | clear animation resumes | `arm(current interval)`, exactly once |
//! | game over | `disarm()` |
//!
//! Whoever drives the game calls `GameState::tick` whenever its scheduler
//! says a tick is due.

/// Receiver of tick interval requests
pub trait Scheduler {
    /// (Re)start ticking every `interval_ms`, restarting the current period
    fn arm(&mut self, interval_ms: u32);
    /// Stop ticking until the next `arm`
    fn disarm(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerRequest {
    Arm(u32),
    Disarm,
}

/// Scheduler that only records what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingScheduler {
    requests: Vec<SchedulerRequest>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[SchedulerRequest] {
        &self.requests
    }

    /// Drain recorded requests
    pub fn take(&mut self) -> Vec<SchedulerRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Armed state implied by the last request
    pub fn is_armed(&self) -> bool {
        matches!(self.requests.last(), Some(SchedulerRequest::Arm(_)))
    }

    pub fn interval_ms(&self) -> Option<u32> {
        match self.requests.last() {
            Some(SchedulerRequest::Arm(ms)) => Some(*ms),
            _ => None,
        }
    }
}

impl Scheduler for RecordingScheduler {
    fn arm(&mut self, interval_ms: u32) {
        self.requests.push(SchedulerRequest::Arm(interval_ms));
    }

    fn disarm(&mut self) {
        self.requests.push(SchedulerRequest::Disarm);
    }
}

/// Clock-free interval timer driven by elapsed milliseconds
///
/// The frame loop calls [`IntervalTimer::advance`] with real elapsed time and
/// then ticks the engine while [`IntervalTimer::take_due`] returns true.
/// Re-arming resets the accumulated time, so ticks queued under an old
/// interval are dropped instead of replayed.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.interval_ms.is_some() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one due tick, if any
    pub fn take_due(&mut self) -> bool {
        match self.interval_ms {
            Some(interval) if self.elapsed_ms >= interval => {
                self.elapsed_ms -= interval;
                true
            }
            _ => false,
        }
    }

    /// Milliseconds until the next tick is due
    pub fn remaining_ms(&self) -> Option<u32> {
        self.interval_ms
            .map(|interval| interval.saturating_sub(self.elapsed_ms))
    }
}

impl Scheduler for IntervalTimer {
    fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.elapsed_ms = 0;
    }

    fn disarm(&mut self) {
        self.interval_ms = None;
        self.elapsed_ms = 0;
    }
}
