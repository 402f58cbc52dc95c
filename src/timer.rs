//! Countdown focus timer.
//!
//! A tick-driven state machine with no clock of its own: the caller
//! supplies the one-second cadence (the CLI sleeps between ticks) and
//! reacts to the single expiry signal. Nothing here is persisted.

use std::fmt;

/// Default countdown length: 25 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

/// Timer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Expired,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Expired => "expired",
        };
        write!(f, "{}", s)
    }
}

/// Fixed-duration countdown timer.
#[derive(Debug, Clone)]
pub struct Timer {
    duration_secs: u64,
    remaining_secs: u64,
    phase: TimerPhase,
}

impl Timer {
    /// Create an idle timer with the default 25-minute duration.
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECS)
    }

    /// Create an idle timer with the given duration in seconds.
    pub fn with_duration(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            phase: TimerPhase::Idle,
        }
    }

    /// Begin the countdown. No-op unless the timer is idle; an expired
    /// timer must be `reset` first.
    pub fn start(&mut self) {
        if self.phase == TimerPhase::Idle {
            self.phase = TimerPhase::Running;
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `true` exactly once: on the tick that reaches zero and
    /// moves the timer to `Expired`. Ticks while idle or expired do
    /// nothing and return `false`.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Expired;
            return true;
        }
        false
    }

    /// Return to idle with the full duration remaining.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.phase = TimerPhase::Idle;
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Remaining time as an `MM:SS` display string.
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle_with_default_duration() {
        let timer = Timer::new();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.duration_secs(), 25 * 60);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut timer = Timer::with_duration(10);
        assert!(!timer.tick());
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = Timer::with_duration(10);
        timer.start();
        timer.tick();
        timer.start();
        assert_eq!(timer.remaining_secs(), 9);
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn test_expires_after_duration_ticks_signals_once() {
        let mut timer = Timer::with_duration(1500);
        timer.start();

        let mut signals = 0;
        for _ in 0..1500 {
            if timer.tick() {
                signals += 1;
            }
        }
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(signals, 1);

        // Further ticks stay silent
        assert!(!timer.tick());
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_start_from_expired_is_noop() {
        let mut timer = Timer::with_duration(1);
        timer.start();
        assert!(timer.tick());
        timer.start();
        assert_eq!(timer.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_reset_restores_idle() {
        let mut timer = Timer::with_duration(10);
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_secs(), 10);

        // Usable again after reset
        timer.start();
        assert!(timer.is_running());
    }

    #[test]
    fn test_format_remaining() {
        let timer = Timer::with_duration(25 * 60);
        assert_eq!(timer.format_remaining(), "25:00");

        let mut timer = Timer::with_duration(65);
        timer.start();
        timer.tick();
        assert_eq!(timer.format_remaining(), "01:04");
    }
}
