//! Countdown state machine with a dual-phase countdown.
//!
//! The machine has no internal thread and no clock - the caller drives
//! it by calling `tick()` roughly once per second while a session is
//! running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Stopped -> Running (new session)
//! ```
//!
//! A session counts down its nominal duration; when the last second
//! elapses the machine enters the overdraft phase and every further
//! tick demands one second from an external balance. The machine never
//! touches the balance itself - it only signals, which keeps the phase
//! logic independently testable.

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Never started.
    Idle,
    Running,
    Paused,
    /// Terminal until the next `start()` reuses the machine.
    Stopped,
}

/// Result of a single `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing happened.
    Ignored,
    /// One countdown second elapsed.
    Tick { remaining: u64 },
    /// The nominal duration just elapsed; overdraft begins now.
    /// Produced exactly once per session, on the transition tick only.
    Completed,
    /// The caller must withdraw this many seconds from the balance.
    Overdraft { seconds: u64 },
}

/// Core countdown machine. Serializable so a driver can persist it
/// between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    state: TimerState,
    initial_duration: u64,
    remaining_seconds: u64,
    overdrafting: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            initial_duration: 0,
            remaining_seconds: 0,
            overdrafting: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn initial_duration(&self) -> u64 {
        self.initial_duration
    }

    pub fn is_overdrafting(&self) -> bool {
        self.overdrafting
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh session. Valid from `Idle` or `Stopped`.
    pub fn start(&mut self, duration_seconds: u64) -> Result<(), TimerError> {
        if duration_seconds == 0 {
            return Err(TimerError::InvalidDuration);
        }
        match self.state {
            TimerState::Running | TimerState::Paused => Err(TimerError::AlreadyRunning),
            TimerState::Idle | TimerState::Stopped => {
                self.initial_duration = duration_seconds;
                self.remaining_seconds = duration_seconds;
                self.overdrafting = false;
                self.state = TimerState::Running;
                Ok(())
            }
        }
    }

    /// Freeze the countdown. Remaining time is untouched.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Ok(())
            }
            TimerState::Paused => Err(TimerError::AlreadyPaused),
            TimerState::Idle | TimerState::Stopped => Err(TimerError::NotRunning),
        }
    }

    pub fn resume(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                Ok(())
            }
            _ => Err(TimerError::NotPaused),
        }
    }

    /// End the session.
    ///
    /// While overdrafting the remaining time is zeroed and the flag
    /// cleared: those seconds represent debt already signaled, not a
    /// refundable quantity. Otherwise `remaining_seconds` is preserved
    /// so the caller can refund it.
    pub fn stop(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                if self.overdrafting {
                    self.remaining_seconds = 0;
                    self.overdrafting = false;
                }
                self.state = TimerState::Stopped;
                Ok(())
            }
            TimerState::Idle => Err(TimerError::NotStarted),
            TimerState::Stopped => Err(TimerError::AlreadyStopped),
        }
    }

    /// Advance the machine by one second of wall time.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }
        if self.overdrafting {
            return TickOutcome::Overdraft { seconds: 1 };
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.overdrafting = true;
            TickOutcome::Completed
        } else {
            TickOutcome::Tick {
                remaining: self.remaining_seconds,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let timer = CountdownTimer::new();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_overdrafting());
    }

    #[test]
    fn start_with_valid_duration() {
        let mut timer = CountdownTimer::new();
        timer.start(60).unwrap();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 60);
        assert_eq!(timer.initial_duration(), 60);
        assert!(!timer.is_overdrafting());
    }

    #[test]
    fn start_with_zero_duration_fails_and_stays_idle() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.start(0), Err(TimerError::InvalidDuration));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn start_while_running_fails_and_keeps_session() {
        let mut timer = CountdownTimer::new();
        timer.start(60).unwrap();
        assert_eq!(timer.start(30), Err(TimerError::AlreadyRunning));
        assert_eq!(timer.remaining_seconds(), 60);
    }

    #[test]
    fn start_while_paused_fails() {
        let mut timer = CountdownTimer::new();
        timer.start(60).unwrap();
        timer.pause().unwrap();
        assert_eq!(timer.start(30), Err(TimerError::AlreadyRunning));
    }

    #[test]
    fn pause_resume_preserve_remaining() {
        let mut timer = CountdownTimer::new();
        timer.start(60).unwrap();
        timer.tick();
        timer.pause().unwrap();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining_seconds(), 59);
        timer.resume().unwrap();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 59);
    }

    #[test]
    fn pause_misuse_errors() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.pause(), Err(TimerError::NotRunning));
        timer.start(10).unwrap();
        timer.pause().unwrap();
        assert_eq!(timer.pause(), Err(TimerError::AlreadyPaused));
    }

    #[test]
    fn resume_misuse_errors() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.resume(), Err(TimerError::NotPaused));
        timer.start(10).unwrap();
        assert_eq!(timer.resume(), Err(TimerError::NotPaused));
    }

    #[test]
    fn stop_misuse_errors() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.stop(), Err(TimerError::NotStarted));
        timer.start(10).unwrap();
        timer.stop().unwrap();
        assert_eq!(timer.stop(), Err(TimerError::AlreadyStopped));
    }

    #[test]
    fn stop_preserves_remaining_for_refund() {
        let mut timer = CountdownTimer::new();
        timer.start(60).unwrap();
        for _ in 0..10 {
            timer.tick();
        }
        timer.stop().unwrap();
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.remaining_seconds(), 50);
    }

    #[test]
    fn tick_is_noop_unless_running() {
        let mut timer = CountdownTimer::new();
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        timer.start(10).unwrap();
        timer.pause().unwrap();
        assert_eq!(timer.tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining_seconds(), 10);
    }

    #[test]
    fn ticking_through_duration_enters_overdraft_once() {
        let mut timer = CountdownTimer::new();
        timer.start(3).unwrap();
        assert_eq!(timer.tick(), TickOutcome::Tick { remaining: 2 });
        assert_eq!(timer.tick(), TickOutcome::Tick { remaining: 1 });
        // The transition tick completes the countdown and signals no
        // overdraft unit itself.
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert!(timer.is_overdrafting());
        assert_eq!(timer.remaining_seconds(), 0);
        // Every subsequent tick demands one second.
        assert_eq!(timer.tick(), TickOutcome::Overdraft { seconds: 1 });
        assert_eq!(timer.tick(), TickOutcome::Overdraft { seconds: 1 });
        assert_eq!(timer.remaining_seconds(), 0);
    }

    #[test]
    fn stop_while_overdrafting_zeroes_remaining() {
        let mut timer = CountdownTimer::new();
        timer.start(1).unwrap();
        assert_eq!(timer.tick(), TickOutcome::Completed);
        timer.stop().unwrap();
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_overdrafting());
    }

    #[test]
    fn restart_after_stop_resets_everything() {
        let mut timer = CountdownTimer::new();
        timer.start(1).unwrap();
        timer.tick();
        timer.stop().unwrap();
        timer.start(5).unwrap();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_seconds(), 5);
        assert_eq!(timer.initial_duration(), 5);
        assert!(!timer.is_overdrafting());
    }

    #[test]
    fn serde_round_trip_preserves_machine() {
        let mut timer = CountdownTimer::new();
        timer.start(10).unwrap();
        timer.tick();
        let json = serde_json::to_string(&timer).unwrap();
        let restored: CountdownTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Running);
        assert_eq!(restored.remaining_seconds(), 9);
        assert_eq!(restored.initial_duration(), 10);
    }
}
