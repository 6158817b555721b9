//! Session orchestration: banking semantics on top of the countdown
//! machine.
//!
//! `SessionManager` is the only component allowed to move time between
//! the bank and the timer. Starting a session withdraws its duration
//! up front; stopping refunds whatever the countdown has not consumed,
//! unless overdraft already began; each overdraft tick becomes a
//! one-second withdrawal until the user stops or the bank runs dry.
//!
//! It is also the error boundary: ledger and state-machine misuse
//! errors are absorbed here (a user double-clicking "pause" is normal
//! usage, not a bug) and surface only as `None` returns.

use chrono::Utc;

use crate::bank::TimeBank;
use crate::error::BankError;
use crate::events::Event;
use crate::notify::{NoopNotifier, NotificationSink};
use crate::timer::{CountdownTimer, TickOutcome, TimerState};

pub struct SessionManager {
    bank: TimeBank,
    timer: CountdownTimer,
    notifier: Box<dyn NotificationSink>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Empty bank, fresh timer, notifications dropped.
    pub fn new() -> Self {
        Self::with_notifier(Box::new(NoopNotifier))
    }

    pub fn with_notifier(notifier: Box<dyn NotificationSink>) -> Self {
        Self::from_parts(TimeBank::new(), CountdownTimer::new(), notifier)
    }

    /// Assemble from previously persisted parts.
    pub fn from_parts(
        bank: TimeBank,
        timer: CountdownTimer,
        notifier: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            bank,
            timer,
            notifier,
        }
    }

    /// Swap in a previously persisted countdown machine. The bank and
    /// notifier are untouched.
    pub fn restore_timer(&mut self, timer: CountdownTimer) {
        self.timer = timer;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn balance(&self) -> u64 {
        self.bank.balance()
    }

    pub fn bank(&self) -> &TimeBank {
        &self.bank
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// Full state snapshot for status displays.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.timer.state(),
            remaining_secs: self.timer.remaining_seconds(),
            initial_secs: self.timer.initial_duration(),
            overdrafting: self.timer.is_overdrafting(),
            balance_secs: self.bank.balance(),
            balance_hms: self.bank.formatted(),
            at: Utc::now(),
        }
    }

    // ── Session commands ─────────────────────────────────────────────

    /// Withdraw `duration_secs` from the bank and start the countdown.
    ///
    /// Returns `None` without any mutation when the balance cannot
    /// cover the duration or a session is already active. The
    /// withdraw-then-start pair is atomic: a rejected start rolls the
    /// withdrawal back.
    pub fn start_session(&mut self, duration_secs: u64) -> Option<Event> {
        if self.bank.balance() < duration_secs {
            tracing::debug!(
                duration_secs,
                balance = self.bank.balance(),
                "session rejected: insufficient balance"
            );
            return None;
        }
        if !matches!(
            self.timer.state(),
            TimerState::Idle | TimerState::Stopped
        ) {
            tracing::debug!(state = ?self.timer.state(), "session rejected: already active");
            return None;
        }
        if self.bank.withdraw(duration_secs).is_err() {
            return None;
        }
        if let Err(err) = self.timer.start(duration_secs) {
            self.bank.deposit(duration_secs);
            tracing::debug!(%err, "session start rejected by timer");
            return None;
        }
        Some(Event::SessionStarted {
            duration_secs,
            balance_secs: self.bank.balance(),
            at: Utc::now(),
        })
    }

    /// No-op (`None`) if the timer is not running.
    pub fn pause_session(&mut self) -> Option<Event> {
        match self.timer.pause() {
            Ok(()) => Some(Event::SessionPaused {
                remaining_secs: self.timer.remaining_seconds(),
                at: Utc::now(),
            }),
            Err(err) => {
                tracing::debug!(%err, "pause ignored");
                None
            }
        }
    }

    /// No-op (`None`) if the timer is not paused.
    pub fn resume_session(&mut self) -> Option<Event> {
        match self.timer.resume() {
            Ok(()) => Some(Event::SessionResumed {
                remaining_secs: self.timer.remaining_seconds(),
                at: Utc::now(),
            }),
            Err(err) => {
                tracing::debug!(%err, "resume ignored");
                None
            }
        }
    }

    /// Stop the session, refunding unused time unless overdraft began.
    pub fn stop_session(&mut self) -> Option<Event> {
        // Capture before stopping: stop() zeroes the remainder when
        // overdrafting.
        let remaining = self.timer.remaining_seconds();
        let overdrafting = self.timer.is_overdrafting();
        match self.timer.stop() {
            Ok(()) => {
                let refunded = if !overdrafting && remaining > 0 {
                    self.bank.deposit(remaining);
                    remaining
                } else {
                    0
                };
                Some(Event::SessionStopped {
                    refunded_secs: refunded,
                    balance_secs: self.bank.balance(),
                    at: Utc::now(),
                })
            }
            Err(err) => {
                tracing::debug!(%err, "stop ignored");
                None
            }
        }
    }

    /// Drive the countdown by one second. Called by the tick source
    /// roughly once per second while a session is active; safe to call
    /// in any state.
    pub fn on_tick(&mut self) -> Option<Event> {
        match self.timer.tick() {
            TickOutcome::Ignored => None,
            TickOutcome::Tick { remaining } => Some(Event::Tick {
                remaining_secs: remaining,
                at: Utc::now(),
            }),
            TickOutcome::Completed => {
                self.notifier.timer_completed();
                self.notifier.overdraft_started();
                Some(Event::TimerCompleted { at: Utc::now() })
            }
            TickOutcome::Overdraft { seconds } => self.withdraw_overdraft(seconds),
        }
    }

    fn withdraw_overdraft(&mut self, seconds: u64) -> Option<Event> {
        match self.bank.withdraw(seconds) {
            Ok(()) => Some(Event::OverdraftWithdrawal {
                balance_secs: self.bank.balance(),
                at: Utc::now(),
            }),
            Err(BankError::InsufficientBalance { .. }) => {
                // Take whatever is left, then force the session down.
                self.bank.set_balance(0);
                self.notifier.bank_depleted();
                if let Err(err) = self.timer.stop() {
                    tracing::debug!(%err, "force-stop after depletion ignored");
                }
                Some(Event::BankDepleted { at: Utc::now() })
            }
        }
    }

    // ── Balance pass-throughs ────────────────────────────────────────

    pub fn deposit(&mut self, seconds: u64) -> Event {
        self.bank.deposit(seconds);
        self.balance_changed()
    }

    pub fn withdraw(&mut self, seconds: u64) -> Result<Event, BankError> {
        self.bank.withdraw(seconds)?;
        Ok(self.balance_changed())
    }

    pub fn set_balance(&mut self, seconds: u64) -> Event {
        self.bank.set_balance(seconds);
        self.balance_changed()
    }

    fn balance_changed(&self) -> Event {
        Event::BalanceChanged {
            balance_secs: self.bank.balance(),
            at: Utc::now(),
        }
    }
}
