use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
///
/// Session methods return at most one event per call, consumed
/// synchronously by whichever adapter drives the core (the CLI prints
/// them; a GUI would feed them to its widgets). This replaces the
/// source design's mutable callback setters while keeping the
/// one-handler-per-event semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        duration_secs: u64,
        balance_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        /// Unused seconds returned to the bank; 0 when the session was
        /// overdrafting.
        refunded_secs: u64,
        balance_secs: u64,
        at: DateTime<Utc>,
    },
    /// One countdown second elapsed.
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Nominal duration elapsed; overdraft begins.
    TimerCompleted {
        at: DateTime<Utc>,
    },
    /// One overdraft second was withdrawn from the bank.
    OverdraftWithdrawal {
        balance_secs: u64,
        at: DateTime<Utc>,
    },
    /// Overdraft exhausted the bank; the session was force-stopped.
    BankDepleted {
        at: DateTime<Utc>,
    },
    /// Direct balance edit (deposit, withdraw, or set).
    BalanceChanged {
        balance_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        initial_secs: u64,
        overdrafting: bool,
        balance_secs: u64,
        balance_hms: String,
        at: DateTime<Utc>,
    },
}
