//! Core error types for timerbank-core.
//!
//! The ledger and the countdown state machine surface precise,
//! programmer-facing contract violations. `SessionManager` is the
//! boundary that absorbs them into UI-safe outcomes; nothing above it
//! should ever see a raw `BankError` or `TimerError`.

use thiserror::Error;

/// Errors raised by the balance ledger.
///
/// Amounts are `u64` seconds, so the "negative input" class of
/// argument errors is unrepresentable at the API boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError {
    /// Withdrawal exceeds the current balance. The balance is left
    /// unchanged.
    #[error("insufficient balance: requested {requested}s, available {available}s")]
    InsufficientBalance { requested: u64, available: u64 },
}

/// State-machine misuse errors raised by the countdown timer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Session duration must be at least one second.
    #[error("duration must be positive")]
    InvalidDuration,

    /// A session is already in progress (running or paused).
    #[error("timer is already running")]
    AlreadyRunning,

    /// Pause requires a running timer.
    #[error("timer is not running")]
    NotRunning,

    /// The timer is already paused.
    #[error("timer is already paused")]
    AlreadyPaused,

    /// Resume requires a paused timer.
    #[error("timer is not paused")]
    NotPaused,

    /// Stop requires the timer to have been started at least once.
    #[error("timer has not been started")]
    NotStarted,

    /// The timer is already stopped.
    #[error("timer is already stopped")]
    AlreadyStopped,
}

/// Top-level error for storage and application plumbing.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    #[error("timer error: {0}")]
    Timer(#[from] TimerError),

    /// Duration string did not match `SS`, `MM:SS`, or `HH:MM:SS`.
    #[error("invalid duration '{0}': expected SS, MM:SS, or HH:MM:SS")]
    InvalidDurationString(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Generic errors with context.
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
