//! Balance ledger.
//!
//! `TimeBank` holds the user's banked time as a non-negative number of
//! seconds. It has no callbacks and no side effects beyond the integer
//! state; the session layer decides when withdrawals, refunds, and
//! overdraft drains happen.

use serde::{Deserialize, Serialize};

use crate::error::{BankError, CoreError};

/// The stored pool of seconds available to spend on sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBank {
    balance_seconds: u64,
}

impl TimeBank {
    /// Empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(seconds: u64) -> Self {
        Self {
            balance_seconds: seconds,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance_seconds
    }

    /// Add time to the balance. No upper bound.
    pub fn deposit(&mut self, seconds: u64) {
        self.balance_seconds = self.balance_seconds.saturating_add(seconds);
    }

    /// Remove time from the balance. Atomic: on
    /// [`BankError::InsufficientBalance`] the balance is unchanged.
    pub fn withdraw(&mut self, seconds: u64) -> Result<(), BankError> {
        if seconds > self.balance_seconds {
            return Err(BankError::InsufficientBalance {
                requested: seconds,
                available: self.balance_seconds,
            });
        }
        self.balance_seconds -= seconds;
        Ok(())
    }

    /// Overwrite the balance unconditionally. Used when restoring a
    /// snapshot and for direct user edits.
    pub fn set_balance(&mut self, seconds: u64) {
        self.balance_seconds = seconds;
    }

    /// Current balance as `HH:MM:SS`.
    pub fn formatted(&self) -> String {
        format_hms(self.balance_seconds)
    }
}

/// Format seconds as zero-padded `HH:MM:SS`. Hours are unbounded, not
/// wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Parse a duration written as `SS`, `MM:SS`, or `HH:MM:SS`.
///
/// Minute and second fields must stay below 60 when a larger unit is
/// present; the leading field is unbounded.
pub fn parse_hms(input: &str) -> Result<u64, CoreError> {
    let bad = || CoreError::InvalidDurationString(input.to_string());
    let fields = input
        .split(':')
        .map(|part| part.trim().parse::<u64>().map_err(|_| bad()))
        .collect::<Result<Vec<u64>, CoreError>>()?;
    match fields.as_slice() {
        [s] => Ok(*s),
        [m, s] if *s < 60 => m.checked_mul(60).and_then(|v| v.checked_add(*s)).ok_or_else(bad),
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)
            .and_then(|v| v.checked_add(m * 60 + s))
            .ok_or_else(bad),
        _ => Err(bad()),
    }
}
