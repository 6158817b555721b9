//! Countdown timer state machine.

mod countdown;

pub use countdown::{CountdownTimer, TickOutcome, TimerState};
