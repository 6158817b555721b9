//! # TimerBank Core Library
//!
//! Core business logic for TimerBank, a desktop utility that banks
//! time as a depletable balance and runs countdown sessions against
//! it. CLI-first: every operation is available through the `timerbank`
//! binary, and a GUI would be a thin layer over this same crate.
//!
//! ## Architecture
//!
//! - **TimeBank**: the balance ledger -- a non-negative number of
//!   seconds with deposit/withdraw/set operations
//! - **CountdownTimer**: a tick-driven state machine with a dual-phase
//!   countdown: the nominal duration, then an overdraft phase that
//!   signals one withdrawal per tick
//! - **SessionManager**: wires timer ticks to bank withdrawals,
//!   refunds, and depletion handling; absorbs state-mismatch errors
//! - **Storage**: TOML configuration plus a flat JSON balance snapshot
//! - **AppContext**: explicit startup/shutdown lifecycle for drivers
//!
//! The core has no internal threads and no clock: the driver calls
//! [`SessionManager::on_tick`] roughly once per second while a session
//! is running, never concurrently.

pub mod app;
pub mod bank;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;

pub use app::AppContext;
pub use bank::{format_hms, parse_hms, TimeBank};
pub use error::{BankError, CoreError, Result, TimerError};
pub use events::Event;
pub use notify::{NoopNotifier, NotificationSink};
pub use session::SessionManager;
pub use storage::{data_dir, BalanceSnapshot, Config};
pub use timer::{CountdownTimer, TickOutcome, TimerState};
