//! Application context.
//!
//! Replaces the source design's process-wide singleton: one
//! `AppContext` is built at process start and handed to whatever
//! drives the UI loop. It owns the config, the session manager, and
//! the balance snapshot, and defines the startup/shutdown lifecycle.

use crate::error::Result;
use crate::notify::NotificationSink;
use crate::session::SessionManager;
use crate::storage::{BalanceSnapshot, Config};
use crate::timer::CountdownTimer;

pub struct AppContext {
    config: Config,
    snapshot: BalanceSnapshot,
    session: SessionManager,
}

impl AppContext {
    /// Build the context and restore the banked balance from disk.
    /// A missing or corrupt snapshot starts the bank at zero.
    pub fn init(notifier: Box<dyn NotificationSink>) -> Result<Self> {
        let config = Config::load_or_default();
        let snapshot = BalanceSnapshot::default_location()?;
        Self::init_with(config, snapshot, notifier)
    }

    /// Like [`init`](Self::init) with explicit config and snapshot,
    /// for drivers and tests that manage their own locations.
    pub fn init_with(
        config: Config,
        snapshot: BalanceSnapshot,
        notifier: Box<dyn NotificationSink>,
    ) -> Result<Self> {
        let mut session = SessionManager::with_notifier(notifier);
        session.set_balance(snapshot.load());
        Ok(Self {
            config,
            snapshot,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    /// Restore a previously persisted countdown machine (the CLI keeps
    /// it in the data directory between invocations).
    pub fn restore_timer(&mut self, timer: CountdownTimer) {
        self.session.restore_timer(timer);
    }

    /// Persist the current balance. Failures propagate; callers on the
    /// shutdown path use [`shutdown`](Self::shutdown) instead.
    pub fn save_balance(&self) -> Result<()> {
        self.snapshot.save(self.session.balance())
    }

    /// Stop any active session (refunding unused time) and persist the
    /// balance. Save failures are logged and swallowed; shutdown never
    /// fails.
    pub fn shutdown(&mut self) {
        let _ = self.session.stop_session();
        if let Err(err) = self.save_balance() {
            tracing::warn!(%err, "failed to save balance snapshot on shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use crate::timer::TimerState;

    fn context_in(dir: &tempfile::TempDir) -> AppContext {
        let snapshot = BalanceSnapshot::new(dir.path().join("snapshot.json"));
        AppContext::init_with(Config::default(), snapshot, Box::new(NoopNotifier)).unwrap()
    }

    #[test]
    fn init_restores_saved_balance() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = BalanceSnapshot::new(dir.path().join("snapshot.json"));
        snapshot.save(600).unwrap();
        let ctx = context_in(&dir);
        assert_eq!(ctx.session().balance(), 600);
    }

    #[test]
    fn init_tolerates_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir);
        assert_eq!(ctx.session().balance(), 0);
    }

    #[test]
    fn shutdown_refunds_active_session_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(&dir);
        ctx.session_mut().set_balance(100);
        ctx.session_mut().start_session(30).unwrap();
        ctx.session_mut().on_tick();
        ctx.shutdown();
        assert_eq!(ctx.session().timer().state(), TimerState::Stopped);
        // 29 unused seconds refunded; snapshot holds the result.
        assert_eq!(ctx.session().balance(), 99);
        let snapshot = BalanceSnapshot::new(dir.path().join("snapshot.json"));
        assert_eq!(snapshot.load(), 99);
    }

    #[test]
    fn shutdown_without_session_just_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(&dir);
        ctx.session_mut().set_balance(42);
        ctx.shutdown();
        let snapshot = BalanceSnapshot::new(dir.path().join("snapshot.json"));
        assert_eq!(snapshot.load(), 42);
    }

    #[test]
    fn restore_timer_keeps_balance() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(&dir);
        ctx.session_mut().set_balance(50);
        let mut timer = CountdownTimer::new();
        timer.start(10).unwrap();
        ctx.restore_timer(timer);
        assert_eq!(ctx.session().balance(), 50);
        assert_eq!(ctx.session().timer().state(), TimerState::Running);
        assert_eq!(ctx.session().timer().remaining_seconds(), 10);
    }
}
