//! Notification seam.
//!
//! The session layer raises fire-and-forget alerts through this trait.
//! Implementations must not block the tick path and must absorb their
//! own failures; the core never waits on or inspects the outcome.

/// Alerts raised by [`crate::SessionManager`].
pub trait NotificationSink {
    /// The nominal session duration elapsed.
    fn timer_completed(&self);

    /// Overdraft is now draining the bank (raised at the same boundary
    /// as `timer_completed`, phrased for the bank rather than the
    /// timer).
    fn overdraft_started(&self);

    /// Overdraft emptied the bank and the session was force-stopped.
    fn bank_depleted(&self);
}

/// Sink that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn timer_completed(&self) {}
    fn overdraft_started(&self) {}
    fn bank_depleted(&self) {}
}
