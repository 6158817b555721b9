//! Desktop notifications via notify-rust.

use notify_rust::Notification;
use timerbank_core::NotificationSink;

const APP_NAME: &str = "TimerBank";

pub struct DesktopNotifier {
    sound: Option<String>,
}

impl DesktopNotifier {
    pub fn new(sound: Option<String>) -> Self {
        Self { sound }
    }

    fn send(&self, summary: &str, body: &str) {
        let summary = summary.to_string();
        let body = body.to_string();
        let sound = self.sound.clone();
        // Fire-and-forget on a detached thread: `show()` is a
        // synchronous D-Bus round trip, and a hung or broken
        // notification daemon must not stall the tick loop.
        let _ = std::thread::spawn(move || {
            let mut notification = Notification::new();
            notification
                .appname(APP_NAME)
                .summary(&summary)
                .body(&body)
                .timeout(10_000);
            if let Some(ref sound) = sound {
                notification.sound_name(sound);
            }
            if let Err(err) = notification.show() {
                tracing::warn!(%err, "desktop notification failed");
            }
        });
    }
}

impl NotificationSink for DesktopNotifier {
    fn timer_completed(&self) {
        self.send(
            "Timer completed",
            "The countdown finished and is now withdrawing from your bank balance.",
        );
    }

    fn overdraft_started(&self) {
        self.send(
            "Overdraft started",
            "Time is draining from your bank. Stop the session to keep the rest.",
        );
    }

    fn bank_depleted(&self) {
        self.send(
            "Bank depleted",
            "Your banked time ran out. The session has been stopped.",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn alerts_return_without_waiting_on_the_daemon() {
        let notifier = DesktopNotifier::new(Some("bell".to_string()));
        let start = Instant::now();
        notifier.timer_completed();
        notifier.overdraft_started();
        notifier.bank_depleted();
        // Delivery happens off-thread; the calls themselves must come
        // back immediately even when no daemon is reachable.
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}

