//! Persisted CLI state.
//!
//! The countdown machine lives across CLI invocations as JSON in the
//! data directory; the balance itself lives in the core snapshot. A
//! missing or unreadable timer file means a fresh machine.

use std::path::PathBuf;

use timerbank_core::{data_dir, CountdownTimer};

const TIMER_FILE: &str = "timer.json";

fn timer_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join(TIMER_FILE))
}

pub fn load_timer() -> CountdownTimer {
    let Ok(path) = timer_path() else {
        return CountdownTimer::new();
    };
    match std::fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "unreadable timer state, starting fresh");
            CountdownTimer::new()
        }),
        Err(_) => CountdownTimer::new(),
    }
}

pub fn save_timer(timer: &CountdownTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    std::fs::write(timer_path()?, json)?;
    Ok(())
}
