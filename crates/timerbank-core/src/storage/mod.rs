//! Storage: data directory resolution, TOML configuration, and the
//! flat JSON balance snapshot.

mod config;
mod snapshot;

pub use config::{Config, DisplayConfig, NotificationsConfig, SessionConfig};
pub use snapshot::{BalanceSnapshot, BALANCE_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/timerbank[-dev]/` based on TIMERBANK_ENV.
///
/// Set TIMERBANK_ENV=dev to use a development data directory, or
/// TIMERBANK_DATA_DIR to pin an explicit location (the E2E tests use
/// this to isolate state).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TIMERBANK_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMERBANK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timerbank-dev")
    } else {
        base_dir.join("timerbank")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
