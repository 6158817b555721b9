//! Flat JSON snapshot of the banked balance.
//!
//! The snapshot is a single JSON object; the only recognized key is
//! `balance_seconds`. Loading is total: a missing file, unreadable
//! content, a non-object document, a missing key, or a non-numeric or
//! negative value all mean "no stored balance". A corrupt snapshot
//! must never stop the app from starting.

use std::path::{Path, PathBuf};

use crate::error::Result;

use super::data_dir;

/// The one recognized snapshot key.
pub const BALANCE_KEY: &str = "balance_seconds";

const SNAPSHOT_FILE: &str = "snapshot.json";

#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    path: PathBuf,
}

impl BalanceSnapshot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Snapshot at `<data_dir>/snapshot.json`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(SNAPSHOT_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored balance in seconds, or 0.
    pub fn load(&self) -> u64 {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return 0;
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            tracing::warn!(path = %self.path.display(), "unreadable snapshot, starting at zero");
            return 0;
        };
        // as_u64 is None for negatives and non-integers.
        value.get(BALANCE_KEY).and_then(|v| v.as_u64()).unwrap_or(0)
    }

    /// Persist the balance, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written. Callers on the
    /// shutdown path swallow it; shutdown must not fail.
    pub fn save(&self, balance_seconds: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut body = serde_json::Map::new();
        body.insert(
            BALANCE_KEY.to_string(),
            serde_json::Value::from(balance_seconds),
        );
        let body = serde_json::Value::Object(body);
        std::fs::write(&self.path, serde_json::to_string_pretty(&body)?)?;
        Ok(())
    }
}
