//! TOML-based application configuration.
//!
//! Stores user preferences: notification behavior, session defaults,
//! and how the CLI renders events. Configuration is stored at
//! `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CoreError, Result};

use super::data_dir;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Name of the sound to play with desktop notifications (optional).
    #[serde(default)]
    pub custom_sound: Option<String>,
}

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Duration used by `session start` when none is given, in minutes.
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u32,
    /// Cadence of the `session watch` tick loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Event rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print events as JSON instead of one-line text.
    #[serde(default)]
    pub json_events: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_true() -> bool {
    true
}
fn default_duration_min() -> u32 {
    25
}
fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            custom_sound: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { json_events: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: NotificationsConfig::default(),
            session: SessionConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the default config on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = lookup(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed as the existing type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        assign(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }
}

fn lookup<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

/// Replace the scalar at `key`, parsing `value` against the existing
/// type so a bool stays a bool and a number stays a number.
fn assign(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
    let unknown = || CoreError::Custom(format!("unknown config key: {key}"));
    let (parent_path, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut parent = &mut *root;
    if let Some(path) = parent_path {
        for part in path.split('.') {
            parent = parent.get_mut(part).ok_or_else(unknown)?;
        }
    }
    let obj = parent.as_object_mut().ok_or_else(unknown)?;
    let existing = obj.get(leaf).ok_or_else(unknown)?;

    let new_value = match existing {
        serde_json::Value::Bool(_) => serde_json::Value::Bool(
            value
                .parse::<bool>()
                .map_err(|_| CoreError::Custom(format!("cannot parse '{value}' as bool")))?,
        ),
        serde_json::Value::Number(_) => serde_json::Value::Number(
            value
                .parse::<u64>()
                .map_err(|_| CoreError::Custom(format!("cannot parse '{value}' as number")))?
                .into(),
        ),
        serde_json::Value::Null | serde_json::Value::String(_) => {
            serde_json::Value::String(value.to_string())
        }
        _ => {
            return Err(CoreError::Custom(format!(
                "config key '{key}' is not a scalar"
            )))
        }
    };

    obj.insert(leaf.to_string(), new_value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.notifications.enabled);
        assert_eq!(parsed.session.default_duration_min, 25);
        assert_eq!(parsed.session.tick_interval_ms, 1000);
        assert!(!parsed.display.json_events);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.notifications.enabled);
        assert_eq!(parsed.session.default_duration_min, 25);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("session.default_duration_min").as_deref(), Some("25"));
        assert!(cfg.get("session.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn assign_updates_nested_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assign(&mut json, "display.json_events", "true").unwrap();
        assert_eq!(
            lookup(&json, "display.json_events").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn assign_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assign(&mut json, "session.tick_interval_ms", "250").unwrap();
        assert_eq!(
            lookup(&json, "session.tick_interval_ms").unwrap(),
            &serde_json::Value::Number(250.into())
        );
    }

    #[test]
    fn assign_fills_optional_string() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assign(&mut json, "notifications.custom_sound", "bell").unwrap();
        let cfg: Config = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.notifications.custom_sound.as_deref(), Some("bell"));
    }

    #[test]
    fn assign_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(assign(&mut json, "notifications.nonexistent", "1").is_err());
        assert!(assign(&mut json, "nonexistent.enabled", "1").is_err());
    }

    #[test]
    fn assign_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(assign(&mut json, "notifications.enabled", "not_a_bool").is_err());
        assert!(assign(&mut json, "session.tick_interval_ms", "-40").is_err());
    }
}
