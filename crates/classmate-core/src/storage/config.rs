//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Whether reminders are enabled (the stand-in for notification permission)
//! - Reminder timing (class lead, evening-before hour, daily check-in)
//! - How far ahead the upcoming-task list looks
//!
//! Configuration is stored at `~/.config/classmate/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::notify::ReminderSettings;
use crate::planner::PlannerSettings;
use crate::schedule::ClockTime;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
    #[serde(default = "default_class_lead_minutes")]
    pub class_lead_minutes: u8,
    #[serde(default = "default_task_reminder_hour")]
    pub task_reminder_hour: u8,
    #[serde(default = "default_daily_reminder")]
    pub daily_reminder: ClockTime,
}

/// Agenda configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub agenda: AgendaConfig,
}

fn default_true() -> bool {
    true
}
fn default_class_lead_minutes() -> u8 {
    15
}
fn default_task_reminder_hour() -> u8 {
    20
}
fn default_daily_reminder() -> ClockTime {
    ClockTime::new_unchecked(9, 0)
}
fn default_upcoming_days() -> u32 {
    crate::agenda::DEFAULT_UPCOMING_DAYS
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
            class_lead_minutes: default_class_lead_minutes(),
            task_reminder_hour: default_task_reminder_hour(),
            daily_reminder: default_daily_reminder(),
        }
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            upcoming_days: default_upcoming_days(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()
            .map_err(|e| ConfigError::DataDir(e.to_string()))?
            .join("config.toml"))
    }

    /// Load from disk, writing the defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there only when the file does
    /// not exist. Any other read failure is an error and leaves the file alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let path = path.to_path_buf();
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        ReminderSettings {
            class_lead_minutes: self.notifications.class_lead_minutes.min(59),
            task_reminder_hour: self.notifications.task_reminder_hour.min(23),
            daily_reminder: self.notifications.daily_reminder,
            sound: self.notifications.sound,
        }
    }

    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            reminders: self.reminder_settings(),
            upcoming_days: self.agenda.upcoming_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        assert!(toml_str.contains("daily_reminder = \"09:00\""));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.notifications.enabled);
        assert_eq!(parsed.notifications.class_lead_minutes, 15);
        assert_eq!(parsed.agenda.upcoming_days, 7);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[notifications]\nenabled = false\n").unwrap();
        assert!(!parsed.notifications.enabled);
        assert_eq!(parsed.notifications.task_reminder_hour, 20);
        assert_eq!(parsed.agenda.upcoming_days, 7);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("notifications.daily_reminder").as_deref(), Some("09:00"));
        assert_eq!(cfg.get("agenda.upcoming_days").as_deref(), Some("7"));
        assert!(cfg.get("agenda.missing_key").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("notifications.enabled", "false").unwrap();
        cfg.apply("agenda.upcoming_days", "14").unwrap();
        cfg.apply("notifications.daily_reminder", "7:30").unwrap();
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.agenda.upcoming_days, 14);
        assert_eq!(cfg.notifications.daily_reminder.to_string(), "07:30");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("notifications.volume", "3"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("", "3"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("notifications.enabled", "maybe").is_err());
        assert!(cfg.apply("notifications.daily_reminder", "25:00").is_err());
        assert!(cfg.apply("notifications.class_lead_minutes", "300").is_err());
        assert!(cfg.apply("agenda", "1").is_err());
        assert!(cfg.notifications.enabled);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.agenda.upcoming_days, 7);
        assert!(path.exists());
    }

    #[test]
    fn load_from_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);

        let as_dir = dir.path().join("nested");
        std::fs::create_dir(&as_dir).unwrap();
        assert!(Config::load_from(&as_dir).is_err());
        assert!(as_dir.is_dir());
    }

    #[test]
    fn reminder_settings_clamp_out_of_range_values() {
        let mut cfg = Config::default();
        cfg.notifications.task_reminder_hour = 30;
        cfg.notifications.class_lead_minutes = 90;
        let settings = cfg.reminder_settings();
        assert_eq!(settings.task_reminder_hour, 23);
        assert_eq!(settings.class_lead_minutes, 59);
    }
}
