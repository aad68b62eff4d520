mod config;
pub mod database;
pub mod persist;
pub mod reminders;

pub use config::{AgendaConfig, Config, NotificationsConfig};
pub use database::Database;
pub use reminders::SqliteScheduler;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StoreError;

/// Flat key-value store holding the serialized collections.
pub trait LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory [`LocalStore`]. Reads and writes can be made to fail for testing.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail with [`StoreError::QueryFailed`].
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent `set` fail with [`StoreError::Locked`].
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::QueryFailed(format!("read of '{key}' refused")));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Locked);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `CLASSMATE_DATA_DIR` wins when set. Otherwise `~/.config/classmate/`,
/// or `~/.config/classmate-dev/` when `CLASSMATE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("CLASSMATE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CLASSMATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("classmate-dev")
            } else {
                base_dir.join("classmate")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
