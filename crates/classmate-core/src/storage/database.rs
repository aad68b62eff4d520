//! SQLite-backed storage.
//!
//! Provides persistent storage for:
//! - Key-value store holding the subject and task collections
//! - Registered reminders (see [`SqliteScheduler`](super::SqliteScheduler))

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::{data_dir, LocalStore};
use crate::error::StoreError;
use crate::notify::{NotificationContent, ReminderHandle, ScheduledReminder, Trigger};

/// File name of the database inside [`data_dir`].
pub const DB_FILE: &str = "classmate.db";

/// SQLite database for application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/classmate.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        Self::open_at(&dir.join(DB_FILE))
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS reminders (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                trigger_json  TEXT NOT NULL,
                title         TEXT NOT NULL,
                body          TEXT NOT NULL,
                sound         INTEGER NOT NULL DEFAULT 1,
                registered_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Record a reminder and return its row id as the handle.
    ///
    /// A daily reminder identical to one already on record reuses that row,
    /// so the check-in registered on every start is stored once. Weekly and
    /// one-shot reminders always get their own row.
    ///
    /// # Errors
    /// Returns an error if the trigger cannot be encoded or the insert fails.
    pub fn insert_reminder(
        &self,
        trigger: &Trigger,
        content: &NotificationContent,
        registered_at: NaiveDateTime,
    ) -> Result<ReminderHandle, StoreError> {
        let trigger_json = serde_json::to_string(trigger).map_err(|source| StoreError::Serialize {
            key: "reminders".into(),
            source,
        })?;

        if matches!(trigger, Trigger::Daily { .. }) {
            let existing = self.conn.query_row(
                "SELECT id FROM reminders
                 WHERE trigger_json = ?1 AND title = ?2 AND body = ?3
                 ORDER BY id LIMIT 1",
                params![trigger_json, content.title, content.body],
                |row| row.get::<_, i64>(0),
            );
            match existing {
                Ok(id) => return Ok(ReminderHandle(id.to_string())),
                Err(rusqlite::Error::QueryReturnedNoRows) => {}
                Err(e) => return Err(e.into()),
            }
        }

        self.conn.execute(
            "INSERT INTO reminders (trigger_json, title, body, sound, registered_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                trigger_json,
                content.title,
                content.body,
                content.sound,
                registered_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ],
        )?;
        Ok(ReminderHandle(self.conn.last_insert_rowid().to_string()))
    }

    /// All recorded reminders, oldest first. Rows whose trigger no longer
    /// decodes are skipped.
    pub fn list_reminders(&self) -> Result<Vec<ScheduledReminder>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, trigger_json, title, body, sound, registered_at
             FROM reminders
             ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut reminders = Vec::new();
        for row in rows {
            let (id, trigger_json, title, body, sound, registered_at) = row?;
            let trigger = match serde_json::from_str::<Trigger>(&trigger_json) {
                Ok(trigger) => trigger,
                Err(e) => {
                    tracing::warn!(id, error = %e, "skipping reminder with unreadable trigger");
                    continue;
                }
            };
            let registered_at = NaiveDateTime::parse_from_str(&registered_at, "%Y-%m-%dT%H:%M:%S")
                .unwrap_or_default();
            reminders.push(ScheduledReminder {
                handle: ReminderHandle(id.to_string()),
                trigger,
                content: NotificationContent { title, body, sound },
                registered_at,
            });
        }
        Ok(reminders)
    }
}

impl LocalStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.kv_get(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.kv_set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Weekday;

    fn content(body: &str) -> NotificationContent {
        NotificationContent {
            title: "Class in 15 minutes".into(),
            body: body.into(),
            sound: true,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-10-19T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn identical_weekly_reminders_get_their_own_rows() {
        let db = Database::open_memory().unwrap();
        let trigger = Trigger::weekly(Weekday::Monday, 8, 0);
        let a = db.insert_reminder(&trigger, &content("Algebra - Room 204"), now()).unwrap();
        let b = db.insert_reminder(&trigger, &content("Algebra - Room 204"), now()).unwrap();
        assert_ne!(a, b);
        assert_eq!(db.list_reminders().unwrap().len(), 2);
    }

    #[test]
    fn identical_daily_reminders_share_a_row() {
        let db = Database::open_memory().unwrap();
        let trigger = Trigger::daily(9, 0);
        let a = db.insert_reminder(&trigger, &content("check"), now()).unwrap();
        let b = db.insert_reminder(&trigger, &content("check"), now()).unwrap();
        let c = db.insert_reminder(&Trigger::daily(10, 0), &content("check"), now()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(db.list_reminders().unwrap().len(), 2);
    }

    #[test]
    fn reminders_round_trip() {
        let db = Database::open_memory().unwrap();
        let trigger = Trigger::daily(9, 0);
        db.insert_reminder(&trigger, &content("check"), now()).unwrap();
        let listed = db.list_reminders().unwrap();
        assert_eq!(listed[0].trigger, trigger);
        assert_eq!(listed[0].content, content("check"));
        assert_eq!(listed[0].registered_at, now());
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE);
        {
            let mut db = Database::open_at(&path).unwrap();
            db.set("subjects", "[]").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("subjects").unwrap().as_deref(), Some("[]"));
    }
}
