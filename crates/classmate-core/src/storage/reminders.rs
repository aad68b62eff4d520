//! Scheduler that records reminders in the local database.
//!
//! Front ends without a platform notification service read the `reminders`
//! table back and deliver alerts themselves.

use chrono::Local;

use super::Database;
use crate::error::{NotifyError, StoreError};
use crate::notify::{
    NotificationContent, PermissionStatus, ReminderHandle, ScheduledReminder, Scheduler, Trigger,
};

pub struct SqliteScheduler {
    db: Database,
    permission: PermissionStatus,
}

impl SqliteScheduler {
    /// Wrap `db`. `enabled` stands in for the user's notification permission.
    pub fn new(db: Database, enabled: bool) -> Self {
        let permission = if enabled {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        Self { db, permission }
    }

    /// Open the default database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open(enabled: bool) -> Result<Self, StoreError> {
        Ok(Self::new(Database::open()?, enabled))
    }

    /// Every reminder registered so far.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn reminders(&self) -> Result<Vec<ScheduledReminder>, StoreError> {
        self.db.list_reminders()
    }
}

impl Scheduler for SqliteScheduler {
    fn request_permission(&mut self) -> Result<PermissionStatus, NotifyError> {
        Ok(self.permission)
    }

    fn schedule(
        &mut self,
        trigger: &Trigger,
        content: &NotificationContent,
    ) -> Result<ReminderHandle, NotifyError> {
        if self.permission != PermissionStatus::Granted {
            return Err(NotifyError::PermissionDenied);
        }
        self.db
            .insert_reminder(trigger, content, Local::now().naive_local())
            .map_err(|e| NotifyError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> NotificationContent {
        NotificationContent {
            title: "Check your homework".into(),
            body: "Good morning!".into(),
            sound: true,
        }
    }

    #[test]
    fn disabled_scheduler_denies() {
        let mut scheduler = SqliteScheduler::new(Database::open_memory().unwrap(), false);
        assert_eq!(scheduler.request_permission(), Ok(PermissionStatus::Denied));
        assert_eq!(
            scheduler.schedule(&Trigger::daily(9, 0), &content()),
            Err(NotifyError::PermissionDenied)
        );
        assert!(scheduler.reminders().unwrap().is_empty());
    }

    #[test]
    fn repeated_daily_reminder_is_stored_once() {
        let mut scheduler = SqliteScheduler::new(Database::open_memory().unwrap(), true);
        let first = scheduler.schedule(&Trigger::daily(9, 0), &content()).unwrap();
        let second = scheduler.schedule(&Trigger::daily(9, 0), &content()).unwrap();
        assert_eq!(first, second);
        assert_eq!(scheduler.reminders().unwrap().len(), 1);
    }
}
