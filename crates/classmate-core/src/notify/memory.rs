use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{NotificationContent, PermissionStatus, ReminderHandle, Scheduler, Trigger};
use crate::error::NotifyError;

/// A reminder accepted by a scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    pub handle: ReminderHandle,
    pub trigger: Trigger,
    pub content: NotificationContent,
    pub registered_at: NaiveDateTime,
}

/// Scheduler that keeps registrations in memory.
#[derive(Debug, Clone)]
pub struct MemoryScheduler {
    permission: PermissionStatus,
    reminders: Vec<ScheduledReminder>,
    next_id: u64,
}

impl Default for MemoryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScheduler {
    /// A scheduler with permission granted.
    pub fn new() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            reminders: Vec::new(),
            next_id: 1,
        }
    }

    /// A scheduler whose user refused notifications.
    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::new()
        }
    }

    pub fn set_permission(&mut self, permission: PermissionStatus) {
        self.permission = permission;
    }

    pub fn reminders(&self) -> &[ScheduledReminder] {
        &self.reminders
    }
}

impl Scheduler for MemoryScheduler {
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
        let handle = ReminderHandle(format!("mem-{}", self.next_id));
        self.next_id += 1;
        self.reminders.push(ScheduledReminder {
            handle: handle.clone(),
            trigger: trigger.clone(),
            content: content.clone(),
            registered_at: Local::now().naive_local(),
        });
        Ok(handle)
    }
}
