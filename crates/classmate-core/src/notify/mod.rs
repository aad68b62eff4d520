//! Local reminder notifications.
//!
//! A [`Reminder`] pairs a [`Trigger`] (when) with [`NotificationContent`]
//! (what). The core only builds reminders; a [`Scheduler`] backend registers
//! them with whatever delivers the alert. Registered reminders are never
//! cancelled by the core.

mod memory;
mod reminders;

pub use memory::{MemoryScheduler, ScheduledReminder};
pub use reminders::{class_reminders, daily_reminder, task_reminder, ReminderSettings};

use chrono::{Datelike, Days, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;
use crate::schedule::Weekday;

/// When a reminder fires. Times are local wall-clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trigger {
    /// Every week on `weekday` at `hour:minute`.
    Weekly {
        weekday: Weekday,
        hour: u8,
        minute: u8,
        repeats: bool,
    },
    /// Every day at `hour:minute`.
    Daily { hour: u8, minute: u8, repeats: bool },
    /// Once, at `timestamp`.
    At { timestamp: NaiveDateTime },
}

impl Trigger {
    pub fn weekly(weekday: Weekday, hour: u8, minute: u8) -> Self {
        Trigger::Weekly {
            weekday,
            hour,
            minute,
            repeats: true,
        }
    }

    pub fn daily(hour: u8, minute: u8) -> Self {
        Trigger::Daily {
            hour,
            minute,
            repeats: true,
        }
    }

    pub fn at(timestamp: NaiveDateTime) -> Self {
        Trigger::At { timestamp }
    }

    /// Next instant strictly after `now` at which this trigger fires.
    ///
    /// `None` for a one-shot trigger that is already in the past, or for a
    /// recurring trigger with an out-of-range hour/minute.
    pub fn next_fire_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match *self {
            Trigger::At { timestamp } => (timestamp > now).then_some(timestamp),
            Trigger::Daily { hour, minute, .. } => {
                let candidate = now.date().and_hms_opt(hour.into(), minute.into(), 0)?;
                if candidate > now {
                    Some(candidate)
                } else {
                    candidate.checked_add_days(Days::new(1))
                }
            }
            Trigger::Weekly {
                weekday,
                hour,
                minute,
                ..
            } => {
                let target = weekday.to_chrono().num_days_from_monday();
                let current = now.weekday().num_days_from_monday();
                let ahead = (target + 7 - current) % 7;
                let candidate = now
                    .date()
                    .checked_add_days(Days::new(ahead.into()))?
                    .and_hms_opt(hour.into(), minute.into(), 0)?;
                if candidate > now {
                    Some(candidate)
                } else {
                    candidate.checked_add_days(Days::new(7))
                }
            }
        }
    }
}

/// What the alert shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: bool,
}

/// A trigger plus the content it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub trigger: Trigger,
    pub content: NotificationContent,
}

/// Opaque id handed back by a scheduler for a registered reminder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderHandle(pub String);

impl std::fmt::Display for ReminderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Platform service that registers reminders.
pub trait Scheduler {
    /// Ask the user for notification permission.
    fn request_permission(&mut self) -> Result<PermissionStatus, NotifyError> {
        Ok(PermissionStatus::Granted)
    }

    /// Register one reminder.
    ///
    /// # Errors
    /// `PermissionDenied` when permission has not been granted, `Unavailable`
    /// when the backend fails.
    fn schedule(
        &mut self,
        trigger: &Trigger,
        content: &NotificationContent,
    ) -> Result<ReminderHandle, NotifyError>;
}

/// Register each reminder in turn. Failures are logged and returned, and do
/// not stop the remaining registrations.
pub fn register<N: Scheduler + ?Sized>(
    scheduler: &mut N,
    reminders: &[Reminder],
) -> Vec<Result<ReminderHandle, NotifyError>> {
    reminders
        .iter()
        .map(|reminder| {
            let result = scheduler.schedule(&reminder.trigger, &reminder.content);
            match &result {
                Ok(handle) => {
                    tracing::debug!(%handle, trigger = ?reminder.trigger, "reminder registered");
                }
                Err(e) => {
                    tracing::warn!(error = %e, trigger = ?reminder.trigger, "failed to register reminder");
                }
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn trigger_json_shape() {
        let json = serde_json::to_value(Trigger::weekly(Weekday::Monday, 7, 45)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "weekly", "weekday": "Monday", "hour": 7, "minute": 45, "repeats": true})
        );
        let json = serde_json::to_value(Trigger::daily(9, 0)).unwrap();
        assert_eq!(json["type"], "daily");
        assert_eq!(json["repeats"], true);
    }

    #[test]
    fn next_fire_for_absolute_trigger() {
        let trigger = Trigger::at(at("2026-10-19T20:00"));
        assert_eq!(trigger.next_fire_after(at("2026-10-19T10:00")), Some(at("2026-10-19T20:00")));
        assert_eq!(trigger.next_fire_after(at("2026-10-19T20:00")), None);
    }

    #[test]
    fn next_fire_for_daily_trigger() {
        let trigger = Trigger::daily(9, 0);
        assert_eq!(trigger.next_fire_after(at("2026-10-19T08:59")), Some(at("2026-10-19T09:00")));
        assert_eq!(trigger.next_fire_after(at("2026-10-19T09:00")), Some(at("2026-10-20T09:00")));
    }

    #[test]
    fn next_fire_for_weekly_trigger() {
        // 2026-10-21 is a Wednesday.
        let trigger = Trigger::weekly(Weekday::Monday, 7, 45);
        assert_eq!(trigger.next_fire_after(at("2026-10-21T12:00")), Some(at("2026-10-26T07:45")));
        assert_eq!(trigger.next_fire_after(at("2026-10-19T07:00")), Some(at("2026-10-19T07:45")));
        assert_eq!(trigger.next_fire_after(at("2026-10-19T07:45")), Some(at("2026-10-26T07:45")));
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap().and_hms_opt(23, 0, 0).unwrap();
        assert_eq!(trigger.next_fire_after(sunday), Some(at("2026-10-19T07:45")));
    }

    #[test]
    fn register_continues_past_failures() {
        let mut scheduler = MemoryScheduler::denied();
        let reminder = daily_reminder(&ReminderSettings::default());
        let results = register(&mut scheduler, &[reminder.clone(), reminder]);
        assert_eq!(results, vec![Err(NotifyError::PermissionDenied); 2]);
        assert!(scheduler.reminders().is_empty());
    }
}
