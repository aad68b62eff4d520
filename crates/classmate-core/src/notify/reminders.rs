//! Reminder construction for new subjects and tasks, plus the daily check-in.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{NotificationContent, Reminder, Trigger};
use crate::schedule::{ClockTime, Subject};
use crate::task::Task;

/// Timing knobs for reminder construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Minutes before a class starts.
    pub class_lead_minutes: u8,
    /// Hour (0-23) on the day before a task is due.
    pub task_reminder_hour: u8,
    pub daily_reminder: ClockTime,
    pub sound: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            class_lead_minutes: 15,
            task_reminder_hour: 20,
            daily_reminder: ClockTime::new_unchecked(9, 0),
            sound: true,
        }
    }
}

/// One weekly reminder per meeting day, `class_lead_minutes` before the start.
///
/// The lead is taken off the minute only, floored at zero: a class at 08:10
/// with a 15 minute lead is announced at 08:00, not 07:55.
pub fn class_reminders(subject: &Subject, settings: &ReminderSettings) -> Vec<Reminder> {
    let hour = subject.start_time.hour();
    let minute = subject
        .start_time
        .minute()
        .saturating_sub(settings.class_lead_minutes);
    let content = NotificationContent {
        title: format!("Class in {} minutes", settings.class_lead_minutes),
        body: format!("{} - Room {}", subject.name, subject.room),
        sound: settings.sound,
    };

    subject
        .days_of_week
        .iter()
        .map(|&day| Reminder {
            trigger: Trigger::weekly(day, hour, minute),
            content: content.clone(),
        })
        .collect()
}

/// A one-shot reminder the evening before `task` is due.
///
/// Returns `None` when that moment is not strictly after `now`.
pub fn task_reminder(
    task: &Task,
    now: NaiveDateTime,
    settings: &ReminderSettings,
) -> Option<Reminder> {
    let eve = task.due_date.pred_opt()?;
    let time = NaiveTime::from_hms_opt(u32::from(settings.task_reminder_hour.min(23)), 0, 0)?;
    let fire_at = eve.and_time(time);
    if fire_at <= now {
        tracing::debug!(task = %task.id, %fire_at, "task reminder already past, skipping");
        return None;
    }

    Some(Reminder {
        trigger: Trigger::at(fire_at),
        content: NotificationContent {
            title: "Homework due tomorrow".into(),
            body: format!("Due tomorrow: {} - {}", task.description, task.subject_name),
            sound: settings.sound,
        },
    })
}

/// The fixed every-morning prompt to review pending homework.
pub fn daily_reminder(settings: &ReminderSettings) -> Reminder {
    Reminder {
        trigger: Trigger::daily(settings.daily_reminder.hour(), settings.daily_reminder.minute()),
        content: NotificationContent {
            title: "Check your homework".into(),
            body: "Good morning! See whether any tasks are due today".into(),
            sound: settings.sound,
        },
    }
}
