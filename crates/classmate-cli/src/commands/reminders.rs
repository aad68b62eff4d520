//! Inspect reminders registered with the local scheduler.

use chrono::NaiveDateTime;
use clap::Subcommand;
use classmate_core::notify::ScheduledReminder;
use classmate_core::Result;
use serde::Serialize;

use super::open_planner;

#[derive(Subcommand)]
pub enum RemindersAction {
    /// List registered reminders with their next fire time
    List {
        /// Hide one-shot reminders that will not fire again
        #[arg(long)]
        active: bool,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReminderView<'a> {
    #[serde(flatten)]
    reminder: &'a ScheduledReminder,
    next_fire_at: Option<NaiveDateTime>,
}

pub fn run(action: RemindersAction, now: NaiveDateTime) -> Result<()> {
    let planner = open_planner()?;

    match action {
        RemindersAction::List { active } => {
            let reminders = planner.scheduler().reminders()?;
            let views: Vec<ReminderView<'_>> = reminders
                .iter()
                .map(|reminder| ReminderView {
                    reminder,
                    next_fire_at: reminder.trigger.next_fire_after(now),
                })
                .filter(|view| !active || view.next_fire_at.is_some())
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
    }
    Ok(())
}
