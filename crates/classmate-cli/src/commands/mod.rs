pub mod config;
pub mod reminders;
pub mod subject;
pub mod task;
pub mod today;

use classmate_core::{
    Config, Database, NotifyError, Planner, ReminderHandle, Result, SqliteScheduler,
};

pub type CliPlanner = Planner<Database, SqliteScheduler>;

/// Open the planner over the default data directory and run its startup
/// (permission check plus the daily reminder).
pub fn open_planner() -> Result<CliPlanner> {
    let config = Config::load_or_default();
    let store = Database::open()?;
    let scheduler = SqliteScheduler::open(config.notifications.enabled)?;
    let mut planner = Planner::new(store, scheduler, config.planner_settings());
    let _started = planner.start();
    Ok(planner)
}

/// "2 reminders scheduled" / "1 of 2 reminders scheduled".
pub fn reminder_summary(results: &[Result<ReminderHandle, NotifyError>]) -> String {
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let noun = if results.len() == 1 { "reminder" } else { "reminders" };
    if ok == results.len() {
        format!("{ok} {noun} scheduled")
    } else {
        format!("{ok} of {} {noun} scheduled", results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_failures() {
        let ok = Ok(ReminderHandle("1".into()));
        assert_eq!(reminder_summary(&[]), "0 reminders scheduled");
        assert_eq!(reminder_summary(&[ok.clone()]), "1 reminder scheduled");
        assert_eq!(
            reminder_summary(&[ok, Err(NotifyError::PermissionDenied)]),
            "1 of 2 reminders scheduled"
        );
    }
}
