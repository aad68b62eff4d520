//! Day views derived from the subject and task collections.
//!
//! All queries are pure: they take the collections and the calendar day
//! explicitly and never read the clock.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schedule::{Subject, Weekday};
use crate::task::Task;

/// Default look-ahead for [`upcoming_tasks`].
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Subjects meeting on `today`, earliest start first. Empty on Sundays.
pub fn todays_classes(subjects: &[Subject], today: NaiveDate) -> Vec<&Subject> {
    let Some(day) = Weekday::from_date(today) else {
        return Vec::new();
    };
    let mut classes: Vec<&Subject> = subjects.iter().filter(|s| s.meets_on(day)).collect();
    classes.sort_by_key(|s| s.start_time);
    classes
}

/// Pending tasks due exactly on `today`, in collection order.
pub fn todays_pending_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.is_pending() && t.due_date == today)
        .collect()
}

/// Pending tasks due within `[today, today + window_days]`, soonest first.
///
/// Overlaps with [`todays_pending_tasks`] for tasks due today.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, window_days: u32) -> Vec<&Task> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_pending() && t.due_date >= today && t.due_date <= horizon)
        .collect();
    upcoming.sort_by_key(|t| t.due_date);
    upcoming
}

/// Everything the "today" view shows for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agenda {
    pub date: NaiveDate,
    pub weekday: Option<Weekday>,
    pub classes: Vec<Subject>,
    pub tasks_today: Vec<Task>,
    pub upcoming: Vec<Task>,
}

impl Agenda {
    pub fn for_day(
        subjects: &[Subject],
        tasks: &[Task],
        today: NaiveDate,
        window_days: u32,
    ) -> Self {
        Self {
            date: today,
            weekday: Weekday::from_date(today),
            classes: todays_classes(subjects, today).into_iter().cloned().collect(),
            tasks_today: todays_pending_tasks(tasks, today).into_iter().cloned().collect(),
            upcoming: upcoming_tasks(tasks, today, window_days)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ClockTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn subject(id: &str, days: &[Weekday], start: &str) -> Subject {
        Subject {
            id: id.into(),
            name: format!("Subject {id}"),
            instructor: None,
            room: "101".into(),
            days_of_week: days.to_vec(),
            start_time: start.parse::<ClockTime>().unwrap(),
            end_time: "23:00".parse().unwrap(),
        }
    }

    fn task(id: &str, due: &str, completed: bool) -> Task {
        Task {
            id: id.into(),
            subject_name: "Algebra".into(),
            description: format!("Task {id}"),
            due_date: date(due),
            completed,
        }
    }

    // 2026-10-19 is a Monday.
    const MONDAY: &str = "2026-10-19";

    #[test]
    fn classes_filtered_by_day_and_sorted_by_start() {
        let subjects = vec![
            subject("a", &[Weekday::Monday], "13:00"),
            subject("b", &[Weekday::Tuesday], "07:00"),
            subject("c", &[Weekday::Monday, Weekday::Friday], "08:10"),
            subject("d", &[Weekday::Monday], "08:05"),
        ];
        let ids: Vec<&str> = todays_classes(&subjects, date(MONDAY))
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["d", "c", "a"]);
    }

    #[test]
    fn no_classes_on_sunday() {
        let subjects = vec![subject("a", &Weekday::ALL, "08:00")];
        assert!(todays_classes(&subjects, date("2026-10-18")).is_empty());
    }

    #[test]
    fn todays_tasks_skip_completed_and_other_days() {
        let tasks = vec![
            task("1", MONDAY, false),
            task("2", MONDAY, true),
            task("3", "2026-10-20", false),
            task("4", MONDAY, false),
        ];
        let ids: Vec<&str> = todays_pending_tasks(&tasks, date(MONDAY))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "4"]);
    }

    #[test]
    fn upcoming_window_is_inclusive_on_both_ends() {
        let tasks = vec![
            task("late", "2026-10-26", false),
            task("past", "2026-10-18", false),
            task("beyond", "2026-10-27", false),
            task("today", MONDAY, false),
            task("done", "2026-10-21", true),
            task("mid", "2026-10-22", false),
        ];
        let ids: Vec<&str> = upcoming_tasks(&tasks, date(MONDAY), DEFAULT_UPCOMING_DAYS)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["today", "mid", "late"]);
    }

    #[test]
    fn agenda_bundles_all_three_views() {
        let subjects = vec![subject("a", &[Weekday::Monday], "08:00")];
        let tasks = vec![task("1", MONDAY, false), task("2", "2026-10-20", false)];
        let agenda = Agenda::for_day(&subjects, &tasks, date(MONDAY), DEFAULT_UPCOMING_DAYS);
        assert_eq!(agenda.weekday, Some(Weekday::Monday));
        assert_eq!(agenda.classes.len(), 1);
        assert_eq!(agenda.tasks_today.len(), 1);
        assert_eq!(agenda.upcoming.len(), 2);
    }
}
