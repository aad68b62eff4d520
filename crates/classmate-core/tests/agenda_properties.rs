//! Property tests for the agenda queries.

use chrono::{Days, NaiveDate};
use classmate_core::agenda::{todays_classes, todays_pending_tasks, upcoming_tasks};
use classmate_core::{ClockTime, Subject, Task, Weekday};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
}

fn arb_subject() -> impl Strategy<Value = Subject> {
    (
        "[a-z]{1,6}",
        proptest::sample::subsequence(Weekday::ALL.to_vec(), 1..=6),
        0u8..24,
        0u8..60,
    )
        .prop_map(|(name, days, hour, minute)| Subject {
            id: name.clone(),
            name,
            instructor: None,
            room: "1".into(),
            days_of_week: days,
            start_time: ClockTime::new(hour, minute).unwrap(),
            end_time: ClockTime::new(23, 59).unwrap(),
        })
}

fn arb_task() -> impl Strategy<Value = Task> {
    ("[a-z]{1,6}", 0u64..30, any::<bool>()).prop_map(|(id, offset, completed)| Task {
        id,
        subject_name: "Any".into(),
        description: "Work".into(),
        due_date: base_date().checked_add_days(Days::new(offset)).unwrap(),
        completed,
    })
}

proptest! {
    #[test]
    fn classes_match_weekday_and_are_sorted(
        subjects in proptest::collection::vec(arb_subject(), 0..12),
        offset in 0u64..14,
    ) {
        let today = base_date().checked_add_days(Days::new(offset)).unwrap();
        let result = todays_classes(&subjects, today);

        match Weekday::from_date(today) {
            None => prop_assert!(result.is_empty()),
            Some(day) => {
                let expected = subjects.iter().filter(|s| s.days_of_week.contains(&day)).count();
                prop_assert_eq!(result.len(), expected);
                prop_assert!(result.iter().all(|s| s.days_of_week.contains(&day)));
            }
        }
        prop_assert!(result.windows(2).all(|w| w[0].start_time.to_string() <= w[1].start_time.to_string()));
    }

    #[test]
    fn pending_today_is_exactly_due_and_open(
        tasks in proptest::collection::vec(arb_task(), 0..20),
        offset in 0u64..30,
    ) {
        let today = base_date().checked_add_days(Days::new(offset)).unwrap();
        let result = todays_pending_tasks(&tasks, today);
        let expected: Vec<&Task> = tasks.iter().filter(|t| t.due_date == today && !t.completed).collect();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn upcoming_is_open_tasks_in_window_sorted(
        tasks in proptest::collection::vec(arb_task(), 0..20),
        offset in 0u64..30,
    ) {
        let today = base_date().checked_add_days(Days::new(offset)).unwrap();
        let horizon = today.checked_add_days(Days::new(7)).unwrap();
        let result = upcoming_tasks(&tasks, today, 7);

        let expected = tasks
            .iter()
            .filter(|t| !t.completed && t.due_date >= today && t.due_date <= horizon)
            .count();
        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.iter().all(|t| !t.completed && t.due_date >= today && t.due_date <= horizon));
        prop_assert!(result.windows(2).all(|w| w[0].due_date <= w[1].due_date));
    }
}
