//! The planner controller.
//!
//! [`Planner`] is the single writer of the subject and task collections. It
//! holds an immutable [`PlannerState`] snapshot; every mutation builds a new
//! snapshot, installs it, then persists it. A failed write or reminder
//! registration is reported in the returned outcome and never rolls the
//! snapshot back.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use crate::agenda::{self, Agenda, DEFAULT_UPCOMING_DAYS};
use crate::error::{NotifyError, StoreError, ValidationError};
use crate::notify::{self, PermissionStatus, ReminderHandle, ReminderSettings, Scheduler};
use crate::schedule::{Subject, SubjectDraft};
use crate::storage::{persist, LocalStore};
use crate::task::{Task, TaskDraft};

/// Snapshot of both collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlannerState {
    subjects: Vec<Subject>,
    tasks: Vec<Task>,
}

impl PlannerState {
    pub fn new(subjects: Vec<Subject>, tasks: Vec<Task>) -> Self {
        Self { subjects, tasks }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn todays_classes(&self, today: NaiveDate) -> Vec<&Subject> {
        agenda::todays_classes(&self.subjects, today)
    }

    pub fn todays_pending_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        agenda::todays_pending_tasks(&self.tasks, today)
    }

    pub fn upcoming_tasks(&self, today: NaiveDate, window_days: u32) -> Vec<&Task> {
        agenda::upcoming_tasks(&self.tasks, today, window_days)
    }

    pub fn agenda(&self, today: NaiveDate, window_days: u32) -> Agenda {
        Agenda::for_day(&self.subjects, &self.tasks, today, window_days)
    }

    fn with_subjects(&self, subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            tasks: self.tasks.clone(),
        }
    }

    fn with_tasks(&self, tasks: Vec<Task>) -> Self {
        Self {
            subjects: self.subjects.clone(),
            tasks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerSettings {
    pub reminders: ReminderSettings,
    pub upcoming_days: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            reminders: ReminderSettings::default(),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
        }
    }
}

/// Result of an add operation that passed validation.
#[derive(Debug)]
#[must_use]
pub struct Created<T> {
    pub entity: T,
    pub persisted: Result<(), StoreError>,
    /// One entry per reminder the entity asked for.
    pub reminders: Vec<Result<ReminderHandle, NotifyError>>,
}

/// Result of a complete/delete operation.
#[derive(Debug)]
#[must_use]
pub struct Mutation {
    /// Whether the snapshot differs from before.
    pub changed: bool,
    pub persisted: Result<(), StoreError>,
}

/// Result of [`Planner::start`].
#[derive(Debug)]
#[must_use]
pub struct Started {
    pub permission: Result<PermissionStatus, NotifyError>,
    pub daily_reminder: Result<ReminderHandle, NotifyError>,
}

pub struct Planner<S, N> {
    store: S,
    scheduler: N,
    settings: PlannerSettings,
    state: Arc<PlannerState>,
}

impl<S: LocalStore, N: Scheduler> Planner<S, N> {
    /// Build a planner over the collections currently in `store`.
    pub fn new(store: S, scheduler: N, settings: PlannerSettings) -> Self {
        let state = persist::load(&store);
        tracing::info!(
            subjects = state.subjects().len(),
            tasks = state.tasks().len(),
            "planner loaded"
        );
        Self {
            store,
            scheduler,
            settings,
            state: Arc::new(state),
        }
    }

    /// Ask for notification permission and register the daily check-in.
    pub fn start(&mut self) -> Started {
        let permission = self.scheduler.request_permission();
        match &permission {
            Ok(PermissionStatus::Granted) => {}
            Ok(PermissionStatus::Denied) => {
                tracing::warn!("notification permission denied, reminders will not fire");
            }
            Err(e) => tracing::warn!(error = %e, "failed to request notification permission"),
        }

        let reminder = notify::daily_reminder(&self.settings.reminders);
        let daily_reminder = notify::register(&mut self.scheduler, std::slice::from_ref(&reminder))
            .pop()
            .unwrap_or(Err(NotifyError::Unavailable("no registration result".into())));

        Started {
            permission,
            daily_reminder,
        }
    }

    pub fn snapshot(&self) -> Arc<PlannerState> {
        Arc::clone(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    /// Today's view using the configured look-ahead.
    pub fn agenda(&self, today: NaiveDate) -> Agenda {
        self.state.agenda(today, self.settings.upcoming_days)
    }

    /// Validate and add a subject, then register one weekly reminder per
    /// meeting day.
    ///
    /// # Errors
    /// Returns a validation error and leaves the state untouched when a
    /// required field is missing or malformed.
    pub fn add_subject(
        &mut self,
        draft: SubjectDraft,
        now: NaiveDateTime,
    ) -> Result<Created<Subject>, ValidationError> {
        let id = timestamp_id(now, self.state.subjects().iter().map(|s| s.id.as_str()));
        let subject = draft.into_subject(id)?;

        let mut subjects = self.state.subjects().to_vec();
        subjects.push(subject.clone());
        let persisted = self.replace_subjects(subjects);

        let reminders = notify::class_reminders(&subject, &self.settings.reminders);
        let reminders = notify::register(&mut self.scheduler, &reminders);
        tracing::info!(id = %subject.id, name = %subject.name, "subject added");

        Ok(Created {
            entity: subject,
            persisted,
            reminders,
        })
    }

    /// Validate and add a task, then register its evening-before reminder
    /// when that moment is still ahead of `now`.
    ///
    /// # Errors
    /// Returns a validation error and leaves the state untouched when a
    /// required field is missing or malformed.
    pub fn add_task(
        &mut self,
        draft: TaskDraft,
        now: NaiveDateTime,
    ) -> Result<Created<Task>, ValidationError> {
        let id = timestamp_id(now, self.state.tasks().iter().map(|t| t.id.as_str()));
        let task = draft.into_task(id)?;

        let mut tasks = self.state.tasks().to_vec();
        tasks.push(task.clone());
        let persisted = self.replace_tasks(tasks);

        let reminders: Vec<_> = notify::task_reminder(&task, now, &self.settings.reminders)
            .into_iter()
            .collect();
        let reminders = notify::register(&mut self.scheduler, &reminders);
        tracing::info!(id = %task.id, due = %task.due_date, "task added");

        Ok(Created {
            entity: task,
            persisted,
            reminders,
        })
    }

    /// Mark a task completed. Completing twice, or an unknown id, is a no-op
    /// apart from re-saving the collection.
    pub fn complete_task(&mut self, id: &str) -> Mutation {
        let mut changed = false;
        let tasks: Vec<Task> = self
            .state
            .tasks()
            .iter()
            .map(|t| {
                if t.id == id && !t.completed {
                    changed = true;
                    Task {
                        completed: true,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        let persisted = self.replace_tasks(tasks);
        Mutation { changed, persisted }
    }

    /// Remove the subject with `id`. Its reminders stay registered.
    pub fn delete_subject(&mut self, id: &str) -> Mutation {
        let before = self.state.subjects().len();
        let subjects: Vec<Subject> = self
            .state
            .subjects()
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        let changed = subjects.len() != before;
        let persisted = self.replace_subjects(subjects);
        Mutation { changed, persisted }
    }

    /// Remove the task with `id`. Its reminder stays registered.
    pub fn delete_task(&mut self, id: &str) -> Mutation {
        let before = self.state.tasks().len();
        let tasks: Vec<Task> = self
            .state
            .tasks()
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        let changed = tasks.len() != before;
        let persisted = self.replace_tasks(tasks);
        Mutation { changed, persisted }
    }

    fn replace_subjects(&mut self, subjects: Vec<Subject>) -> Result<(), StoreError> {
        let next = Arc::new(self.state.with_subjects(subjects));
        self.state = Arc::clone(&next);
        let result = persist::save_subjects(&mut self.store, next.subjects());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to save subjects");
        }
        result
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) -> Result<(), StoreError> {
        let next = Arc::new(self.state.with_tasks(tasks));
        self.state = Arc::clone(&next);
        let result = persist::save_tasks(&mut self.store, next.tasks());
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to save tasks");
        }
        result
    }
}

/// Id from the creation time in milliseconds, bumped past the largest
/// numeric id already present so rapid creation cannot collide.
fn timestamp_id<'a>(now: NaiveDateTime, existing: impl Iterator<Item = &'a str>) -> String {
    let millis = local_millis(now);
    let highest = existing.filter_map(|id| id.parse::<i64>().ok()).max();
    match highest {
        Some(h) if h >= millis => (h + 1).to_string(),
        _ => millis.to_string(),
    }
}

/// Epoch milliseconds of a local wall-clock time. A time skipped by a DST
/// jump falls back to reading it as UTC.
fn local_millis(now: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&now)
        .earliest()
        .map_or_else(|| now.and_utc().timestamp_millis(), |t| t.timestamp_millis())
}
