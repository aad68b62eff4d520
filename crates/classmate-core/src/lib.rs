//! # Classmate Core Library
//!
//! This library provides the core logic for Classmate, a planner for a
//! student's weekly classes and homework. Front ends (the `classmate` CLI)
//! are thin layers that call into [`Planner`] for every mutation.
//!
//! ## Architecture
//!
//! - **Planner**: single-writer controller over an immutable snapshot of the
//!   subject and task collections
//! - **Agenda**: pure queries for today's classes, tasks due today and
//!   upcoming tasks
//! - **Notify**: reminder construction and the [`Scheduler`] trait for the
//!   platform service that delivers them
//! - **Storage**: the [`LocalStore`] key-value trait, an SQLite backend and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Planner`]: owns state, store and scheduler
//! - [`Agenda`]: the "today" view
//! - [`Trigger`]: when a reminder fires
//! - [`Config`]: application configuration management

pub mod agenda;
pub mod error;
pub mod notify;
pub mod planner;
pub mod schedule;
pub mod storage;
pub mod task;

pub use agenda::Agenda;
pub use error::{ConfigError, CoreError, NotifyError, Result, StoreError, ValidationError};
pub use notify::{NotificationContent, Reminder, ReminderHandle, Scheduler, Trigger};
pub use planner::{Created, Mutation, Planner, PlannerSettings, PlannerState, Started};
pub use schedule::{ClockTime, Subject, SubjectDraft, Weekday};
pub use storage::{Config, Database, LocalStore, MemoryStore, SqliteScheduler};
pub use task::{Task, TaskDraft};
