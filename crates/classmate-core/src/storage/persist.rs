//! Reading and writing the two persisted collections.
//!
//! Each collection lives under its own key as a JSON array and is always
//! rewritten in full.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::LocalStore;
use crate::error::StoreError;
use crate::planner::PlannerState;
use crate::schedule::Subject;
use crate::task::Task;

pub const SUBJECTS_KEY: &str = "subjects";
pub const TASKS_KEY: &str = "tasks";

/// Load both collections.
///
/// A missing, unreadable or unparsable collection comes back empty; the cause
/// is only logged.
pub fn load<S: LocalStore + ?Sized>(store: &S) -> PlannerState {
    PlannerState::new(load_collection(store, SUBJECTS_KEY), load_collection(store, TASKS_KEY))
}

fn load_collection<S: LocalStore + ?Sized, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read collection, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored collection is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Overwrite the stored subject collection.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_subjects<S: LocalStore + ?Sized>(
    store: &mut S,
    subjects: &[Subject],
) -> Result<(), StoreError> {
    save_collection(store, SUBJECTS_KEY, subjects)
}

/// Overwrite the stored task collection.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn save_tasks<S: LocalStore + ?Sized>(store: &mut S, tasks: &[Task]) -> Result<(), StoreError> {
    save_collection(store, TASKS_KEY, tasks)
}

fn save_collection<S: LocalStore + ?Sized, T: Serialize>(
    store: &mut S,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}
