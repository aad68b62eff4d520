//! Homework tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::required;

/// A one-off homework item.
///
/// `subject_name` is a free-text label and is never checked against the
/// subject list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub subject_name: String,
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        !self.completed
    }
}

/// Unvalidated task fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub subject_name: String,
    pub description: String,
    pub due_date: String,
}

impl TaskDraft {
    /// Validate the draft and assign `id`. New tasks start pending.
    ///
    /// # Errors
    /// Returns the first missing field, or `InvalidDate` when the due date
    /// is not `YYYY-MM-DD`.
    pub fn into_task(self, id: String) -> Result<Task, ValidationError> {
        let subject_name = required(self.subject_name, "subjectName")?;
        let description = required(self.description, "description")?;
        let raw_due = required(self.due_date, "dueDate")?;
        let due_date = NaiveDate::parse_from_str(&raw_due, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw_due.clone()))?;

        Ok(Task {
            id,
            subject_name,
            description,
            due_date,
            completed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft {
            subject_name: "Algebra".into(),
            description: "Problem set 3".into(),
            due_date: "2026-10-20".into(),
        }
    }

    #[test]
    fn draft_becomes_pending_task() {
        let task = draft().into_task("42".into()).unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert!(task.is_pending());
    }

    #[test]
    fn draft_requires_every_field() {
        for (field, d) in [
            ("subjectName", TaskDraft { subject_name: " ".into(), ..draft() }),
            ("description", TaskDraft { description: String::new(), ..draft() }),
            ("dueDate", TaskDraft { due_date: String::new(), ..draft() }),
        ] {
            assert_eq!(d.into_task("1".into()), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn draft_rejects_bad_date() {
        let d = TaskDraft { due_date: "20/10/2026".into(), ..draft() };
        assert_eq!(
            d.into_task("1".into()),
            Err(ValidationError::InvalidDate("20/10/2026".into()))
        );
    }

    #[test]
    fn task_json_layout() {
        let task = draft().into_task("1".into()).unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "subjectName": "Algebra",
                "description": "Problem set 3",
                "dueDate": "2026-10-20",
                "completed": false
            })
        );
    }

    #[test]
    fn completed_defaults_to_false_when_absent() {
        let task: Task = serde_json::from_str(
            r#"{"id":"1","subjectName":"Art","description":"Sketch","dueDate":"2026-10-21"}"#,
        )
        .unwrap();
        assert!(!task.completed);
    }
}
