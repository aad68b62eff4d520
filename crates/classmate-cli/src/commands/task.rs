//! Homework management commands for CLI.

use chrono::NaiveDateTime;
use clap::Subcommand;
use classmate_core::{Result, TaskDraft};

use super::{open_planner, reminder_summary};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a homework task
    Add {
        /// Subject label (free text)
        subject: String,
        /// What has to be done
        description: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },
    /// List tasks
    List {
        /// Hide completed tasks
        #[arg(long)]
        pending: bool,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task. Its reminder stays registered.
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, now: NaiveDateTime) -> Result<()> {
    let mut planner = open_planner()?;

    match action {
        TaskAction::Add {
            subject,
            description,
            due,
        } => {
            let draft = TaskDraft {
                subject_name: subject,
                description,
                due_date: due,
            };
            let created = planner.add_task(draft, now)?;
            println!(
                "Task created: {} ({})",
                created.entity.id,
                reminder_summary(&created.reminders)
            );
            println!("{}", serde_json::to_string_pretty(&created.entity)?);
        }
        TaskAction::List { pending } => {
            let snapshot = planner.snapshot();
            let filtered: Vec<_> = snapshot
                .tasks()
                .iter()
                .filter(|t| !pending || t.is_pending())
                .collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        TaskAction::Complete { id } => {
            if planner.snapshot().task(&id).is_none() {
                println!("Task not found: {id}");
            } else {
                let _ = planner.complete_task(&id);
                println!("Task completed: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if planner.delete_task(&id).changed {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}
