//! Class management commands for CLI.

use chrono::NaiveDateTime;
use clap::Subcommand;
use classmate_core::{Result, SubjectDraft, Weekday};

use super::{open_planner, reminder_summary};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a class that meets every week
    Add {
        /// Class name
        name: String,
        /// Room
        #[arg(long)]
        room: String,
        /// Comma-separated meeting days (Monday..Saturday)
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
        /// Instructor name
        #[arg(long)]
        instructor: Option<String>,
    },
    /// List classes
    List {
        /// Only classes meeting on this day
        #[arg(long)]
        day: Option<String>,
    },
    /// Delete a class. Its reminders stay registered.
    Delete {
        /// Subject ID
        id: String,
    },
}

pub fn run(action: SubjectAction, now: NaiveDateTime) -> Result<()> {
    let mut planner = open_planner()?;

    match action {
        SubjectAction::Add {
            name,
            room,
            days,
            start,
            end,
            instructor,
        } => {
            let days_of_week = days
                .iter()
                .map(|d| d.parse::<Weekday>())
                .collect::<Result<Vec<_>, _>>()?;
            let draft = SubjectDraft {
                name,
                instructor,
                room,
                days_of_week,
                start_time: start,
                end_time: end,
            };
            let created = planner.add_subject(draft, now)?;
            println!(
                "Subject created: {} ({})",
                created.entity.id,
                reminder_summary(&created.reminders)
            );
            println!("{}", serde_json::to_string_pretty(&created.entity)?);
        }
        SubjectAction::List { day } => {
            let snapshot = planner.snapshot();
            let day = day.map(|d| d.parse::<Weekday>()).transpose()?;
            let filtered: Vec<_> = snapshot
                .subjects()
                .iter()
                .filter(|s| day.map_or(true, |d| s.meets_on(d)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        SubjectAction::Delete { id } => {
            if planner.delete_subject(&id).changed {
                println!("Subject deleted: {id}");
            } else {
                println!("Subject not found: {id}");
            }
        }
    }
    Ok(())
}
