use chrono::NaiveDateTime;
use classmate_core::Result;

use super::open_planner;

pub fn run(now: NaiveDateTime) -> Result<()> {
    let planner = open_planner()?;
    let agenda = planner.agenda(now.date());
    println!("{}", serde_json::to_string_pretty(&agenda)?);
    Ok(())
}
