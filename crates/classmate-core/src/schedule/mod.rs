//! Schedule types: recurring classes and the day/time values they are built from.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Day a class can meet on. Sunday has no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All tags in week order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Fixed day index, Monday=0 … Saturday=5.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tag for a calendar date, `None` on Sundays.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::from_chrono(date.weekday())
    }

    pub fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        Self::ALL.get(day.num_days_from_monday() as usize).copied()
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
        }
    }

    /// Weekday number in the Sunday=1 convention used by mobile
    /// notification schedulers (Monday=2 … Saturday=7).
    pub fn platform_index(self) -> u8 {
        self.index() as u8 + 2
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    /// Accepts full names and three-letter abbreviations, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| ValidationError::InvalidWeekday(s.to_string()))
    }
}

/// Wall-clock time of day, persisted as zero-padded `HH:MM`.
///
/// Ordering is (hour, minute), which agrees with comparing the padded strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Caller guarantees `hour < 24` and `minute < 60`.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A recurring weekly class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub room: String,
    pub days_of_week: Vec<Weekday>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl Subject {
    pub fn meets_on(&self, day: Weekday) -> bool {
        self.days_of_week.contains(&day)
    }
}

/// Unvalidated subject fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDraft {
    pub name: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub room: String,
    pub days_of_week: Vec<Weekday>,
    pub start_time: String,
    pub end_time: String,
}

impl SubjectDraft {
    /// Validate the draft and assign `id`.
    ///
    /// # Errors
    /// Returns the first missing or malformed field, checking name, room and
    /// days before the two times.
    pub fn into_subject(self, id: String) -> Result<Subject, ValidationError> {
        let name = required(self.name, "name")?;
        let room = required(self.room, "room")?;
        if self.days_of_week.is_empty() {
            return Err(ValidationError::MissingField("daysOfWeek"));
        }
        let start_time = parse_time(&self.start_time, "startTime")?;
        let end_time = parse_time(&self.end_time, "endTime")?;

        let mut days_of_week = Vec::with_capacity(self.days_of_week.len());
        for day in self.days_of_week {
            if !days_of_week.contains(&day) {
                days_of_week.push(day);
            }
        }

        Ok(Subject {
            id,
            name,
            instructor: self
                .instructor
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            room,
            days_of_week,
            start_time,
            end_time,
        })
    }
}

pub(crate) fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_time(value: &str, field: &'static str) -> Result<ClockTime, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    value.parse()
}
