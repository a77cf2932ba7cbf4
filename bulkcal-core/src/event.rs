//! The event record built from one spreadsheet row.
//!
//! Start and end are floating date-times: the date cell combined with the
//! start/end time cells, with no timezone attached.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// One calendar event parsed from one input row
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    /// Not checked against `start`
    pub end: NaiveDateTime,
    pub location: Option<String>,
    /// When this record was built (DTSTAMP)
    pub generated_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: Option<String>,
    ) -> Self {
        EventRecord {
            title: title.into(),
            description,
            start,
            end,
            location,
            generated_at: Utc::now(),
        }
    }

    /// Build a record from the cells of a row, combining the single date with
    /// both times of day.
    pub fn from_row(
        title: impl Into<String>,
        description: Option<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: Option<String>,
    ) -> Self {
        Self::new(
            title,
            description,
            date.and_time(start_time),
            date.and_time(end_time),
            location,
        )
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%H:%M")
        )
    }
}
