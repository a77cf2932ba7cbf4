//! Spreadsheet (.xlsx) input: the fixed column layout, the template writer
//! and the positional row reader.

mod reader;
mod writer;

use std::fmt;

pub use reader::load_events;
pub use writer::{SheetCell, write_template, write_workbook};

/// Header row of the events sheet, in column order.
pub const HEADERS: [&str; 6] = [
    "Title",
    "Description",
    "Date",
    "Start time",
    "End time",
    "Location",
];

/// Name of the single worksheet in a generated template
pub const SHEET_NAME: &str = "Events";

/// Columns of the events sheet. Rows are read by position, never by header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Description,
    Date,
    StartTime,
    EndTime,
    Location,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Title,
        Column::Description,
        Column::Date,
        Column::StartTime,
        Column::EndTime,
        Column::Location,
    ];

    /// Zero-based position of the column in a row
    pub fn index(self) -> usize {
        match self {
            Column::Title => 0,
            Column::Description => 1,
            Column::Date => 2,
            Column::StartTime => 3,
            Column::EndTime => 4,
            Column::Location => 5,
        }
    }

    pub fn header(self) -> &'static str {
        HEADERS[self.index()]
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
