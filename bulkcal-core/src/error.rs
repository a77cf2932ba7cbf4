//! Error types for bulkcal.

use thiserror::Error;

use crate::sheet::Column;

/// Errors that can occur while converting a spreadsheet to a calendar.
#[derive(Error, Debug)]
pub enum BulkCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read workbook: {0}")]
    Workbook(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Worksheet is empty, expected a header row")]
    MissingHeader,

    #[error("Row {row}, column '{column}': {reason}")]
    Cell {
        row: usize,
        column: Column,
        reason: String,
    },

    #[error(
        "Row {row}, column {column}: unexpected value, events have only {count} columns",
        count = Column::ALL.len()
    )]
    ExtraCell { row: usize, column: usize },

    #[error("Could not write template: {0}")]
    Template(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for bulkcal operations.
pub type BulkCalResult<T> = Result<T, BulkCalError>;
