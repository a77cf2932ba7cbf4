//! Core of bulkcal: turn a spreadsheet of events into an .ics calendar.
//!
//! - `sheet` reads and writes the six-column events spreadsheet
//! - `ics` serializes event records into one calendar document
//! - `pipeline` ties them together with the `launcher` seams

pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod launcher;
pub mod pipeline;
pub mod sheet;

pub use error::{BulkCalError, BulkCalResult};
pub use event::EventRecord;
