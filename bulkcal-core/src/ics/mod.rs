//! ICS file generation.
//!
//! This module handles writing .ics files according to RFC 5545.

mod generate;

use std::path::Path;

use tracing::info;

use crate::error::BulkCalResult;
use crate::event::EventRecord;

pub use generate::generate_ics;

/// Write all events as a single calendar to `path`, overwriting any existing file.
pub fn export_ics(events: &[EventRecord], path: &Path) -> BulkCalResult<()> {
    info!("Saving calendar to .ics file...");
    std::fs::write(path, generate_ics(events))?;
    info!("Saved events to {}", path.display());
    Ok(())
}
