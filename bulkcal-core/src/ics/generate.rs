//! ICS generation.

use crate::event::EventRecord;
use chrono::NaiveDateTime;
use icalendar::{Calendar, Component, EventLike};
use uuid::Uuid;

const PRODID: &str = "-//bulkcal//Bulk Calendar Events//EN";

/// Generate one .ics document holding a VEVENT per record, in order
pub fn generate_ics(events: &[EventRecord]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        cal.push(generate_event(event));
    }

    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    tidy_ics(&cal.to_string())
}

fn generate_event(event: &EventRecord) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@bulkcal", Uuid::new_v4()));
    ics_event.summary(&event.title);

    // DTSTAMP - required by RFC 5545, the moment the record was built
    let dtstamp = event.generated_at.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // Floating start/end (no Z, no TZID)
    ics_event.add_property("DTSTART", format_floating(&event.start));
    ics_event.add_property("DTEND", format_floating(&event.end));

    // Optional fields
    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    ics_event.done()
}

fn format_floating(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own identifier
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn tidy_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
