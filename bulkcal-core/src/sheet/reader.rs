//! Positional row reader for the events sheet.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use super::Column;
use crate::error::{BulkCalError, BulkCalResult};
use crate::event::EventRecord;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Stands in for cells past the end of a short row
static EMPTY_CELL: Data = Data::Empty;

/// Load one event per data row from the first worksheet of an .xlsx file.
///
/// The first row of the sheet is the header and is skipped without being
/// inspected. Every following row is read by position.
pub fn load_events(path: &Path) -> BulkCalResult<Vec<EventRecord>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| BulkCalError::Workbook(format!("{}: {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(BulkCalError::NoWorksheet)?
        .map_err(|e| BulkCalError::Workbook(e.to_string()))?;

    parse_range(&range)
}

fn parse_range(range: &Range<Data>) -> BulkCalResult<Vec<EventRecord>> {
    let (Some((header_row, _)), Some((last_row, last_column))) = (range.start(), range.end()) else {
        return Err(BulkCalError::MissingHeader);
    };

    for row in header_row..=last_row {
        reject_extra_cells(range, row, last_column)?;
    }

    let mut events = Vec::new();
    for row in (header_row + 1)..=last_row {
        let event = parse_row(range, row)?;
        debug!("Row {}: {}", row + 1, event);
        events.push(event);
    }

    Ok(events)
}

/// Any value right of the Location column means the sheet isn't laid out as expected
fn reject_extra_cells(range: &Range<Data>, row: u32, last_column: u32) -> BulkCalResult<()> {
    for column in Column::ALL.len() as u32..=last_column {
        match range.get_value((row, column)) {
            None | Some(Data::Empty) => {}
            Some(Data::String(s)) if s.is_empty() => {}
            Some(_) => {
                return Err(BulkCalError::ExtraCell {
                    row: row as usize + 1,
                    column: column as usize + 1,
                });
            }
        }
    }
    Ok(())
}

fn parse_row(range: &Range<Data>, row: u32) -> BulkCalResult<EventRecord> {
    let cell = |column: Column| range.get_value((row, column.index() as u32)).unwrap_or(&EMPTY_CELL);
    let fail = |column: Column, reason: String| BulkCalError::Cell {
        row: row as usize + 1,
        column,
        reason,
    };

    let title = cell_text(cell(Column::Title))
        .map_err(|r| fail(Column::Title, r))?
        .ok_or_else(|| fail(Column::Title, "missing value".into()))?;
    let description = cell_text(cell(Column::Description)).map_err(|r| fail(Column::Description, r))?;
    let date = cell_date(cell(Column::Date)).map_err(|r| fail(Column::Date, r))?;
    let start_time = cell_time(cell(Column::StartTime)).map_err(|r| fail(Column::StartTime, r))?;
    let end_time = cell_time(cell(Column::EndTime)).map_err(|r| fail(Column::EndTime, r))?;
    let location = cell_text(cell(Column::Location)).map_err(|r| fail(Column::Location, r))?;

    Ok(EventRecord::from_row(
        title,
        description,
        date,
        start_time,
        end_time,
        location,
    ))
}

/// Coerce any non-empty cell to text. `Ok(None)` for an empty cell.
fn cell_text(cell: &Data) -> Result<Option<String>, String> {
    let text = match cell {
        Data::Empty => return Ok(None),
        Data::String(s) if s.is_empty() => return Ok(None),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => dt.to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => return Err(format!("cell contains an error value ({e})")),
    };
    Ok(Some(text))
}

fn cell_date(cell: &Data) -> Result<NaiveDate, String> {
    match cell {
        Data::Empty => Err("missing value".into()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|dt| dt.date())
            .ok_or_else(|| format!("{} is not a valid date", dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(|dt| dt.date())
            .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .ok_or_else(|| format!("'{s}' is not a valid date")),
        other => Err(format!("expected a date, found {}", describe(other))),
    }
}

fn cell_time(cell: &Data) -> Result<NaiveTime, String> {
    match cell {
        Data::Empty => Err("missing value".into()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|dt| dt.time())
            .ok_or_else(|| format!("{} is not a valid time", dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(|dt| dt.time())
            .or_else(|| {
                TIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
            })
            .ok_or_else(|| format!("'{s}' is not a valid time")),
        other => Err(format!("expected a time, found {}", describe(other))),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn describe(cell: &Data) -> String {
    match cell {
        Data::Empty => "an empty cell".into(),
        Data::String(s) => format!("text '{s}'"),
        Data::Int(i) => format!("number {i}"),
        Data::Float(f) => format!("number {f}"),
        Data::Bool(b) => format!("boolean {b}"),
        Data::DateTime(dt) => format!("date/time {}", dt.as_f64()),
        Data::DateTimeIso(s) => format!("date/time '{s}'"),
        Data::DurationIso(s) => format!("duration '{s}'"),
        Data::Error(e) => format!("error value {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{HEADERS, SheetCell, write_template, write_workbook};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn header() -> Vec<SheetCell> {
        HEADERS.iter().map(|h| SheetCell::from(*h)).collect()
    }

    fn row(
        title: &str,
        description: &str,
        d: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        location: &str,
    ) -> Vec<SheetCell> {
        vec![
            SheetCell::from(title),
            SheetCell::from(description),
            SheetCell::from(d),
            SheetCell::from(start),
            SheetCell::from(end),
            SheetCell::from(location),
        ]
    }

    fn load(rows: &[Vec<SheetCell>]) -> BulkCalResult<Vec<EventRecord>> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.xlsx");
        write_workbook(&path, rows).unwrap();
        load_events(&path)
    }

    #[test]
    fn test_standup_example() {
        let events = load(&[
            header(),
            row("Standup", "Daily sync", date(2024, 5, 1), time(9, 0), time(9, 15), "Room A"),
        ])
        .unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.title, "Standup");
        assert_eq!(event.description.as_deref(), Some("Daily sync"));
        assert_eq!(event.start, date(2024, 5, 1).and_time(time(9, 0)));
        assert_eq!(event.end, date(2024, 5, 1).and_time(time(9, 15)));
        assert_eq!(event.location.as_deref(), Some("Room A"));
    }

    #[test]
    fn test_rows_keep_input_order() {
        let events = load(&[
            header(),
            row("First", "a", date(2024, 6, 3), time(14, 0), time(15, 0), "X"),
            row("Second", "b", date(2024, 1, 1), time(8, 30), time(9, 0), "Y"),
            row("Third", "c", date(2024, 3, 15), time(23, 0), time(23, 45), "Z"),
        ])
        .unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
        assert_eq!(events[1].start, date(2024, 1, 1).and_time(time(8, 30)));
    }

    #[test]
    fn test_template_without_rows_yields_no_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.xlsx");
        write_template(&path).unwrap();

        assert!(load_events(&path).unwrap().is_empty());
    }

    #[test]
    fn test_empty_sheet_is_missing_header() {
        let result = load(&[]);
        assert!(matches!(result, Err(BulkCalError::MissingHeader)));
    }

    #[test]
    fn test_header_text_is_not_consulted() {
        let renamed = vec![
            SheetCell::from("Wat"),
            SheetCell::from("Omschrijving"),
            SheetCell::from("Datum"),
            SheetCell::from("Begin"),
            SheetCell::from("Eind"),
            SheetCell::from("Locatie"),
        ];
        let events = load(&[
            renamed,
            row("Borrel", "Vrijdag", date(2024, 5, 3), time(17, 0), time(19, 0), "Kantine"),
        ])
        .unwrap();

        assert_eq!(events[0].title, "Borrel");
        assert_eq!(events[0].location.as_deref(), Some("Kantine"));
    }

    #[test]
    fn test_missing_location_and_description_are_none() {
        let events = load(&[
            header(),
            vec![
                SheetCell::from("Focus time"),
                SheetCell::Empty,
                SheetCell::from(date(2024, 5, 2)),
                SheetCell::from(time(13, 0)),
                SheetCell::from(time(15, 0)),
            ],
        ])
        .unwrap();

        assert_eq!(events[0].description, None);
        assert_eq!(events[0].location, None);
    }

    #[test]
    fn test_missing_title_reports_row_and_column() {
        let result = load(&[
            header(),
            row("Ok", "", date(2024, 5, 1), time(9, 0), time(10, 0), ""),
            vec![
                SheetCell::Empty,
                SheetCell::Empty,
                SheetCell::from(date(2024, 5, 1)),
                SheetCell::from(time(9, 0)),
                SheetCell::from(time(10, 0)),
            ],
        ]);

        match result {
            Err(BulkCalError::Cell { row, column, reason }) => {
                assert_eq!(row, 3);
                assert_eq!(column, Column::Title);
                assert_eq!(reason, "missing value");
            }
            other => panic!("expected cell error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_row_between_events_is_an_error() {
        let result = load(&[
            header(),
            row("One", "", date(2024, 5, 1), time(9, 0), time(10, 0), ""),
            vec![],
            row("Two", "", date(2024, 5, 2), time(9, 0), time(10, 0), ""),
        ]);

        assert!(matches!(
            result,
            Err(BulkCalError::Cell { row: 3, column: Column::Title, .. })
        ));
    }

    #[test]
    fn test_text_in_date_column_is_wrong_type() {
        let result = load(&[
            header(),
            vec![
                SheetCell::from("Lunch"),
                SheetCell::Empty,
                SheetCell::from("tomorrow"),
                SheetCell::from(time(12, 0)),
                SheetCell::from(time(13, 0)),
            ],
        ]);

        match result {
            Err(BulkCalError::Cell { row, column, reason }) => {
                assert_eq!(row, 2);
                assert_eq!(column, Column::Date);
                assert!(reason.contains("expected a date"), "got {reason}");
            }
            other => panic!("expected cell error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_end_time_is_an_error() {
        let result = load(&[
            header(),
            vec![
                SheetCell::from("Lunch"),
                SheetCell::Empty,
                SheetCell::from(date(2024, 5, 1)),
                SheetCell::from(time(12, 0)),
            ],
        ]);

        assert!(matches!(
            result,
            Err(BulkCalError::Cell { column: Column::EndTime, .. })
        ));
    }

    #[test]
    fn test_value_beyond_location_is_rejected() {
        let mut with_notes = row("Standup", "", date(2024, 5, 1), time(9, 0), time(9, 15), "Room A");
        with_notes.push(SheetCell::from("bring coffee"));

        let result = load(&[
            header(),
            row("Ok", "", date(2024, 5, 1), time(8, 0), time(8, 30), ""),
            with_notes,
        ]);

        match result {
            Err(err @ BulkCalError::ExtraCell { .. }) => {
                assert!(matches!(err, BulkCalError::ExtraCell { row: 3, column: 7 }));
                assert_eq!(
                    err.to_string(),
                    "Row 3, column 7: unexpected value, events have only 6 columns"
                );
            }
            other => panic!("expected extra cell error, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_header_column_is_rejected() {
        let mut headers = header();
        headers.push(SheetCell::from("Notes"));

        let result = load(&[
            headers,
            row("Standup", "", date(2024, 5, 1), time(9, 0), time(9, 15), ""),
        ]);

        assert!(matches!(
            result,
            Err(BulkCalError::ExtraCell { row: 1, column: 7 })
        ));
    }

    #[test]
    fn test_empty_text_beyond_location_is_ignored() {
        let mut padded = row("Standup", "", date(2024, 5, 1), time(9, 0), time(9, 15), "");
        padded.push(SheetCell::from(""));

        let events = load(&[header(), padded]).unwrap();

        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_cell_text_coercion() {
        assert_eq!(cell_text(&Data::Empty), Ok(None));
        assert_eq!(cell_text(&Data::String(String::new())), Ok(None));
        assert_eq!(cell_text(&Data::Float(12.0)), Ok(Some("12".into())));
        assert_eq!(cell_text(&Data::Float(1.5)), Ok(Some("1.5".into())));
        assert_eq!(cell_text(&Data::Int(42)), Ok(Some("42".into())));
        assert_eq!(cell_text(&Data::Bool(true)), Ok(Some("TRUE".into())));
    }

    #[test]
    fn test_iso_cells_are_accepted() {
        assert_eq!(
            cell_date(&Data::DateTimeIso("2024-05-01".into())),
            Ok(date(2024, 5, 1))
        );
        assert_eq!(
            cell_date(&Data::DateTimeIso("2024-05-01T00:00:00".into())),
            Ok(date(2024, 5, 1))
        );
        assert_eq!(
            cell_time(&Data::DateTimeIso("09:15:00".into())),
            Ok(time(9, 15))
        );
        assert_eq!(
            cell_time(&Data::DateTimeIso("2024-05-01T09:15:00".into())),
            Ok(time(9, 15))
        );
    }

    #[test]
    fn test_number_in_time_column_is_wrong_type() {
        let err = cell_time(&Data::Float(9.0)).unwrap_err();
        assert_eq!(err, "expected a time, found number 9");
    }

    #[test]
    fn test_open_non_workbook_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.xlsx");
        std::fs::write(&path, b"plain text").unwrap();

        assert!(matches!(load_events(&path), Err(BulkCalError::Workbook(_))));
    }
}
