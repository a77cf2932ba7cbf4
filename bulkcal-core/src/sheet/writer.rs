//! Minimal .xlsx writer.
//!
//! An .xlsx file is a zip of SpreadsheetML parts. We only need a single sheet
//! with text, date and time cells, so the parts are written directly instead
//! of going through a full workbook model.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Timelike};
use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{HEADERS, SHEET_NAME};
use crate::error::{BulkCalError, BulkCalResult};

/// Style index for cells formatted with the built-in date format (numFmtId 14)
const DATE_STYLE: usize = 1;
/// Style index for cells formatted with the built-in time format (numFmtId 20)
const TIME_STYLE: usize = 2;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="3"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="20" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

/// A cell value that can be written to a sheet
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Empty,
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl From<&str> for SheetCell {
    fn from(s: &str) -> Self {
        SheetCell::Text(s.to_string())
    }
}

impl From<NaiveDate> for SheetCell {
    fn from(d: NaiveDate) -> Self {
        SheetCell::Date(d)
    }
}

impl From<NaiveTime> for SheetCell {
    fn from(t: NaiveTime) -> Self {
        SheetCell::Time(t)
    }
}

/// Write a blank events template: a single sheet holding only the header row.
pub fn write_template(path: &Path) -> BulkCalResult<()> {
    let header: Vec<SheetCell> = HEADERS.iter().map(|h| SheetCell::from(*h)).collect();
    write_workbook(path, &[header])
}

/// Write `rows` as the only worksheet of a new workbook at `path`, replacing
/// any existing file.
pub fn write_workbook(path: &Path, rows: &[Vec<SheetCell>]) -> BulkCalResult<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", STYLES.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    for (name, content) in parts {
        zip.start_file(name, SimpleFileOptions::default())
            .map_err(|e| BulkCalError::Template(format!("{name}: {e}")))?;
        zip.write_all(content.as_bytes())?;
    }

    zip.finish()
        .map_err(|e| BulkCalError::Template(e.to_string()))?;

    Ok(())
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        SHEET_NAME
    )
}

fn sheet_xml(rows: &[Vec<SheetCell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx + 1;
        xml.push_str(&format!(r#"<row r="{row_num}">"#));

        for (col_idx, cell) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letter(col_idx), row_num);
            match cell {
                SheetCell::Empty => {}
                SheetCell::Text(text) => xml.push_str(&format!(
                    r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    escape(text.as_str())
                )),
                SheetCell::Date(date) => xml.push_str(&format!(
                    r#"<c r="{cell_ref}" s="{DATE_STYLE}"><v>{}</v></c>"#,
                    date_serial(*date)
                )),
                SheetCell::Time(time) => xml.push_str(&format!(
                    r#"<c r="{cell_ref}" s="{TIME_STYLE}"><v>{}</v></c>"#,
                    time_serial(*time)
                )),
            }
        }

        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Spreadsheet column name for a zero-based index: 0 -> A, 25 -> Z, 26 -> AA
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Days since the 1900 date system epoch (valid from 1900-03-01 onwards)
fn date_serial(date: NaiveDate) -> i64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).expect("valid epoch date");
    (date - epoch).num_days()
}

/// Fraction of a day
fn time_serial(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 86_400.0
}
