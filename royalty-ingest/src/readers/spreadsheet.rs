//! XLSX statements.
//!
//! Only the named sheet is read. The first non-empty row of that sheet is the header
//! row; fully empty rows below it are skipped.

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDateTime;
use royalty_core::{Cell, ParseError, Result, StatementTable};
use std::io::{Read, Seek};
use tracing::debug;

pub fn read_sheet<R: Read + Seek>(reader: R, sheet: &str) -> Result<StatementTable> {
    let mut workbook: Xlsx<R> = Xlsx::new(reader)
        .map_err(|e| ParseError::malformed(format!("not a readable XLSX workbook: {e}")))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet) {
        return Err(ParseError::malformed(format!(
            "sheet {sheet:?} not found (workbook has: {})",
            names.join(", ")
        )));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ParseError::malformed(format!("sheet {sheet:?} is unreadable: {e}")))?;

    let mut rows = range.rows().filter(|r| !r.iter().all(|d| matches!(d, Data::Empty)));

    // An empty sheet yields a header-less table; column lookups then report the schema mismatch.
    let headers = match rows.next() {
        Some(r) => r.iter().map(|d| to_cell(d).to_string()).collect(),
        None => Vec::new(),
    };

    let mut table = StatementTable::new(headers);
    for r in rows {
        table.push_row(r.iter().map(to_cell).collect());
    }

    debug!(sheet, columns = table.headers.len(), rows = table.len(), "read spreadsheet statement");
    Ok(table)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => render_datetime(dt.as_datetime(), dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Dates print as `YYYY-MM-DD`, with the time only when it is not midnight.
/// Serials that do not map to a calendar date keep their raw value.
fn render_datetime(ts: Option<NaiveDateTime>, serial: f64) -> Cell {
    match ts {
        Some(ts) => {
            let s = ts.format("%Y-%m-%d %H:%M:%S").to_string();
            Cell::Text(s.strip_suffix(" 00:00:00").unwrap_or(&s).to_string())
        }
        None => Cell::Number(serial),
    }
}
