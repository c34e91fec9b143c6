//! Delimited-text statements (CSV with a configurable separator).
//!
//! The first non-blank line is the header row. Cells are kept as text; amounts are
//! interpreted later with the profile's number format.

use royalty_core::{Cell, ParseError, Result, StatementTable};
use std::io::Read;
use tracing::debug;

/// Read a delimited file into a table.
///
/// Rows shorter than the header are accepted (missing cells read as empty);
/// rows longer than the header are malformed.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<StatementTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(csv_error)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ParseError::malformed("file is empty or has no header row"));
    }

    let mut table = StatementTable::new(headers);
    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        if record.len() > table.headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ParseError::malformed(format!(
                "line {line}: expected at most {} fields, found {}",
                table.headers.len(),
                record.len()
            )));
        }
        table.push_row(record.iter().map(Cell::from_text).collect());
    }

    debug!(
        columns = table.headers.len(),
        rows = table.len(),
        delimiter = %(delimiter as char),
        "read delimited statement"
    );
    Ok(table)
}

fn csv_error(err: csv::Error) -> ParseError {
    ParseError::malformed(format!("unreadable delimited text: {err}"))
}
