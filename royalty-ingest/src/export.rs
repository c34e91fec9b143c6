//! Processed statement export.
//!
//! Comma-separated, original header row, amount column already tax-adjusted.

use royalty_core::{NormalizedResult, StatementTable};
use std::io::{self, Write};

pub const PROCESSED_MIME: &str = "text/csv";

pub fn write_processed_csv<W: Write>(table: &StatementTable, writer: W) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(writer);

    wtr.write_record(&table.headers)?;
    let width = table.headers.len();
    for row in 0..table.len() {
        wtr.write_record((0..width).map(|col| table.cell(row, col).to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// The processed file ready for download: name, MIME type and contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: Vec<u8>,
}

impl ProcessedFile {
    pub fn from_result(result: &NormalizedResult) -> io::Result<Self> {
        let mut contents = Vec::new();
        write_processed_csv(&result.rows, &mut contents)?;
        Ok(Self {
            file_name: result.processed_file_name(),
            mime: PROCESSED_MIME,
            contents,
        })
    }
}
