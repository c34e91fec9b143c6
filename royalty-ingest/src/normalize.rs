//! The statement normalization pipeline shared by every distributor.
//!
//! load table -> resolve columns -> filter rows -> sum gross -> deduct tax in place -> sum net

use royalty_core::{
    AmountParser, Cell, DistributorProfile, FileFormat, NormalizedResult, NumberFormat,
    ParseError, Result, StatementTable, TaxRate,
};
use std::io::{Cursor, Read};
use tracing::{debug, info, warn};

use crate::readers::{read_delimited, read_sheet};

/// Normalize a statement held in memory using an explicit profile.
pub fn normalize_with_profile(
    profile: &DistributorProfile,
    bytes: &[u8],
    tax_rate_percent: f64,
) -> Result<NormalizedResult> {
    let rate = TaxRate::new(tax_rate_percent)?;
    let table = load_table(profile, bytes)?;
    normalize_table(profile, table, rate)
}

/// Same as [`normalize_with_profile`] but drains a reader first.
pub fn normalize_reader_with_profile<R: Read>(
    profile: &DistributorProfile,
    mut reader: R,
    tax_rate_percent: f64,
) -> Result<NormalizedResult> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| ParseError::malformed(format!("could not read input: {e}")))?;
    normalize_with_profile(profile, &bytes, tax_rate_percent)
}

/// Parse raw bytes into a table according to the profile's file format.
pub fn load_table(profile: &DistributorProfile, bytes: &[u8]) -> Result<StatementTable> {
    match &profile.file_format {
        FileFormat::Delimited { delimiter } => read_delimited(bytes, *delimiter),
        FileFormat::Spreadsheet { sheet } => read_sheet(Cursor::new(bytes), sheet),
    }
}

/// Run filter, sum and tax adjustment over an already-parsed table.
pub fn normalize_table(
    profile: &DistributorProfile,
    mut table: StatementTable,
    rate: TaxRate,
) -> Result<NormalizedResult> {
    let amount_col = table.require_column(&profile.amount_column)?;
    let total_rows = table.len();

    filter_rows(profile, &mut table)?;
    debug!(
        distributor = %profile.kind,
        kept = table.len(),
        dropped = total_rows - table.len(),
        filter = %profile.row_filter,
        "filtered statement rows"
    );

    let (gross_total, net_total) = apply_tax(&mut table, amount_col, &profile.number_format, rate)?;

    info!(
        distributor = %profile.kind,
        rows = table.len(),
        gross_total,
        net_total,
        tax_rate = rate.percent(),
        "normalized statement"
    );

    Ok(NormalizedResult {
        distributor: profile.kind,
        tax_rate: rate,
        rows: table,
        gross_total,
        net_total,
    })
}

/// Drop rows that fail the profile's row filter. Idempotent.
pub fn filter_rows(profile: &DistributorProfile, table: &mut StatementTable) -> Result<()> {
    if !profile.row_filter.needs_column() {
        return Ok(());
    }
    let col = table.require_column(&profile.filter_column)?;
    let filter = &profile.row_filter;
    table.retain_rows(|row| row.get(col).is_some_and(|cell| filter.matches(cell)));
    Ok(())
}

/// Deduct tax from every amount in `amount_col`, returning `(gross, net)`.
///
/// Blank amounts count as zero and are left blank. Anything else that does not parse
/// as a number is an error.
pub fn apply_tax(
    table: &mut StatementTable,
    amount_col: usize,
    number_format: &NumberFormat,
    rate: TaxRate,
) -> Result<(f64, f64)> {
    let parser = number_format
        .parser()
        .map_err(|e| ParseError::malformed(format!("unusable number format: {e}")))?;
    let mut gross = 0.0;
    let mut net = 0.0;
    let mut blanks = 0usize;

    for i in 0..table.len() {
        let amount = match read_amount(table.cell(i, amount_col), &parser) {
            Ok(Some(v)) => v,
            Ok(None) => {
                blanks += 1;
                continue;
            }
            Err(raw) => {
                let column = table.headers.get(amount_col).cloned().unwrap_or_default();
                return Err(ParseError::malformed(format!(
                    "filtered row {}: amount {raw:?} in column {column:?} is not a number",
                    i + 1
                )));
            }
        };

        let adjusted = rate.apply(amount);
        gross += amount;
        net += adjusted;
        table.set_cell(i, amount_col, Cell::Number(adjusted));
    }

    if blanks > 0 {
        warn!(blanks, "blank amounts counted as zero");
    }
    Ok((gross, net))
}

fn read_amount(cell: &Cell, parser: &AmountParser) -> std::result::Result<Option<f64>, String> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => parser.parse(s).map(Some).ok_or_else(|| s.clone()),
        Cell::Bool(b) => Err(b.to_string()),
    }
}
