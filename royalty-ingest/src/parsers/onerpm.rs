//! ONErpm sales statement parser
//!
//! XLSX workbook; only the "Sales" sheet is read. Every row on that sheet is already
//! ours, so nothing is filtered. Royalties are in the `Net` column.

use royalty_core::{DistributorKind, DistributorProfile, NormalizedResult, Result};

use crate::normalize::normalize_with_profile;

pub fn parse_onerpm_statement(bytes: &[u8], tax_rate_percent: f64) -> Result<NormalizedResult> {
    let profile = DistributorProfile::for_kind(DistributorKind::Onerpm);
    normalize_with_profile(&profile, bytes, tax_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use royalty_core::{Cell, ParseError};
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn workbook(sheet: &str) -> Vec<u8> {
        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.set_name(sheet).unwrap();
        for (c, h) in ["Store", "Label", "Net"].iter().enumerate() {
            ws.write_string(0, c as u16, *h).unwrap();
        }
        let rows = [("Spotify", "Elemess", 12.0), ("TikTok", "Somebody", 3.0)];
        for (r, (store, label, net)) in rows.iter().enumerate() {
            let r = r as u32 + 1;
            ws.write_string(r, 0, *store).unwrap();
            ws.write_string(r, 1, *label).unwrap();
            ws.write_number(r, 2, *net).unwrap();
        }
        wb.save_to_buffer().unwrap()
    }

    #[test]
    fn test_keeps_every_sales_row() {
        let res = parse_onerpm_statement(&workbook("Sales"), 50.0).unwrap();
        assert_eq!(res.row_count(), 2);
        assert_eq!(res.gross_total, 15.0);
        assert_eq!(res.net_total, 7.5);
        assert_eq!(res.rows.cell(0, 2), &Cell::Number(6.0));
        assert_eq!(res.rows.cell(1, 0), &Cell::Text("TikTok".into()));
    }

    #[test]
    fn test_date_columns_render_as_text() {
        let mut wb = Workbook::new();
        let ws = wb.add_worksheet();
        ws.set_name("Sales").unwrap();
        for (c, h) in ["Period", "Reported At", "Net"].iter().enumerate() {
            ws.write_string(0, c as u16, *h).unwrap();
        }
        let date_fmt = Format::new().set_num_format("yyyy-mm-dd");
        let stamp_fmt = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        let day = ExcelDateTime::from_ymd(2024, 1, 31).unwrap();
        let stamp = ExcelDateTime::from_ymd(2024, 2, 1)
            .unwrap()
            .and_hms(12, 0, 0)
            .unwrap();
        ws.write_datetime_with_format(1, 0, &day, &date_fmt).unwrap();
        ws.write_datetime_with_format(1, 1, &stamp, &stamp_fmt).unwrap();
        ws.write_number(1, 2, 4.0).unwrap();
        let data = wb.save_to_buffer().unwrap();

        let res = parse_onerpm_statement(&data, 0.0).unwrap();
        assert_eq!(res.rows.cell(0, 0), &Cell::Text("2024-01-31".into()));
        assert_eq!(res.rows.cell(0, 1), &Cell::Text("2024-02-01 12:00:00".into()));
        assert_eq!(res.gross_total, 4.0);
    }

    #[test]
    fn test_missing_sales_sheet() {
        let err = parse_onerpm_statement(&workbook("Summary"), 18.5).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(msg) if msg.contains("Sales")));
    }

    #[test]
    fn test_csv_upload_is_malformed() {
        let err = parse_onerpm_statement(b"Label,Net\nElemess,1\n", 18.5).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(_)));
    }
}
