//! ONErpm share statement parser (incoming shares only)
//!
//! Same workbook as the sales export, but read from the "Shares In & Out" sheet.
//! A row is ours when its `Share Type` contains "In" (case-sensitive); rows with no
//! share type are dropped. The returned table holds only those rows, so the rows
//! and the totals always describe the same subset.

use royalty_core::{DistributorKind, DistributorProfile, NormalizedResult, Result};

use crate::normalize::normalize_with_profile;

pub fn parse_onerpm_share_in_statement(
    bytes: &[u8],
    tax_rate_percent: f64,
) -> Result<NormalizedResult> {
    let profile = DistributorProfile::for_kind(DistributorKind::OnerpmShareIn);
    normalize_with_profile(&profile, bytes, tax_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use royalty_core::Cell;
    use rust_xlsxwriter::Workbook;

    /// Workbook with a decoy "Sales" sheet first, then the share sheet.
    fn workbook(share_rows: &[(Option<&str>, f64)]) -> Vec<u8> {
        let mut wb = Workbook::new();

        let sales = wb.add_worksheet();
        sales.set_name("Sales").unwrap();
        sales.write_string(0, 0, "Net").unwrap();
        sales.write_number(1, 0, 999.0).unwrap();

        let shares = wb.add_worksheet();
        shares.set_name("Shares In & Out").unwrap();
        for (c, h) in ["Title", "Share Type", "Net"].iter().enumerate() {
            shares.write_string(0, c as u16, *h).unwrap();
        }
        for (i, (share_type, net)) in share_rows.iter().enumerate() {
            let r = i as u32 + 1;
            shares.write_string(r, 0, format!("Track {r}")).unwrap();
            if let Some(t) = share_type {
                shares.write_string(r, 1, *t).unwrap();
            }
            shares.write_number(r, 2, *net).unwrap();
        }
        wb.save_to_buffer().unwrap()
    }

    #[test]
    fn test_only_incoming_shares_are_kept() {
        let data = workbook(&[
            (Some("Share-In"), 10.0),
            (Some("Share-Out"), 20.0),
            (None, 40.0),
            (Some("Share-In"), 5.0),
        ]);
        let res = parse_onerpm_share_in_statement(&data, 0.0).unwrap();
        assert_eq!(res.row_count(), 2);
        assert_eq!(res.gross_total, 15.0);
        assert_eq!(res.net_total, 15.0);

        let titles: Vec<_> = res.rows.column(0).map(|c| c.to_string()).collect();
        assert_eq!(titles, vec!["Track 1", "Track 4"]);
    }

    #[test]
    fn test_rows_and_totals_agree() {
        let data = workbook(&[(Some("Share-In"), 8.0), (Some("Share-Out"), 100.0)]);
        let res = parse_onerpm_share_in_statement(&data, 25.0).unwrap();
        let net_col = res.rows.column_index("Net").unwrap();
        let row_sum: f64 = res
            .rows
            .column(net_col)
            .map(|c| match c {
                Cell::Number(n) => *n,
                _ => 0.0,
            })
            .sum();
        assert_eq!(row_sum, res.net_total);
        assert_eq!(res.net_total, 6.0);
    }

    #[test]
    fn test_no_incoming_shares() {
        let data = workbook(&[(Some("Share-Out"), 3.0)]);
        let res = parse_onerpm_share_in_statement(&data, 18.5).unwrap();
        assert!(res.rows.is_empty());
        assert_eq!(res.gross_total, 0.0);
        assert_eq!(res.net_total, 0.0);
    }
}
