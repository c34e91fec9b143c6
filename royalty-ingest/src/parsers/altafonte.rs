//! Altafonte royalty statement parser
//!
//! Semicolon-separated export with Spanish number formatting:
//!   PERIODO;TIENDA;SELLO;ARTISTA;TITULO;...;NET
//!   2024-01;Spotify;Elemess;...;1.000,50
//!
//! `SELLO` (label) selects our rows, `NET` carries the royalty.

use royalty_core::{DistributorKind, DistributorProfile, NormalizedResult, Result};

use crate::normalize::normalize_with_profile;

pub fn parse_altafonte_statement(bytes: &[u8], tax_rate_percent: f64) -> Result<NormalizedResult> {
    let profile = DistributorProfile::for_kind(DistributorKind::Altafonte);
    normalize_with_profile(&profile, bytes, tax_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use royalty_core::{Cell, ParseError};

    const STATEMENT: &str = "\
PERIODO;TIENDA;SELLO;ARTISTA;NET
2024-01;Spotify;Elemess;Artist A;1.000,50
2024-01;YouTube;Otro Sello;Artist B;25,00
2024-01;Deezer;Elemess Label Services;Artist C;0,25
";

    #[test]
    fn test_parses_locale_amounts() {
        let res = parse_altafonte_statement(STATEMENT.as_bytes(), 0.0).unwrap();
        assert_eq!(res.row_count(), 2);
        let net = res.rows.column_index("NET").unwrap();
        assert_eq!(res.rows.cell(0, net), &Cell::Number(1000.50));
        assert_eq!(res.gross_total, 1000.75);
        assert_eq!(res.net_total, res.gross_total);
    }

    #[test]
    fn test_default_rate_deduction() {
        let res = parse_altafonte_statement(STATEMENT.as_bytes(), 28.5).unwrap();
        let expected = 1000.75 * (1.0 - 0.285);
        assert!((res.net_total - expected).abs() / expected < 1e-6);
    }

    #[test]
    fn test_comma_separated_file_is_rejected() {
        // A FUGA-style file read with ';' collapses into a single column.
        let data = "Product Label,Reported Royalty\nElemess,1.0\n";
        let err = parse_altafonte_statement(data.as_bytes(), 28.5).unwrap_err();
        assert!(matches!(err, ParseError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_us_formatted_amount_is_malformed() {
        let data = "SELLO;NET\nElemess;1,000.50\n";
        let err = parse_altafonte_statement(data.as_bytes(), 28.5).unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(_)));
    }
}
