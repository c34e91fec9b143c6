//! Terminal and JSON rendering of normalization results.

use chrono::{DateTime, Utc};
use royalty_core::{DistributorProfile, NormalizedResult, StatementTable};
use serde::Serialize;
use std::path::PathBuf;

/// `€ 1,234.56`
pub fn format_eur(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("€ {sign}{grouped}.{frac_part}")
}

pub fn print_result(profile: &DistributorProfile, result: &NormalizedResult, preview_rows: usize) {
    println!("## {}\n", result.distributor);
    println!("Showing only rows matching {}", profile.row_filter);
    println!(
        "Rows: {} | Tax rate: {}",
        result.row_count(),
        result.tax_rate
    );
    println!("Gross royalties: {}", format_eur(result.gross_total));
    println!("Net royalties:   {}", format_eur(result.net_total));
    println!();

    if result.rows.is_empty() {
        println!("(no matching rows)");
    } else {
        print_preview(&result.rows, preview_rows);
    }
}

fn print_preview(table: &StatementTable, limit: usize) {
    println!("{}", table.headers.join(" | "));
    for row in 0..table.len().min(limit) {
        let cells: Vec<String> = (0..table.headers.len())
            .map(|col| table.cell(row, col).to_string())
            .collect();
        println!("{}", cells.join(" | "));
    }
    if table.len() > limit {
        println!("... {} more rows", table.len() - limit);
    }
}

/// Machine-readable summary of one `process` run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub distributor: String,
    pub files: Vec<FileOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Processed {
        input: PathBuf,
        output: PathBuf,
        rows: usize,
        tax_rate: f64,
        gross_total: f64,
        net_total: f64,
    },
    Failed {
        input: PathBuf,
        error: String,
    },
}

impl RunSummary {
    pub fn new(distributor: &str) -> Self {
        Self {
            generated_at: Utc::now(),
            distributor: distributor.to_string(),
            files: Vec::new(),
        }
    }

    pub fn failures(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f, FileOutcome::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eur() {
        assert_eq!(format_eur(0.0), "€ 0.00");
        assert_eq!(format_eur(12.346), "€ 12.35");
        assert_eq!(format_eur(1234.5), "€ 1,234.50");
        assert_eq!(format_eur(1234567.891), "€ 1,234,567.89");
        assert_eq!(format_eur(-999.999), "€ -1,000.00");
        assert_eq!(format_eur(-0.001), "€ 0.00");
    }

    #[test]
    fn test_summary_json_shape() {
        let mut summary = RunSummary::new("fuga");
        summary.files.push(FileOutcome::Failed {
            input: PathBuf::from("bad.csv"),
            error: "malformed input: x".into(),
        });
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["distributor"], "fuga");
        assert_eq!(json["files"][0]["status"], "failed");
        assert_eq!(summary.failures(), 1);
    }
}
