//! Static per-distributor parsing rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::distributor::DistributorKind;
use crate::number::NumberFormat;
use crate::table::Cell;
use crate::tax::TaxRate;

/// Labels we collect royalties for unless configured otherwise.
pub const DEFAULT_LABELS: [&str; 2] = ["Elemess", "Elemess Label Services"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileFormat {
    Delimited { delimiter: u8 },
    Spreadsheet { sheet: String },
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Delimited { delimiter } => {
                write!(f, "CSV (delimiter '{}')", *delimiter as char)
            }
            FileFormat::Spreadsheet { sheet } => write!(f, "XLSX (sheet \"{sheet}\")"),
        }
    }
}

/// Which rows of a statement belong to us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RowFilter {
    /// Every row is kept.
    Any,
    /// Filter column must equal one of the labels exactly.
    LabelIn(Vec<String>),
    /// Filter column must contain the substring (case-sensitive); blank cells never match.
    Contains(String),
}

impl RowFilter {
    pub fn matches(&self, cell: &Cell) -> bool {
        match self {
            RowFilter::Any => true,
            RowFilter::LabelIn(labels) => {
                if cell.is_blank() {
                    return false;
                }
                let value = cell.to_string();
                labels.iter().any(|l| *l == value)
            }
            RowFilter::Contains(needle) => {
                if cell.is_blank() {
                    return false;
                }
                cell.to_string().contains(needle.as_str())
            }
        }
    }

    pub fn needs_column(&self) -> bool {
        !matches!(self, RowFilter::Any)
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::Any => f.write_str("all rows"),
            RowFilter::LabelIn(labels) => write!(f, "labels: {}", labels.join(", ")),
            RowFilter::Contains(needle) => write!(f, "containing \"{needle}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributorProfile {
    pub kind: DistributorKind,
    pub file_format: FileFormat,
    pub number_format: NumberFormat,
    pub filter_column: String,
    pub row_filter: RowFilter,
    pub amount_column: String,
    pub default_tax_rate: TaxRate,
}

impl DistributorProfile {
    /// Built-in profile using [`DEFAULT_LABELS`].
    pub fn for_kind(kind: DistributorKind) -> Self {
        let labels = DEFAULT_LABELS.iter().map(|s| s.to_string()).collect();
        Self::with_labels(kind, labels)
    }

    /// Built-in profile with a custom label set (ignored by distributors that do not filter on labels).
    pub fn with_labels(kind: DistributorKind, labels: Vec<String>) -> Self {
        let default_tax_rate = TaxRate::new(kind.default_tax_rate_percent())
            .unwrap_or(TaxRate::ZERO);

        match kind {
            DistributorKind::Fuga => Self {
                kind,
                file_format: FileFormat::Delimited { delimiter: b',' },
                number_format: NumberFormat::default(),
                filter_column: "Product Label".to_string(),
                row_filter: RowFilter::LabelIn(labels),
                amount_column: "Reported Royalty".to_string(),
                default_tax_rate,
            },
            DistributorKind::Altafonte => Self {
                kind,
                file_format: FileFormat::Delimited { delimiter: b';' },
                number_format: NumberFormat::european(),
                filter_column: "SELLO".to_string(),
                row_filter: RowFilter::LabelIn(labels),
                amount_column: "NET".to_string(),
                default_tax_rate,
            },
            DistributorKind::Onerpm => Self {
                kind,
                file_format: FileFormat::Spreadsheet {
                    sheet: "Sales".to_string(),
                },
                number_format: NumberFormat::default(),
                filter_column: "Label".to_string(),
                row_filter: RowFilter::Any,
                amount_column: "Net".to_string(),
                default_tax_rate,
            },
            DistributorKind::OnerpmShareIn => Self {
                kind,
                file_format: FileFormat::Spreadsheet {
                    sheet: "Shares In & Out".to_string(),
                },
                number_format: NumberFormat::default(),
                filter_column: "Share Type".to_string(),
                row_filter: RowFilter::Contains("In".to_string()),
                amount_column: "Net".to_string(),
                default_tax_rate,
            },
        }
    }

    pub fn with_default_tax_rate(mut self, rate: TaxRate) -> Self {
        self.default_tax_rate = rate;
        self
    }
}
