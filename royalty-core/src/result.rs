//! Normalized output shared by every distributor adapter.

use serde::{Deserialize, Serialize};

use crate::distributor::DistributorKind;
use crate::table::StatementTable;
use crate::tax::TaxRate;

/// Filtered, tax-adjusted statement plus its totals.
///
/// `gross_total` is the sum of the amount column before adjustment and
/// `net_total` the sum after it, so `net_total ≈ gross_total * (1 - rate/100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub distributor: DistributorKind,
    pub tax_rate: TaxRate,
    pub rows: StatementTable,
    pub gross_total: f64,
    pub net_total: f64,
}

impl NormalizedResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn tax_withheld(&self) -> f64 {
        self.gross_total - self.net_total
    }

    pub fn processed_file_name(&self) -> String {
        self.distributor.processed_file_name()
    }
}
