//! royalty-ingest: distributor statement readers, per-distributor adapters and the normalizer.

pub mod export;
pub mod normalize;
pub mod parsers;
pub mod readers;

pub use export::{write_processed_csv, ProcessedFile, PROCESSED_MIME};
pub use normalize::{normalize_reader_with_profile, normalize_table, normalize_with_profile};

use royalty_core::{DistributorKind, NormalizedResult, Result};

/// Normalize a statement using the built-in profile for `distributor`.
pub fn normalize(
    distributor: DistributorKind,
    bytes: &[u8],
    tax_rate_percent: f64,
) -> Result<NormalizedResult> {
    match distributor {
        DistributorKind::Fuga => parsers::parse_fuga_statement(bytes, tax_rate_percent),
        DistributorKind::Altafonte => parsers::parse_altafonte_statement(bytes, tax_rate_percent),
        DistributorKind::Onerpm => parsers::parse_onerpm_statement(bytes, tax_rate_percent),
        DistributorKind::OnerpmShareIn => {
            parsers::parse_onerpm_share_in_statement(bytes, tax_rate_percent)
        }
    }
}
