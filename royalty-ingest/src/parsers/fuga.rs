//! FUGA royalty statement parser
//!
//! Plain comma-separated export, period decimals:
//!   Sale Start date,Sale End date,DSP,Product Label,...,Reported Royalty,Currency
//!
//! Only rows whose `Product Label` is one of ours are kept.

use royalty_core::{DistributorKind, DistributorProfile, NormalizedResult, Result};

use crate::normalize::normalize_with_profile;

pub fn parse_fuga_statement(bytes: &[u8], tax_rate_percent: f64) -> Result<NormalizedResult> {
    let profile = DistributorProfile::for_kind(DistributorKind::Fuga);
    normalize_with_profile(&profile, bytes, tax_rate_percent)
}
