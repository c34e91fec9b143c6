//! royalty-core: distributor profiles, statement tables and the normalized result type

pub mod distributor;
pub mod error;
pub mod number;
pub mod profile;
pub mod result;
pub mod table;
pub mod tax;

pub use distributor::DistributorKind;
pub use error::{ParseError, Result, UnknownDistributor};
pub use number::{AmountParser, NumberFormat};
pub use profile::{DistributorProfile, FileFormat, RowFilter, DEFAULT_LABELS};
pub use result::NormalizedResult;
pub use table::{Cell, StatementTable};
pub use tax::TaxRate;
