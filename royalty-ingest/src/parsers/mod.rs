//! One adapter per distributor; each pins the profile and delegates to the shared pipeline.

pub mod altafonte;
pub mod fuga;
pub mod onerpm;
pub mod onerpm_share_in;

pub use altafonte::parse_altafonte_statement;
pub use fuga::parse_fuga_statement;
pub use onerpm::parse_onerpm_statement;
pub use onerpm_share_in::parse_onerpm_share_in_statement;
