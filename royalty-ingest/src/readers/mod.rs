//! Raw file readers: bytes in, [`StatementTable`](royalty_core::StatementTable) out.

pub mod delimited;
pub mod spreadsheet;

pub use delimited::read_delimited;
pub use spreadsheet::read_sheet;
