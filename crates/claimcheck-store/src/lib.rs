//! Storage layer: CSV and Parquet case tables over Arrow record batches.

mod error;
pub use error::StoreError;

mod sink;
mod source;
pub use sink::{summary_batch, write_table};
pub use source::{CaseTable, TableFormat};
