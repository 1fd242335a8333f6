//! spendwise-ingest: ledger CSV parsing and dataset storage.

pub mod error;
pub mod ledger_csv;
pub mod store;

pub use error::{IngestError, Result};
pub use ledger_csv::{REQUIRED_COLUMNS, parse_date, parse_ledger_csv, parse_ledger_reader, write_ledger};
pub use store::{BUNDLED_SAMPLE, DatasetSource, DatasetStore};
