pub mod json_backend;

use crate::{errors::Result, ledger::AccountRecord};

/// Abstraction over providers of raw account extracts.
pub trait RecordSource {
    fn load_records(&self) -> Result<Vec<AccountRecord>>;
}

pub use json_backend::{load_extract_file, ExtractRecord, JsonExtractStore};
