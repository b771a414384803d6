// File I/O: roster persistence and import readers

pub mod csv;
pub mod error;
pub mod store;
pub mod xlsx;

use std::path::Path;

use hrdesk_recon::RawTable;

pub use error::StoreError;
pub use store::{CsvRosterStore, MemoryRosterStore, RosterStore};

/// Extensions read as delimited text.
const TEXT_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Extensions read as a workbook (first sheet only).
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Read an import file into a raw table, choosing the reader by extension.
pub fn read_import(path: &Path) -> Result<RawTable, StoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ext == "tsv" {
        csv::read_table_with_delimiter(path, b'\t')
    } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        csv::read_table(path)
    } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        xlsx::read_first_sheet(path)
    } else {
        Err(StoreError::UnsupportedFormat(ext))
    }
}
