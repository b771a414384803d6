//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args, unsupported file type)    |
//! | 3    | Roster, import or settings file cannot be read/written |
//! | 4    | Import rejected (a required column is missing)       |
//! | 5    | Employee not found in the roster                     |
//! | 6    | Malformed CSV or workbook                            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `CliError::store` or the relevant command

use hrdesk_io::StoreError;
use hrdesk_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing confirmation, unsupported import type.
pub const EXIT_USAGE: u8 = 2;

/// Roster, import or settings file cannot be read or written.
pub const EXIT_STORE_UNAVAILABLE: u8 = 3;

/// Import rejected before anything was saved.
pub const EXIT_IMPORT_REJECTED: u8 = 4;

/// No employee matches the requested name (and phone).
pub const EXIT_NOT_FOUND: u8 = 5;

/// Malformed CSV or unreadable workbook.
pub const EXIT_PARSE: u8 = 6;

/// Map a store error to its exit code.
pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::StoreUnavailable { .. } => EXIT_STORE_UNAVAILABLE,
        StoreError::Csv { .. } | StoreError::Workbook { .. } => EXIT_PARSE,
        StoreError::UnsupportedFormat(_) => EXIT_USAGE,
        StoreError::Recon(ReconError::MissingRequiredField(_)) => EXIT_IMPORT_REJECTED,
        StoreError::Recon(ReconError::UnparseableDate { .. }) => EXIT_ERROR,
    }
}
