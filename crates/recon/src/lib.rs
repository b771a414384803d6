//! `hrdesk-recon` - Employee roster reconciliation.
//!
//! Pure engine crate: receives an existing roster and a raw imported table,
//! returns the merged roster. No filesystem or CLI dependencies.

pub mod classify;
pub mod dates;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod phone;

pub use classify::{classify_column, normalize_columns, ColumnClass};
pub use engine::{import_batch, ImportOutcome, ImportSummary};
pub use error::ReconError;
pub use merge::{append_or_update, merge, reset};
pub use model::{CanonicalField, EmployeeRecord, NormalizedTable, RawTable, RecordKey, Roster};
pub use phone::normalize_phone;
