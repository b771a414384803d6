use thiserror::Error;

use crate::model::CanonicalField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconError {
    /// No input column could be classified as this field. The import is rejected.
    #[error("import has no column for {0} (expected a header such as {hint})", hint = .0.example_header())]
    MissingRequiredField(CanonicalField),
    /// Birth date cell that no known format accepts. Non-fatal: the record keeps the text and no date.
    #[error("row {row}: cannot parse birth date '{value}'")]
    UnparseableDate { row: usize, value: String },
}
