use serde::Serialize;

use crate::classify::normalize_columns;
use crate::error::ReconError;
use crate::merge::merge_with_stats;
use crate::model::{CanonicalField, EmployeeRecord, NormalizedTable, RawTable, Roster};
use crate::phone::normalize_phone;

/// Counts reported back to the caller after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub added: usize,
    pub updated: usize,
    pub unparseable_dates: usize,
    pub dropped_columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub roster: Roster,
    pub summary: ImportSummary,
    /// Non-fatal problems, one line each, for display to the operator.
    pub warnings: Vec<String>,
}

/// Normalize a raw imported table and merge it into `existing`.
///
/// Fails only when a canonical column is missing, before anything is merged.
/// Unparseable birth dates become `None` and are reported as warnings.
pub fn import_batch(existing: &Roster, table: &RawTable) -> Result<ImportOutcome, ReconError> {
    let normalized = normalize_columns(table)?;
    let mut warnings = Vec::new();

    for (column, field) in &normalized.superseded {
        log::debug!("column '{column}' superseded for {field}");
        warnings.push(format!("column '{column}' ignored: a later column also maps to {field}"));
    }
    if !normalized.dropped.is_empty() {
        log::info!("dropping unmapped columns: {:?}", normalized.dropped);
    }

    let (batch, date_errors) = records_from_table(&normalized);
    warnings.extend(date_errors.iter().map(ToString::to_string));

    let (roster, stats) = merge_with_stats(existing, &batch);
    log::debug!(
        "import merged {} rows: {} added, {} replaced, roster size {} -> {}",
        batch.len(),
        stats.added,
        stats.replaced,
        existing.len(),
        roster.len(),
    );

    Ok(ImportOutcome {
        roster,
        summary: ImportSummary {
            rows_read: batch.len(),
            added: stats.added,
            updated: stats.replaced,
            unparseable_dates: date_errors.len(),
            dropped_columns: normalized.dropped,
        },
        warnings,
    })
}

/// Turn normalized columns into records. Rows are never dropped; a bad date
/// keeps its text on the record and yields an [`ReconError::UnparseableDate`].
pub fn records_from_table(table: &NormalizedTable) -> (Vec<EmployeeRecord>, Vec<ReconError>) {
    let mut records = Vec::with_capacity(table.row_count());
    let mut errors = Vec::new();

    for row in 0..table.row_count() {
        let record = EmployeeRecord::from_cells(
            table.cell(CanonicalField::FullName, row),
            table.cell(CanonicalField::BirthDate, row),
            normalize_phone(table.cell(CanonicalField::Phone, row)),
        );
        if let Some(value) = &record.unparsed_birth_date {
            errors.push(ReconError::UnparseableDate {
                // 1-based data row, header excluded
                row: row + 1,
                value: value.clone(),
            });
        }
        records.push(record);
    }

    (records, errors)
}
